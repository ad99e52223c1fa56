//! Demo object model served by the playground.
//!
//! `Dto` is the root type. It carries the same members as `DtoBase`, which
//! is registered under the name `Test` and reused for the nested object list.

use remoteui_schema::{
    FieldAttr, GroupAttr, Member, NamingStrategy, Registration, RemoteUi, RemoteUiBuilder,
    RemoteUiObject, Result,
};

/// Shared members of the root and the nested list element.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DtoBase {
    pub list_of_strings: Vec<String>,
    pub override_list: Vec<String>,
    pub some_string: String,
    pub list_of_objects: Vec<DtoBase>,
    pub some_float: f64,
    pub read_only_example: ReadOnlyDtoBase,
}

/// Root type of the playground schema.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dto {
    pub base: DtoBase,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReadOnlyDtoBase {
    pub read_only_string: String,
    pub list_of_read_only_strings: Vec<ReadOnlyInnerDto>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReadOnlyInnerDto {
    pub title: String,
}

/// Types that embed the shared base members.
trait WithBase {
    fn base(&self) -> &DtoBase;
    fn base_mut(&mut self) -> &mut DtoBase;
}

impl WithBase for DtoBase {
    fn base(&self) -> &DtoBase {
        self
    }

    fn base_mut(&mut self) -> &mut DtoBase {
        self
    }
}

impl WithBase for Dto {
    fn base(&self) -> &DtoBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DtoBase {
        &mut self.base
    }
}

const COMMON_GROUP: GroupAttr = GroupAttr::new("", "Common");

fn base_members<T>() -> Vec<Member<T>>
where
    T: RemoteUiObject + WithBase,
{
    vec![
        Member::field(
            "ListOfStrings",
            FieldAttr::new("List of strings"),
            |d: &T| &d.base().list_of_strings,
            |d: &mut T| &mut d.base_mut().list_of_strings,
        ),
        Member::field(
            "OverrideList",
            FieldAttr::new("Overided ID List").id("OverrideMe"),
            |d: &T| &d.base().override_list,
            |d: &mut T| &mut d.base_mut().override_list,
        ),
        Member::field(
            "SomeString",
            FieldAttr::new("SomeString"),
            |d: &T| &d.base().some_string,
            |d: &mut T| &mut d.base_mut().some_string,
        ),
        Member::object_list(
            "ListOfObjects",
            FieldAttr::new("ListOfObjects"),
            |d: &T| &d.base().list_of_objects,
            |d: &mut T| &mut d.base_mut().list_of_objects,
        ),
        Member::field(
            "SomeFloat",
            FieldAttr::new("Some float"),
            |d: &T| &d.base().some_float,
            |d: &mut T| &mut d.base_mut().some_float,
        ),
        Member::object(
            "ReadOnlyExample",
            FieldAttr::new("Read Only Model").read_only(),
            |d: &T| &d.base().read_only_example,
            |d: &mut T| &mut d.base_mut().read_only_example,
        ),
    ]
}

impl RemoteUiObject for DtoBase {
    fn groups() -> Vec<GroupAttr> {
        vec![COMMON_GROUP]
    }

    fn members() -> Vec<Member<Self>> {
        base_members()
    }
}

impl RemoteUiObject for Dto {
    fn groups() -> Vec<GroupAttr> {
        vec![COMMON_GROUP]
    }

    fn members() -> Vec<Member<Self>> {
        base_members()
    }
}

impl RemoteUiObject for ReadOnlyDtoBase {
    fn members() -> Vec<Member<Self>> {
        vec![
            Member::field(
                "ReadOnlyString",
                FieldAttr::new("Read only string").read_only(),
                |d| &d.read_only_string,
                |d| &mut d.read_only_string,
            ),
            Member::object_list(
                "ListOfReadOnlyStrings",
                FieldAttr::new("List of read only strings")
                    .read_only()
                    .list_of::<ReadOnlyInnerDto>(),
                |d| &d.list_of_read_only_strings,
                |d| &mut d.list_of_read_only_strings,
            ),
        ]
    }
}

impl RemoteUiObject for ReadOnlyInnerDto {
    fn members() -> Vec<Member<Self>> {
        vec![Member::field(
            "Title",
            FieldAttr::new("Read only title").read_only(),
            |d| &d.title,
            |d| &mut d.title,
        )]
    }
}

/// Build the playground schema with the given naming strategy.
pub fn build_ui(naming: impl NamingStrategy + 'static) -> Result<RemoteUi> {
    let mut builder = RemoteUiBuilder::new(Registration::<Dto>::of()).naming(naming);
    builder
        .register(Registration::<DtoBase>::of().name("Test"))?
        .register(Registration::<ReadOnlyDtoBase>::of())?
        .register(Registration::<ReadOnlyInnerDto>::of())?;
    builder.build(&())
}

/// The object served as the editor's starting data.
pub fn initial() -> Dto {
    Dto {
        base: DtoBase {
            some_string: "Sample Text".to_string(),
            override_list: vec!["123321".to_string()],
            read_only_example: ReadOnlyDtoBase {
                list_of_read_only_strings: vec![
                    ReadOnlyInnerDto {
                        title: "One".to_string(),
                    },
                    ReadOnlyInnerDto {
                        title: "Two".to_string(),
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoteui_schema::{FieldKind, NamingStyle};

    #[test]
    fn test_schema_registers_base_as_test() {
        let ui = build_ui(NamingStyle::Snake).unwrap();
        let definition = ui.definition();
        assert_eq!(definition.root_type.as_deref(), Some("Dto"));
        assert!(definition.types.contains_key("Test"));
        assert!(definition.types.contains_key("ReadOnlyDtoBase"));
        assert!(definition.types.contains_key("ReadOnlyInnerDto"));
    }

    #[test]
    fn test_root_fields_use_snake_ids_and_override() {
        let ui = build_ui(NamingStyle::Snake).unwrap();
        let ids: Vec<&str> = ui.definition().root.fields().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "list_of_strings",
                "OverrideMe",
                "some_string",
                "list_of_objects",
                "some_float",
                "read_only_example",
            ]
        );
    }

    #[test]
    fn test_inferred_kinds() {
        let ui = build_ui(NamingStyle::Verbatim).unwrap();
        let root = &ui.definition().root;
        let list = root.field("ListOfObjects").unwrap();
        assert!(list.type_.is(FieldKind::List));
        assert_eq!(list.list_type.as_deref(), Some("Test"));
        assert!(root.field("SomeFloat").unwrap().type_.is(FieldKind::Number));
        assert!(root
            .field("ListOfStrings")
            .unwrap()
            .type_
            .is(FieldKind::StringList));
        let read_only = root.field("ReadOnlyExample").unwrap();
        assert_eq!(read_only.type_.as_str(), "ReadOnlyDtoBase");
        assert!(read_only.read_only);
    }

    #[test]
    fn test_common_group_renames_default() {
        let ui = build_ui(NamingStyle::Snake).unwrap();
        let groups = &ui.definition().root.groups;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "");
        assert_eq!(groups[0].name, "Common");
    }

    #[test]
    fn test_initial_round_trips() {
        let ui = build_ui(NamingStyle::Snake).unwrap();
        let value = ui.to_value(&initial()).unwrap();
        assert_eq!(value["some_string"], "Sample Text");
        assert_eq!(value["OverrideMe"], serde_json::json!(["123321"]));
        let back: Dto = ui.from_value(value).unwrap();
        assert_eq!(back, initial());
    }
}
