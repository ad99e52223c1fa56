//! Schema model: the passive definitions transmitted to editors.
//!
//! A [`Definition`] is the root type's groups plus every other type reachable
//! from it. All types serialize to the JSON transport shape consumed by
//! editor sessions:
//!
//! ```text
//! { "groups": [{ "name": ..., "fields": [...] }], "types": { "Name": { "groups": [...] } } }
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The closed set of predefined field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    CheckBox,
    Radio,
    Select,
    StringList,
    List,
    FileBase64,
    Custom,
    TextArea,
    OrderedMultiSelect,
}

impl FieldKind {
    pub const ALL: [FieldKind; 12] = [
        FieldKind::String,
        FieldKind::Integer,
        FieldKind::Number,
        FieldKind::CheckBox,
        FieldKind::Radio,
        FieldKind::Select,
        FieldKind::StringList,
        FieldKind::List,
        FieldKind::FileBase64,
        FieldKind::Custom,
        FieldKind::TextArea,
        FieldKind::OrderedMultiSelect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Integer => "Integer",
            FieldKind::Number => "Number",
            FieldKind::CheckBox => "CheckBox",
            FieldKind::Radio => "Radio",
            FieldKind::Select => "Select",
            FieldKind::StringList => "StringList",
            FieldKind::List => "List",
            FieldKind::FileBase64 => "FileBase64",
            FieldKind::Custom => "Custom",
            FieldKind::TextArea => "TextArea",
            FieldKind::OrderedMultiSelect => "OrderedMultiSelect",
        }
    }

    /// Look up a predefined kind by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Like [`FieldKind::from_name`], ignoring ASCII case. Hand-written
    /// definitions tend to spell element types as `"string"`.
    pub fn from_name_ignore_case(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
    }

    /// Kinds whose definitions carry a `possibleValues` list.
    pub fn has_possible_values(self) -> bool {
        matches!(
            self,
            FieldKind::Radio | FieldKind::Select | FieldKind::OrderedMultiSelect | FieldKind::Custom
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Number)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field's declared type: a predefined kind, or the registry name of
/// another type (a nested-object field).
///
/// Serializes as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Kind(FieldKind),
    Reference(String),
}

impl FieldType {
    pub fn reference(name: impl Into<String>) -> Self {
        FieldType::Reference(name.into())
    }

    /// Parse a wire name. Anything that is not a predefined kind is a reference.
    pub fn from_name(name: &str) -> Self {
        match FieldKind::from_name(name) {
            Some(kind) => FieldType::Kind(kind),
            None => FieldType::Reference(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Kind(kind) => kind.as_str(),
            FieldType::Reference(name) => name,
        }
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldType::Kind(kind) => Some(*kind),
            FieldType::Reference(_) => None,
        }
    }

    pub fn is(&self, kind: FieldKind) -> bool {
        self.kind() == Some(kind)
    }
}

impl From<FieldKind> for FieldType {
    fn from(kind: FieldKind) -> Self {
        FieldType::Kind(kind)
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldType::from_name(s))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(FieldType::from_name(&name))
    }
}

/// One option offered by a choice or multi-select field.
///
/// A `None` id denotes the "no selection" option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleValue {
    pub id: Option<String>,
    pub name: String,
}

impl PossibleValue {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }

    /// The "no selection" option.
    pub fn none(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Schema of one editable attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(default)]
    pub always_expanded: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Vec<PossibleValue>>,
}

impl FieldDefinition {
    /// A plain field with no optional attributes set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_: impl Into<FieldType>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            type_: type_.into(),
            list_type: None,
            custom_type: None,
            nullable: false,
            always_expanded: false,
            read_only: false,
            possible_values: None,
        }
    }
}

/// A named partition of a type's fields. The empty id is the default group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroupDefinition {
    #[serde(skip_serializing, default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl FieldGroupDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

/// The groups of one type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(default)]
    pub groups: Vec<FieldGroupDefinition>,
}

impl TypeDefinition {
    /// All fields across groups, group order first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&FieldGroupDefinition> {
        self.groups.iter().find(|g| g.id == id)
    }
}

/// The root schema artifact: the root type plus every registered type.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(flatten)]
    pub root: TypeDefinition,
    #[serde(rename = "rootType", default, skip_serializing_if = "Option::is_none")]
    pub root_type: Option<String>,
    #[serde(default)]
    pub types: IndexMap<String, TypeDefinition>,
}

impl Definition {
    /// Resolve a type name to its definition. The root type resolves by name
    /// even when it was not registered separately.
    pub fn resolve(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name).or_else(|| {
            (self.root_type.as_deref() == Some(name)).then_some(&self.root)
        })
    }

    /// Whether a list element type name can be turned into a control:
    /// either a predefined kind or a resolvable type.
    pub fn knows(&self, name: &str) -> bool {
        self.resolve(name).is_some() || FieldKind::from_name_ignore_case(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_type_serializes_as_plain_string() {
        let kind = serde_json::to_value(FieldType::Kind(FieldKind::CheckBox)).unwrap();
        assert_eq!(kind, json!("CheckBox"));

        let reference = serde_json::to_value(FieldType::reference("Address")).unwrap();
        assert_eq!(reference, json!("Address"));
    }

    #[test]
    fn field_type_parses_unknown_names_as_references() {
        let parsed: FieldType = serde_json::from_value(json!("OrderedMultiSelect")).unwrap();
        assert_eq!(parsed, FieldType::Kind(FieldKind::OrderedMultiSelect));

        let parsed: FieldType = serde_json::from_value(json!("Test")).unwrap();
        assert_eq!(parsed, FieldType::reference("Test"));
    }

    #[test]
    fn field_definition_uses_camel_case_keys() {
        let mut field = FieldDefinition::new("tags", "Tags", FieldKind::List);
        field.list_type = Some("String".into());
        field.read_only = true;
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], json!("List"));
        assert_eq!(value["listType"], json!("String"));
        assert_eq!(value["readOnly"], json!(true));
        assert_eq!(value["alwaysExpanded"], json!(false));
        assert!(value.get("nullable").is_none());
        assert!(value.get("possibleValues").is_none());
    }

    #[test]
    fn group_id_is_not_transmitted() {
        let group = FieldGroupDefinition::new("advanced", "Advanced");
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value, json!({"name": "Advanced", "fields": []}));
    }

    #[test]
    fn definition_flattens_root_groups() {
        let mut def = Definition::default();
        def.root.groups.push(FieldGroupDefinition::new("", ""));
        def.types.insert("Inner".into(), TypeDefinition::default());
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(
            value,
            json!({"groups": [{"name": "", "fields": []}], "types": {"Inner": {"groups": []}}})
        );
        let parsed: Definition = serde_json::from_value(value).unwrap();
        assert!(parsed.types.contains_key("Inner"));
        assert_eq!(parsed.root.groups.len(), 1);
    }

    #[test]
    fn resolve_finds_root_by_name() {
        let def = Definition {
            root_type: Some("Dto".into()),
            ..Definition::default()
        };
        assert!(def.resolve("Dto").is_some());
        assert!(def.resolve("Other").is_none());
        assert!(def.knows("String"));
        assert!(!def.knows("Other"));
    }
}
