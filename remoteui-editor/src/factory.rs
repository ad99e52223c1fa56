//! Editable node factory.
//!
//! [`create_node`] turns one schema field (or list element) plus its raw
//! value into an [`EditableNode`]. Nullable fields of lazily built kinds are
//! wrapped in a [`NullableNode`] whose inner node comes from [`build`].

use remoteui_schema::{FieldDefinition, FieldKind, FieldType, PossibleValue};
use serde_json::Value;
use tracing::trace;

use crate::blob::BlobNode;
use crate::choice::ChoiceNode;
use crate::config::EditorConfig;
use crate::custom::CustomNodeRequest;
use crate::error::{EditorError, Result};
use crate::list::ListNode;
use crate::multi_select::OrderedMultiSelectNode;
use crate::node::EditableNode;
use crate::nullable::NullableNode;
use crate::object::ObjectNode;
use crate::text::{CheckboxNode, TextAreaNode, TextKind, TextNode};

/// The schema slice the factory needs to build one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    /// Field id, or element type name for list elements. Used in errors.
    pub label: String,
    pub type_: FieldType,
    pub list_type: Option<String>,
    pub custom_type: Option<String>,
    pub nullable: bool,
    pub possible_values: Option<Vec<PossibleValue>>,
}

impl NodeSpec {
    pub fn of(field: &FieldDefinition) -> Self {
        Self {
            label: field.id.clone(),
            type_: field.type_.clone(),
            list_type: field.list_type.clone(),
            custom_type: field.custom_type.clone(),
            nullable: field.nullable,
            possible_values: field.possible_values.clone(),
        }
    }

    /// A list element: not nullable, no possible values.
    pub fn element(config: &EditorConfig, name: &str) -> Self {
        Self {
            label: name.to_string(),
            type_: element_type(config, name),
            list_type: None,
            custom_type: None,
            nullable: false,
            possible_values: None,
        }
    }
}

/// Registered types win over predefined kinds spelled in another case.
fn element_type(config: &EditorConfig, name: &str) -> FieldType {
    if let Some(kind) = FieldKind::from_name(name) {
        return kind.into();
    }
    if config.definition().resolve(name).is_some() {
        return FieldType::reference(name);
    }
    FieldKind::from_name_ignore_case(name)
        .map(FieldType::from)
        .unwrap_or_else(|| FieldType::reference(name))
}

/// Kinds whose construction a nullable wrapper defers.
fn is_deferred(type_: &FieldType) -> bool {
    match type_.kind() {
        None => true,
        Some(kind) => matches!(
            kind,
            FieldKind::Radio
                | FieldKind::Select
                | FieldKind::StringList
                | FieldKind::List
                | FieldKind::OrderedMultiSelect
                | FieldKind::Custom
        ),
    }
}

/// Build the node for `spec` seeded with `raw`.
///
/// Type references are checked up front, even when construction is
/// deferred behind a nullable wrapper.
pub fn create_node(config: &EditorConfig, spec: &NodeSpec, raw: &Value) -> Result<EditableNode> {
    check_references(config, spec)?;
    if spec.nullable && is_deferred(&spec.type_) {
        trace!(field = %spec.label, kind = %spec.type_, present = !raw.is_null(), "nullable wrapper");
        return Ok(EditableNode::Nullable(NullableNode::new(
            config.clone(),
            spec.clone(),
            raw,
        )?));
    }
    build(config, spec, raw)
}

/// Build the node for `spec` without nullable deferral.
pub(crate) fn build(config: &EditorConfig, spec: &NodeSpec, raw: &Value) -> Result<EditableNode> {
    let kind = match &spec.type_ {
        FieldType::Reference(name) => {
            let definition = config.definition().resolve(name).ok_or_else(|| {
                EditorError::UnknownTypeReference {
                    type_name: name.clone(),
                }
            })?;
            return Ok(EditableNode::Object(ObjectNode::new(config, name, definition, raw)?));
        }
        FieldType::Kind(kind) => *kind,
    };

    let node = match kind {
        FieldKind::String => EditableNode::Text(TextNode::new(TextKind::String, spec.nullable, raw)),
        FieldKind::Integer => EditableNode::Text(TextNode::new(TextKind::Integer, spec.nullable, raw)),
        FieldKind::Number => EditableNode::Text(TextNode::new(TextKind::Number, spec.nullable, raw)),
        FieldKind::TextArea => EditableNode::TextArea(TextAreaNode::new(spec.nullable, raw)),
        FieldKind::CheckBox => EditableNode::Checkbox(CheckboxNode::new(raw)),
        FieldKind::FileBase64 => EditableNode::Blob(BlobNode::new(spec.nullable, raw)),
        FieldKind::Radio | FieldKind::Select => EditableNode::Choice(ChoiceNode::new(
            kind == FieldKind::Select,
            required_values(spec, kind)?,
            spec.nullable,
            raw,
        )),
        FieldKind::OrderedMultiSelect => EditableNode::OrderedMultiSelect(
            OrderedMultiSelectNode::new(required_values(spec, kind)?, raw),
        ),
        FieldKind::StringList | FieldKind::List => {
            let element = list_element(spec)?;
            EditableNode::List(ListNode::new(
                config.clone(),
                NodeSpec::element(config, element),
                raw,
            )?)
        }
        FieldKind::Custom => custom(config, spec, raw)?,
    };
    Ok(node)
}

/// StringList is a list of `String` elements.
fn list_element(spec: &NodeSpec) -> Result<&str> {
    if spec.type_.is(FieldKind::StringList) {
        return Ok(FieldKind::String.as_str());
    }
    spec.list_type
        .as_deref()
        .ok_or_else(|| EditorError::MissingListType {
            field: spec.label.clone(),
        })
}

fn required_values(spec: &NodeSpec, kind: FieldKind) -> Result<Vec<PossibleValue>> {
    spec.possible_values
        .clone()
        .ok_or_else(|| EditorError::MissingPossibleValues {
            kind: kind.to_string(),
        })
}

fn custom(config: &EditorConfig, spec: &NodeSpec, raw: &Value) -> Result<EditableNode> {
    let custom_type = spec.custom_type.as_deref().unwrap_or_default();
    let resolver = config
        .resolver()
        .ok_or_else(|| EditorError::MissingResolver {
            custom_type: custom_type.to_string(),
        })?;
    let request = CustomNodeRequest {
        custom_type,
        possible_values: spec.possible_values.as_deref().unwrap_or_default(),
        nullable: spec.nullable,
        raw,
        context: config.context(),
    };
    let node = if spec.custom_type.is_some() {
        resolver.resolve(&request)
    } else {
        None
    };
    node.map(EditableNode::Custom)
        .ok_or_else(|| EditorError::UnresolvedCustomType {
            custom_type: custom_type.to_string(),
        })
}

/// Shallow check that every type this node may build is known.
fn check_references(config: &EditorConfig, spec: &NodeSpec) -> Result<()> {
    let unknown = |name: &str| EditorError::UnknownTypeReference {
        type_name: name.to_string(),
    };
    match &spec.type_ {
        FieldType::Reference(name) => {
            config
                .definition()
                .resolve(name)
                .ok_or_else(|| unknown(name))?;
        }
        FieldType::Kind(FieldKind::List) => {
            let element = list_element(spec)?;
            if !config.definition().knows(element) {
                return Err(unknown(element));
            }
        }
        FieldType::Kind(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoteui_schema::{Definition, FieldGroupDefinition, TypeDefinition};
    use serde_json::json;
    use std::sync::Arc;

    fn config_with(types: &[(&str, TypeDefinition)]) -> EditorConfig {
        let definition = Definition {
            types: types
                .iter()
                .map(|(name, def)| (name.to_string(), def.clone()))
                .collect(),
            ..Definition::default()
        };
        EditorConfig::new(Arc::new(definition))
    }

    fn address() -> TypeDefinition {
        let mut group = FieldGroupDefinition::new("", "");
        group.fields.push(FieldDefinition::new("street", "Street", FieldKind::String));
        TypeDefinition {
            groups: vec![group],
        }
    }

    fn spec(type_: impl Into<FieldType>) -> NodeSpec {
        NodeSpec {
            label: "field".into(),
            type_: type_.into(),
            list_type: None,
            custom_type: None,
            nullable: false,
            possible_values: None,
        }
    }

    #[test]
    fn test_leaf_kinds_map_to_variants() {
        let config = config_with(&[]);
        let cases = [
            (FieldKind::String, "text"),
            (FieldKind::Integer, "text"),
            (FieldKind::TextArea, "text_area"),
            (FieldKind::CheckBox, "checkbox"),
            (FieldKind::FileBase64, "blob"),
            (FieldKind::StringList, "list"),
        ];
        for (kind, variant) in cases {
            let node = create_node(&config, &spec(kind), &Value::Null).unwrap();
            assert_eq!(node.variant(), variant, "{kind}");
        }
    }

    #[test]
    fn test_nullable_wraps_only_deferred_kinds() {
        let config = config_with(&[("Address", address())]);

        let mut text = spec(FieldKind::String);
        text.nullable = true;
        assert_eq!(create_node(&config, &text, &Value::Null).unwrap().variant(), "text");

        let mut object = spec(FieldType::reference("Address"));
        object.nullable = true;
        let node = create_node(&config, &object, &Value::Null).unwrap();
        assert!(!node.as_nullable().unwrap().is_present());

        let node = create_node(&config, &object, &json!({"street": "Main"})).unwrap();
        let inner = node.as_nullable().unwrap().inner().unwrap();
        assert_eq!(inner.as_object().unwrap().type_name(), "Address");
    }

    #[test]
    fn test_unknown_reference_fails_fast_even_when_deferred() {
        let config = config_with(&[]);
        let mut object = spec(FieldType::reference("Missing"));
        object.nullable = true;
        let err = create_node(&config, &object, &Value::Null).unwrap_err();
        assert!(matches!(err, EditorError::UnknownTypeReference { ref type_name } if type_name == "Missing"));
    }

    #[test]
    fn test_list_requires_known_element_type() {
        let config = config_with(&[]);
        let mut list = spec(FieldKind::List);
        assert!(matches!(
            create_node(&config, &list, &Value::Null).unwrap_err(),
            EditorError::MissingListType { .. }
        ));
        list.list_type = Some("Nowhere".into());
        assert!(matches!(
            create_node(&config, &list, &Value::Null).unwrap_err(),
            EditorError::UnknownTypeReference { .. }
        ));
    }

    #[test]
    fn test_element_type_accepts_lowercase_kind_names() {
        let config = config_with(&[]);
        assert_eq!(
            NodeSpec::element(&config, "string").type_,
            FieldType::Kind(FieldKind::String)
        );
        let config = config_with(&[("string", address())]);
        assert_eq!(
            NodeSpec::element(&config, "string").type_,
            FieldType::reference("string")
        );
    }

    #[test]
    fn test_choice_without_values_fails() {
        let config = config_with(&[]);
        let err = create_node(&config, &spec(FieldKind::Select), &Value::Null).unwrap_err();
        assert!(matches!(err, EditorError::MissingPossibleValues { .. }));
    }

    #[test]
    fn test_custom_without_resolver_fails() {
        let config = config_with(&[]);
        let mut custom = spec(FieldKind::Custom);
        custom.custom_type = Some("Color".into());
        let err = create_node(&config, &custom, &Value::Null).unwrap_err();
        assert!(matches!(err, EditorError::MissingResolver { .. }));
    }
}
