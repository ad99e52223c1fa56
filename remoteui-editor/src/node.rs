//! The editable node tagged union.
//!
//! Every schema field, and every list element, becomes one [`EditableNode`].
//! Dispatch is by variant; the three tree-wide operations are validity,
//! serialization and error application.

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::blob::BlobNode;
use crate::choice::ChoiceNode;
use crate::custom::CustomNode;
use crate::error::Result;
use crate::list::ListNode;
use crate::multi_select::OrderedMultiSelectNode;
use crate::nullable::NullableNode;
use crate::object::ObjectNode;
use crate::text::{CheckboxNode, TextAreaNode, TextNode};

#[derive(Debug)]
pub enum EditableNode {
    Text(TextNode),
    TextArea(TextAreaNode),
    Checkbox(CheckboxNode),
    Choice(ChoiceNode),
    List(ListNode),
    OrderedMultiSelect(OrderedMultiSelectNode),
    Nullable(NullableNode),
    Blob(BlobNode),
    Object(ObjectNode),
    Custom(Box<dyn CustomNode>),
}

impl EditableNode {
    /// Variant name, for logs.
    pub fn variant(&self) -> &'static str {
        match self {
            EditableNode::Text(_) => "text",
            EditableNode::TextArea(_) => "text_area",
            EditableNode::Checkbox(_) => "checkbox",
            EditableNode::Choice(_) => "choice",
            EditableNode::List(_) => "list",
            EditableNode::OrderedMultiSelect(_) => "ordered_multi_select",
            EditableNode::Nullable(_) => "nullable",
            EditableNode::Blob(_) => "blob",
            EditableNode::Object(_) => "object",
            EditableNode::Custom(_) => "custom",
        }
    }

    /// Recomputed on every call; nothing is cached.
    pub fn is_valid(&self) -> bool {
        match self {
            EditableNode::Text(node) => node.is_valid(),
            EditableNode::TextArea(node) => node.is_valid(),
            EditableNode::Checkbox(_) => true,
            EditableNode::Choice(node) => node.is_valid(),
            EditableNode::List(node) => node.is_valid(),
            EditableNode::OrderedMultiSelect(_) => true,
            EditableNode::Nullable(node) => node.is_valid(),
            EditableNode::Blob(_) => true,
            EditableNode::Object(node) => node.is_valid(),
            EditableNode::Custom(node) => node.is_valid(),
        }
    }

    /// The node's raw value. Composite nodes resolve once all of their
    /// children have.
    pub fn get_data(&self) -> BoxFuture<'_, Result<Value>> {
        match self {
            EditableNode::Text(node) => ready(node.get_data()),
            EditableNode::TextArea(node) => ready(node.get_data()),
            EditableNode::Checkbox(node) => ready(node.get_data()),
            EditableNode::Choice(node) => ready(node.get_data()),
            EditableNode::OrderedMultiSelect(node) => ready(node.get_data()),
            EditableNode::List(node) => node.get_data(),
            EditableNode::Nullable(node) => node.get_data(),
            EditableNode::Object(node) => node.get_data(),
            EditableNode::Blob(node) => node.get_data().boxed(),
            EditableNode::Custom(node) => node.get_data(),
        }
    }

    /// Apply the error payload found at this node's position.
    ///
    /// Composite nodes distribute the payload to their children and return
    /// `None`. Leaves return the message their slot should display.
    pub fn set_errors(&mut self, errors: Option<&Value>) -> Option<String> {
        match self {
            EditableNode::List(node) => {
                node.set_errors(errors);
                None
            }
            EditableNode::Object(node) => {
                node.set_errors(errors);
                None
            }
            EditableNode::Nullable(node) => node.set_errors(errors),
            EditableNode::Custom(node) => node.set_errors(errors),
            _ => leaf_error(errors),
        }
    }
}

macro_rules! accessors {
    ($($variant:ident => $ty:ty, $as_ref:ident, $as_mut:ident;)+) => {
        impl EditableNode {
            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        EditableNode::$variant(node) => Some(node),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        EditableNode::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            )+
        }
    };
}

accessors! {
    Text => TextNode, as_text, as_text_mut;
    TextArea => TextAreaNode, as_text_area, as_text_area_mut;
    Checkbox => CheckboxNode, as_checkbox, as_checkbox_mut;
    Choice => ChoiceNode, as_choice, as_choice_mut;
    List => ListNode, as_list, as_list_mut;
    OrderedMultiSelect => OrderedMultiSelectNode, as_multi_select, as_multi_select_mut;
    Nullable => NullableNode, as_nullable, as_nullable_mut;
    Blob => BlobNode, as_blob, as_blob_mut;
    Object => ObjectNode, as_object, as_object_mut;
}

impl EditableNode {
    pub fn as_custom(&self) -> Option<&dyn CustomNode> {
        match self {
            EditableNode::Custom(node) => Some(node.as_ref()),
            _ => None,
        }
    }

    pub fn as_custom_mut(&mut self) -> Option<&mut (dyn CustomNode + 'static)> {
        match self {
            EditableNode::Custom(node) => Some(node.as_mut()),
            _ => None,
        }
    }
}

fn ready(value: Value) -> BoxFuture<'static, Result<Value>> {
    future::ready(Ok(value)).boxed()
}

/// Message shown at a leaf for its slice of the error payload.
///
/// `null`, an absent entry and the empty string clear the error; other
/// non-string values are shown in their JSON form.
pub fn leaf_error(errors: Option<&Value>) -> Option<String> {
    match errors? {
        Value::Null => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextKind;
    use serde_json::json;

    #[test]
    fn test_leaf_error_stringifies_payload() {
        assert_eq!(leaf_error(None), None);
        assert_eq!(leaf_error(Some(&Value::Null)), None);
        assert_eq!(leaf_error(Some(&json!(""))), None);
        assert_eq!(leaf_error(Some(&json!("bad"))), Some("bad".to_string()));
        assert_eq!(leaf_error(Some(&json!(42))), Some("42".to_string()));
    }

    #[tokio::test]
    async fn test_leaf_dispatch() {
        let mut node = EditableNode::Text(TextNode::new(TextKind::String, false, &json!("x")));
        assert_eq!(node.variant(), "text");
        assert_eq!(node.get_data().await.unwrap(), json!("x"));
        assert_eq!(node.set_errors(Some(&json!("bad"))).as_deref(), Some("bad"));
        node.as_text_mut().unwrap().set_value("");
        assert!(!node.is_valid());
        assert!(node.as_list().is_none());
    }
}
