//! Extension point for field kinds the editor does not know.
//!
//! A field of kind `Custom` carries an opaque `customType` tag. The editor
//! hands the tag, the field's possible values and its raw value to the
//! configured [`CustomTypeResolver`], which returns the node to edit it.

use std::any::Any;
use std::fmt;

use async_trait::async_trait;
use remoteui_schema::PossibleValue;
use serde_json::Value;

use crate::config::EditorContext;
use crate::error::Result;
use crate::node::leaf_error;

/// An editable node supplied by the embedding application.
#[async_trait]
pub trait CustomNode: Send + Sync + fmt::Debug {
    /// Current raw value.
    async fn get_data(&self) -> Result<Value>;

    fn is_valid(&self) -> bool {
        true
    }

    /// Apply the error payload at this node's position.
    ///
    /// Returns the message to show beside the node, if any. Nodes with
    /// inner structure can consume the payload themselves and return `None`.
    fn set_errors(&mut self, errors: Option<&Value>) -> Option<String> {
        leaf_error(errors)
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Everything a resolver gets to build one custom node.
#[derive(Debug, Clone, Copy)]
pub struct CustomNodeRequest<'a> {
    pub custom_type: &'a str,
    pub possible_values: &'a [PossibleValue],
    pub nullable: bool,
    pub raw: &'a Value,
    /// The opaque context from the editor configuration.
    pub context: Option<&'a EditorContext>,
}

/// Builds custom nodes by type tag.
pub trait CustomTypeResolver: Send + Sync {
    /// `None` when this resolver does not know the tag.
    fn resolve(&self, request: &CustomNodeRequest<'_>) -> Option<Box<dyn CustomNode>>;
}

impl<F> CustomTypeResolver for F
where
    F: Fn(&CustomNodeRequest<'_>) -> Option<Box<dyn CustomNode>> + Send + Sync,
{
    fn resolve(&self, request: &CustomNodeRequest<'_>) -> Option<Box<dyn CustomNode>> {
        self(request)
    }
}
