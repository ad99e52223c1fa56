//! Nullable wrapper for lazily built kinds.

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;
use tracing::trace;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::factory::{build, NodeSpec};
use crate::node::{leaf_error, EditableNode};

/// Holds an inner node only while the value is present.
///
/// The inner node is always built from the raw value the wrapper was
/// created with, so deleting and re-creating it starts from scratch.
#[derive(Debug)]
pub struct NullableNode {
    config: EditorConfig,
    spec: NodeSpec,
    seed: Value,
    inner: Option<Box<EditableNode>>,
}

impl NullableNode {
    pub(crate) fn new(config: EditorConfig, spec: NodeSpec, raw: &Value) -> Result<Self> {
        let mut node = Self {
            config,
            spec,
            seed: raw.clone(),
            inner: None,
        };
        if !raw.is_null() {
            node.create_inner()?;
        }
        Ok(node)
    }

    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    pub fn inner(&self) -> Option<&EditableNode> {
        self.inner.as_deref()
    }

    pub fn inner_mut(&mut self) -> Option<&mut EditableNode> {
        self.inner.as_deref_mut()
    }

    /// Build a fresh inner node, replacing any existing one.
    pub fn create_inner(&mut self) -> Result<&mut EditableNode> {
        let node = build(&self.config, &self.spec, &self.seed)?;
        trace!(kind = %self.spec.type_, "nullable inner created");
        let inner = self.inner.insert(Box::new(node));
        Ok(inner.as_mut())
    }

    pub fn delete_inner(&mut self) {
        self.inner = None;
    }

    pub fn get_data(&self) -> BoxFuture<'_, Result<Value>> {
        match &self.inner {
            Some(inner) => inner.get_data(),
            None => future::ready(Ok(Value::Null)).boxed(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.inner.as_ref().is_none_or(|inner| inner.is_valid())
    }

    pub fn set_errors(&mut self, errors: Option<&Value>) -> Option<String> {
        match &mut self.inner {
            Some(inner) => inner.set_errors(errors),
            None => leaf_error(errors),
        }
    }
}
