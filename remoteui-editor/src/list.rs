//! List nodes and their items.

use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde_json::Value;
use tracing::trace;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::factory::{create_node, NodeSpec};
use crate::node::EditableNode;

/// One list element with its session-local identity.
#[derive(Debug)]
pub struct ListItem {
    id: u64,
    node: EditableNode,
    error: Option<String>,
}

impl ListItem {
    /// Identity for UI reconciliation. Never serialized, never reused
    /// within the owning list.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn node(&self) -> &EditableNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut EditableNode {
        &mut self.node
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self, highlight: bool) -> bool {
        self.error.is_some() || (highlight && !self.node.is_valid())
    }

    fn set_errors(&mut self, errors: Option<&Value>) {
        self.error = self.node.set_errors(errors);
    }
}

/// Ordered, editable list of elements of one type.
#[derive(Debug)]
pub struct ListNode {
    config: EditorConfig,
    element: NodeSpec,
    items: Vec<ListItem>,
    next_id: u64,
}

impl ListNode {
    pub(crate) fn new(config: EditorConfig, element: NodeSpec, raw: &Value) -> Result<Self> {
        let mut list = Self {
            config,
            element,
            items: Vec::new(),
            next_id: 1,
        };
        if let Value::Array(values) = raw {
            for value in values {
                list.push(value)?;
            }
        }
        Ok(list)
    }

    fn push(&mut self, raw: &Value) -> Result<u64> {
        let node = create_node(&self.config, &self.element, raw)?;
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(ListItem {
            id,
            node,
            error: None,
        });
        Ok(id)
    }

    /// Element type name.
    pub fn element_type(&self) -> &str {
        self.element.type_.as_str()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [ListItem] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: u64) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: u64) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Append a freshly initialized element and return its id.
    pub fn add_item(&mut self) -> Result<u64> {
        let id = self.push(&Value::Null)?;
        trace!(element = self.element_type(), id, "list item added");
        Ok(id)
    }

    pub fn remove_item(&mut self, id: u64) -> Option<ListItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Move the element at `from` to `to`, keeping the others in order.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        move_element(&mut self.items, from, to)
    }

    pub fn get_data(&self) -> BoxFuture<'_, Result<Value>> {
        async move {
            let values = try_join_all(self.items.iter().map(|item| item.node.get_data())).await?;
            Ok(Value::Array(values))
        }
        .boxed()
    }

    pub fn is_valid(&self) -> bool {
        self.items.iter().all(|item| item.node.is_valid())
    }

    /// Errors are matched to elements by position. Elements past the end of
    /// the payload are cleared.
    pub fn set_errors(&mut self, errors: Option<&Value>) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_errors(errors.and_then(|e| e.get(index)));
        }
    }
}

/// Move `items[from]` to position `to`. Out-of-range indices leave the
/// vector untouched.
pub(crate) fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
