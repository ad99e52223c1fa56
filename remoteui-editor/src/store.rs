//! Editing session over one root object.

use serde_json::Value;
use tracing::debug;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::node::EditableNode;
use crate::object::ObjectNode;

/// Owns the node tree of one editing session.
#[derive(Debug)]
pub struct EditorStore {
    config: EditorConfig,
    root: ObjectNode,
    highlight_errors: bool,
}

impl EditorStore {
    /// Build the tree for the definition's root type from `data`.
    pub fn new(config: EditorConfig, data: &Value) -> Result<Self> {
        let definition = config.definition();
        let root_type = definition.root_type.clone().unwrap_or_default();
        let root = ObjectNode::new(&config, &root_type, &definition.root, data)?;
        debug!(
            root = %root_type,
            fields = root.fields().count(),
            "editor session created"
        );
        Ok(Self {
            config,
            root,
            highlight_errors: false,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn root(&self) -> &ObjectNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ObjectNode {
        &mut self.root
    }

    pub fn highlight_errors(&self) -> bool {
        self.highlight_errors
    }

    /// Also flag fields that are currently invalid, not only those with a
    /// server message.
    pub fn set_highlight_errors(&mut self, highlight: bool) {
        self.highlight_errors = highlight;
    }

    /// Apply a server error tree shaped like the payload. `None` clears
    /// every message.
    pub fn set_errors(&mut self, errors: Option<&Value>) {
        debug!(clear = errors.is_none_or(serde_json::Value::is_null), "applying error tree");
        self.root.set_errors(errors);
    }

    pub async fn get_data(&self) -> Result<Value> {
        self.root.get_data().await
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_valid()
    }

    /// Paths of every field and list item currently rendered as erroneous,
    /// e.g. `home.street` or `others[1].zip_code`.
    pub fn flagged_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_object(&self.root, "", self.highlight_errors, &mut paths);
        paths
    }
}

fn collect_object(object: &ObjectNode, prefix: &str, highlight: bool, out: &mut Vec<String>) {
    for field in object.fields() {
        let path = if prefix.is_empty() {
            field.id().to_string()
        } else {
            format!("{prefix}.{}", field.id())
        };
        if field.has_error(highlight) {
            out.push(path.clone());
        }
        collect_node(field.control(), &path, highlight, out);
    }
}

fn collect_node(node: &EditableNode, path: &str, highlight: bool, out: &mut Vec<String>) {
    match node {
        EditableNode::Object(object) => collect_object(object, path, highlight, out),
        EditableNode::List(list) => {
            for (index, item) in list.items().iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                if item.has_error(highlight) {
                    out.push(item_path.clone());
                }
                collect_node(item.node(), &item_path, highlight, out);
            }
        }
        EditableNode::Nullable(nullable) => {
            if let Some(inner) = nullable.inner() {
                collect_node(inner, path, highlight, out);
            }
        }
        _ => {}
    }
}
