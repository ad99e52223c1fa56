//! Editable state tree for RemoteUi schemas
//!
//! An [`EditorStore`] combines a [`remoteui_schema::Definition`] with raw
//! JSON data into a tree of [`EditableNode`]s. The tree is mutated through
//! typed node handles, serialized back with
//! [`get_data`](EditorStore::get_data), and annotated with the server's
//! field-level messages through [`set_errors`](EditorStore::set_errors).
//!
//! ```rust,ignore
//! let config = EditorConfig::new(ui.definition().clone());
//! let mut store = EditorStore::new(config, &data)?;
//! store
//!     .root_mut()
//!     .control_mut("name")
//!     .and_then(EditableNode::as_text_mut)
//!     .map(|text| text.set_value("renamed"));
//! let payload = store.get_data().await?;
//! store.set_errors(Some(&validate(&payload)));
//! ```

pub mod blob;
pub mod choice;
pub mod config;
pub mod custom;
pub mod error;
pub mod factory;
pub mod list;
pub mod multi_select;
pub mod node;
pub mod nullable;
pub mod object;
pub mod store;
pub mod text;

pub use blob::{BlobNode, BlobSource, FileBlob, MemoryBlob, EXISTING_FILE_MARKER};
pub use choice::ChoiceNode;
pub use config::{EditorConfig, EditorContext};
pub use custom::{CustomNode, CustomNodeRequest, CustomTypeResolver};
pub use error::{EditorError, Result};
pub use factory::{create_node, NodeSpec};
pub use list::{ListItem, ListNode};
pub use multi_select::OrderedMultiSelectNode;
pub use node::{leaf_error, EditableNode};
pub use nullable::NullableNode;
pub use object::{FieldNode, GroupNode, ObjectNode};
pub use store::EditorStore;
pub use text::{CheckboxNode, TextAreaNode, TextKind, TextNode};
