//! Playground command implementations.
//!
//! Each command returns the JSON document it prints, so the same code paths
//! serve the binary and the tests.

use std::io::Read;
use std::path::Path;

use remoteui_editor::{EditableNode, EditorConfig, EditorStore, FieldNode};
use remoteui_schema::RemoteUi;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::PlaygroundConfig;
use crate::error::{PlaygroundError, Result};
use crate::model::{self, Dto};
use crate::validator;

/// Outcome of a validation round trip.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// The payload as re-serialized by the editor session
    pub data: Value,
    /// The validator's error tree
    pub errors: Value,
    /// Paths the session renders as erroneous
    pub flagged: Vec<String>,
    pub valid: bool,
}

/// Summary of one field slot in a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub id: String,
    pub name: String,
    pub control: &'static str,
    pub read_only: bool,
    pub expanded: bool,
    pub valid: bool,
}

/// Summary of one group in a session.
#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
    pub expanded: bool,
    pub fields: Vec<FieldSummary>,
}

fn build_ui(config: &PlaygroundConfig) -> Result<RemoteUi> {
    Ok(model::build_ui(config.naming)?)
}

/// The schema definition as served to editors.
pub fn schema(config: &PlaygroundConfig) -> Result<Value> {
    Ok(build_ui(config)?.schema_json()?)
}

/// The initial demo object in wire form.
pub fn initial(config: &PlaygroundConfig) -> Result<Value> {
    Ok(build_ui(config)?.to_value(&model::initial())?)
}

/// Bind `payload` to the demo model, pass it through an editor session and
/// apply the validator's error tree to that session.
pub async fn validate(config: &PlaygroundConfig, payload: Value) -> Result<ValidationReport> {
    let ui = build_ui(config)?;
    let dto: Dto = ui.from_value(payload.clone())?;

    let mut store = EditorStore::new(EditorConfig::new(ui.definition().clone()), &payload)?;
    store.set_highlight_errors(config.highlight_errors);
    let data = store.get_data().await?;

    let errors = validator::validate(ui.wire(), &dto);
    store.set_errors(Some(&errors));

    let flagged = store.flagged_paths();
    info!(flagged = flagged.len(), "payload validated");
    Ok(ValidationReport {
        data,
        errors,
        flagged,
        valid: store.is_valid(),
    })
}

/// Describe the group and field tree of a session over the initial data.
pub fn session(config: &PlaygroundConfig) -> Result<Vec<GroupSummary>> {
    let ui = build_ui(config)?;
    let data = ui.to_value(&model::initial())?;
    let store = EditorStore::new(EditorConfig::new(ui.definition().clone()), &data)?;

    Ok(store
        .root()
        .groups()
        .iter()
        .map(|group| GroupSummary {
            id: group.id().to_string(),
            name: group.name().to_string(),
            expanded: group.is_expanded(),
            fields: group.fields().iter().map(summarize).collect(),
        })
        .collect())
}

fn summarize(field: &FieldNode) -> FieldSummary {
    FieldSummary {
        id: field.id().to_string(),
        name: field.name().to_string(),
        control: control_name(field.control()),
        read_only: field.read_only(),
        expanded: field.is_expanded(),
        valid: field.is_valid(),
    }
}

fn control_name(node: &EditableNode) -> &'static str {
    match node {
        EditableNode::Nullable(nullable) => match nullable.inner() {
            Some(inner) => inner.variant(),
            None => node.variant(),
        },
        other => other.variant(),
    }
}

/// Read a JSON payload from `file`, or from stdin when no file is given.
pub fn read_payload(file: Option<&Path>) -> Result<Value> {
    let text = match file {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|source| PlaygroundError::PayloadRead {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| PlaygroundError::PayloadRead {
                    path: "<stdin>".into(),
                    source,
                })?;
            text
        }
    };
    debug!(bytes = text.len(), "payload read");
    Ok(serde_json::from_str(&text)?)
}

/// Render a document as JSON text.
pub fn render<T: Serialize>(document: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(text)
}
