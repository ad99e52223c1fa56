//! Error types for the playground

use std::path::PathBuf;
use thiserror::Error;

/// Result type for playground operations
pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[derive(Error, Debug)]
pub enum PlaygroundError {
    /// Configuration layers could not be merged or extracted
    #[error("Failed to load configuration: {source}")]
    Config { source: Box<figment::Error> },

    /// Failed to read an input payload
    #[error("Failed to read payload {path}: {source}")]
    PayloadRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input payload is not valid JSON
    #[error("Payload is not valid JSON: {0}")]
    PayloadParse(#[from] serde_json::Error),

    /// Schema error
    #[error(transparent)]
    Schema(#[from] remoteui_schema::SchemaError),

    /// Editor error
    #[error(transparent)]
    Editor(#[from] remoteui_editor::EditorError),
}

impl From<figment::Error> for PlaygroundError {
    fn from(error: figment::Error) -> Self {
        PlaygroundError::Config {
            source: Box::new(error),
        }
    }
}
