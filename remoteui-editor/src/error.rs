//! Error types for editor construction and serialization

use thiserror::Error;

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors raised while building a node tree or reading its data.
///
/// Construction errors mean the schema and the editor disagree and are
/// never retried. Validation messages from the server are not errors; they
/// travel through `set_errors` as plain data.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A nested-object or list element type is absent from the definition
    #[error("unknown type: {type_name}")]
    UnknownTypeReference { type_name: String },

    /// A list field reached the factory without an element type
    #[error("list field '{field}' has no element type")]
    MissingListType { field: String },

    /// A choice field reached the factory without possible values
    #[error("field of kind {kind} has no possible values")]
    MissingPossibleValues { kind: String },

    /// A custom field was built without a resolver configured
    #[error("no custom type resolver configured for '{custom_type}'")]
    MissingResolver { custom_type: String },

    /// The resolver produced nothing for a custom type
    #[error("custom type '{custom_type}' could not be resolved")]
    UnresolvedCustomType { custom_type: String },

    /// A custom node failed while producing its value
    #[error("custom node '{custom_type}' failed: {message}")]
    Custom {
        custom_type: String,
        message: String,
    },

    /// Reading the bytes of a selected blob failed
    #[error("unable to read file '{name}': {source}")]
    BlobRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    pub fn custom(custom_type: impl Into<String>, message: impl ToString) -> Self {
        EditorError::Custom {
            custom_type: custom_type.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditorError::UnknownTypeReference {
            type_name: "Address".into(),
        };
        assert_eq!(err.to_string(), "unknown type: Address");
    }

    #[test]
    fn test_blob_read_keeps_source() {
        use std::error::Error as _;
        let err = EditorError::BlobRead {
            name: "avatar.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("avatar.png"));
        assert!(err.source().is_some());
    }
}
