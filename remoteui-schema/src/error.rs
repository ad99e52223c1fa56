//! Error types for schema building and wire conversion

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Boxed error returned by possible-value providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while registering types, building a definition, or
/// converting objects to and from their wire form.
///
/// Everything except the wire variants indicates a malformed schema
/// declaration and is surfaced at build time.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The same Rust type was registered twice
    #[error("type already registered: {type_name}")]
    DuplicateType { type_name: &'static str },

    /// Two registrations share a registry name
    #[error("registry name already in use: {name}")]
    DuplicateTypeName { name: String },

    /// A registry name shadows a predefined field kind
    #[error("registry name collides with a predefined field kind: {name}")]
    ReservedTypeName { name: String },

    /// A member's native type matches no inference rule
    #[error("unknown field type for member '{member}' of '{owner}': {native}")]
    UnknownFieldType {
        owner: String,
        member: String,
        native: String,
    },

    /// A list field's element type is not in the registry
    #[error("list element type of '{member}' in '{owner}' is not registered: {element}")]
    UnregisteredListElement {
        owner: String,
        member: String,
        element: String,
    },

    /// A nested-object field names a type that is not in the registry
    #[error("field '{member}' in '{owner}' references unknown type '{type_name}'")]
    UnknownTypeReference {
        owner: String,
        member: String,
        type_name: String,
    },

    /// A list field without any way to determine its element type
    #[error("field '{member}' in '{owner}' declares a list without an element type")]
    MissingListType { owner: String, member: String },

    /// A field refers to a group its type never declared
    #[error("field '{member}' in '{owner}' refers to undeclared group '{group}'")]
    UnknownGroup {
        owner: String,
        member: String,
        group: String,
    },

    /// Two fields of one type map to the same wire id
    #[error("wire id '{id}' is produced by more than one field of '{owner}'")]
    DuplicateFieldId { owner: String, id: String },

    /// A dynamic possible-value provider failed
    #[error("possible values provider for '{member}' in '{owner}' failed: {source}")]
    Provider {
        owner: String,
        member: String,
        #[source]
        source: BoxError,
    },

    /// A payload value could not be written into, or read from, a field
    #[error("wire conversion failed for '{field}': {message}")]
    Wire { field: String, message: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn wire(field: impl Into<String>, message: impl ToString) -> Self {
        SchemaError::Wire {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::DuplicateTypeName {
            name: "Test".into(),
        };
        assert_eq!(err.to_string(), "registry name already in use: Test");
    }

    #[test]
    fn test_unknown_field_type_names_member() {
        let err = SchemaError::UnknownFieldType {
            owner: "Dto".into(),
            member: "created_at".into(),
            native: "SystemTime".into(),
        };
        assert!(err.to_string().contains("created_at"));
        assert!(err.to_string().contains("SystemTime"));
    }
}
