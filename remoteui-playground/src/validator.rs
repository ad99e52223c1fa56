//! Demo validator producing a field-level error tree.

use remoteui_schema::Wire;
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::Dto;

/// Reject the payload with messages for every demo-relevant field.
///
/// The tree mirrors the payload shape and uses the same wire keys, so it
/// can be handed straight to an editor session's `set_errors`.
pub fn validate(wire: &Wire, dto: &Dto) -> Value {
    debug!(
        strings = dto.base.list_of_strings.len(),
        objects = dto.base.list_of_objects.len(),
        "validating playground payload"
    );

    let mut errors = Map::new();
    errors.insert(wire.key_for("SomeString"), Value::from("Error in string"));
    errors.insert(
        wire.key_for("ListOfStrings"),
        Value::Array(vec![Value::Null, Value::from("Error in second element")]),
    );

    let mut first = Map::new();
    first.insert(
        wire.key_for("SomeString"),
        Value::from("Error in first object"),
    );
    let mut second = Map::new();
    second.insert(
        wire.key_for("ListOfStrings"),
        Value::Array(vec![Value::from("Error in second object")]),
    );
    errors.insert(
        wire.key_for("ListOfObjects"),
        Value::Array(vec![Value::Object(first), Value::Object(second)]),
    );

    Value::Object(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::initial;
    use remoteui_schema::NamingStyle;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_error_tree_uses_wire_keys() {
        let wire = Wire::new(Arc::new(NamingStyle::Snake));
        let errors = validate(&wire, &initial());
        assert_eq!(
            errors,
            json!({
                "some_string": "Error in string",
                "list_of_strings": [null, "Error in second element"],
                "list_of_objects": [
                    {"some_string": "Error in first object"},
                    {"list_of_strings": ["Error in second object"]}
                ]
            })
        );
    }

    #[test]
    fn test_verbatim_keys() {
        let errors = validate(&Wire::default(), &initial());
        assert!(errors.get("SomeString").is_some());
        assert!(errors.get("ListOfObjects").is_some());
    }
}
