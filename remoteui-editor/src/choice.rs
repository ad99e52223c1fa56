//! Radio and select leaves.

use remoteui_schema::PossibleValue;
use serde_json::Value;

/// Single choice among a field's possible values.
///
/// Radio fields always render a selection, so only strict selects can be
/// left without one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceNode {
    possible_values: Vec<PossibleValue>,
    value: Option<String>,
    nullable: bool,
    select: bool,
}

impl ChoiceNode {
    pub fn new(select: bool, possible_values: Vec<PossibleValue>, nullable: bool, raw: &Value) -> Self {
        let value = match raw {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        Self {
            possible_values,
            value,
            nullable,
            select,
        }
    }

    pub fn possible_values(&self) -> &[PossibleValue] {
        &self.possible_values
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_select(&self) -> bool {
        self.select
    }

    pub fn set_value(&mut self, id: Option<&str>) {
        self.value = id.map(str::to_string);
    }

    /// The selected id, or the first possible value's id when nothing is
    /// selected.
    pub fn get_data(&self) -> Value {
        match self.value.as_deref() {
            // An empty id reads as unset here but still counts as a choice in is_valid
            Some(id) if !id.is_empty() => Value::String(id.to_string()),
            _ => self
                .possible_values
                .first()
                .and_then(|v| v.id.clone())
                .map_or(Value::Null, Value::String),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.nullable
            || !self.select
            || self.value.is_some()
            || self.possible_values.iter().any(|v| v.id.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colors() -> Vec<PossibleValue> {
        vec![PossibleValue::new("red", "Red"), PossibleValue::new("green", "Green")]
    }

    #[test]
    fn test_unset_choice_falls_back_to_first_value() {
        let node = ChoiceNode::new(false, colors(), false, &Value::Null);
        assert_eq!(node.get_data(), json!("red"));
        assert!(node.is_valid());
    }

    #[test]
    fn test_strict_select_needs_a_value() {
        let mut node = ChoiceNode::new(true, colors(), false, &Value::Null);
        assert!(!node.is_valid());
        node.set_value(Some("green"));
        assert!(node.is_valid());
        assert_eq!(node.get_data(), json!("green"));
    }

    #[test]
    fn test_null_option_makes_select_valid() {
        let mut values = colors();
        values.insert(0, PossibleValue::none("(none)"));
        let node = ChoiceNode::new(true, values, false, &Value::Null);
        assert!(node.is_valid());
        assert_eq!(node.get_data(), Value::Null);
    }

    #[test]
    fn test_empty_id_is_valid_but_serializes_first_value() {
        let mut node = ChoiceNode::new(true, colors(), false, &Value::Null);
        node.set_value(Some(""));
        assert!(node.is_valid());
        assert_eq!(node.get_data(), json!("red"));
    }

    #[test]
    fn test_nullable_select_is_valid_without_value() {
        let node = ChoiceNode::new(true, colors(), true, &Value::Null);
        assert!(node.is_valid());
    }
}
