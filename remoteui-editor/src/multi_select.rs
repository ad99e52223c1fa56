//! Ordered multi-select: an ordered subset of a field's possible values.

use remoteui_schema::PossibleValue;
use serde_json::Value;

use crate::list::move_element;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMultiSelectNode {
    possible_values: Vec<PossibleValue>,
    included: Vec<PossibleValue>,
}

impl OrderedMultiSelectNode {
    /// `raw` is the ordered list of included ids. Ids that match no possible
    /// value are dropped, as are repeats.
    pub fn new(possible_values: Vec<PossibleValue>, raw: &Value) -> Self {
        let mut included: Vec<PossibleValue> = Vec::new();
        for id in raw.as_array().into_iter().flatten().filter_map(Value::as_str) {
            if included.iter().any(|v| v.id.as_deref() == Some(id)) {
                continue;
            }
            if let Some(value) = possible_values.iter().find(|v| v.id.as_deref() == Some(id)) {
                included.push(value.clone());
            }
        }
        Self {
            possible_values,
            included,
        }
    }

    pub fn included(&self) -> &[PossibleValue] {
        &self.included
    }

    /// Values not included, in declaration order.
    pub fn excluded(&self) -> Vec<&PossibleValue> {
        self.possible_values
            .iter()
            .filter(|v| !self.included.contains(v))
            .collect()
    }

    /// Toggle inclusion of the value with this id. Newly included values go
    /// last. Returns `false` for an id the field does not offer.
    pub fn arrange_item(&mut self, id: Option<&str>) -> bool {
        if let Some(pos) = self.included.iter().position(|v| v.id.as_deref() == id) {
            self.included.remove(pos);
            return true;
        }
        match self.possible_values.iter().find(|v| v.id.as_deref() == id) {
            Some(value) => {
                self.included.push(value.clone());
                true
            }
            None => false,
        }
    }

    /// Move an included value. Excluded values have no order of their own.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        move_element(&mut self.included, from, to)
    }

    pub fn get_data(&self) -> Value {
        Value::Array(
            self.included
                .iter()
                .map(|v| v.id.clone().map_or(Value::Null, Value::String))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn steps() -> Vec<PossibleValue> {
        vec![
            PossibleValue::new("build", "Build"),
            PossibleValue::new("test", "Test"),
            PossibleValue::new("deploy", "Deploy"),
        ]
    }

    #[test]
    fn test_partition_follows_raw_order_and_drops_unknown_ids() {
        let node = OrderedMultiSelectNode::new(steps(), &json!(["deploy", "nope", "build", "deploy"]));
        assert_eq!(node.get_data(), json!(["deploy", "build"]));
        let excluded: Vec<_> = node.excluded().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(excluded, vec!["Test"]);
    }

    #[test]
    fn test_arrange_item_toggles_inclusion() {
        let mut node = OrderedMultiSelectNode::new(steps(), &Value::Null);
        assert!(node.included().is_empty());
        assert!(node.arrange_item(Some("test")));
        assert!(node.arrange_item(Some("build")));
        assert_eq!(node.get_data(), json!(["test", "build"]));

        assert!(node.arrange_item(Some("test")));
        assert_eq!(node.get_data(), json!(["build"]));
        assert_eq!(node.excluded().len(), 2);
        assert!(!node.arrange_item(Some("missing")));
    }

    #[test]
    fn test_reorder_moves_included_values_only() {
        let mut node = OrderedMultiSelectNode::new(steps(), &json!(["build", "test", "deploy"]));
        assert!(node.reorder(2, 0));
        assert_eq!(node.get_data(), json!(["deploy", "build", "test"]));
        assert!(!node.reorder(5, 0));
    }
}
