//! Text, text area and checkbox leaves.
//!
//! Numeric text nodes keep their value as the string the user sees and
//! normalize it on every edit, so the value is always either blank, a
//! canonical number, or a decimal still being typed (`"12."`).

use remoteui_schema::FieldKind;
use serde_json::{Number, Value};

/// Coercion applied by a [`TextNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    String,
    Integer,
    Number,
}

impl TextKind {
    pub fn of(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::String => Some(TextKind::String),
            FieldKind::Integer => Some(TextKind::Integer),
            FieldKind::Number => Some(TextKind::Number),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, TextKind::String)
    }

    fn normalize(self, input: &str) -> String {
        match self {
            TextKind::String => input.to_string(),
            TextKind::Integer => normalize_integer(input),
            TextKind::Number => normalize_number(input),
        }
    }
}

/// Single-line input for String, Integer and Number fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    kind: TextKind,
    nullable: bool,
    value: String,
}

impl TextNode {
    pub fn new(kind: TextKind, nullable: bool, raw: &Value) -> Self {
        let seed = seed_string(raw);
        let value = if kind.is_numeric() {
            kind.normalize(&seed)
        } else {
            seed
        };
        Self {
            kind,
            nullable,
            value,
        }
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, raw: &str) {
        self.value = self.kind.normalize(raw);
    }

    pub fn get_data(&self) -> Value {
        if self.value.is_empty() {
            if self.nullable {
                return Value::Null;
            }
            if self.kind.is_numeric() {
                return Value::from(0);
            }
        }
        match self.kind {
            TextKind::String => Value::String(self.value.clone()),
            TextKind::Integer | TextKind::Number => number_value(&self.value),
        }
    }

    /// Numeric inputs are always valid: they coerce to blank or a number.
    pub fn is_valid(&self) -> bool {
        self.nullable || self.kind.is_numeric() || !self.value.trim().is_empty()
    }
}

/// Multi-line input without numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaNode {
    nullable: bool,
    value: String,
}

impl TextAreaNode {
    pub fn new(nullable: bool, raw: &Value) -> Self {
        Self {
            nullable,
            value: seed_string(raw),
        }
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, raw: impl Into<String>) {
        self.value = raw.into();
    }

    pub fn get_data(&self) -> Value {
        if self.value.is_empty() && self.nullable {
            Value::Null
        } else {
            Value::String(self.value.clone())
        }
    }

    pub fn is_valid(&self) -> bool {
        self.nullable || !self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxNode {
    value: bool,
}

impl CheckboxNode {
    pub fn new(raw: &Value) -> Self {
        Self {
            value: raw.as_bool() == Some(true),
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    pub fn get_data(&self) -> Value {
        Value::Bool(self.value)
    }
}

fn seed_string(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn number_value(value: &str) -> Value {
    if let Ok(n) = value.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = value.parse::<u64>() {
        return Value::from(n);
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}

fn digits_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

/// Longest leading `[+-]digits`.
fn integer_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let start = sign_len(bytes);
    let end = digits_end(bytes, start);
    if end == start {
        ""
    } else {
        &s[..end]
    }
}

/// Longest leading decimal literal, exponent included when complete.
fn decimal_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let start = sign_len(bytes);
    let mut end = digits_end(bytes, start);
    let mut digits = end - start;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_end(bytes, end + 1);
        digits += frac_end - end - 1;
        end = frac_end;
    }
    if digits == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_end(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &s[..end]
}

/// Values outside both `i64` and `u64` clear the input.
fn normalize_integer(input: &str) -> String {
    integer_prefix(input.trim())
        .parse::<i128>()
        .ok()
        .filter(|n| i64::try_from(*n).is_ok() || u64::try_from(*n).is_ok())
        .map(|n| n.to_string())
        .unwrap_or_default()
}

fn normalize_number(input: &str) -> String {
    let s = input.trim();
    let prefix = decimal_prefix(s);
    // "12." is a number still being typed
    if prefix.len() == s.len() && s.ends_with('.') {
        return s.to_string();
    }
    match prefix.parse::<f64>() {
        Ok(n) if n == 0.0 => "0".to_string(),
        Ok(n) if n.is_finite() => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_normalization() {
        assert_eq!(normalize_integer("42"), "42");
        assert_eq!(normalize_integer(" 42abc"), "42");
        assert_eq!(normalize_integer("+7"), "7");
        assert_eq!(normalize_integer("-0"), "0");
        assert_eq!(normalize_integer("007"), "7");
        assert_eq!(normalize_integer("12.9"), "12");
        assert_eq!(normalize_integer("abc"), "");
        assert_eq!(normalize_integer("-"), "");
        assert_eq!(normalize_integer(""), "");
    }

    #[test]
    fn test_integer_normalization_covers_unsigned_range() {
        assert_eq!(normalize_integer("18446744073709551615"), "18446744073709551615");
        assert_eq!(normalize_integer("-9223372036854775808"), "-9223372036854775808");
        assert_eq!(normalize_integer("18446744073709551616"), "");
        assert_eq!(normalize_integer("-9223372036854775809"), "");

        let node = TextNode::new(TextKind::Integer, false, &json!(u64::MAX));
        assert_eq!(node.value(), "18446744073709551615");
        assert_eq!(node.get_data(), json!(u64::MAX));
    }

    #[test]
    fn test_number_normalization() {
        assert_eq!(normalize_number("3.25"), "3.25");
        assert_eq!(normalize_number("12."), "12.");
        assert_eq!(normalize_number("-12."), "-12.");
        assert_eq!(normalize_number("12.5."), "12.5");
        assert_eq!(normalize_number(".5"), "0.5");
        assert_eq!(normalize_number("1e3"), "1000");
        assert_eq!(normalize_number("2e"), "2");
        assert_eq!(normalize_number("3.0"), "3");
        assert_eq!(normalize_number("-0.0"), "0");
        assert_eq!(normalize_number("."), "");
        assert_eq!(normalize_number("x1"), "");
    }

    #[test]
    fn test_numeric_get_data_emits_numbers() {
        let mut node = TextNode::new(TextKind::Number, false, &json!(0.5));
        assert_eq!(node.get_data(), json!(0.5));
        node.set_value("12.");
        assert_eq!(node.value(), "12.");
        assert_eq!(node.get_data(), json!(12.0));

        let node = TextNode::new(TextKind::Integer, false, &json!(3));
        assert_eq!(node.get_data(), json!(3));
    }

    #[test]
    fn test_empty_numeric_is_zero_unless_nullable() {
        let mut node = TextNode::new(TextKind::Integer, false, &json!(5));
        node.set_value("nope");
        assert_eq!(node.value(), "");
        assert_eq!(node.get_data(), json!(0));
        assert!(node.is_valid());

        let mut node = TextNode::new(TextKind::Integer, true, &json!(5));
        node.set_value("");
        assert_eq!(node.get_data(), Value::Null);
    }

    #[test]
    fn test_string_validity_requires_non_blank() {
        let mut node = TextNode::new(TextKind::String, false, &json!("x"));
        assert!(node.is_valid());
        node.set_value("   ");
        assert!(!node.is_valid());
        assert_eq!(node.get_data(), json!("   "));

        let node = TextNode::new(TextKind::String, true, &Value::Null);
        assert!(node.is_valid());
        assert_eq!(node.get_data(), Value::Null);
    }

    #[test]
    fn test_text_area_keeps_input_verbatim() {
        let mut node = TextAreaNode::new(false, &json!("line"));
        node.set_value("12abc\nmore");
        assert_eq!(node.get_data(), json!("12abc\nmore"));
        node.set_value("");
        assert!(!node.is_valid());
        assert_eq!(node.get_data(), json!(""));
    }

    #[test]
    fn test_checkbox_seeds_only_from_true() {
        assert!(CheckboxNode::new(&json!(true)).value());
        assert!(!CheckboxNode::new(&json!("true")).value());
        assert!(!CheckboxNode::new(&Value::Null).value());
    }
}
