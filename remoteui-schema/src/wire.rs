//! Wire contract: reading and writing described objects as raw JSON.
//!
//! The combined field list of a type is its annotated members, in order,
//! with any member whose wire key collides with an extra field replaced by
//! that extra field, followed by the extra fields that replaced nothing.
//! Keys come from the same [`NamingStrategy`] the builder used for schema
//! ids.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Result, SchemaError};
use crate::meta::{ExtraField, Member, RemoteUiObject};
use crate::naming::{NamingStrategy, NamingStyle};

/// Serializer shared by every type of one built schema.
#[derive(Clone)]
pub struct Wire {
    naming: Arc<dyn NamingStrategy>,
    // TypeId -> Vec<ExtraField<T>> for that T
    extras: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

/// Where a combined field reads and writes its value.
pub enum Accessor<T> {
    Member(Member<T>),
    Extra(ExtraField<T>),
}

/// One entry of a type's combined field list.
pub struct CombinedField<T> {
    pub key: String,
    pub accessor: Accessor<T>,
}

impl<T> CombinedField<T> {
    pub fn is_extra(&self) -> bool {
        matches!(self.accessor, Accessor::Extra(_))
    }
}

impl Wire {
    /// A codec with no extra fields.
    pub fn new(naming: Arc<dyn NamingStrategy>) -> Self {
        Self {
            naming,
            extras: Arc::new(HashMap::new()),
        }
    }

    pub(crate) fn with_extras(
        naming: Arc<dyn NamingStrategy>,
        extras: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    ) -> Self {
        Self {
            naming,
            extras: Arc::new(extras),
        }
    }

    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    /// Wire form of a declared identifier.
    pub fn key_for(&self, ident: &str) -> String {
        self.naming.transform(ident)
    }

    fn extras_for<T: RemoteUiObject>(&self) -> &[ExtraField<T>] {
        self.extras
            .get(&TypeId::of::<T>())
            .and_then(|fields| fields.downcast_ref::<Vec<ExtraField<T>>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The combined field list of `T`.
    pub fn combined_fields<T: RemoteUiObject>(&self) -> Vec<CombinedField<T>> {
        let mut remaining: Vec<(String, &ExtraField<T>)> = self
            .extras_for::<T>()
            .iter()
            .map(|extra| (self.key_for(&extra.meta().id), extra))
            .collect();

        let mut fields = Vec::new();
        for member in T::members() {
            let key = match &member.attr().id {
                Some(id) => id.clone(),
                None => self.key_for(member.name()),
            };
            let accessor = match remaining.iter().position(|(k, _)| *k == key) {
                Some(pos) => Accessor::Extra(remaining.remove(pos).1.clone()),
                None => Accessor::Member(member),
            };
            fields.push(CombinedField { key, accessor });
        }
        fields.extend(remaining.into_iter().map(|(key, extra)| CombinedField {
            key,
            accessor: Accessor::Extra(extra.clone()),
        }));
        fields
    }

    /// Serialize an object to its raw payload.
    pub fn to_value<T: RemoteUiObject>(&self, obj: &T) -> Result<Value> {
        let mut map = Map::new();
        for field in self.combined_fields::<T>() {
            let value = match &field.accessor {
                Accessor::Member(member) => member.read(obj, self)?,
                Accessor::Extra(extra) => extra.read(obj),
            };
            map.insert(field.key, value);
        }
        Ok(Value::Object(map))
    }

    /// Deserialize an object from its raw payload.
    ///
    /// Keys absent from the payload keep their `Default` value; unknown keys
    /// are ignored. A `null` payload yields the default object.
    pub fn from_value<T: RemoteUiObject>(&self, value: Value) -> Result<T> {
        let mut map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(T::default()),
            other => {
                return Err(SchemaError::wire(
                    T::type_name(),
                    format!("expected an object, got {other}"),
                ))
            }
        };

        let mut obj = T::default();
        for field in self.combined_fields::<T>() {
            let Some(value) = map.remove(&field.key) else {
                continue;
            };
            trace!(owner = T::type_name(), key = %field.key, "reading wire field");
            match &field.accessor {
                Accessor::Member(member) => member.write(&mut obj, value, self)?,
                Accessor::Extra(extra) => extra.write(&mut obj, value)?,
            }
        }
        Ok(obj)
    }
}

impl Default for Wire {
    fn default() -> Self {
        Self::new(Arc::new(NamingStyle::Verbatim))
    }
}

impl fmt::Debug for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wire")
            .field("naming", &self.naming)
            .field("extra_types", &self.extras.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::FieldAttr;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x_pos: i64,
        label: Option<String>,
    }

    impl RemoteUiObject for Point {
        fn members() -> Vec<Member<Self>> {
            vec![
                Member::field("XPos", FieldAttr::new("X"), |p| &p.x_pos, |p| &mut p.x_pos),
                Member::field(
                    "Label",
                    FieldAttr::new("Label"),
                    |p| &p.label,
                    |p| &mut p.label,
                ),
            ]
        }
    }

    #[test]
    fn to_value_applies_naming_to_keys() {
        let wire = Wire::new(Arc::new(NamingStyle::Snake));
        let point = Point {
            x_pos: 3,
            label: None,
        };
        assert_eq!(
            wire.to_value(&point).unwrap(),
            json!({"x_pos": 3, "label": null})
        );
    }

    #[test]
    fn from_value_keeps_defaults_for_missing_keys() {
        let wire = Wire::new(Arc::new(NamingStyle::Snake));
        let point: Point = wire.from_value(json!({"label": "origin"})).unwrap();
        assert_eq!(point.x_pos, 0);
        assert_eq!(point.label.as_deref(), Some("origin"));
    }

    #[test]
    fn from_value_rejects_scalars() {
        let wire = Wire::default();
        let err = wire.from_value::<Point>(json!(5)).unwrap_err();
        assert!(matches!(err, SchemaError::Wire { .. }));
    }

    #[test]
    fn from_value_reports_mistyped_member() {
        let wire = Wire::default();
        let err = wire.from_value::<Point>(json!({"XPos": "three"})).unwrap_err();
        assert!(err.to_string().contains("XPos"));
    }
}
