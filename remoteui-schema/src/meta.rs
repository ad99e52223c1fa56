//! Declarative field metadata.
//!
//! Types describe themselves by implementing [`RemoteUiObject`]: an ordered
//! list of [`Member`]s, each carrying a [`FieldAttr`] annotation, a
//! [`NativeType`] used for kind inference, and accessors the wire codec uses
//! to read and write the member.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{BoxError, Result, SchemaError};
use crate::types::{FieldKind, FieldType};
use crate::wire::Wire;

/// Opaque context handed to possible-value providers at build time.
pub type BuildContext = dyn Any + Send + Sync;

/// A type that can be described as an editable object.
pub trait RemoteUiObject: Default + Send + Sync + 'static {
    /// Default registry name.
    fn type_name() -> &'static str {
        TypeKey::of::<Self>().name()
    }

    /// Declared field groups. The default group always exists.
    fn groups() -> Vec<GroupAttr> {
        Vec::new()
    }

    /// Annotated members, in declaration order.
    fn members() -> Vec<Member<Self>>;
}

/// Identity of a Rust type inside the registry.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: 'static>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full
            .split('<')
            .next()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(full);
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Unqualified Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Native value shape of a member, used to infer its field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeType {
    String,
    StringSeq,
    Integer,
    Float,
    Bool,
    Object(TypeKey),
    Seq(Box<NativeType>),
    Optional(Box<NativeType>),
    Other(&'static str),
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::String => write!(f, "String"),
            NativeType::StringSeq => write!(f, "Vec<String>"),
            NativeType::Integer => write!(f, "integer"),
            NativeType::Float => write!(f, "float"),
            NativeType::Bool => write!(f, "bool"),
            NativeType::Object(key) => write!(f, "{}", key.name()),
            NativeType::Seq(inner) => write!(f, "Vec<{inner}>"),
            NativeType::Optional(inner) => write!(f, "Option<{inner}>"),
            NativeType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Primitive values with a known native shape.
pub trait NativeValue: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn native_type() -> NativeType;
}

macro_rules! native_value {
    ($native:expr => $($ty:ty),+) => {
        $(impl NativeValue for $ty {
            fn native_type() -> NativeType {
                $native
            }
        })+
    };
}

native_value!(NativeType::String => String);
native_value!(NativeType::Integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
native_value!(NativeType::Float => f32, f64);
native_value!(NativeType::Bool => bool);

impl<V: NativeValue> NativeValue for Option<V> {
    fn native_type() -> NativeType {
        NativeType::Optional(Box::new(V::native_type()))
    }
}

impl<V: NativeValue> NativeValue for Vec<V> {
    fn native_type() -> NativeType {
        match V::native_type() {
            NativeType::String => NativeType::StringSeq,
            other => NativeType::Seq(Box::new(other)),
        }
    }
}

/// A field group declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAttr {
    pub id: &'static str,
    pub name: &'static str,
}

impl GroupAttr {
    pub const fn new(id: &'static str, name: &'static str) -> Self {
        Self { id, name }
    }
}

/// Explicit element type of a list field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListElement {
    /// A registry or predefined kind name, used verbatim.
    Named(String),
    /// A Rust type, resolved to its registry name at build time.
    Type(TypeKey),
}

/// Supplies possible values from the build context.
pub trait PossibleValuesProvider: Send + Sync {
    fn values(&self, context: &BuildContext) -> std::result::Result<Vec<(String, String)>, BoxError>;
}

impl<F> PossibleValuesProvider for F
where
    F: Fn(&BuildContext) -> std::result::Result<Vec<(String, String)>, BoxError> + Send + Sync,
{
    fn values(&self, context: &BuildContext) -> std::result::Result<Vec<(String, String)>, BoxError> {
        self(context)
    }
}

/// The field annotation carried by every member.
#[derive(Clone)]
pub struct FieldAttr {
    pub name: String,
    pub group: String,
    pub kind: Option<FieldType>,
    pub list_type: Option<ListElement>,
    pub custom_type: Option<String>,
    pub nullable: bool,
    pub description: Option<String>,
    pub always_expanded: bool,
    pub read_only: bool,
    /// Wire id override, used verbatim.
    pub id: Option<String>,
    pub values: Vec<(Option<String>, String)>,
    pub providers: Vec<Arc<dyn PossibleValuesProvider>>,
}

impl FieldAttr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: String::new(),
            kind: None,
            list_type: None,
            custom_type: None,
            nullable: false,
            description: None,
            always_expanded: false,
            read_only: false,
            id: None,
            values: Vec::new(),
            providers: Vec::new(),
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Declare the kind explicitly instead of inferring it.
    pub fn kind(mut self, kind: impl Into<FieldType>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn list_of<T: 'static>(mut self) -> Self {
        self.list_type = Some(ListElement::Type(TypeKey::of::<T>()));
        self
    }

    pub fn list_of_named(mut self, name: impl Into<String>) -> Self {
        self.list_type = Some(ListElement::Named(name.into()));
        self
    }

    pub fn custom_type(mut self, tag: impl Into<String>) -> Self {
        self.custom_type = Some(tag.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn always_expanded(mut self) -> Self {
        self.always_expanded = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Pin the wire id; the naming strategy is not applied to it.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a static possible value. Its id passes through the naming strategy.
    pub fn value(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.values.push((Some(id.into()), name.into()));
        self
    }

    /// Add the "no selection" possible value.
    pub fn null_value(mut self, name: impl Into<String>) -> Self {
        self.values.push((None, name.into()));
        self
    }

    /// Append values produced by a provider at build time.
    pub fn values_from(mut self, provider: impl PossibleValuesProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }
}

impl fmt::Debug for FieldAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAttr")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("kind", &self.kind)
            .field("list_type", &self.list_type)
            .field("nullable", &self.nullable)
            .field("providers", &self.providers.len())
            .finish_non_exhaustive()
    }
}

type Getter<T> = Arc<dyn Fn(&T, &Wire) -> Result<Value> + Send + Sync>;
type Setter<T> = Arc<dyn Fn(&mut T, Value, &Wire) -> Result<()> + Send + Sync>;

/// An annotated member of a described type.
pub struct Member<T> {
    name: &'static str,
    attr: FieldAttr,
    native: NativeType,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T: RemoteUiObject> Member<T> {
    /// A primitive member whose kind can be inferred.
    pub fn field<V: NativeValue>(
        name: &'static str,
        attr: FieldAttr,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self::serde_with_native(name, attr, V::native_type(), get, get_mut)
    }

    /// Any serde value. The kind cannot be inferred, so the annotation
    /// must declare it.
    pub fn serde<V: Serialize + DeserializeOwned + 'static>(
        name: &'static str,
        attr: FieldAttr,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        let native = NativeType::Other(TypeKey::of::<V>().name());
        Self::serde_with_native(name, attr, native, get, get_mut)
    }

    fn serde_with_native<V: Serialize + DeserializeOwned + 'static>(
        name: &'static str,
        attr: FieldAttr,
        native: NativeType,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            name,
            attr,
            native,
            get: Arc::new(move |obj: &T, _: &Wire| -> Result<Value> {
                Ok(serde_json::to_value(get(obj))?)
            }),
            set: Arc::new(move |obj: &mut T, value: Value, _: &Wire| -> Result<()> {
                *get_mut(obj) =
                    serde_json::from_value(value).map_err(|e| SchemaError::wire(name, e))?;
                Ok(())
            }),
        }
    }

    /// A nested object of a registered type.
    pub fn object<V: RemoteUiObject>(
        name: &'static str,
        attr: FieldAttr,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            name,
            attr,
            native: NativeType::Object(TypeKey::of::<V>()),
            get: Arc::new(move |obj: &T, wire: &Wire| -> Result<Value> {
                wire.to_value(get(obj))
            }),
            set: Arc::new(move |obj: &mut T, value: Value, wire: &Wire| -> Result<()> {
                *get_mut(obj) = wire.from_value(value)?;
                Ok(())
            }),
        }
    }

    /// An optional nested object; inferred as a nullable reference.
    pub fn optional_object<V: RemoteUiObject>(
        name: &'static str,
        attr: FieldAttr,
        get: fn(&T) -> &Option<V>,
        get_mut: fn(&mut T) -> &mut Option<V>,
    ) -> Self {
        Self {
            name,
            attr,
            native: NativeType::Optional(Box::new(NativeType::Object(TypeKey::of::<V>()))),
            get: Arc::new(move |obj: &T, wire: &Wire| -> Result<Value> {
                match get(obj) {
                    Some(inner) => wire.to_value(inner),
                    None => Ok(Value::Null),
                }
            }),
            set: Arc::new(move |obj: &mut T, value: Value, wire: &Wire| -> Result<()> {
                *get_mut(obj) = match value {
                    Value::Null => None,
                    other => Some(wire.from_value(other)?),
                };
                Ok(())
            }),
        }
    }

    /// A list of a registered type.
    pub fn object_list<V: RemoteUiObject>(
        name: &'static str,
        attr: FieldAttr,
        get: fn(&T) -> &Vec<V>,
        get_mut: fn(&mut T) -> &mut Vec<V>,
    ) -> Self {
        Self {
            name,
            attr,
            native: NativeType::Seq(Box::new(NativeType::Object(TypeKey::of::<V>()))),
            get: Arc::new(move |obj: &T, wire: &Wire| -> Result<Value> {
                let items = get(obj)
                    .iter()
                    .map(|item| wire.to_value(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(items))
            }),
            set: Arc::new(move |obj: &mut T, value: Value, wire: &Wire| -> Result<()> {
                *get_mut(obj) = match value {
                    Value::Null => Vec::new(),
                    Value::Array(items) => items
                        .into_iter()
                        .map(|item| wire.from_value(item))
                        .collect::<Result<Vec<V>>>()?,
                    other => {
                        return Err(SchemaError::wire(
                            name,
                            format!("expected an array, got {other}"),
                        ))
                    }
                };
                Ok(())
            }),
        }
    }
}

impl<T> Member<T> {
    /// Declared identifier, before the naming strategy.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn attr(&self) -> &FieldAttr {
        &self.attr
    }

    pub fn native(&self) -> &NativeType {
        &self.native
    }

    pub(crate) fn read(&self, obj: &T, wire: &Wire) -> Result<Value> {
        (self.get)(obj, wire)
    }

    pub(crate) fn write(&self, obj: &mut T, value: Value, wire: &Wire) -> Result<()> {
        (self.set)(obj, value, wire)
    }

    pub(crate) fn into_shape(self) -> MemberShape {
        MemberShape {
            name: self.name,
            attr: self.attr,
            native: self.native,
        }
    }
}

/// Schema-relevant part of an extra field, independent of its owner type.
#[derive(Debug, Clone)]
pub struct ExtraFieldMeta {
    pub id: String,
    pub display_name: String,
    pub group: String,
    pub kind: FieldType,
    pub list_type: Option<ListElement>,
    pub possible_values: Vec<(Option<String>, String)>,
}

/// A virtual field with no backing member, bound to an accessor pair.
pub struct ExtraField<T> {
    meta: ExtraFieldMeta,
    getter: Arc<dyn Fn(&T) -> Value + Send + Sync>,
    setter: Arc<dyn Fn(&mut T, Value) -> Result<()> + Send + Sync>,
}

impl<T> Clone for ExtraField<T> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<T: RemoteUiObject> ExtraField<T> {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        kind: impl Into<FieldType>,
        getter: impl Fn(&T) -> Value + Send + Sync + 'static,
        setter: impl Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            meta: ExtraFieldMeta {
                id: id.into(),
                display_name: display_name.into(),
                group: String::new(),
                kind: kind.into(),
                list_type: None,
                possible_values: Vec::new(),
            },
            getter: Arc::new(getter),
            setter: Arc::new(setter),
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.meta.group = group.into();
        self
    }

    pub fn list_of<V: 'static>(mut self) -> Self {
        self.meta.list_type = Some(ListElement::Type(TypeKey::of::<V>()));
        self
    }

    pub fn list_of_named(mut self, name: impl Into<String>) -> Self {
        self.meta.list_type = Some(ListElement::Named(name.into()));
        self
    }

    pub fn value(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.meta.possible_values.push((Some(id.into()), name.into()));
        self
    }
}

impl<T> ExtraField<T> {
    pub fn meta(&self) -> &ExtraFieldMeta {
        &self.meta
    }

    pub(crate) fn read(&self, obj: &T) -> Value {
        (self.getter)(obj)
    }

    pub(crate) fn write(&self, obj: &mut T, value: Value) -> Result<()> {
        (self.setter)(obj, value)
    }
}

/// Type-erased description of one member, walked by the builder.
#[derive(Debug, Clone)]
pub struct MemberShape {
    pub name: &'static str,
    pub attr: FieldAttr,
    pub native: NativeType,
}

/// Type-erased description of a described type.
#[derive(Debug, Clone)]
pub struct TypeShape {
    pub groups: Vec<GroupAttr>,
    pub members: Vec<MemberShape>,
}

pub(crate) fn shape_of<T: RemoteUiObject>() -> TypeShape {
    TypeShape {
        groups: T::groups(),
        members: T::members().into_iter().map(Member::into_shape).collect(),
    }
}

/// Kinds that only make sense with possible values attached.
pub(crate) fn wants_possible_values(type_: &FieldType) -> bool {
    type_.kind().is_some_and(FieldKind::has_possible_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample;

    #[test]
    fn type_key_uses_unqualified_name() {
        assert_eq!(TypeKey::of::<Sample>().name(), "Sample");
        assert_eq!(TypeKey::of::<Vec<String>>().name(), "Vec");
        assert_eq!(TypeKey::of::<Sample>(), TypeKey::of::<Sample>());
    }

    #[test]
    fn native_types_follow_rust_shapes() {
        assert_eq!(String::native_type(), NativeType::String);
        assert_eq!(<Vec<String>>::native_type(), NativeType::StringSeq);
        assert_eq!(i64::native_type(), NativeType::Integer);
        assert_eq!(
            <Option<f64>>::native_type(),
            NativeType::Optional(Box::new(NativeType::Float))
        );
        assert_eq!(
            <Vec<bool>>::native_type(),
            NativeType::Seq(Box::new(NativeType::Bool))
        );
    }

    #[test]
    fn field_attr_builder_collects_values_in_order() {
        let attr = FieldAttr::new("Color")
            .kind(FieldKind::Radio)
            .null_value("None")
            .value("Red", "Red")
            .nullable();
        assert_eq!(attr.kind, Some(FieldType::Kind(FieldKind::Radio)));
        assert_eq!(attr.values[0], (None, "None".to_string()));
        assert_eq!(attr.values[1].0.as_deref(), Some("Red"));
        assert!(attr.nullable);
    }

    #[test]
    fn closures_are_providers() {
        let provider = |_: &BuildContext| -> std::result::Result<Vec<(String, String)>, BoxError> {
            Ok(vec![("a".into(), "A".into())])
        };
        let values = provider.values(&()).unwrap();
        assert_eq!(values, vec![("a".to_string(), "A".to_string())]);
    }
}
