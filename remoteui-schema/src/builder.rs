//! Type registry and definition builder.
//!
//! Register every type reachable from the root, then call
//! [`RemoteUiBuilder::build`] once. Building consumes the builder and
//! returns an immutable [`RemoteUi`]: the [`Definition`] plus the [`Wire`]
//! codec that produces payloads matching it.
//!
//! ```rust,ignore
//! let mut builder = RemoteUiBuilder::new(Registration::<Dto>::of())
//!     .naming(NamingStyle::Snake);
//! builder
//!     .register(Registration::<DtoBase>::of().name("Test"))?
//!     .register(Registration::<Inner>::of())?;
//! let ui = builder.build(&services)?;
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::meta::{
    shape_of, wants_possible_values, BuildContext, ExtraField, ExtraFieldMeta, FieldAttr,
    ListElement, MemberShape, NativeType, RemoteUiObject, TypeKey, TypeShape,
};
use crate::naming::{NamingStrategy, NamingStyle};
use crate::types::{
    Definition, FieldDefinition, FieldGroupDefinition, FieldKind, FieldType, PossibleValue,
    TypeDefinition,
};
use crate::wire::Wire;

/// Localization hook applied to display names and descriptions.
pub type DisplayTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A type to add to the registry, with its optional name and extra fields.
pub struct Registration<T> {
    name: Option<String>,
    extra_fields: Vec<ExtraField<T>>,
}

impl<T: RemoteUiObject> Registration<T> {
    pub fn of() -> Self {
        Self {
            name: None,
            extra_fields: Vec::new(),
        }
    }

    /// Registry name. Defaults to [`RemoteUiObject::type_name`].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn extra_field(mut self, field: ExtraField<T>) -> Self {
        self.extra_fields.push(field);
        self
    }

    pub fn extra_fields(mut self, fields: impl IntoIterator<Item = ExtraField<T>>) -> Self {
        self.extra_fields.extend(fields);
        self
    }

    fn into_entry(self) -> TypeEntry {
        let extras_meta = self
            .extra_fields
            .iter()
            .map(|f| f.meta().clone())
            .collect();
        TypeEntry {
            key: TypeKey::of::<T>(),
            name: self.name.unwrap_or_else(|| T::type_name().to_string()),
            shape: shape_of::<T>,
            extras_meta,
            extras: Arc::new(self.extra_fields),
        }
    }
}

struct TypeEntry {
    key: TypeKey,
    name: String,
    shape: fn() -> TypeShape,
    extras_meta: Vec<ExtraFieldMeta>,
    extras: Arc<dyn Any + Send + Sync>,
}

/// Accumulates type registrations and builds the schema.
pub struct RemoteUiBuilder {
    root: TypeEntry,
    registered: IndexMap<TypeId, TypeEntry>,
    naming: Arc<dyn NamingStrategy>,
    display: Option<DisplayTransform>,
}

impl RemoteUiBuilder {
    pub fn new<T: RemoteUiObject>(root: Registration<T>) -> Self {
        Self {
            root: root.into_entry(),
            registered: IndexMap::new(),
            naming: Arc::new(NamingStyle::Verbatim),
            display: None,
        }
    }

    /// Identifier transform for group, field and possible-value ids.
    pub fn naming(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.naming = Arc::new(strategy);
        self
    }

    /// Transform applied to display names and descriptions.
    pub fn display_transform(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.display = Some(Arc::new(transform));
        self
    }

    /// Add a type to the registry.
    pub fn register<T: RemoteUiObject>(&mut self, registration: Registration<T>) -> Result<&mut Self> {
        let entry = registration.into_entry();
        if self.registered.contains_key(&entry.key.id()) {
            return Err(SchemaError::DuplicateType {
                type_name: entry.key.name(),
            });
        }
        if FieldKind::from_name(&entry.name).is_some() {
            return Err(SchemaError::ReservedTypeName { name: entry.name });
        }
        if self.registered.values().any(|e| e.name == entry.name)
            || (entry.name == self.root.name && entry.key != self.root.key)
        {
            return Err(SchemaError::DuplicateTypeName { name: entry.name });
        }

        debug!(name = %entry.name, rust_type = entry.key.name(), "registered remote ui type");
        self.registered.insert(entry.key.id(), entry);
        Ok(self)
    }

    /// Whether a Rust type is already in the registry.
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.registered.contains_key(&TypeId::of::<T>())
    }

    /// Build the definition. `context` is handed, unread, to possible-value
    /// providers.
    pub fn build(self, context: &BuildContext) -> Result<RemoteUi> {
        let resolver = NameResolver::new(&self.root, &self.registered);

        let root = self.describe(&self.root, &resolver, context)?;
        let mut types = IndexMap::new();
        for entry in self.registered.values() {
            let type_def = self.describe(entry, &resolver, context)?;
            types.insert(entry.name.clone(), type_def);
        }

        let definition = Definition {
            root,
            root_type: Some(self.root.name.clone()),
            types,
        };
        check_references(&definition)?;

        let mut extras: HashMap<TypeId, Arc<dyn Any + Send + Sync>> = HashMap::new();
        extras.insert(self.root.key.id(), Arc::clone(&self.root.extras));
        for (id, entry) in &self.registered {
            extras.insert(*id, Arc::clone(&entry.extras));
        }

        debug!(
            root = %self.root.name,
            types = definition.types.len(),
            fields = definition.root.fields().count(),
            "remote ui definition built"
        );

        Ok(RemoteUi {
            definition: Arc::new(definition),
            wire: Wire::with_extras(self.naming, extras),
        })
    }

    fn display(&self, raw: &str) -> String {
        match &self.display {
            Some(transform) => transform(raw),
            None => raw.to_string(),
        }
    }

    fn describe(
        &self,
        entry: &TypeEntry,
        resolver: &NameResolver,
        context: &BuildContext,
    ) -> Result<TypeDefinition> {
        let shape = (entry.shape)();
        let owner = entry.name.as_str();

        let mut groups: Vec<FieldGroupDefinition> = shape
            .groups
            .iter()
            .map(|g| FieldGroupDefinition::new(self.naming.transform(g.id), self.display(g.name)))
            .collect();
        if !groups.iter().any(|g| g.id.is_empty()) {
            groups.insert(0, FieldGroupDefinition::new("", ""));
        }

        let extra_ids: Vec<String> = entry
            .extras_meta
            .iter()
            .map(|e| self.naming.transform(&e.id))
            .collect();
        let mut placed = vec![false; extra_ids.len()];
        let mut seen_ids = HashSet::new();

        for member in &shape.members {
            let id = match &member.attr.id {
                Some(id) => id.clone(),
                None => self.naming.transform(member.name),
            };
            if !seen_ids.insert(id.clone()) {
                return Err(SchemaError::DuplicateFieldId {
                    owner: owner.to_string(),
                    id,
                });
            }
            let replacement = (0..extra_ids.len()).find(|&i| !placed[i] && extra_ids[i] == id);
            let (field, name, group) = match replacement {
                Some(index) => {
                    trace!(owner, field = %id, "member replaced by extra field");
                    placed[index] = true;
                    let extra = &entry.extras_meta[index];
                    (
                        self.describe_extra(owner, id, extra, resolver)?,
                        extra.id.as_str(),
                        extra.group.as_str(),
                    )
                }
                None => (
                    self.describe_member(owner, id, member, resolver, context)?,
                    member.name,
                    member.attr.group.as_str(),
                ),
            };
            self.group_mut(&mut groups, owner, name, group)?
                .fields
                .push(field);
        }

        for (index, extra) in entry.extras_meta.iter().enumerate() {
            if placed[index] {
                continue;
            }
            let id = extra_ids[index].clone();
            if !seen_ids.insert(id.clone()) {
                return Err(SchemaError::DuplicateFieldId {
                    owner: owner.to_string(),
                    id,
                });
            }
            let field = self.describe_extra(owner, id, extra, resolver)?;
            self.group_mut(&mut groups, owner, &extra.id, &extra.group)?
                .fields
                .push(field);
        }

        Ok(TypeDefinition { groups })
    }

    fn group_mut<'g>(
        &self,
        groups: &'g mut [FieldGroupDefinition],
        owner: &str,
        member: &str,
        group: &str,
    ) -> Result<&'g mut FieldGroupDefinition> {
        let id = self.naming.transform(group);
        groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| SchemaError::UnknownGroup {
                owner: owner.to_string(),
                member: member.to_string(),
                group: group.to_string(),
            })
    }

    fn describe_member(
        &self,
        owner: &str,
        id: String,
        member: &MemberShape,
        resolver: &NameResolver,
        context: &BuildContext,
    ) -> Result<FieldDefinition> {
        let attr = &member.attr;
        let mut nullable = attr.nullable;
        let (type_, inferred_list) = match &attr.kind {
            Some(kind) => (kind.clone(), None),
            None => infer(owner, member.name, &member.native, resolver, &mut nullable)?,
        };

        let list_type = if type_.is(FieldKind::List) {
            let explicit = attr
                .list_type
                .as_ref()
                .map(|element| resolver.element_name(owner, member.name, element))
                .transpose()?;
            let resolved = match explicit.or(inferred_list) {
                Some(name) => name,
                None => list_element_of(owner, member.name, &member.native, resolver)?,
            };
            Some(resolved)
        } else {
            None
        };

        let possible_values = if wants_possible_values(&type_) {
            Some(self.possible_values(owner, member.name, attr, context)?)
        } else {
            None
        };

        trace!(owner, field = %id, kind = %type_, nullable, "resolved member field");
        Ok(FieldDefinition {
            id,
            name: self.display(&attr.name),
            description: attr.description.as_deref().map(|d| self.display(d)),
            type_,
            list_type,
            custom_type: attr.custom_type.clone(),
            nullable,
            always_expanded: attr.always_expanded,
            read_only: attr.read_only,
            possible_values,
        })
    }

    fn describe_extra(
        &self,
        owner: &str,
        id: String,
        extra: &ExtraFieldMeta,
        resolver: &NameResolver,
    ) -> Result<FieldDefinition> {
        let mut field = FieldDefinition::new(id, self.display(&extra.display_name), extra.kind.clone());
        if extra.kind.is(FieldKind::List) {
            let element = extra
                .list_type
                .as_ref()
                .ok_or_else(|| SchemaError::MissingListType {
                    owner: owner.to_string(),
                    member: extra.id.clone(),
                })?;
            field.list_type = Some(resolver.element_name(owner, &extra.id, element)?);
        }
        if wants_possible_values(&extra.kind) {
            field.possible_values = Some(
                extra
                    .possible_values
                    .iter()
                    .map(|(id, name)| self.possible_value(id.as_deref(), name))
                    .collect(),
            );
        }
        Ok(field)
    }

    fn possible_value(&self, id: Option<&str>, name: &str) -> PossibleValue {
        PossibleValue {
            id: id.map(|id| self.naming.transform(id)),
            name: name.to_string(),
        }
    }

    /// Static values first, then provider values, in declaration order.
    fn possible_values(
        &self,
        owner: &str,
        member: &str,
        attr: &FieldAttr,
        context: &BuildContext,
    ) -> Result<Vec<PossibleValue>> {
        let mut values: Vec<PossibleValue> = attr
            .values
            .iter()
            .map(|(id, name)| self.possible_value(id.as_deref(), name))
            .collect();
        for provider in &attr.providers {
            let provided = provider.values(context).map_err(|source| SchemaError::Provider {
                owner: owner.to_string(),
                member: member.to_string(),
                source,
            })?;
            trace!(owner, member, count = provided.len(), "possible values provided");
            values.extend(
                provided
                    .iter()
                    .map(|(id, name)| self.possible_value(Some(id), name)),
            );
        }
        Ok(values)
    }
}

impl fmt::Debug for RemoteUiBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteUiBuilder")
            .field("root", &self.root.name)
            .field(
                "registered",
                &self.registered.values().map(|e| &e.name).collect::<Vec<_>>(),
            )
            .field("naming", &self.naming)
            .finish()
    }
}

/// Registry names by Rust type, root included.
struct NameResolver {
    names: HashMap<TypeId, String>,
}

impl NameResolver {
    fn new(root: &TypeEntry, registered: &IndexMap<TypeId, TypeEntry>) -> Self {
        let mut names: HashMap<TypeId, String> = registered
            .iter()
            .map(|(id, entry)| (*id, entry.name.clone()))
            .collect();
        names
            .entry(root.key.id())
            .or_insert_with(|| root.name.clone());
        Self { names }
    }

    fn name_of(&self, key: &TypeKey) -> Option<&str> {
        self.names.get(&key.id()).map(String::as_str)
    }

    fn element_name(&self, owner: &str, member: &str, element: &ListElement) -> Result<String> {
        match element {
            ListElement::Named(name) => Ok(name.clone()),
            ListElement::Type(key) => self.name_of(key).map(str::to_string).ok_or_else(|| {
                SchemaError::UnregisteredListElement {
                    owner: owner.to_string(),
                    member: member.to_string(),
                    element: key.name().to_string(),
                }
            }),
        }
    }
}

/// Infer a field kind from a member's native type.
///
/// Returns the kind and, for inferred lists, the element type name.
fn infer(
    owner: &str,
    member: &str,
    native: &NativeType,
    resolver: &NameResolver,
    nullable: &mut bool,
) -> Result<(FieldType, Option<String>)> {
    let unknown = || SchemaError::UnknownFieldType {
        owner: owner.to_string(),
        member: member.to_string(),
        native: native.to_string(),
    };

    let type_ = match native {
        NativeType::String => FieldKind::String.into(),
        NativeType::StringSeq => FieldKind::StringList.into(),
        NativeType::Integer => FieldKind::Integer.into(),
        NativeType::Float => FieldKind::Number.into(),
        NativeType::Bool => FieldKind::CheckBox.into(),
        NativeType::Object(key) => match resolver.name_of(key) {
            Some(name) => FieldType::reference(name),
            None => return Err(unknown()),
        },
        NativeType::Seq(_) => {
            let element = list_element_of(owner, member, native, resolver)?;
            return Ok((FieldKind::List.into(), Some(element)));
        }
        NativeType::Optional(inner) => match inner.as_ref() {
            NativeType::String | NativeType::Integer | NativeType::Float | NativeType::Object(_) => {
                *nullable = true;
                return infer(owner, member, inner, resolver, nullable);
            }
            _ => return Err(unknown()),
        },
        NativeType::Other(_) => return Err(unknown()),
    };
    Ok((type_, None))
}

/// Element type name of a sequence member.
fn list_element_of(
    owner: &str,
    member: &str,
    native: &NativeType,
    resolver: &NameResolver,
) -> Result<String> {
    match native {
        NativeType::StringSeq => Ok(FieldKind::String.as_str().to_string()),
        NativeType::Seq(inner) => match inner.as_ref() {
            NativeType::Object(key) => resolver.name_of(key).map(str::to_string).ok_or_else(|| {
                SchemaError::UnregisteredListElement {
                    owner: owner.to_string(),
                    member: member.to_string(),
                    element: key.name().to_string(),
                }
            }),
            other => Err(SchemaError::UnregisteredListElement {
                owner: owner.to_string(),
                member: member.to_string(),
                element: other.to_string(),
            }),
        },
        _ => Err(SchemaError::MissingListType {
            owner: owner.to_string(),
            member: member.to_string(),
        }),
    }
}

/// Every reference and list element must resolve inside the definition.
fn check_references(definition: &Definition) -> Result<()> {
    let root_name = definition.root_type.as_deref().unwrap_or_default();
    let all = std::iter::once((root_name, &definition.root))
        .chain(definition.types.iter().map(|(name, def)| (name.as_str(), def)));
    for (owner, type_def) in all {
        for field in type_def.fields() {
            if let FieldType::Reference(name) = &field.type_ {
                if definition.resolve(name).is_none() {
                    return Err(SchemaError::UnknownTypeReference {
                        owner: owner.to_string(),
                        member: field.id.clone(),
                        type_name: name.clone(),
                    });
                }
            }
            if let Some(element) = &field.list_type {
                if !definition.knows(element) {
                    return Err(SchemaError::UnregisteredListElement {
                        owner: owner.to_string(),
                        member: field.id.clone(),
                        element: element.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// A built schema: the immutable definition and its wire codec.
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct RemoteUi {
    definition: Arc<Definition>,
    wire: Wire,
}

impl RemoteUi {
    pub fn definition(&self) -> &Arc<Definition> {
        &self.definition
    }

    pub fn wire(&self) -> &Wire {
        &self.wire
    }

    /// The schema in its JSON transport form.
    pub fn schema_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.definition.as_ref())?)
    }

    pub fn to_value<T: RemoteUiObject>(&self, obj: &T) -> Result<Value> {
        self.wire.to_value(obj)
    }

    pub fn from_value<T: RemoteUiObject>(&self, value: Value) -> Result<T> {
        self.wire.from_value(value)
    }
}
