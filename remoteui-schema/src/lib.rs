//! Declarative UI schema builder and wire contract
//!
//! `remoteui-schema` turns a described object model into a [`Definition`]:
//! the groups and fields of a root type plus every registered type it
//! reaches. The same build produces the [`Wire`] codec, so payloads written
//! from Rust objects always use the keys the schema announces.
//!
//! # Architecture
//!
//! - **Declarative**: types implement [`RemoteUiObject`] and list their
//!   annotated [`Member`]s; no runtime reflection
//! - **Kind inference**: a member's [`NativeType`] picks its field kind unless
//!   the annotation declares one
//! - **One naming strategy**: schema ids and payload keys share a
//!   [`NamingStrategy`]
//! - **Build once**: [`RemoteUiBuilder::build`] consumes the registry and
//!   returns an immutable, shareable [`RemoteUi`]

pub mod builder;
pub mod error;
pub mod meta;
pub mod naming;
pub mod types;
pub mod wire;

pub use builder::{DisplayTransform, Registration, RemoteUi, RemoteUiBuilder};
pub use error::{BoxError, Result, SchemaError};
pub use meta::{
    BuildContext, ExtraField, ExtraFieldMeta, FieldAttr, GroupAttr, ListElement, Member,
    NativeType, NativeValue, PossibleValuesProvider, RemoteUiObject, TypeKey,
};
pub use naming::{NamingStrategy, NamingStyle};
pub use types::{
    Definition, FieldDefinition, FieldGroupDefinition, FieldKind, FieldType, PossibleValue,
    TypeDefinition,
};
pub use wire::{Accessor, CombinedField, Wire};
