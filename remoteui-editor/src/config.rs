//! Editor configuration passed down every factory call.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use remoteui_schema::Definition;

use crate::custom::CustomTypeResolver;

/// Opaque value handed to custom resolvers. The editor never reads it.
pub type EditorContext = dyn Any + Send + Sync;

/// Shared, read-only inputs of node construction.
///
/// Cloning is cheap; list and nullable nodes keep a clone so they can build
/// new children later in the session.
#[derive(Clone)]
pub struct EditorConfig {
    definition: Arc<Definition>,
    resolver: Option<Arc<dyn CustomTypeResolver>>,
    context: Option<Arc<EditorContext>>,
}

impl EditorConfig {
    pub fn new(definition: Arc<Definition>) -> Self {
        Self {
            definition,
            resolver: None,
            context: None,
        }
    }

    /// Resolver for fields of kind `Custom`.
    pub fn with_resolver(mut self, resolver: impl CustomTypeResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn with_context(mut self, context: Arc<EditorContext>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn resolver(&self) -> Option<&dyn CustomTypeResolver> {
        self.resolver.as_deref()
    }

    pub fn context(&self) -> Option<&EditorContext> {
        self.context.as_deref()
    }
}

impl fmt::Debug for EditorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorConfig")
            .field("root_type", &self.definition.root_type)
            .field("types", &self.definition.types.len())
            .field("resolver", &self.resolver.is_some())
            .field("context", &self.context.is_some())
            .finish()
    }
}
