//! Object nodes: groups of field slots built over a type definition.

use futures::future::{try_join_all, BoxFuture, FutureExt};
use remoteui_schema::{FieldDefinition, TypeDefinition};
use serde_json::{Map, Value};
use tracing::trace;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::factory::{create_node, NodeSpec};
use crate::node::EditableNode;

/// A field slot: the field's presentation data, its control and the error
/// message currently shown beside it.
#[derive(Debug)]
pub struct FieldNode {
    id: String,
    name: String,
    description: Option<String>,
    read_only: bool,
    always_expanded: bool,
    is_expanded: bool,
    control: EditableNode,
    error: Option<String>,
}

impl FieldNode {
    fn new(field: &FieldDefinition, control: EditableNode) -> Self {
        Self {
            id: field.id.clone(),
            name: field.name.clone(),
            description: field.description.clone(),
            read_only: field.read_only,
            always_expanded: field.always_expanded,
            is_expanded: field.always_expanded,
            control,
            error: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn always_expanded(&self) -> bool {
        self.always_expanded
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Always-expanded fields ignore collapse requests.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded || self.always_expanded;
    }

    pub fn control(&self) -> &EditableNode {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut EditableNode {
        &mut self.control
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.control.is_valid()
    }

    /// Whether the slot should be rendered as erroneous. With `highlight`,
    /// an invalid control counts even without a server message.
    pub fn has_error(&self, highlight: bool) -> bool {
        self.error.is_some() || (highlight && !self.control.is_valid())
    }

    pub fn set_errors(&mut self, errors: Option<&Value>) {
        self.error = self.control.set_errors(errors);
    }

    pub fn get_data(&self) -> BoxFuture<'_, Result<Value>> {
        self.control.get_data()
    }
}

#[derive(Debug)]
pub struct GroupNode {
    id: String,
    name: String,
    is_expanded: bool,
    fields: Vec<FieldNode>,
}

impl GroupNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    pub fn fields(&self) -> &[FieldNode] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FieldNode] {
        &mut self.fields
    }
}

/// A nested object, or the root of an editing session.
#[derive(Debug)]
pub struct ObjectNode {
    type_name: String,
    groups: Vec<GroupNode>,
}

impl ObjectNode {
    /// Build every field of `definition`, seeding each from the same key of
    /// `raw`. A `null` or non-object `raw` seeds every field with `null`.
    pub(crate) fn new(
        config: &EditorConfig,
        type_name: &str,
        definition: &TypeDefinition,
        raw: &Value,
    ) -> Result<Self> {
        let mut groups = Vec::with_capacity(definition.groups.len());
        for group in &definition.groups {
            let mut fields = Vec::with_capacity(group.fields.len());
            for field in &group.fields {
                let value = raw.get(field.id.as_str()).unwrap_or(&Value::Null);
                let control = create_node(config, &NodeSpec::of(field), value)?;
                trace!(owner = type_name, field = %field.id, node = control.variant(), "field node built");
                fields.push(FieldNode::new(field, control));
            }
            groups.push(GroupNode {
                id: group.id.clone(),
                name: group.name.clone(),
                is_expanded: true,
                fields,
            });
        }
        Ok(Self {
            type_name: type_name.to_string(),
            groups,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn groups(&self) -> &[GroupNode] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [GroupNode] {
        &mut self.groups
    }

    /// All field slots, group order first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldNode> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FieldNode> {
        self.groups.iter_mut().flat_map(|g| g.fields.iter_mut())
    }

    pub fn field(&self, id: &str) -> Option<&FieldNode> {
        self.fields().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldNode> {
        self.fields_mut().find(|f| f.id == id)
    }

    /// Control of the field with this id.
    pub fn control_mut(&mut self, id: &str) -> Option<&mut EditableNode> {
        self.field_mut(id).map(FieldNode::control_mut)
    }

    pub fn get_data(&self) -> BoxFuture<'_, Result<Value>> {
        async move {
            let values = try_join_all(self.fields().map(FieldNode::get_data)).await?;
            let map: Map<String, Value> = self
                .fields()
                .map(|f| f.id.clone())
                .zip(values)
                .collect();
            Ok(Value::Object(map))
        }
        .boxed()
    }

    pub fn is_valid(&self) -> bool {
        self.fields().all(FieldNode::is_valid)
    }

    /// Each field takes the entry under its own id. A missing or `null`
    /// payload clears every field.
    pub fn set_errors(&mut self, errors: Option<&Value>) {
        for field in self.fields_mut() {
            let entry = errors.and_then(|e| e.get(field.id.as_str()));
            field.set_errors(entry);
        }
    }
}
