//! Per-type field annotations
//!
//! Payload types describe which of their fields carry which markers once, at
//! startup, through a [`TypeSchema`]. The filter engine consults these
//! schemas instead of inspecting types at runtime.
//!
//! ```
//! use rust_trace_logger::filters::{SchemaRegistry, TypeSchema};
//!
//! struct Sensitive;
//! struct Truncate;
//! struct LoginRequest;
//!
//! let mut schemas = SchemaRegistry::new();
//! schemas.register(
//!     TypeSchema::of::<LoginRequest>()
//!         .marked::<Sensitive>("password")
//!         .marked::<Truncate>("avatar")
//!         .field("username", &[]),
//! );
//! assert!(schemas.get_for::<LoginRequest>().unwrap().is_annotated());
//! ```

use super::registry::MarkerId;
use std::any::{self, TypeId};
use std::collections::HashMap;

/// One declared field of a payload type and the markers attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    owner: &'static str,
    name: String,
    json_name: String,
    markers: Vec<MarkerId>,
}

impl FieldDescriptor {
    pub fn new(owner: &'static str, name: impl Into<String>, markers: &[MarkerId]) -> Self {
        let name = name.into();
        Self {
            owner,
            json_name: name.clone(),
            name,
            markers: markers.to_vec(),
        }
    }

    /// Use a different member name in the serialized JSON.
    #[must_use]
    pub fn with_json_name(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = json_name.into();
        self
    }

    /// Name of the type declaring this field.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member name in the serialized payload.
    pub fn json_name(&self) -> &str {
        &self.json_name
    }

    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    pub fn has_marker<M: 'static>(&self) -> bool {
        self.markers.contains(&MarkerId::of::<M>())
    }
}

/// Declared fields of one payload type, in declaration order.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    type_id: TypeId,
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl TypeSchema {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            fields: Vec::new(),
        }
    }

    /// Declare a field with any number of markers.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn field(mut self, name: impl Into<String>, markers: &[MarkerId]) -> Self {
        self.fields
            .push(FieldDescriptor::new(self.type_name, name, markers));
        self
    }

    /// Declare a field whose JSON member name differs from its field name.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn renamed_field(
        mut self,
        name: impl Into<String>,
        json_name: impl Into<String>,
        markers: &[MarkerId],
    ) -> Self {
        self.fields
            .push(FieldDescriptor::new(self.type_name, name, markers).with_json_name(json_name));
        self
    }

    /// Declare a field carrying the single marker `M`.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn marked<M: 'static>(self, name: impl Into<String>) -> Self {
        self.field(name, &[MarkerId::of::<M>()])
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// True when at least one field carries a marker.
    pub fn is_annotated(&self) -> bool {
        self.fields.iter().any(|field| !field.markers.is_empty())
    }
}

/// Implemented by payload types that can describe their own annotations.
pub trait Annotated: 'static {
    fn schema() -> TypeSchema;
}

/// Schemas keyed by payload type.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<TypeId, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the schema for its type.
    pub fn register(&mut self, schema: TypeSchema) {
        self.schemas.insert(schema.type_id, schema);
    }

    pub fn register_annotated<T: Annotated>(&mut self) {
        self.register(T::schema());
    }

    pub fn get(&self, type_id: TypeId) -> Option<&TypeSchema> {
        self.schemas.get(&type_id)
    }

    pub fn get_for<T: 'static>(&self) -> Option<&TypeSchema> {
        self.get(TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
