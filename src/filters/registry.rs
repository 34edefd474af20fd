//! Filter registry
//!
//! Maps a marker type to the action run on every field carrying it.
//! Registering a second action for the same marker replaces the first.

use super::json_tree::JsonDocument;
use super::schema::FieldDescriptor;
use serde_json::Value;
use std::any::{self, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a marker type.
#[derive(Clone, Copy)]
pub struct MarkerId {
    type_id: TypeId,
    name: &'static str,
}

impl MarkerId {
    pub fn of<M: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<M>(),
            name: any::type_name::<M>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for MarkerId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for MarkerId {}

impl Hash for MarkerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkerId({})", self.name)
    }
}

/// Edit applied to a payload for a field carrying a registered marker.
///
/// The action locates its member through the field's
/// [`json_name`](FieldDescriptor::json_name); a field missing from the payload
/// is simply left alone.
pub type FilterAction = Arc<dyn Fn(&FieldDescriptor, &mut JsonDocument) + Send + Sync>;

/// Source of filter actions for the payload engine.
pub trait FilterLookup {
    fn lookup(&self, marker: MarkerId) -> Option<&FilterAction>;
}

#[derive(Clone, Default)]
pub struct FilterRegistry {
    actions: HashMap<MarkerId, FilterAction>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for marker type `M`, replacing any earlier one.
    pub fn register<M, F>(&mut self, action: F)
    where
        M: 'static,
        F: Fn(&FieldDescriptor, &mut JsonDocument) + Send + Sync + 'static,
    {
        self.register_marker(MarkerId::of::<M>(), Arc::new(action));
    }

    pub fn register_marker(&mut self, marker: MarkerId, action: FilterAction) {
        self.actions.insert(marker, action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FilterLookup for FilterRegistry {
    fn lookup(&self, marker: MarkerId) -> Option<&FilterAction> {
        self.actions.get(&marker)
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.actions.keys()).finish()
    }
}

/// Action replacing the field's value with `replacement` when present.
pub fn redact(
    replacement: impl Into<Value>,
) -> impl Fn(&FieldDescriptor, &mut JsonDocument) + Send + Sync + 'static {
    let replacement = replacement.into();
    move |field, doc| {
        doc.replace_field(field.json_name(), replacement.clone());
    }
}

/// Action dropping the field from the payload.
pub fn remove() -> impl Fn(&FieldDescriptor, &mut JsonDocument) + Send + Sync + 'static {
    |field, doc| {
        doc.remove_field(field.json_name());
    }
}
