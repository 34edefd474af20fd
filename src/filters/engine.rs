//! Payload filter engine
//!
//! Walks the declared fields of a payload type and runs the registered action
//! for every marker it finds, in field declaration order and then marker
//! order. Callers that need a fixed order between two edits on one field
//! should combine them into a single marker.

use super::json_tree::JsonDocument;
use super::registry::FilterLookup;
use super::schema::SchemaRegistry;
use std::any::TypeId;

pub struct PayloadFilterEngine<'a, L: FilterLookup + ?Sized> {
    schemas: &'a SchemaRegistry,
    filters: &'a L,
    enabled: bool,
}

impl<'a, L: FilterLookup + ?Sized> PayloadFilterEngine<'a, L> {
    pub fn new(schemas: &'a SchemaRegistry, filters: &'a L) -> Self {
        Self {
            schemas,
            filters,
            enabled: true,
        }
    }

    /// Turn the engine into a no-op.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Apply registered actions for `type_id` to `doc` in place.
    ///
    /// Returns how many actions ran. Unknown types, types without any marked
    /// field and markers without a registered action are skipped silently.
    pub fn apply(&self, type_id: TypeId, doc: &mut JsonDocument) -> usize {
        if !self.enabled {
            return 0;
        }
        let Some(schema) = self.schemas.get(type_id) else {
            return 0;
        };
        if !schema.is_annotated() {
            return 0;
        }

        let mut applied = 0;
        for field in schema.fields() {
            for marker in field.markers() {
                if let Some(action) = self.filters.lookup(*marker) {
                    action(field, doc);
                    applied += 1;
                }
            }
        }
        applied
    }
}
