//! Annotation-driven payload filtering

pub mod engine;
pub mod json_tree;
pub mod registry;
pub mod schema;

pub use engine::PayloadFilterEngine;
pub use json_tree::JsonDocument;
pub use registry::{redact, remove, FilterAction, FilterLookup, FilterRegistry, MarkerId};
pub use schema::{Annotated, FieldDescriptor, SchemaRegistry, TypeSchema};
