//! # Rust Trace Logger
//!
//! A human-readable trace logger: leveled, timestamped lines go to one
//! Markdown file per run and to the console, and HTTP payloads can be
//! redacted or rewritten field by field before they are logged.
//!
//! ## Features
//!
//! - **Per-run log files**: `dd-MM-yyyy/HH-mm-ss.md`, oldest removed beyond a cap
//! - **Two sinks**: file and colored console, selectable per call
//! - **Thread Safe**: one lock per logger keeps lines from different threads whole
//! - **Payload filtering**: marker types on payload fields dispatch to registered actions

pub mod core;
pub mod filters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerContext, Direction, LevelColors, LogLevel, Logger, LoggerBuilder,
        LoggerConfiguration, LoggerError, LoggerMetrics, OutputFlags, PayloadColors,
        RequestKind, Result,
    };
    pub use crate::filters::{Annotated, FieldDescriptor, JsonDocument, MarkerId, TypeSchema};
    pub use crate::sinks::{ConsoleSink, MemoryConsole, RetentionManager, StdConsole};
}

pub use crate::core::{
    CallerContext, Direction, LevelColors, LogLevel, Logger, LoggerBuilder, LoggerConfiguration,
    LoggerError, LoggerMetrics, OutputFlags, PayloadColors, PayloadEnvelope, RequestKind, Result,
};
pub use crate::filters::{
    Annotated, FieldDescriptor, FilterAction, FilterRegistry, JsonDocument, MarkerId,
    PayloadFilterEngine, SchemaRegistry, TypeSchema,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemoryConsole, RetentionManager, StdConsole};
