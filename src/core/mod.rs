//! Core logger types

pub mod caller;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_flags;
pub mod payload;
pub mod timestamp;

pub use caller::CallerContext;
pub use config::{LevelColors, LoggerConfiguration, PayloadColors};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_flags::OutputFlags;
pub use payload::{Direction, PayloadEnvelope, RequestKind};
