//! Logger configuration
//!
//! [`LoggerConfiguration`] is fixed at construction and lives as long as the
//! logger. Builder methods follow the `with_*` convention:
//!
//! ```
//! use rust_trace_logger::{LogLevel, LoggerConfiguration};
//!
//! let config = LoggerConfiguration::new()
//!     .with_directory("target/trace-logs")
//!     .with_max_files(5)
//!     .with_threshold(LogLevel::Information)
//!     .with_console_suppressed(true);
//!
//! assert!(config.validate().is_ok());
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::payload::Direction;
use colored::Color;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_MAX_FILES: usize = 10;

/// Console color for each severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelColors {
    pub error: Color,
    pub warning: Color,
    pub information: Color,
    pub debug: Color,
}

impl Default for LevelColors {
    fn default() -> Self {
        Self {
            error: Color::Red,
            warning: Color::Yellow,
            information: Color::White,
            debug: Color::Cyan,
        }
    }
}

impl LevelColors {
    #[must_use]
    pub fn for_level(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.error,
            LogLevel::Warning => self.warning,
            LogLevel::Information | LogLevel::None => self.information,
            LogLevel::Debug => self.debug,
        }
    }
}

/// Console color for each payload direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadColors {
    pub sent: Color,
    pub received: Color,
}

impl Default for PayloadColors {
    fn default() -> Self {
        Self {
            sent: Color::Magenta,
            received: Color::Green,
        }
    }
}

impl PayloadColors {
    #[must_use]
    pub fn for_direction(&self, direction: Direction) -> Color {
        match direction {
            Direction::Sent => self.sent,
            Direction::Received => self.received,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfiguration {
    /// Directory holding the per-run log files
    pub directory: PathBuf,
    /// Maximum number of log files kept on disk, including the current one
    pub max_files: usize,
    pub suppress_console: bool,
    pub suppress_file: bool,
    /// Skip payload filtering entirely
    pub disable_reflection: bool,
    pub threshold: LogLevel,
    pub level_colors: LevelColors,
    pub payload_colors: PayloadColors,
}

impl Default for LoggerConfiguration {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            max_files: DEFAULT_MAX_FILES,
            suppress_console: false,
            suppress_file: false,
            disable_reflection: false,
            threshold: LogLevel::Debug,
            level_colors: LevelColors::default(),
            payload_colors: PayloadColors::default(),
        }
    }
}

impl LoggerConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console_suppressed(mut self, suppressed: bool) -> Self {
        self.suppress_console = suppressed;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_suppressed(mut self, suppressed: bool) -> Self {
        self.suppress_file = suppressed;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_reflection_disabled(mut self, disabled: bool) -> Self {
        self.disable_reflection = disabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level_colors(mut self, colors: LevelColors) -> Self {
        self.level_colors = colors;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_payload_colors(mut self, colors: PayloadColors) -> Self {
        self.payload_colors = colors;
        self
    }

    /// True when both sinks are switched off globally.
    #[must_use]
    pub fn all_sinks_suppressed(&self) -> bool {
        self.suppress_console && self.suppress_file
    }

    /// Check invariants that construction relies on.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] if `max_files` is zero or
    /// the directory path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(LoggerError::config(
                "LoggerConfiguration",
                "max_files must be at least 1",
            ));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "LoggerConfiguration",
                "log directory must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfiguration::default();
        assert_eq!(config.directory, PathBuf::from("logs"));
        assert_eq!(config.max_files, 10);
        assert_eq!(config.threshold, LogLevel::Debug);
        assert!(!config.all_sinks_suppressed());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_files_rejected() {
        let config = LoggerConfiguration::new().with_max_files(0);
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_colors() {
        let colors = LevelColors::default();
        assert_eq!(colors.for_level(LogLevel::Error), Color::Red);
        assert_eq!(colors.for_level(LogLevel::Warning), Color::Yellow);

        let payload = PayloadColors {
            sent: Color::Blue,
            received: Color::BrightGreen,
        };
        assert_eq!(payload.for_direction(Direction::Sent), Color::Blue);
        assert_eq!(payload.for_direction(Direction::Received), Color::BrightGreen);
    }

    #[test]
    fn test_all_sinks_suppressed() {
        let config = LoggerConfiguration::new()
            .with_console_suppressed(true)
            .with_file_suppressed(true);
        assert!(config.all_sinks_suppressed());
    }
}
