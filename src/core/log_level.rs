//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log message.
///
/// Levels are ordered from least to most verbose. A message is emitted when
/// its level is less than or equal to the logger's threshold, so a threshold
/// of [`LogLevel::Debug`] emits everything and [`LogLevel::None`] emits nothing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warning = 2,
    Information = 3,
    #[default]
    Debug = 4,
}

impl LogLevel {
    /// All levels in ascending verbosity.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Information,
        LogLevel::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::None => "None",
            LogLevel::Error => "Error",
            LogLevel::Warning => "Warning",
            LogLevel::Information => "Information",
            LogLevel::Debug => "Debug",
        }
    }

    /// Returns true when a message at `self` passes the `threshold`.
    #[inline]
    #[must_use]
    pub fn is_enabled(self, threshold: LogLevel) -> bool {
        self <= threshold
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" | "OFF" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "INFO" | "INFORMATION" => Ok(LogLevel::Information),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_gating() {
        assert!(LogLevel::Error.is_enabled(LogLevel::Debug));
        assert!(LogLevel::Debug.is_enabled(LogLevel::Debug));
        assert!(!LogLevel::Debug.is_enabled(LogLevel::Information));
        assert!(LogLevel::Warning.is_enabled(LogLevel::Warning));
        assert!(!LogLevel::Error.is_enabled(LogLevel::None));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("info".parse::<LogLevel>(), Ok(LogLevel::Information));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("off".parse::<LogLevel>(), Ok(LogLevel::None));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Information.to_string(), "Information");
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }
}
