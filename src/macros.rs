//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They log with
//! [`OutputFlags::NONE`](crate::OutputFlags::NONE) and no caller line; use the
//! `Logger` methods directly for anything else.
//!
//! # Examples
//!
//! ```no_run
//! use rust_trace_logger::prelude::*;
//! use rust_trace_logger::{caller, information};
//!
//! let logger = Logger::with_defaults().unwrap();
//!
//! information!(logger, "Server listening on port {}", 8080);
//!
//! let site = caller!();
//! logger.log_warning(OutputFlags::NONE, "Retrying", Some(&site));
//! ```

/// Capture the enclosing function, file and line as a
/// [`CallerContext`](crate::CallerContext).
///
/// # Examples
///
/// ```
/// use rust_trace_logger::caller;
///
/// fn load_settings() -> rust_trace_logger::CallerContext {
///     caller!()
/// }
///
/// let site = load_settings();
/// assert_eq!(site.name(), "load_settings");
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::CallerContext::from_function_path(__type_name_of(__f), file!(), line!())
    }};
}

/// Log a message with automatic formatting.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($crate::OutputFlags::NONE, $level, format!($($arg)+), None)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an information-level message.
#[macro_export]
macro_rules! information {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, LoggerConfiguration};
    use crate::sinks::MemoryConsole;
    use tempfile::TempDir;

    fn quiet_logger(dir: &TempDir) -> Logger {
        Logger::builder()
            .configuration(LoggerConfiguration::new().with_directory(dir.path()))
            .console(MemoryConsole::new())
            .build()
            .unwrap()
    }

    #[test]
    fn test_level_macros() {
        let dir = TempDir::new().unwrap();
        let logger = quiet_logger(&dir);

        log!(logger, LogLevel::Information, "Formatted: {}", 42);
        error!(logger, "Code: {}", 500);
        warning!(logger, "Retry {} of {}", 1, 3);
        information!(logger, "Items: {}", 100);
        debug!(logger, "Count: {}", 5);

        let content = std::fs::read_to_string(logger.log_file_path()).unwrap();
        assert!(content.contains("[Information]: Formatted: 42"));
        assert!(content.contains("[Error]: Code: 500"));
        assert!(content.contains("[Warning]: Retry 1 of 3"));
        assert!(content.contains("[Information]: Items: 100"));
        assert!(content.contains("[Debug]: Count: 5"));
    }

    #[test]
    fn test_caller_macro_in_closure() {
        let site = (|| caller!())();
        assert_eq!(site.name(), "test_caller_macro_in_closure");
        assert!(site.file().ends_with("macros.rs"));
    }
}
