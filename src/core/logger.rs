//! Main logger implementation
//!
//! Every public call funnels into one synchronous write pipeline:
//!
//! 1. drop the call if its level is above the threshold or both sinks are
//!    switched off in the configuration;
//! 2. take the instance lock, which covers composing and emitting to both
//!    sinks, so lines from different threads never interleave;
//! 3. resolve the active sinks from the per-call [`OutputFlags`] and the
//!    configuration, then write an optional `[Caller]` line followed by the
//!    message line;
//! 4. restore the console color and release the lock.

use super::{
    caller::CallerContext,
    config::LoggerConfiguration,
    error::Result,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_flags::OutputFlags,
    payload::{Direction, PayloadEnvelope, RequestKind},
    timestamp,
};
use crate::filters::{
    Annotated, FieldDescriptor, FilterRegistry, JsonDocument, PayloadFilterEngine,
    SchemaRegistry, TypeSchema,
};
use crate::sinks::{ConsoleGuard, ConsoleSink, FileSink, RetentionManager, StdConsole};
use colored::Color;
use parking_lot::Mutex;
use std::any::TypeId;
use std::path::Path;

const CONSOLE_MISSING_WARNING: &str =
    "Console output was requested but no console is attached to this process";

/// One composed write request.
struct Record<'a> {
    flags: OutputFlags,
    level: LogLevel,
    message: Option<&'a str>,
    caller: Option<&'a CallerContext>,
    color: Option<Color>,
}

/// Join separator, time, tag and body into one line.
///
/// A leading space coming from the separator is trimmed; a leading line
/// break is kept so the entry is set off from the previous one.
fn compose_line(separator: &str, time: &str, tag: &str, body: &str) -> String {
    let composed = format!("{}{} [{}]: {}", separator, time, tag, body);
    composed.trim_start_matches(' ').to_string()
}

/// Render an error's `source()` chain on one line.
fn source_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    if causes.is_empty() {
        "no underlying cause".to_string()
    } else {
        format!("caused by: {}", causes.join(" <- "))
    }
}

pub struct Logger {
    config: LoggerConfiguration,
    file: FileSink,
    /// Instance-wide lock serializing every write, file and console alike.
    console: Mutex<Box<dyn ConsoleSink>>,
    filters: FilterRegistry,
    schemas: SchemaRegistry,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger writing to a fresh file in `config.directory`.
    ///
    /// Old files beyond `config.max_files` are removed first.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the log directory
    /// or file cannot be created.
    pub fn new(config: LoggerConfiguration) -> Result<Self> {
        Self::with_console(config, Box::new(StdConsole::new()))
    }

    /// Create a logger with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(LoggerConfiguration::default())
    }

    fn with_console(config: LoggerConfiguration, console: Box<dyn ConsoleSink>) -> Result<Self> {
        config.validate()?;
        let path = RetentionManager::new(&config.directory, config.max_files).prepare()?;

        Ok(Self {
            config,
            file: FileSink::new(path),
            console: Mutex::new(console),
            filters: FilterRegistry::new(),
            schemas: SchemaRegistry::new(),
            metrics: LoggerMetrics::new(),
        })
    }

    /// Register the action run for fields marked with `M`.
    ///
    /// A later registration for the same marker replaces this one.
    /// Registration needs exclusive access, so it happens before the logger
    /// is shared between threads.
    pub fn register_filter<M, F>(&mut self, action: F)
    where
        M: 'static,
        F: Fn(&FieldDescriptor, &mut JsonDocument) + Send + Sync + 'static,
    {
        self.filters.register::<M, F>(action);
    }

    /// Declare the marked fields of a payload type.
    pub fn register_type_schema(&mut self, schema: TypeSchema) {
        self.schemas.register(schema);
    }

    pub fn register_annotated<T: Annotated>(&mut self) {
        self.schemas.register_annotated::<T>();
    }

    pub fn configuration(&self) -> &LoggerConfiguration {
        &self.config
    }

    /// Log file of the current run.
    pub fn log_file_path(&self) -> &Path {
        self.file.path()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn log(
        &self,
        flags: OutputFlags,
        level: LogLevel,
        message: impl AsRef<str>,
        caller: Option<&CallerContext>,
    ) {
        self.write(Record {
            flags,
            level,
            message: Some(message.as_ref()),
            caller,
            color: None,
        });
    }

    /// Emit only the `[Caller]` line, at debug level.
    pub fn log_caller_info(&self, flags: OutputFlags, caller: &CallerContext) {
        self.write(Record {
            flags,
            level: LogLevel::Debug,
            message: None,
            caller: Some(caller),
            color: None,
        });
    }

    #[inline]
    pub fn log_information(
        &self,
        flags: OutputFlags,
        message: impl AsRef<str>,
        caller: Option<&CallerContext>,
    ) {
        self.log(flags, LogLevel::Information, message, caller);
    }

    #[inline]
    pub fn log_warning(
        &self,
        flags: OutputFlags,
        message: impl AsRef<str>,
        caller: Option<&CallerContext>,
    ) {
        self.log(flags, LogLevel::Warning, message, caller);
    }

    #[inline]
    pub fn log_debug(
        &self,
        flags: OutputFlags,
        message: impl AsRef<str>,
        caller: Option<&CallerContext>,
    ) {
        self.log(flags, LogLevel::Debug, message, caller);
    }

    #[inline]
    pub fn log_error(
        &self,
        flags: OutputFlags,
        message: impl AsRef<str>,
        caller: Option<&CallerContext>,
    ) {
        self.log(flags, LogLevel::Error, message, caller);
    }

    /// Log an error value: its message, then a `[StackTrace]` line with the
    /// chain of underlying causes.
    pub fn log_exception(
        &self,
        flags: OutputFlags,
        error: &(dyn std::error::Error + 'static),
        caller: Option<&CallerContext>,
    ) {
        let message = format!("{}\n[StackTrace]: {}", error, source_chain(error));
        self.log(flags, LogLevel::Error, message, caller);
    }

    /// Log an error linking the call site that failed (`callee`) to the one
    /// that invoked it (`caller`).
    pub fn log_error_trace(
        &self,
        flags: OutputFlags,
        message: impl AsRef<str>,
        caller: &CallerContext,
        callee: &CallerContext,
    ) {
        let message = format!(
            "{}\n\t[Caller]: {}\n\t[Callee]: {}",
            message.as_ref(),
            caller,
            callee
        );
        self.log(flags, LogLevel::Error, message, None);
    }

    /// Filter and log a JSON payload exchanged as payload type `T`.
    pub fn log_http_payload<T: 'static>(
        &self,
        flags: OutputFlags,
        direction: Direction,
        request_kind: RequestKind,
        raw_json: &str,
    ) {
        self.log_http_payload_for(TypeId::of::<T>(), flags, direction, request_kind, raw_json);
    }

    /// Filter and log a JSON payload at debug level.
    ///
    /// Malformed JSON is reported as an error line and the payload is dropped.
    pub fn log_http_payload_for(
        &self,
        output_type: TypeId,
        flags: OutputFlags,
        direction: Direction,
        request_kind: RequestKind,
        raw_json: &str,
    ) {
        let envelope = PayloadEnvelope::new(direction, request_kind, raw_json);

        let mut doc = match JsonDocument::parse(envelope.raw_json) {
            Ok(doc) => doc,
            Err(e) => {
                self.metrics.record_payload_dropped();
                self.log_error(
                    flags,
                    format!("[{}]({}): could not parse JSON: {}", direction, request_kind, e),
                    None,
                );
                return;
            }
        };

        if !self.would_write(LogLevel::Debug) {
            self.metrics.record_suppressed();
            return;
        }

        PayloadFilterEngine::new(&self.schemas, &self.filters)
            .enabled(!self.config.disable_reflection)
            .apply(output_type, &mut doc);

        let serialized = match doc.to_pretty_string() {
            Ok(serialized) => serialized,
            Err(e) => {
                self.metrics.record_payload_dropped();
                self.log_error(flags, format!("could not serialize JSON payload: {}", e), None);
                return;
            }
        };

        self.write(Record {
            flags,
            level: LogLevel::Debug,
            message: Some(&envelope.compose(&serialized)),
            caller: None,
            color: Some(self.config.payload_colors.for_direction(direction)),
        });
    }

    /// `None` is only a threshold; a message at that level is never written.
    fn would_write(&self, level: LogLevel) -> bool {
        level != LogLevel::None
            && level.is_enabled(self.config.threshold)
            && !self.config.all_sinks_suppressed()
    }

    fn write(&self, record: Record<'_>) {
        if !self.would_write(record.level) {
            self.metrics.record_suppressed();
            return;
        }

        let mut console = self.console.lock();

        let file_active =
            !self.config.suppress_file && !record.flags.contains(OutputFlags::SUPPRESS_FILE);
        let mut console_active = !self.config.suppress_console
            && !record.flags.contains(OutputFlags::SUPPRESS_CONSOLE);

        let time = timestamp::now_line_time();
        let mut file_lines: Vec<String> = Vec::with_capacity(3);

        if console_active && !console.is_attached() {
            console_active = false;
            self.metrics.record_console_unavailable();
            if file_active {
                file_lines.push(compose_line(
                    "",
                    &time,
                    LogLevel::Warning.to_str(),
                    CONSOLE_MISSING_WARNING,
                ));
            }
        }

        if !file_active && !console_active {
            self.metrics.record_suppressed();
            return;
        }

        let separator = if record.flags.contains(OutputFlags::SUPPRESS_LEADING_NEWLINE) {
            " "
        } else {
            "\n"
        };

        // The separator opens the entry; a caller line and its message form one block.
        let mut lines: Vec<String> = Vec::with_capacity(2);
        let mut lead = separator;
        if let Some(caller) = record.caller {
            lines.push(compose_line(lead, &time, "Caller", &caller.to_string()));
            lead = "";
        }
        if let Some(message) = record.message {
            lines.push(compose_line(lead, &time, record.level.to_str(), message));
        }

        let mut delivered = false;

        if file_active {
            file_lines.extend(lines.iter().cloned());
            match self.file.append_lines(&file_lines) {
                Ok(()) => delivered = true,
                Err(e) => {
                    self.metrics.record_sink_failure();
                    eprintln!("[LOGGER ERROR] File sink failed: {}", e);
                }
            }
        }

        if console_active {
            let color = record
                .color
                .unwrap_or_else(|| self.config.level_colors.for_level(record.level));
            let mut guard = ConsoleGuard::acquire(&mut **console, color);
            let mut console_ok = true;
            for line in &lines {
                if let Err(e) = guard.write_line(line) {
                    self.metrics.record_sink_failure();
                    eprintln!("[LOGGER ERROR] Console sink '{}' failed: {}", guard.name(), e);
                    console_ok = false;
                    break;
                }
            }
            delivered |= console_ok;
        }

        if delivered {
            self.metrics.record_written();
        }
    }
}

/// Builder for constructing a [`Logger`] with filters and payload schemas in
/// place before it is shared.
///
/// # Example
///
/// ```no_run
/// use rust_trace_logger::prelude::*;
/// use rust_trace_logger::filters::{redact, TypeSchema};
///
/// struct Sensitive;
/// struct LoginRequest;
///
/// let logger = Logger::builder()
///     .configuration(LoggerConfiguration::new().with_max_files(5))
///     .filter::<Sensitive, _>(redact("***"))
///     .schema(TypeSchema::of::<LoginRequest>().marked::<Sensitive>("password"))
///     .build()
///     .unwrap();
///
/// logger.log_http_payload::<LoginRequest>(
///     OutputFlags::NONE,
///     Direction::Sent,
///     RequestKind::Post,
///     r#"{"user":"ada","password":"hunter2"}"#,
/// );
/// ```
pub struct LoggerBuilder {
    config: LoggerConfiguration,
    console: Option<Box<dyn ConsoleSink>>,
    filters: FilterRegistry,
    schemas: SchemaRegistry,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfiguration::default(),
            console: None,
            filters: FilterRegistry::new(),
            schemas: SchemaRegistry::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn configuration(mut self, config: LoggerConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Replace the standard output console.
    #[must_use = "builder methods return a new value"]
    pub fn console<C: ConsoleSink + 'static>(mut self, console: C) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filter<M, F>(mut self, action: F) -> Self
    where
        M: 'static,
        F: Fn(&FieldDescriptor, &mut JsonDocument) + Send + Sync + 'static,
    {
        self.filters.register::<M, F>(action);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn schema(mut self, schema: TypeSchema) -> Self {
        self.schemas.register(schema);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn annotated<T: Annotated>(mut self) -> Self {
        self.schemas.register_annotated::<T>();
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Same as [`Logger::new`].
    pub fn build(self) -> Result<Logger> {
        let console = self
            .console
            .unwrap_or_else(|| Box::new(StdConsole::new()));
        let mut logger = Logger::with_console(self.config, console)?;
        logger.filters = self.filters;
        logger.schemas = self.schemas;
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
