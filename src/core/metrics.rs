//! Logger metrics for observability
//!
//! Counters for what the write pipeline did with each call: written,
//! gated out, dropped payloads and sink failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_trace_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.messages_written(), 1);
/// assert_eq!(metrics.messages_suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages that reached at least one sink
    messages_written: AtomicU64,

    /// Messages dropped by the severity threshold or global sink suppression
    messages_suppressed: AtomicU64,

    /// Payloads dropped because their JSON did not parse
    payloads_dropped: AtomicU64,

    /// Failed file appends or console writes
    sink_failures: AtomicU64,

    /// Calls that asked for the console while none was attached
    console_unavailable: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            messages_written: AtomicU64::new(0),
            messages_suppressed: AtomicU64::new(0),
            payloads_dropped: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            console_unavailable: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn messages_written(&self) -> u64 {
        self.messages_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_suppressed(&self) -> u64 {
        self.messages_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn payloads_dropped(&self) -> u64 {
        self.payloads_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_unavailable(&self) -> u64 {
        self.console_unavailable.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.messages_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.messages_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_payload_dropped(&self) -> u64 {
        self.payloads_dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_unavailable(&self) -> u64 {
        self.console_unavailable.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
