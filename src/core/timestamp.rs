//! Timestamp formatting utilities
//!
//! Log lines carry a local wall-clock time (`HH:mm:ss`). Log files are named
//! after the local time the logger was built: one folder per day
//! (`dd-MM-yyyy`) holding one Markdown file per run (`HH-mm-ss.md`).

use chrono::{DateTime, Local, TimeZone};
use std::path::PathBuf;

/// strftime format for the time prefix of every log line
pub const LINE_TIME_FORMAT: &str = "%H:%M:%S";
/// strftime format for the per-day folder
pub const DAY_FOLDER_FORMAT: &str = "%d-%m-%Y";
/// strftime format for the per-run file stem
pub const RUN_FILE_FORMAT: &str = "%H-%M-%S";
/// Extension of every log file
pub const LOG_FILE_EXTENSION: &str = "md";

/// Format the time prefix of a log line.
#[must_use]
pub fn line_time<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    datetime.format(LINE_TIME_FORMAT).to_string()
}

/// Time prefix for a line written now.
#[must_use]
pub fn now_line_time() -> String {
    line_time(&Local::now())
}

/// Relative path `dd-MM-yyyy/HH-mm-ss.md` of the log file for a run started
/// at `datetime`. `sequence` disambiguates runs started within the same
/// second and is appended as `_NNN` when non-zero.
#[must_use]
pub fn run_file_path<Tz: TimeZone>(datetime: &DateTime<Tz>, sequence: u32) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stem = datetime.format(RUN_FILE_FORMAT).to_string();
    let file_name = if sequence == 0 {
        format!("{}.{}", stem, LOG_FILE_EXTENSION)
    } else {
        format!("{}_{:03}.{}", stem, sequence, LOG_FILE_EXTENSION)
    };
    PathBuf::from(datetime.format(DAY_FOLDER_FORMAT).to_string()).join(file_name)
}
