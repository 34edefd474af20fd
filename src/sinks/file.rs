//! File sink implementation

use crate::core::{LoggerError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends lines to the log file of the current run.
///
/// Every append opens the file, writes and closes it again, so whatever was
/// logged before a crash is already on disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append all `lines` under a single open handle.
    pub fn append_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to open for append: {}", e),
                )
            })?;

        let mut output = String::new();
        for line in lines {
            output.push_str(line.as_ref());
            output.push('\n');
        }

        file.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        file.flush()?;
        Ok(())
    }
}
