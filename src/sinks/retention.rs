//! Log file retention
//!
//! Each logger construction gets a fresh file under
//! `<directory>/dd-MM-yyyy/HH-mm-ss.md`. Before that file is created the
//! directory is trimmed so that, counting the new file, no more than
//! `max_files` log files remain. Retention runs once per run; nothing is
//! rotated while the logger is writing.

use crate::core::error::{LoggerError, Result};
use crate::core::timestamp::{run_file_path, LOG_FILE_EXTENSION};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Upper bound on same-second runs before giving up on a unique name.
const MAX_SEQUENCE: u32 = 999;

/// Enforces the retention cap on a log directory and allocates the file for
/// the current run.
///
/// # Examples
///
/// ```no_run
/// use rust_trace_logger::sinks::RetentionManager;
///
/// let path = RetentionManager::new("logs", 7).prepare().unwrap();
/// println!("logging to {}", path.display());
/// ```
#[derive(Debug, Clone)]
pub struct RetentionManager {
    directory: PathBuf,
    max_files: usize,
}

impl RetentionManager {
    pub fn new(directory: impl Into<PathBuf>, max_files: usize) -> Self {
        Self {
            directory: directory.into(),
            max_files,
        }
    }

    /// Trim old files and create an empty log file named after the current
    /// local time.
    ///
    /// # Errors
    ///
    /// Any filesystem failure (directory creation, listing, deletion or file
    /// creation) is returned; the caller cannot log without a target file.
    pub fn prepare(&self) -> Result<PathBuf> {
        self.prepare_at(&Local::now())
    }

    /// Same as [`prepare`](Self::prepare) with an explicit run timestamp.
    pub fn prepare_at(&self, now: &DateTime<Local>) -> Result<PathBuf> {
        if self.max_files == 0 {
            return Err(LoggerError::config(
                "RetentionManager",
                "max_files must be at least 1",
            ));
        }

        if self.directory.exists() {
            self.enforce_cap()?;
        } else {
            fs::create_dir_all(&self.directory).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", self.directory.display()),
                    e,
                )
            })?;
        }

        self.create_run_file(now)
    }

    /// Log files currently on disk, oldest first.
    ///
    /// Files directly in the directory and in its per-day folders are counted.
    pub fn log_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
        self.collect_log_files(&self.directory, true, &mut files)?;
        files.sort();
        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    /// Delete the oldest files so one slot is free for the new run.
    ///
    /// Returns the number of files deleted.
    fn enforce_cap(&self) -> Result<usize> {
        let files = self.log_files()?;
        if files.len() < self.max_files {
            return Ok(0);
        }

        let excess = files.len() - self.max_files + 1;
        for path in files.iter().take(excess) {
            fs::remove_file(path).map_err(|e| {
                LoggerError::retention(
                    path.display().to_string(),
                    format!("Failed to delete old log file: {}", e),
                )
            })?;

            // Empty day folders go with their last file; a failure here is harmless.
            if let Some(parent) = path.parent() {
                if parent != self.directory {
                    let _ = fs::remove_dir(parent);
                }
            }
        }

        Ok(excess)
    }

    fn collect_log_files(
        &self,
        dir: &Path,
        descend: bool,
        out: &mut Vec<(SystemTime, PathBuf)>,
    ) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| {
            LoggerError::io_operation(
                "list log directory",
                format!("Failed to read '{}'", dir.display()),
                e,
            )
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let metadata = entry.metadata()?;

            if metadata.is_dir() {
                if descend {
                    self.collect_log_files(&path, false, out)?;
                }
                continue;
            }

            let is_log = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(LOG_FILE_EXTENSION));
            if !is_log {
                continue;
            }

            // Not every filesystem records creation time.
            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            out.push((created, path));
        }

        Ok(())
    }

    fn create_run_file(&self, now: &DateTime<Local>) -> Result<PathBuf> {
        for sequence in 0..=MAX_SEQUENCE {
            let path = self.directory.join(run_file_path(now, sequence));

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "create log directory",
                        format!("Failed to create directory '{}'", parent.display()),
                        e,
                    )
                })?;
            }

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(path),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(LoggerError::file_sink(
                        path.display().to_string(),
                        format!("Failed to create log file: {}", e),
                    ))
                }
            }
        }

        Err(LoggerError::file_sink(
            self.directory.display().to_string(),
            format!("More than {} runs started within one second", MAX_SEQUENCE + 1),
        ))
    }
}
