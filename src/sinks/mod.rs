//! Output sinks and log file retention

pub mod console;
pub mod file;
pub mod retention;

pub use console::{CapturedLine, ConsoleGuard, ConsoleSink, MemoryConsole, StdConsole};
pub use file::FileSink;
pub use retention::RetentionManager;
