//! Console sink
//!
//! The console is shared by the whole process, so the logger never touches it
//! directly. It holds a [`ConsoleSink`] capability and, for the duration of one
//! write, borrows it through a [`ConsoleGuard`] that restores the default
//! color when dropped, including on early returns and panics.

use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

pub trait ConsoleSink: Send {
    /// Whether a real console is attached to the process.
    fn is_attached(&self) -> bool;
    fn set_color(&mut self, color: Color);
    fn reset_color(&mut self);
    fn write_line(&mut self, line: &str) -> io::Result<()>;
    fn name(&self) -> &str {
        "console"
    }
}

/// Console sink writing to the process's standard output.
///
/// Redirected output (a file, a pipe, a service journal) is still a console,
/// only without colors. The sink reports itself detached once a write fails.
pub struct StdConsole {
    use_colors: bool,
    color: Option<Color>,
    failed: bool,
}

impl StdConsole {
    /// Colors are used when standard output is a terminal.
    pub fn new() -> Self {
        Self::with_colors(io::stdout().is_terminal())
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            color: None,
            failed: false,
        }
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    fn emit<W: Write>(&mut self, out: &mut W, line: &str) -> io::Result<()> {
        let result = match self.color {
            Some(color) if self.use_colors => writeln!(out, "{}", line.color(color)),
            _ => writeln!(out, "{}", line),
        }
        .and_then(|()| out.flush());

        if result.is_err() {
            self.failed = true;
        }
        result
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for StdConsole {
    fn is_attached(&self) -> bool {
        !self.failed
    }

    fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn reset_color(&mut self) {
        self.color = None;
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.emit(&mut io::stdout().lock(), line)
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// A line captured by [`MemoryConsole`] together with the color it was
/// written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub color: Option<Color>,
    pub text: String,
}

/// In-memory console for tests and headless embedding.
///
/// Clones share the same buffer and color state, so a test can keep one
/// handle and give the other to the logger.
#[derive(Clone)]
pub struct MemoryConsole {
    attached: bool,
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    color: Option<Color>,
    lines: Vec<CapturedLine>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self {
            attached: true,
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    /// A console that reports no terminal attached.
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    pub fn lines(&self) -> Vec<CapturedLine> {
        self.state.lock().lines.clone()
    }

    /// Current color state; `None` once the logger has restored the default.
    pub fn current_color(&self) -> Option<Color> {
        self.state.lock().color
    }
}

impl Default for MemoryConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for MemoryConsole {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_color(&mut self, color: Color) {
        self.state.lock().color = Some(color);
    }

    fn reset_color(&mut self) {
        self.state.lock().color = None;
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut state = self.state.lock();
        let color = state.color;
        state.lines.push(CapturedLine {
            color,
            text: line.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Scoped borrow of the console with a foreground color applied.
pub struct ConsoleGuard<'a> {
    console: &'a mut dyn ConsoleSink,
}

impl<'a> ConsoleGuard<'a> {
    pub fn acquire(console: &'a mut dyn ConsoleSink, color: Color) -> Self {
        console.set_color(color);
        Self { console }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.console.write_line(line)
    }

    pub fn name(&self) -> &str {
        self.console.name()
    }
}

impl Drop for ConsoleGuard<'_> {
    fn drop(&mut self) {
        self.console.reset_color();
    }
}
