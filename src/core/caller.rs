//! Call-site information attached to log lines

use std::fmt;

/// Where a logging call came from.
///
/// Usually built with the [`caller!`](crate::caller) macro, which fills in
/// the enclosing function, `file!()` and `line!()` at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerContext {
    name: String,
    file: String,
    line: u32,
}

impl CallerContext {
    pub fn new(name: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            line,
        }
    }

    /// Build from a function path such as `my_app::client::send::__f`,
    /// keeping only the last real segment.
    #[doc(hidden)]
    pub fn from_function_path(path: &str, file: &str, line: u32) -> Self {
        let trimmed = path.strip_suffix("::__f").unwrap_or(path);
        let trimmed = trimmed.trim_end_matches("::{{closure}}");
        let name = trimmed.rsplit("::").next().unwrap_or(trimmed);
        Self::new(name, file, line)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() in {} at line {}", self.name, self.file, self.line)
    }
}
