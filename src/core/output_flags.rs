//! Per-call output flags

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set selecting sinks and line formatting for a single logging call.
///
/// Flags combine freely:
///
/// ```
/// use rust_trace_logger::OutputFlags;
///
/// let flags = OutputFlags::SUPPRESS_CONSOLE | OutputFlags::SUPPRESS_LEADING_NEWLINE;
/// assert!(flags.contains(OutputFlags::SUPPRESS_CONSOLE));
/// assert!(!flags.contains(OutputFlags::SUPPRESS_FILE));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OutputFlags(u8);

impl OutputFlags {
    pub const NONE: OutputFlags = OutputFlags(0);
    pub const SUPPRESS_CONSOLE: OutputFlags = OutputFlags(1 << 0);
    pub const SUPPRESS_FILE: OutputFlags = OutputFlags(1 << 1);
    /// Start the line with a single space instead of a line break.
    pub const SUPPRESS_LEADING_NEWLINE: OutputFlags = OutputFlags(1 << 2);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        OutputFlags(bits & 0b111)
    }

    #[inline]
    pub const fn contains(self, other: OutputFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for OutputFlags {
    type Output = OutputFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        OutputFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for OutputFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "OutputFlags(NONE)");
        }
        let names: Vec<&str> = [
            (OutputFlags::SUPPRESS_CONSOLE, "SUPPRESS_CONSOLE"),
            (OutputFlags::SUPPRESS_FILE, "SUPPRESS_FILE"),
            (OutputFlags::SUPPRESS_LEADING_NEWLINE, "SUPPRESS_LEADING_NEWLINE"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
        write!(f, "OutputFlags({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combination() {
        let flags = OutputFlags::SUPPRESS_FILE | OutputFlags::SUPPRESS_CONSOLE;
        assert!(flags.contains(OutputFlags::SUPPRESS_FILE));
        assert!(flags.contains(OutputFlags::SUPPRESS_CONSOLE));
        assert!(!flags.contains(OutputFlags::SUPPRESS_LEADING_NEWLINE));
        assert!(flags.contains(OutputFlags::NONE));
    }

    #[test]
    fn test_truncate_unknown_bits() {
        assert_eq!(OutputFlags::from_bits_truncate(0xFF).bits(), 0b111);
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", OutputFlags::NONE), "OutputFlags(NONE)");
        assert_eq!(
            format!("{:?}", OutputFlags::SUPPRESS_CONSOLE | OutputFlags::SUPPRESS_FILE),
            "OutputFlags(SUPPRESS_CONSOLE | SUPPRESS_FILE)"
        );
    }
}
