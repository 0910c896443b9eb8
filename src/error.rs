//! Error type shared by the enumerator, the completion engine and the PLA codec.

use std::fmt;
use std::io;

use crate::types::{Pattern, Row};

/// Where in the input a width mismatch was detected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Position {
    /// Index (0-based) of a row handed to the completion engine.
    Row(usize),
    /// Line number (1-based) in a PLA document.
    Line(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Row(index) => write!(f, "row {}", index),
            Position::Line(line) => write!(f, "line {}", line),
        }
    }
}

/// Errors reported by this crate.
#[derive(Debug)]
pub enum Error {
    /// Requested width is zero or above the configured ceiling.
    InvalidWidth {
        what: &'static str,
        width: usize,
        max: Option<usize>,
    },
    /// Two sequences that must share a width do not.
    WidthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
        at: Option<Position>,
    },
    /// Malformed header, directive or row in the text format.
    Format { line: Option<usize>, message: String },
    /// A label directive (`.ilb` / `.olb`) appears more than once.
    AmbiguousLabel { directive: &'static str, line: usize },
    /// Two rows with different outputs both cover the same concrete input (strict mode only).
    ConflictingCoverage { input: Pattern, first: Row, second: Row },
    /// File I/O error.
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Attaches a line number to a format error that has none.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::Format { line: None, message } => Error::Format {
                line: Some(line),
                message,
            },
            e => e,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidWidth { what, width, max } => match max {
                Some(max) => write!(f, "invalid {} width {} (expected 1..={})", what, width, max),
                None => write!(f, "invalid {} width {} (expected at least 1)", what, width),
            },
            Error::WidthMismatch {
                what,
                expected,
                found,
                at,
            } => {
                write!(f, "{} width mismatch: expected {}, found {}", what, expected, found)?;
                if let Some(at) = at {
                    write!(f, " at {}", at)?;
                }
                Ok(())
            }
            Error::Format { line, message } => match line {
                Some(line) => write!(f, "format error at line {}: {}", line, message),
                None => write!(f, "format error: {}", message),
            },
            Error::AmbiguousLabel { directive, line } => {
                write!(f, "duplicate `{}` directive at line {}", directive, line)
            }
            Error::ConflictingCoverage { input, first, second } => write!(
                f,
                "input {} is covered by `{}` and `{}` with different outputs",
                input, first, second
            ),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_mismatch() {
        let e = Error::WidthMismatch {
            what: "pattern",
            expected: 3,
            found: 2,
            at: Some(Position::Row(0)),
        };
        assert_eq!(e.to_string(), "pattern width mismatch: expected 3, found 2 at row 0");
    }

    #[test]
    fn test_display_invalid_width() {
        let e = Error::InvalidWidth {
            what: "input",
            width: 0,
            max: Some(20),
        };
        assert_eq!(e.to_string(), "invalid input width 0 (expected 1..=20)");
    }

    #[test]
    fn test_io_source() {
        use std::error::Error as _;

        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("I/O error"));
    }
}
