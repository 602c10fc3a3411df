//! Expected diagnostics parsed from underline markers.

use std::fmt;

use serde::Serialize;

use crate::ColumnRange;

/// One expected diagnostic.
///
/// `line` refers to the marker-free compilable text handed to the checker;
/// `marker_line` is where the marker itself sits in the original file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Expectation {
    /// Line of the annotated code, 1-based, in the compilable text.
    pub line: u32,
    /// Underlined columns, or `None` for a message-only marker that
    /// applies to the whole line.
    pub columns: Option<ColumnRange>,
    /// Fragment that must occur in the actual diagnostic message.
    pub message: String,
    /// Original file line of the marker comment.
    pub marker_line: u32,
}

impl Expectation {
    /// Expectation with an underlined column range.
    pub fn new(line: u32, columns: ColumnRange, message: impl Into<String>) -> Self {
        Expectation {
            line,
            columns: Some(columns),
            message: message.into(),
            marker_line: line,
        }
    }

    /// Expectation covering the whole line.
    pub fn unbounded(line: u32, message: impl Into<String>) -> Self {
        Expectation {
            line,
            columns: None,
            message: message.into(),
            marker_line: line,
        }
    }

    /// Set the original line of the marker comment.
    #[must_use]
    pub fn at_marker_line(mut self, marker_line: u32) -> Self {
        self.marker_line = marker_line;
        self
    }

    /// Leftmost column, used to order expectations on the same line.
    pub fn start_column(&self) -> u32 {
        self.columns.map_or(0, |c| c.start)
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.columns {
            Some(columns) => write!(f, "{}:{}: {}", self.line, columns, self.message),
            None => write!(f, "{}: {}", self.line, self.message),
        }
    }
}
