use std::fmt;

use serde::Serialize;
use snip_ir::ColumnRange;

/// Severity level of a checker diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
    Message,
}

impl Severity {
    /// Parse the category word a checker prints (`error`, `warning`, ...).
    pub fn parse(word: &str) -> Option<Severity> {
        match word {
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            "suggestion" => Some(Severity::Suggestion),
            "message" => Some(Severity::Message),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
            Severity::Message => "message",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic emitted by the type checker for a snippet.
///
/// `line` refers to the compilable text the checker saw, not the original
/// file; callers map it back through the snippet's `LineMap`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub columns: ColumnRange,
    pub severity: Severity,
    /// Checker error code, e.g. `2322` for `TS2322`.
    pub code: Option<u32>,
    /// Full message, continuation lines joined with `\n`.
    pub message: String,
}

impl Diagnostic {
    /// Create an error-severity diagnostic without a code.
    pub fn error(line: u32, columns: ColumnRange, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            columns,
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Message with line breaks and continuation indentation collapsed to
    /// single spaces. Book excerpts usually quote multi-line messages on
    /// one line.
    pub fn flat_message(&self) -> String {
        self.message.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Sort key giving a stable, reproducible diagnostic order.
    pub fn sort_key(&self) -> (u32, u32, u32, &str) {
        (self.line, self.columns.start, self.columns.end, &self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.columns, self.severity)?;
        if let Some(code) = self.code {
            write!(f, " TS{code}")?;
        }
        write!(f, ": {}", self.message)
    }
}
