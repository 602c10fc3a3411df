//! Harness error taxonomy.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Failure category, used for tallying and machine-readable reports.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum ErrorKind {
    MalformedMarker,
    UnterminatedDirective,
    UnexpectedEnd,
    CheckerInvocationError,
    CheckerTimeout,
    /// Expected and actual diagnostics disagree. Never raised as a
    /// [`HarnessError`]; it is the outcome of a completed verification.
    MatchFailure,
    /// The snippet file could not be read.
    SourceUnreadable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MalformedMarker => "MalformedMarker",
            ErrorKind::UnterminatedDirective => "UnterminatedDirective",
            ErrorKind::UnexpectedEnd => "UnexpectedEnd",
            ErrorKind::CheckerInvocationError => "CheckerInvocationError",
            ErrorKind::CheckerTimeout => "CheckerTimeout",
            ErrorKind::MatchFailure => "MatchFailure",
            ErrorKind::SourceUnreadable => "SourceUnreadable",
        }
    }

    /// Structural problems with the snippet text itself, as opposed to
    /// problems running the checker.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            ErrorKind::MalformedMarker | ErrorKind::UnterminatedDirective | ErrorKind::UnexpectedEnd
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that prevents one snippet from being verified.
///
/// Line numbers are original file lines, so the message can be acted on
/// directly.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("malformed marker at line {line}: {reason}")]
    MalformedMarker { line: u32, reason: String },

    #[error("unterminated {directive} directive opened at line {line}")]
    UnterminatedDirective { directive: &'static str, line: u32 },

    #[error("END at line {line} has no open directive")]
    UnexpectedEnd { line: u32 },

    #[error("checker invocation failed: {0}")]
    CheckerInvocation(String),

    #[error("checker did not finish within {}s", .0.as_secs_f64())]
    CheckerTimeout(Duration),

    #[error("could not read snippet: {0}")]
    SourceUnreadable(String),
}

impl HarnessError {
    #[cold]
    pub fn malformed_marker(line: u32, reason: impl Into<String>) -> Self {
        HarnessError::MalformedMarker {
            line,
            reason: reason.into(),
        }
    }

    #[cold]
    pub fn invocation(message: impl Into<String>) -> Self {
        HarnessError::CheckerInvocation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::MalformedMarker { .. } => ErrorKind::MalformedMarker,
            HarnessError::UnterminatedDirective { .. } => ErrorKind::UnterminatedDirective,
            HarnessError::UnexpectedEnd { .. } => ErrorKind::UnexpectedEnd,
            HarnessError::CheckerInvocation(_) => ErrorKind::CheckerInvocationError,
            HarnessError::CheckerTimeout(_) => ErrorKind::CheckerTimeout,
            HarnessError::SourceUnreadable(_) => ErrorKind::SourceUnreadable,
        }
    }

    /// Original file line the error points at, when it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            HarnessError::MalformedMarker { line, .. }
            | HarnessError::UnterminatedDirective { line, .. }
            | HarnessError::UnexpectedEnd { line } => Some(*line),
            _ => None,
        }
    }
}
