//! Mapping from derived text lines back to original snippet lines.
//!
//! Every preprocessing step that drops lines (directives, markers, the
//! overlay header) produces a `LineMap` so diagnostics reported against
//! the derived text can be traced back to the file the author edits.

use serde::Serialize;

/// Line map: `lines[i]` is the original 1-based line of derived line `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineMap {
    lines: Vec<u32>,
}

impl LineMap {
    /// Empty map.
    pub fn new() -> Self {
        LineMap { lines: Vec::new() }
    }

    /// Map where derived line `n` is original line `n`, for `count` lines.
    pub fn identity(count: u32) -> Self {
        LineMap {
            lines: (1..=count).collect(),
        }
    }

    /// Record the original line of the next derived line.
    pub fn push(&mut self, original: u32) {
        self.lines.push(original);
    }

    /// Original line for a 1-based derived line, if it exists.
    pub fn original_line(&self, derived: u32) -> Option<u32> {
        if derived == 0 {
            return None;
        }
        self.lines.get((derived - 1) as usize).copied()
    }

    /// Original line for a derived line, falling back to the derived line
    /// itself when it is out of range (e.g. an end-of-file diagnostic).
    pub fn original_or_same(&self, derived: u32) -> u32 {
        self.original_line(derived).unwrap_or(derived)
    }

    /// Compose two maps: `inner` maps a further-derived text onto `self`'s
    /// derived text; the result maps it straight to the original.
    #[must_use]
    pub fn compose(&self, inner: &LineMap) -> LineMap {
        LineMap {
            lines: inner
                .lines
                .iter()
                .map(|&mid| self.original_or_same(mid))
                .collect(),
        }
    }

    /// Number of derived lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
