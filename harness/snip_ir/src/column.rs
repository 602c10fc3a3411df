//! Column ranges within a single source line.

use std::fmt;

use serde::Serialize;

/// A half-open range of character columns on one line.
///
/// Layout mirrors a byte span, but counts characters:
/// - start: 1-based column of the first covered character
/// - end: 1-based column one past the last covered character
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct ColumnRange {
    pub start: u32,
    pub end: u32,
}

impl ColumnRange {
    /// Create a new range. `end` is clamped so the range is never inverted.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        let end = if end < start { start } else { end };
        ColumnRange { start, end }
    }

    /// A range covering `width` characters starting at `start`.
    #[inline]
    pub const fn with_width(start: u32, width: u32) -> Self {
        ColumnRange {
            start,
            end: start.saturating_add(width),
        }
    }

    /// Number of columns covered.
    #[inline]
    pub const fn width(self) -> u32 {
        self.end - self.start
    }

    /// Last covered column (inclusive). Equal to `start` for empty ranges.
    #[inline]
    pub const fn last(self) -> u32 {
        if self.end > self.start {
            self.end - 1
        } else {
            self.start
        }
    }

    /// Check whether a column falls inside this range.
    #[inline]
    pub const fn contains(self, column: u32) -> bool {
        column >= self.start && column < self.end
    }

    /// Check whether two ranges share at least one column.
    ///
    /// Empty ranges are treated as covering their start column, so a
    /// zero-width diagnostic still overlaps the underline it sits under.
    pub fn overlaps(self, other: ColumnRange) -> bool {
        let a_end = self.end.max(self.start + 1);
        let b_end = other.end.max(other.start + 1);
        self.start < b_end && other.start < a_end
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width() <= 1 {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.last())
        }
    }
}

#[cfg(test)]
mod tests;
