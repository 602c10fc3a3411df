//! Snippet preprocessing.
//!
//! Turns an annotated snippet into what the type checker should see and
//! what the checker's output should be compared against:
//!
//! ```text
//! raw text
//!     │  directives::process      (HIDE / COMPRESS / END, tsConfig header)
//!     ▼
//! compilable text + rendered text
//!     │  markers::parse_markers   (~~~~ message)
//!     ▼
//! marker-free text + Vec<Expectation>
//! ```
//!
//! Every step keeps a `LineMap` so positions can be reported against the
//! file the author edits.

mod comment;
pub mod directives;
pub mod header;
pub mod markers;

pub use directives::{process, DirectiveKind, ProcessedText, COMPRESS_PLACEHOLDER};
pub use header::{overlay_line_index, parse_overlay};
pub use markers::{parse_markers, MarkedText};

use snip_diagnostic::HarnessError;
use snip_ir::{Expectation, LineMap};

/// A snippet after all preprocessing, ready for the checker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreparedSnippet {
    /// Text handed to the checker: directives, header and markers removed.
    pub compilable: String,
    /// Maps `compilable` lines to original file lines.
    pub line_map: LineMap,
    /// Expected diagnostics, lines relative to `compilable`.
    pub expectations: Vec<Expectation>,
    /// Book view: HIDE spans removed, COMPRESS spans collapsed, markers kept.
    pub rendered: String,
    /// Maps `rendered` lines to original file lines.
    pub rendered_map: LineMap,
}

/// Run the full preprocessing pipeline on raw snippet text.
pub fn prepare(text: &str) -> Result<PreparedSnippet, HarnessError> {
    let processed = directives::process(text)?;
    let marked = markers::parse_markers(&processed.compilable, &processed.compilable_map)?;

    tracing::trace!(
        expectations = marked.expectations.len(),
        lines = marked.line_map.len(),
        "prepared snippet"
    );

    Ok(PreparedSnippet {
        compilable: marked.text,
        line_map: marked.line_map,
        expectations: marked.expectations,
        rendered: processed.rendered,
        rendered_map: processed.rendered_map,
    })
}

/// 1-based line number for a 0-based line index.
pub(crate) fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
