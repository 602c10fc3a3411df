//! Underline marker parsing.
//!
//! A marker is a comment line beneath a code line whose underline
//! characters sit directly under the columns the checker should flag:
//!
//! ```text
//! const ab12: AB12 = ab;
//!    // ~~~~ Type 'AB12' is not assignable to type 'AB'
//!    //   (continuation, starting at or right of the first underline)
//! ```
//!
//! Several runs on one marker line expect one diagnostic each, sharing the
//! message. A bare underline borrows the message of the next underline on
//! a following code line. `//~ message` (tilde glued to the slashes) expects a diagnostic
//! anywhere on the line above. Marker lines are removed from the text the
//! checker sees.

use smallvec::SmallVec;
use snip_diagnostic::HarnessError;
use snip_ir::{ColumnRange, Expectation, LineMap};

use crate::comment::{char_count, line_comment, strip_eol};
use crate::line_number;

/// Characters that form an underline.
pub const UNDERLINE_CHARS: [char; 2] = ['~', '^'];

/// Result of marker parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkedText {
    /// Input text with marker and continuation lines removed.
    pub text: String,
    /// Maps `text` lines to original file lines.
    pub line_map: LineMap,
    /// Expectations in source order; lines refer to `text`.
    pub expectations: Vec<Expectation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum MarkerLine<'a> {
    Underline {
        segments: SmallVec<[ColumnRange; 2]>,
        message: &'a str,
    },
    MessageOnly {
        anchor: u32,
        message: &'a str,
    },
}

impl MarkerLine<'_> {
    /// Column continuation lines must be indented past.
    fn anchor(&self) -> u32 {
        match self {
            MarkerLine::Underline { segments, .. } => segments.first().map_or(0, |s| s.start),
            MarkerLine::MessageOnly { anchor, .. } => *anchor,
        }
    }
}

fn classify(line: &str) -> Option<MarkerLine<'_>> {
    let comment = line_comment(line)?;
    let body = comment.body.trim_end();

    if let Some(rest) = body.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Some(MarkerLine::MessageOnly {
                anchor: comment.body_col(),
                message: rest.trim(),
            });
        }
    }

    let mut segments: SmallVec<[ColumnRange; 2]> = SmallVec::new();
    let mut run_start: Option<u32> = None;
    let mut message_at: Option<usize> = None;
    let mut column = comment.body_col();

    for (byte, ch) in body.char_indices() {
        if UNDERLINE_CHARS.contains(&ch) {
            run_start.get_or_insert(column);
        } else {
            if let Some(start) = run_start.take() {
                segments.push(ColumnRange::new(start, column));
            }
            if !ch.is_whitespace() {
                message_at = Some(byte);
                break;
            }
        }
        column += 1;
    }
    if let Some(start) = run_start {
        segments.push(ColumnRange::new(start, column));
    }

    if segments.is_empty() {
        return None;
    }

    Some(MarkerLine::Underline {
        segments,
        message: message_at.map_or("", |at| body[at..].trim()),
    })
}

/// Text of a continuation line, if `line` continues a marker anchored at
/// `anchor`. The text may start at the anchor column itself, so a message
/// can sit entirely on the lines below a bare underline.
fn continuation(line: &str, anchor: u32) -> Option<&str> {
    let comment = line_comment(line)?;
    let text = comment.body.trim_start();
    if text.trim().is_empty() || text.starts_with(UNDERLINE_CHARS) {
        return None;
    }
    let indent = &comment.body[..comment.body.len() - text.len()];
    let text_col = comment.body_col() + char_count(indent);
    (text_col >= anchor).then_some(text.trim_end())
}

/// The code line a marker attaches to.
#[derive(Copy, Clone, Debug)]
struct CodeLine {
    /// Line in the marker-free output.
    line: u32,
    /// Original file line.
    original: u32,
    /// Length in characters.
    width: u32,
}

/// A marker whose message may still grow by continuation lines.
#[derive(Debug)]
struct OpenMarker {
    segments: SmallVec<[ColumnRange; 2]>,
    message: String,
    anchor: u32,
    code: CodeLine,
    marker_line: u32,
}

impl OpenMarker {
    fn new(marker: &MarkerLine<'_>, code: CodeLine, marker_line: u32) -> Result<Self, HarnessError> {
        let anchor = marker.anchor();
        let (segments, message) = match marker {
            MarkerLine::Underline { segments, message } => (segments.clone(), *message),
            MarkerLine::MessageOnly { message, .. } => (SmallVec::new(), *message),
        };

        if let Some(overhang) = segments.iter().find(|s| s.last() > code.width) {
            return Err(HarnessError::malformed_marker(
                marker_line,
                format!(
                    "underline at columns {overhang} extends past the end of line {} ({} columns)",
                    code.original, code.width
                ),
            ));
        }

        Ok(OpenMarker {
            segments,
            message: message.to_string(),
            anchor,
            code,
            marker_line,
        })
    }

    fn continue_with(&mut self, more: &str) {
        if !self.message.is_empty() {
            self.message.push(' ');
        }
        self.message.push_str(more);
    }

    fn has_message(&self) -> bool {
        !self.message.trim().is_empty()
    }

    fn emit(self, expectations: &mut Vec<Expectation>) {
        if self.segments.is_empty() {
            expectations.push(
                Expectation::unbounded(self.code.line, self.message).at_marker_line(self.marker_line),
            );
            return;
        }

        for segment in &self.segments {
            expectations.push(
                Expectation::new(self.code.line, *segment, self.message.clone())
                    .at_marker_line(self.marker_line),
            );
        }
    }
}

/// Bare underlines waiting for a message.
///
/// Consecutive annotated code lines may share one message written under
/// the last of them:
///
/// ```text
///   {name: 'Alabama', capitol: 'Montgomery'},
///                  // ~~~~~~~~~~~~~~~~~~~~~
///   {name: 'Arizona', capitol: 'Phoenix'},
///                  // ~~~~~~~~~~~~~~~~~~ Object literal may only specify...
/// ```
///
/// A bare underline takes the message of the next underline that has one,
/// provided no unannotated code line comes in between.
#[derive(Debug, Default)]
struct Pending {
    markers: Vec<OpenMarker>,
}

impl Pending {
    fn close(&mut self, marker: OpenMarker, expectations: &mut Vec<Expectation>) {
        if !marker.has_message() {
            self.markers.push(marker);
            return;
        }
        for mut earlier in self.markers.drain(..) {
            earlier.message.clone_from(&marker.message);
            earlier.emit(expectations);
        }
        marker.emit(expectations);
    }

    /// Fail if a bare underline is still waiting.
    fn check_empty(&self) -> Result<(), HarnessError> {
        match self.markers.first() {
            Some(marker) => Err(HarnessError::malformed_marker(
                marker.marker_line,
                "underline has no message",
            )),
            None => Ok(()),
        }
    }
}

/// Extract expectations from `text` and remove the marker lines.
///
/// `line_map` maps `text` lines to original file lines; it is composed into
/// the output map and used for every line number in errors.
pub fn parse_markers(text: &str, line_map: &LineMap) -> Result<MarkedText, HarnessError> {
    let mut out = MarkedText::default();
    let mut target: Option<CodeLine> = None;
    // Whether `target` has a marker beneath it.
    let mut target_marked = false;
    let mut open: Option<OpenMarker> = None;
    let mut pending = Pending::default();

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let original = line_map.original_or_same(line_number(index));

        if let Some(marker) = open.as_mut() {
            if let Some(more) = continuation(line, marker.anchor) {
                marker.continue_with(more);
                continue;
            }
        }
        if let Some(marker) = open.take() {
            pending.close(marker, &mut out.expectations);
        }

        if let Some(marker) = classify(line) {
            let Some(code) = target else {
                return Err(HarnessError::malformed_marker(
                    original,
                    "marker has no code line above it",
                ));
            };
            open = Some(OpenMarker::new(&marker, code, original)?);
            target_marked = true;
            continue;
        }

        if !target_marked {
            pending.check_empty()?;
        }
        out.text.push_str(line);
        out.line_map.push(original);
        target = Some(CodeLine {
            line: line_number(out.line_map.len() - 1),
            original,
            width: char_count(strip_eol(line)),
        });
        target_marked = false;
    }

    if let Some(marker) = open.take() {
        pending.close(marker, &mut out.expectations);
    }
    pending.check_empty()?;

    Ok(out)
}

#[cfg(test)]
mod tests;
