//! Directive processing: `HIDE`, `COMPRESS` and their shared `END`.
//!
//! Directives each occupy a whole comment line:
//!
//! ```text
//! // HIDE
//! type AB = 'A' | 'B';      <- compiled, not shown in the book
//! // END
//! // COMPRESS
//! function long() { ... }   <- compiled, shown as `// ...`
//! // END
//! ```
//!
//! Open directives live on a stack; `END` closes the innermost one, so
//! nested spans resolve LIFO. Lines inside an outer span are governed by
//! that span alone in the rendered view.

use snip_diagnostic::HarnessError;
use snip_ir::LineMap;

use crate::comment::{eol, line_comment, strip_eol};
use crate::header::overlay_line_index;
use crate::line_number;

/// Text that replaces a COMPRESS span in the rendered view.
pub const COMPRESS_PLACEHOLDER: &str = "// ...";

/// Kind of an opening directive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Compiled, removed from the rendered view.
    Hide,
    /// Compiled, collapsed to [`COMPRESS_PLACEHOLDER`] in the rendered view.
    Compress,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::Hide => "HIDE",
            DirectiveKind::Compress => "COMPRESS",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Control {
    Open(DirectiveKind),
    End,
}

/// Classify a directive line. The comment body must be exactly the keyword.
fn classify(line: &str) -> Option<Control> {
    match line_comment(line)?.body.trim() {
        "HIDE" => Some(Control::Open(DirectiveKind::Hide)),
        "COMPRESS" => Some(Control::Open(DirectiveKind::Compress)),
        "END" => Some(Control::End),
        _ => None,
    }
}

/// Both derived views of a snippet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessedText {
    /// Directive lines and the overlay header removed; all code kept.
    pub compilable: String,
    pub compilable_map: LineMap,
    /// HIDE spans removed, COMPRESS spans collapsed to a placeholder.
    pub rendered: String,
    pub rendered_map: LineMap,
}

#[derive(Copy, Clone, Debug)]
struct OpenSpan {
    kind: DirectiveKind,
    line: u32,
}

/// Produce the compilable and rendered views of `text`.
///
/// Text without directives (and without an overlay header) comes back
/// unchanged in both views, line terminators included.
pub fn process(text: &str) -> Result<ProcessedText, HarnessError> {
    let header = overlay_line_index(text);
    let mut out = ProcessedText::default();
    let mut stack: Vec<OpenSpan> = Vec::new();

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let line_no = line_number(index);

        if header == Some(index) {
            continue;
        }

        match classify(line) {
            Some(Control::Open(kind)) => {
                if stack.is_empty() && kind == DirectiveKind::Compress {
                    let content = strip_eol(line);
                    let indent = &content[..content.len() - content.trim_start().len()];
                    out.rendered.push_str(indent);
                    out.rendered.push_str(COMPRESS_PLACEHOLDER);
                    out.rendered.push_str(eol(line));
                    out.rendered_map.push(line_no);
                }
                stack.push(OpenSpan {
                    kind,
                    line: line_no,
                });
            }
            Some(Control::End) => {
                if stack.pop().is_none() {
                    return Err(HarnessError::UnexpectedEnd { line: line_no });
                }
            }
            None => {
                out.compilable.push_str(line);
                out.compilable_map.push(line_no);
                if stack.is_empty() {
                    out.rendered.push_str(line);
                    out.rendered_map.push(line_no);
                }
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(HarnessError::UnterminatedDirective {
            directive: open.kind.as_str(),
            line: open.line,
        });
    }

    Ok(out)
}
