//! Parsing `tsc --pretty false` output.
//!
//! ```text
//! snippet.ts(3,7): error TS2322: Type 'string' is not assignable to type 'number'.
//!   Type 'x' is not assignable to type 'y'.
//! error TS5023: Unknown compiler option 'foo'.
//! ```
//!
//! Indented lines continue the previous diagnostic's message.
//! Diagnostics located in the generated `tsconfig.json` mean the options
//! themselves were rejected, and count as unlocated.

use std::path::Path;

use snip_diagnostic::{Diagnostic, Severity};
use snip_ir::ColumnRange;

/// Name of the project file written next to each snippet.
pub(crate) const PROJECT_FILE: &str = "tsconfig.json";

/// Everything `tsc` printed, sorted by where it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TscOutput {
    /// Diagnostics located in the snippet file.
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics located in any other file, as printed.
    pub foreign: Vec<String>,
    /// Diagnostics without a location or located in the project file
    /// (bad configuration and the like).
    pub global: Vec<String>,
}

#[derive(Copy, Clone, Debug)]
enum Last {
    Snippet,
    Foreign,
    Global,
}

/// Split a category clause such as `error TS2322: message`.
fn parse_category(rest: &str) -> Option<(Severity, Option<u32>, &str)> {
    let (word, rest) = rest.split_once(' ')?;
    let severity = Severity::parse(word)?;
    let (code, message) = rest.split_once(": ")?;
    let code = code.strip_prefix("TS")?.parse().ok();
    Some((severity, code, message))
}

/// `file(line,col): category`, returning the file, position and category.
fn parse_located(line: &str) -> Option<(&str, u32, u32, &str)> {
    let (head, rest) = line.split_once("): ")?;
    let open = head.rfind('(')?;
    let (row, col) = head[open + 1..].split_once(',')?;
    Some((
        &head[..open],
        row.trim().parse().ok()?,
        col.trim().parse().ok()?,
        rest,
    ))
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Columns of the token `tsc` points at: the identifier starting at `col`,
/// or a single character when something else starts there.
fn token_columns(source: &str, line: u32, col: u32) -> ColumnRange {
    let width = source
        .lines()
        .nth(line.saturating_sub(1) as usize)
        .map_or(0, |text| {
            text.chars()
                .skip(col.saturating_sub(1) as usize)
                .take_while(|ch| is_ident_char(*ch))
                .count()
        });
    let width = u32::try_from(width).unwrap_or(u32::MAX).max(1);
    ColumnRange::with_width(col, width)
}

/// Parse `stdout` from a `tsc` run over a project whose snippet file is
/// named `source_name` and contains `source`.
pub fn parse_tsc_output(stdout: &str, source_name: &str, source: &str) -> TscOutput {
    let mut out = TscOutput::default();
    let mut last: Option<Last> = None;

    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            let more = line.trim();
            match last {
                Some(Last::Snippet) => {
                    if let Some(d) = out.diagnostics.last_mut() {
                        d.message.push('\n');
                        d.message.push_str(more);
                    }
                }
                Some(Last::Foreign) => {
                    if let Some(text) = out.foreign.last_mut() {
                        text.push('\n');
                        text.push_str(more);
                    }
                }
                Some(Last::Global) => {
                    if let Some(text) = out.global.last_mut() {
                        text.push('\n');
                        text.push_str(more);
                    }
                }
                None => tracing::debug!(line, "ignoring stray tsc output"),
            }
            continue;
        }

        if let Some((file, row, col, rest)) = parse_located(line) {
            if let Some((severity, code, message)) = parse_category(rest) {
                let name = Path::new(file).file_name();
                if name.is_some_and(|name| name == PROJECT_FILE) {
                    out.global.push(line.to_string());
                    last = Some(Last::Global);
                } else if name.is_some_and(|name| name == source_name) {
                    let mut diagnostic =
                        Diagnostic::error(row, token_columns(source, row, col), message)
                            .with_severity(severity);
                    diagnostic.code = code;
                    out.diagnostics.push(diagnostic);
                    last = Some(Last::Snippet);
                } else {
                    out.foreign.push(line.to_string());
                    last = Some(Last::Foreign);
                }
                continue;
            }
        }

        if parse_category(line).is_some() {
            out.global.push(line.to_string());
            last = Some(Last::Global);
            continue;
        }

        tracing::debug!(line, "ignoring unrecognized tsc output");
        last = None;
    }

    out
}
