//! Line-comment helpers shared by the header, directive and marker passes.

/// A `//` line comment that occupies a whole line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LineComment<'a> {
    /// 1-based column of the first `/`.
    pub col: u32,
    /// Text after `//`, line terminator removed.
    pub body: &'a str,
}

impl LineComment<'_> {
    /// 1-based column of the first character of `body`.
    pub fn body_col(&self) -> u32 {
        self.col + 2
    }
}

/// Parse a whole-line `//` comment. Returns `None` for code lines and for
/// code followed by a trailing comment.
pub(crate) fn line_comment(line: &str) -> Option<LineComment<'_>> {
    let content = strip_eol(line);
    let trimmed = content.trim_start();
    let indent = &content[..content.len() - trimmed.len()];
    let body = trimmed.strip_prefix("//")?;
    Some(LineComment {
        col: char_count(indent) + 1,
        body,
    })
}

/// Line content without its `\n` / `\r\n` terminator.
pub(crate) fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// The `\n` / `\r\n` terminator of a line, or `""` for a final unterminated line.
pub(crate) fn eol(line: &str) -> &str {
    &line[strip_eol(line).len()..]
}

pub(crate) fn char_count(s: &str) -> u32 {
    u32::try_from(s.chars().count()).unwrap_or(u32::MAX)
}
