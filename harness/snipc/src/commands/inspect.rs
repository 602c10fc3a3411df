//! `render`, `strip` and `markers`: show what preprocessing makes of one
//! snippet file.

use std::fmt::Write as _;
use std::path::Path;

use super::read_file;
use crate::Result;

/// The book view: HIDE spans removed, COMPRESS spans collapsed.
pub fn render_file(path: &Path) -> Result<String> {
    let text = read_file(path)?;
    Ok(snip_source::process(&text)?.rendered)
}

/// The text handed to the checker, markers removed.
pub fn strip_file(path: &Path) -> Result<String> {
    let text = read_file(path)?;
    Ok(snip_source::prepare(&text)?.compilable)
}

/// One line per expectation: `line:columns message`, original lines.
/// `*` stands for a marker that accepts any column.
pub fn list_markers(path: &Path) -> Result<String> {
    let text = read_file(path)?;
    let prepared = snip_source::prepare(&text)?;

    let mut out = String::new();
    for expectation in &prepared.expectations {
        let line = prepared.line_map.original_or_same(expectation.line);
        let columns = expectation
            .columns
            .map_or_else(|| "*".to_string(), |c| c.to_string());
        let _ = writeln!(out, "{line}:{columns} {}", expectation.message);
    }
    Ok(out)
}
