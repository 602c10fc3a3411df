//! Snippet file discovery.
//!
//! Every `.ts`, `.tsx` and `.js` file under the root is a snippet, except
//! declaration files (`.d.ts`), which hold shared declarations.

use std::fs;
use std::path::{Path, PathBuf};

use snip_check::SourceKind;
use snip_diagnostic::HarnessError;
use snip_ir::{Snippet, SnippetId};

/// A discovered snippet file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetFile {
    pub path: PathBuf,
    /// Identifier relative to the discovery root.
    pub id: SnippetId,
    pub kind: SourceKind,
}

impl SnippetFile {
    pub fn new(root: &Path, path: PathBuf, kind: SourceKind) -> Self {
        SnippetFile {
            id: SnippetId::from_path(root, &path),
            path,
            kind,
        }
    }

    /// Re-derive the id relative to `root`, when the file lies under it.
    #[must_use]
    pub fn relative_to(mut self, root: &Path) -> Self {
        if self.path.starts_with(root) {
            self.id = SnippetId::from_path(root, &self.path);
        }
        self
    }
}

fn snippet_kind(path: &Path) -> Option<SourceKind> {
    let name = path.file_name()?.to_str()?;
    if name.ends_with(".d.ts") {
        return None;
    }
    SourceKind::from_path(path)
}

/// Discover all snippet files in a directory tree, sorted by path.
pub fn discover_snippets(root: &Path) -> Vec<SnippetFile> {
    let mut files = Vec::new();
    discover_recursive(root, root, &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn discover_recursive(root: &Path, dir: &Path, files: &mut Vec<SnippetFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "skipping unreadable directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        // Skip hidden files and directories
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                continue;
            }
        }

        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if matches!(name, "node_modules" | "target") {
                    continue;
                }
            }
            discover_recursive(root, &path, files);
        } else if let Some(kind) = snippet_kind(&path) {
            files.push(SnippetFile::new(root, path, kind));
        }
    }
}

/// Discover snippets in a specific file or directory.
///
/// A file is its own single snippet, identified by its file name.
pub fn discover_snippets_in(path: &Path) -> Vec<SnippetFile> {
    if path.is_file() {
        let root = path.parent().unwrap_or(path);
        snippet_kind(path)
            .map(|kind| vec![SnippetFile::new(root, path.to_path_buf(), kind)])
            .unwrap_or_default()
    } else if path.is_dir() {
        discover_snippets(path)
    } else {
        vec![]
    }
}

/// Read a snippet file and its overlay header.
pub fn load_snippet(file: &SnippetFile) -> Result<Snippet, HarnessError> {
    let text = fs::read_to_string(&file.path).map_err(|e| {
        HarnessError::SourceUnreadable(format!("{}: {e}", file.path.display()))
    })?;
    let overlay = snip_source::parse_overlay(&text)?;
    Ok(Snippet::new(file.id.clone(), file.path.clone(), text, overlay))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
