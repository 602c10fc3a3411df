//! Snippets: one self-contained source unit under verification.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::Overlay;

/// Identifier of a snippet, derived from its path relative to the
/// discovery root, with `/` separators on every platform.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SnippetId(String);

impl SnippetId {
    pub fn new(id: impl Into<String>) -> Self {
        SnippetId(id.into())
    }

    /// Derive an id from `path` relative to `root`.
    ///
    /// When `path` is not under `root` (or `root` is the file itself) the
    /// file name is used.
    pub fn from_path(root: &Path, path: &Path) -> Self {
        let relative = path
            .strip_prefix(root)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| path.file_name().map(PathBuf::from))
            .unwrap_or_else(|| path.to_path_buf());

        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        SnippetId(parts.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A loaded snippet. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snippet {
    id: SnippetId,
    path: PathBuf,
    text: String,
    overlay: Option<Overlay>,
}

impl Snippet {
    pub fn new(id: SnippetId, path: PathBuf, text: String, overlay: Option<Overlay>) -> Self {
        Snippet {
            id,
            path,
            text,
            overlay,
        }
    }

    pub fn id(&self) -> &SnippetId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw source text, markers and directives included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_relative_to_root() {
        let id = SnippetId::from_path(
            Path::new("/book/samples"),
            Path::new("/book/samples/ch02/item07/ab12.ts"),
        );
        assert_eq!(id.as_str(), "ch02/item07/ab12.ts");
    }

    #[test]
    fn id_for_root_file_is_file_name() {
        let path = Path::new("/book/samples/ab12.ts");
        let id = SnippetId::from_path(path, path);
        assert_eq!(id.as_str(), "ab12.ts");
    }

    #[test]
    fn id_outside_root_is_file_name() {
        let id = SnippetId::from_path(Path::new("/elsewhere"), Path::new("/book/x.ts"));
        assert_eq!(id.to_string(), "x.ts");
    }
}
