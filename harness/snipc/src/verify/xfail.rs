//! Expected failure (XFAIL) tracking for snippets that are known to
//! disagree with the current checker.
//!
//! Matching failures become "expected failure" (no exit code impact).
//! Unexpected passes (XPASS) produce warnings so stale entries get removed.

use std::collections::HashSet;
use std::path::Path;

use snip_ir::SnippetId;

/// Name of the expected-failure list.
pub const XFAIL_FILE: &str = "snip-xfail.txt";

/// Set of snippets expected to fail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XFailSet {
    snippets: HashSet<String>,
}

impl XFailSet {
    /// Create an empty set (no expected failures).
    pub fn empty() -> Self {
        XFailSet::default()
    }

    /// Load expected failures from `snip-xfail.txt`.
    ///
    /// Searches `start` and its ancestors, so verifying a single chapter
    /// directory still finds the list at the corpus root. A missing file
    /// yields an empty set.
    ///
    /// Format:
    /// - Lines starting with `#` are comments
    /// - Blank lines are ignored
    /// - `snippet:<id>`: snippet expected to fail
    pub fn load(start: &Path) -> Self {
        let mut dir = if start.is_file() {
            start.parent()
        } else {
            Some(start)
        };
        while let Some(d) = dir {
            let path = d.join(XFAIL_FILE);
            if let Ok(content) = std::fs::read_to_string(&path) {
                tracing::debug!(path = %path.display(), "loaded expected failures");
                return Self::parse(&content);
            }
            dir = d.parent();
        }

        Self::empty()
    }

    /// Parse xfail file content.
    pub fn parse(content: &str) -> Self {
        let mut snippets = HashSet::new();

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(id) = trimmed.strip_prefix("snippet:") {
                let id = id.trim();
                if !id.is_empty() {
                    snippets.insert(id.to_string());
                }
            } else {
                tracing::warn!(line = trimmed, "ignoring unrecognized {XFAIL_FILE} entry");
            }
        }

        XFailSet { snippets }
    }

    /// Check if a snippet is expected to fail.
    pub fn is_expected_failure(&self, id: &SnippetId) -> bool {
        self.snippets.contains(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// Returns true if this set has no expected failures.
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
