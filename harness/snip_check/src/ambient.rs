//! Run-wide ambient declarations.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Declarations visible to every snippet, such as `declare` stubs for
/// libraries the book assumes are installed.
///
/// Loaded once per run and shared read-only between workers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmbientContext {
    declarations: Option<Arc<str>>,
}

impl AmbientContext {
    /// No ambient declarations.
    pub fn none() -> Self {
        AmbientContext::default()
    }

    pub fn from_source(declarations: impl Into<Arc<str>>) -> Self {
        AmbientContext {
            declarations: Some(declarations.into()),
        }
    }

    /// Read declarations from a `.d.ts` file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(AmbientContext::from_source(text))
    }

    pub fn declarations(&self) -> Option<&str> {
        self.declarations.as_deref()
    }
}
