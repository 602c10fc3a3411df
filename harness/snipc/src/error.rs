//! Errors that stop a whole run, as opposed to one snippet.

use std::io;
use std::path::PathBuf;

use snip_diagnostic::HarnessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid project options in {}: {source}", path.display())]
    ProjectOptions {
        path: PathBuf,
        #[source]
        source: HarnessError,
    },

    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("cannot write report: {0}")]
    Report(#[from] serde_json::Error),
}

impl Error {
    #[cold]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
