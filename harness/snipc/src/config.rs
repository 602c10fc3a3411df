//! `snip.toml` project configuration.
//!
//! ```toml
//! [checker]
//! tsc = "node_modules/.bin/tsc"
//! ambient = "ambient.d.ts"
//! timeout_secs = 30
//!
//! [checker.options]
//! target = "es2020"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.
//! Command-line flags and environment variables override these values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use snip_check::CompilerOptions;
use snip_ir::Overlay;

use crate::error::{Error, Result};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "snip.toml";

/// Parsed `snip.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,
    /// Directory the config was loaded from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// The `[checker]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CheckerConfig {
    /// Path to `tsc` (or `tsc.js`).
    pub tsc: Option<PathBuf>,
    /// Declarations shared by every snippet.
    pub ambient: Option<PathBuf>,
    /// Per-snippet wall-clock budget.
    pub timeout_secs: Option<u64>,
    /// Project-wide options, applied before each snippet's own overlay.
    pub options: Overlay,
}

impl Config {
    /// Parse config text. `path` is used for error messages and to
    /// resolve relative paths.
    pub fn parse(text: &str, path: &Path) -> Result<Config> {
        let mut config: Config = toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Config::parse(&text, path)
    }

    /// Find `snip.toml` in `start` or its ancestors.
    ///
    /// Returns the default config if there is none, so a bare directory of
    /// snippets still verifies.
    pub fn discover(start: &Path) -> Result<Config> {
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        let mut dir = if start.is_file() {
            start.parent()
        } else {
            Some(start.as_path())
        };

        while let Some(d) = dir {
            let path = d.join(CONFIG_FILE);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "using config file");
                return Config::load(&path);
            }
            dir = d.parent();
        }

        Ok(Config::default())
    }

    /// Resolve a configured path against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// The configured checker. A bare command name such as `tsc` is left
    /// for `PATH` lookup; anything with a directory part is resolved.
    pub fn tsc(&self) -> Option<PathBuf> {
        self.checker.tsc.as_deref().map(|p| {
            if p.components().count() > 1 {
                self.resolve(p)
            } else {
                p.to_path_buf()
            }
        })
    }

    pub fn ambient(&self) -> Option<PathBuf> {
        self.checker.ambient.as_deref().map(|p| self.resolve(p))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.checker.timeout_secs.map(Duration::from_secs)
    }

    /// Built-in defaults with the project-wide options applied.
    pub fn base_options(&self) -> Result<CompilerOptions> {
        let mut options = CompilerOptions::defaults();
        options
            .apply(&self.checker.options)
            .map_err(|source| Error::ProjectOptions {
                path: self.resolve(Path::new(CONFIG_FILE)),
                source,
            })?;
        Ok(options)
    }
}
