//! Command handlers for the `snip` CLI.
//!
//! Each handler returns the text or exit code it produces; printing and
//! process exit stay in the binary.

mod inspect;
mod verify;

pub use inspect::{list_markers, render_file, strip_file};
pub use verify::{build_checker, run_verify, VerifyArgs, DEFAULT_TSC};

use std::path::Path;

use crate::{Error, Result};

/// Read a snippet file, mapping failures to a path-carrying error.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
