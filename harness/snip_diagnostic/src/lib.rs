//! Diagnostics reported by the type checker, and the harness's own errors.
//!
//! Two different things are called "errors" in this workspace:
//!
//! - A [`Diagnostic`] is what the type checker says about a snippet. Most
//!   snippets are *supposed* to produce some, so they are data, not faults.
//! - A [`HarnessError`] means a snippet could not be verified at all
//!   (malformed marker, broken directive nesting, checker failure). It
//!   aborts that snippet only and is reported as its own category.

mod diagnostic;
mod errors;

pub use diagnostic::{Diagnostic, Severity};
pub use errors::{ErrorKind, HarnessError};
