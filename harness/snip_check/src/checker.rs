use snip_diagnostic::{Diagnostic, HarnessError};
use snip_ir::Overlay;

use crate::options::CompilerOptions;
use crate::source_kind::SourceKind;

/// A type checker the harness can run snippets through.
///
/// Implementations must be deterministic for a given `(text, options)`
/// pair and must not keep state between calls; the runner calls `check`
/// from several worker threads at once.
pub trait TypeChecker: Send + Sync {
    /// Type-check `text` as a standalone module written in `kind`.
    ///
    /// Returned diagnostics refer to lines and columns of `text`.
    fn check(
        &self,
        text: &str,
        kind: SourceKind,
        options: &CompilerOptions,
    ) -> Result<Vec<Diagnostic>, HarnessError>;
}

impl<T: TypeChecker + ?Sized> TypeChecker for &T {
    fn check(
        &self,
        text: &str,
        kind: SourceKind,
        options: &CompilerOptions,
    ) -> Result<Vec<Diagnostic>, HarnessError> {
        (**self).check(text, kind, options)
    }
}

/// Check one snippet with `overlay` applied on top of `base`.
///
/// The overlay is applied to a private copy of `base`. Diagnostics come
/// back ordered by line, column range and message, so repeated calls
/// return identical lists.
pub fn check_snippet<C: TypeChecker + ?Sized>(
    checker: &C,
    base: &CompilerOptions,
    text: &str,
    kind: SourceKind,
    overlay: Option<&Overlay>,
) -> Result<Vec<Diagnostic>, HarnessError> {
    let options = base.with_overlay(overlay)?;
    let mut diagnostics = checker.check(text, kind, &options)?;
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    tracing::trace!(count = diagnostics.len(), "checker returned diagnostics");
    Ok(diagnostics)
}
