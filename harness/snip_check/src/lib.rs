//! Type checker invocation.
//!
//! The harness talks to the type checker through the [`TypeChecker`]
//! trait. [`TscChecker`] is the production implementation: it writes the
//! snippet, the ambient declarations and a generated `tsconfig.json` into
//! a fresh directory per call and runs `tsc` there.
//!
//! Per-snippet overlays never touch shared state. [`check_snippet`] clones
//! the base [`CompilerOptions`], applies the overlay to the clone and
//! hands that to the checker, so concurrent snippets cannot observe each
//! other's options.

mod ambient;
mod checker;
mod options;
mod source_kind;
mod tsc;

pub use ambient::AmbientContext;
pub use checker::{check_snippet, TypeChecker};
pub use options::{option_kind, CompilerOptions, OptionKind, KNOWN_OPTIONS};
pub use source_kind::SourceKind;
pub use tsc::{parse_tsc_output, TscChecker, TscOutput};
