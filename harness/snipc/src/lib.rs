//! Snippet verification harness.
//!
//! Verifies that every TypeScript snippet in a corpus produces exactly
//! the diagnostics its underline markers promise.
//!
//! # Architecture
//!
//! ```text
//! discover_snippets() ──► Vec<SnippetFile>
//!     │  (parallel, one snippet per task)
//!     ▼
//! snip_source::prepare() ──► compilable text + Vec<Expectation>
//!     │
//!     ▼
//! snip_check::check_snippet() ──► Vec<Diagnostic>
//!     │
//!     ▼
//! match_diagnostics() ──► Verdict
//!     │  (joined in input order)
//!     ▼
//! RunSummary ──► terminal / JSON report, exit code
//! ```

pub mod commands;
pub mod config;
mod error;
pub mod reporting;
pub mod testing;
pub mod verify;

pub use config::{CheckerConfig, Config, CONFIG_FILE};
pub use error::{Error, Result};
pub use verify::{
    discover_snippets, discover_snippets_in, match_diagnostics, verify_snippet, CancelToken,
    MatchResult, MatchedPair, Outcome, RunSummary, Runner, RunnerConfig, SnippetFile, Verdict,
    XFailSet,
};
