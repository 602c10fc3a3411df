//! Snippet verification.
//!
//! This module provides:
//! - Discovery: finding snippet files under a path
//! - Matching: pairing expected with actual diagnostics
//! - Verdicts: per-snippet outcomes and the run summary
//! - Expected failures: the `snip-xfail.txt` list
//! - Parallel execution: verifying snippets concurrently with rayon
//! - Cancellation: stopping a run early and keeping what finished

mod cancel;
mod discovery;
mod matcher;
mod result;
mod runner;
mod xfail;

pub use cancel::CancelToken;
pub use discovery::{discover_snippets, discover_snippets_in, load_snippet, SnippetFile};
pub use matcher::{match_diagnostics, message_matches, MatchResult, MatchedPair};
pub use result::{Outcome, RunSummary, Verdict};
pub use runner::{verify_snippet, Runner, RunnerConfig};
pub use xfail::{XFailSet, XFAIL_FILE};
