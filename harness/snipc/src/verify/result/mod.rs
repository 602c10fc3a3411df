//! Verification verdicts and the run summary.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use snip_diagnostic::{Diagnostic, ErrorKind, HarnessError};
use snip_ir::{Expectation, LineMap, SnippetId};

use super::matcher::{MatchResult, MatchedPair};

/// Outcome of verifying a single snippet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every expectation matched and nothing unexpected was reported.
    Passed,
    /// Expected and actual diagnostics disagree.
    Mismatch,
    /// The snippet could not be verified.
    Errored(HarnessError),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Outcome::Mismatch)
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Outcome::Errored(_))
    }

    /// Failure category, `None` for a pass.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Passed => None,
            Outcome::Mismatch => Some(ErrorKind::MatchFailure),
            Outcome::Errored(e) => Some(e.kind()),
        }
    }
}

/// Result of verifying one snippet. Never changed once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub id: SnippetId,
    pub path: PathBuf,
    pub outcome: Outcome,
    pub matched: Vec<MatchedPair>,
    /// Expectations nothing satisfied (false negatives).
    pub missing: Vec<Expectation>,
    /// Diagnostics nothing expected (false positives).
    pub unexpected: Vec<Diagnostic>,
    /// Maps checked-text lines to original file lines, for reporting.
    pub line_map: LineMap,
    /// Listed in the expected-failure file.
    pub expected_to_fail: bool,
    pub duration: Duration,
}

impl Verdict {
    /// Verdict for a snippet that went through the checker.
    pub fn from_match(
        id: SnippetId,
        path: PathBuf,
        result: MatchResult,
        line_map: LineMap,
        duration: Duration,
    ) -> Self {
        let outcome = if result.is_success() {
            Outcome::Passed
        } else {
            Outcome::Mismatch
        };
        Verdict {
            id,
            path,
            outcome,
            matched: result.matched,
            missing: result.missing,
            unexpected: result.unexpected,
            line_map,
            expected_to_fail: false,
            duration,
        }
    }

    /// Verdict for a snippet that could not be verified.
    #[cold]
    pub fn errored(id: SnippetId, path: PathBuf, error: HarnessError, duration: Duration) -> Self {
        Verdict {
            id,
            path,
            outcome: Outcome::Errored(error),
            matched: Vec::new(),
            missing: Vec::new(),
            unexpected: Vec::new(),
            line_map: LineMap::new(),
            expected_to_fail: false,
            duration,
        }
    }

    #[must_use]
    pub fn expecting_failure(mut self, expected_to_fail: bool) -> Self {
        self.expected_to_fail = expected_to_fail;
        self
    }

    pub fn is_pass(&self) -> bool {
        self.outcome.is_passed()
    }

    /// Failed, and listed as expected to.
    pub fn is_expected_failure(&self) -> bool {
        self.expected_to_fail && !self.is_pass()
    }

    /// Passed despite being listed as expected to fail.
    pub fn is_unexpected_pass(&self) -> bool {
        self.expected_to_fail && self.is_pass()
    }

    /// Failed and not excused by the expected-failure list.
    pub fn counts_as_failure(&self) -> bool {
        !self.is_pass() && !self.expected_to_fail
    }

    /// Original file line for a line of the checked text.
    pub fn original_line(&self, line: u32) -> u32 {
        self.line_map.original_or_same(line)
    }

    /// Expected-versus-actual listing, ordered by position.
    ///
    /// ```text
    /// - 7:7-10 Type 'AB12' is not assignable
    /// + 7:14 error TS2322: Type 'AB' is not assignable to type 'AB12'.
    /// ```
    ///
    /// `-` lines were expected but not reported, `+` lines were reported
    /// but not expected. Lines are original file lines. Empty for a pass.
    pub fn diff(&self) -> String {
        let mut out = String::new();
        if let Outcome::Errored(error) = &self.outcome {
            let _ = writeln!(out, "! {error}");
            return out;
        }

        let mut rows: Vec<(u32, u32, u8, String)> = Vec::new();
        for e in &self.missing {
            let line = self.original_line(e.line);
            let columns = e.columns.map_or_else(|| "*".to_string(), |c| c.to_string());
            rows.push((line, e.start_column(), 0, format!("- {line}:{columns} {}", e.message)));
        }
        for d in &self.unexpected {
            let line = self.original_line(d.line);
            let mut text = format!("+ {line}:{} {}", d.columns, d.severity);
            if let Some(code) = d.code {
                let _ = write!(text, " TS{code}");
            }
            let _ = write!(text, ": {}", d.message.replace('\n', "\n    "));
            rows.push((line, d.columns.start, 1, text));
        }
        rows.sort();

        for (_, _, _, text) in rows {
            out.push_str(&text);
            out.push('\n');
        }
        out
    }
}

/// Summary of a whole run. Verdicts keep input order.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub verdicts: Vec<Verdict>,
    pub passed: usize,
    /// Snippets whose diagnostics disagreed with their markers.
    pub mismatched: usize,
    /// Snippets that could not be verified.
    pub errored: usize,
    /// Failures excused by the expected-failure list.
    pub expected_failures: usize,
    /// Listed snippets that passed; the entry is stale.
    pub unexpected_passes: usize,
    pub duration: Duration,
    /// The run was cancelled; `verdicts` holds only completed snippets.
    pub interrupted: bool,
    /// Snippets left unverified by the interruption.
    pub skipped: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        RunSummary::default()
    }

    pub fn add_verdict(&mut self, verdict: Verdict) {
        if verdict.is_pass() {
            self.passed += 1;
            if verdict.expected_to_fail {
                self.unexpected_passes += 1;
            }
        } else if verdict.expected_to_fail {
            self.expected_failures += 1;
        } else if verdict.outcome.is_mismatch() {
            self.mismatched += 1;
        } else {
            self.errored += 1;
        }
        self.verdicts.push(verdict);
    }

    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    /// Failures that affect the exit code.
    pub fn failed(&self) -> usize {
        self.mismatched + self.errored
    }

    /// Returns true if any snippet failed outside the expected-failure list.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &Verdict> + '_ {
        self.verdicts.iter().filter(|v| v.counts_as_failure())
    }

    /// Get exit code: 0 = all pass, 1 = failures, 2 = no snippets found,
    /// 130 = interrupted.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if self.total() == 0 {
            2
        } else {
            i32::from(self.has_failures())
        }
    }
}

#[cfg(test)]
mod tests;
