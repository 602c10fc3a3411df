//! Machine-readable run report.
//!
//! Every line number in the report is an original file line.

use serde::Serialize;
use snip_diagnostic::{Diagnostic, ErrorKind, Severity};
use snip_ir::{ColumnRange, Expectation, SnippetId};

use crate::verify::{Outcome, RunSummary, Verdict};

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub total: usize,
    pub passed: usize,
    pub mismatched: usize,
    pub errored: usize,
    pub expected_failures: usize,
    pub unexpected_passes: usize,
    pub interrupted: bool,
    /// Snippets an interruption left unverified.
    pub skipped: usize,
    pub duration_ms: u64,
    pub snippets: Vec<JsonVerdict<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonVerdict<'a> {
    pub id: &'a SnippetId,
    pub path: String,
    /// `passed`, `mismatch` or `errored`.
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub expected_to_fail: bool,
    pub matched: usize,
    pub missing: Vec<JsonExpectation<'a>>,
    pub unexpected: Vec<JsonDiagnostic<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonExpectation<'a> {
    pub line: u32,
    pub marker_line: u32,
    /// Absent for a `//~` marker, which accepts any column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnRange>,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic<'a> {
    pub line: u32,
    pub columns: ColumnRange,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    pub message: &'a str,
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<'a> JsonExpectation<'a> {
    fn new(verdict: &Verdict, expectation: &'a Expectation) -> Self {
        JsonExpectation {
            line: verdict.original_line(expectation.line),
            marker_line: expectation.marker_line,
            columns: expectation.columns,
            message: &expectation.message,
        }
    }
}

impl<'a> JsonDiagnostic<'a> {
    fn new(verdict: &Verdict, diagnostic: &'a Diagnostic) -> Self {
        JsonDiagnostic {
            line: verdict.original_line(diagnostic.line),
            columns: diagnostic.columns,
            severity: diagnostic.severity,
            code: diagnostic.code,
            message: &diagnostic.message,
        }
    }
}

impl<'a> JsonVerdict<'a> {
    fn new(verdict: &'a Verdict) -> Self {
        let (outcome, error) = match &verdict.outcome {
            Outcome::Passed => ("passed", None),
            Outcome::Mismatch => ("mismatch", None),
            Outcome::Errored(e) => ("errored", Some(e.to_string())),
        };
        JsonVerdict {
            id: &verdict.id,
            path: verdict.path.display().to_string(),
            outcome,
            kind: verdict.outcome.kind(),
            error,
            expected_to_fail: verdict.expected_to_fail,
            matched: verdict.matched.len(),
            missing: verdict
                .missing
                .iter()
                .map(|e| JsonExpectation::new(verdict, e))
                .collect(),
            unexpected: verdict
                .unexpected
                .iter()
                .map(|d| JsonDiagnostic::new(verdict, d))
                .collect(),
        }
    }
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &'a RunSummary) -> Self {
        JsonReport {
            total: summary.total(),
            passed: summary.passed,
            mismatched: summary.mismatched,
            errored: summary.errored,
            expected_failures: summary.expected_failures,
            unexpected_passes: summary.unexpected_passes,
            interrupted: summary.interrupted,
            skipped: summary.skipped,
            duration_ms: millis(summary.duration),
            snippets: summary.verdicts.iter().map(JsonVerdict::new).collect(),
        }
    }
}

/// Serialize `summary` as pretty-printed JSON.
pub fn to_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport::new(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::MatchResult;
    use snip_diagnostic::HarnessError;
    use snip_ir::LineMap;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn report_uses_original_lines() {
        let mut map = LineMap::new();
        map.push(4);
        map.push(9);

        let mut summary = RunSummary::new();
        summary.add_verdict(Verdict::from_match(
            SnippetId::new("ch01/item7.ts"),
            PathBuf::from("ch01/item7.ts"),
            MatchResult {
                missing: vec![Expectation::new(2, ColumnRange::new(7, 11), "Type 'AB12'")
                    .at_marker_line(10)],
                ..MatchResult::default()
            },
            map,
            Duration::ZERO,
        ));
        summary.add_verdict(Verdict::errored(
            SnippetId::new("ch01/broken.ts"),
            PathBuf::from("ch01/broken.ts"),
            HarnessError::UnexpectedEnd { line: 3 },
            Duration::ZERO,
        ));

        let json = to_json(&summary).ok().unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();

        assert_eq!(value["total"], 2);
        assert_eq!(value["mismatched"], 1);
        assert_eq!(value["errored"], 1);
        assert_eq!(value["interrupted"], false);

        let first = &value["snippets"][0];
        assert_eq!(first["id"], "ch01/item7.ts");
        assert_eq!(first["outcome"], "mismatch");
        assert_eq!(first["kind"], "MatchFailure");
        assert_eq!(first["missing"][0]["line"], 9);
        assert_eq!(first["missing"][0]["marker_line"], 10);

        let second = &value["snippets"][1];
        assert_eq!(second["outcome"], "errored");
        assert_eq!(second["kind"], "UnexpectedEnd");
        assert_eq!(second["error"], "END at line 3 has no open directive");
    }
}
