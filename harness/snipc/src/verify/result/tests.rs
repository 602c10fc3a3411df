use super::*;
use pretty_assertions::assert_eq;
use snip_ir::ColumnRange;

fn id(name: &str) -> SnippetId {
    SnippetId::new(name)
}

fn passed(name: &str) -> Verdict {
    Verdict::from_match(
        id(name),
        PathBuf::from(name),
        MatchResult::default(),
        LineMap::new(),
        Duration::ZERO,
    )
}

fn mismatched(name: &str) -> Verdict {
    let result = MatchResult {
        missing: vec![Expectation::new(1, ColumnRange::new(1, 2), "oops")],
        ..MatchResult::default()
    };
    Verdict::from_match(id(name), PathBuf::from(name), result, LineMap::new(), Duration::ZERO)
}

fn errored(name: &str) -> Verdict {
    Verdict::errored(
        id(name),
        PathBuf::from(name),
        HarnessError::UnexpectedEnd { line: 3 },
        Duration::ZERO,
    )
}

#[test]
fn test_outcome_predicates() {
    assert!(Outcome::Passed.is_passed());
    assert!(Outcome::Mismatch.is_mismatch());
    assert!(Outcome::Errored(HarnessError::invocation("x")).is_errored());
    assert_eq!(Outcome::Passed.kind(), None);
    assert_eq!(Outcome::Mismatch.kind(), Some(ErrorKind::MatchFailure));
    assert_eq!(
        Outcome::Errored(HarnessError::UnexpectedEnd { line: 1 }).kind(),
        Some(ErrorKind::UnexpectedEnd)
    );
}

#[test]
fn test_summary_counts_categories() {
    let mut summary = RunSummary::new();
    summary.add_verdict(passed("a.ts"));
    summary.add_verdict(mismatched("b.ts"));
    summary.add_verdict(errored("c.ts"));

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.mismatched, 1);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.failed(), 2);
    let failures: Vec<_> = summary.failures().map(|v| v.id.as_str()).collect();
    assert_eq!(failures, vec!["b.ts", "c.ts"]);
}

#[test]
fn test_summary_exit_code() {
    let mut summary = RunSummary::new();
    assert_eq!(summary.exit_code(), 2); // No snippets

    summary.add_verdict(passed("a.ts"));
    assert_eq!(summary.exit_code(), 0);

    summary.add_verdict(errored("b.ts"));
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn test_expected_failures_do_not_fail_the_run() {
    let mut summary = RunSummary::new();
    summary.add_verdict(passed("a.ts"));
    summary.add_verdict(mismatched("b.ts").expecting_failure(true));
    summary.add_verdict(passed("c.ts").expecting_failure(true));

    assert_eq!(summary.expected_failures, 1);
    assert_eq!(summary.unexpected_passes, 1);
    assert_eq!(summary.passed, 2);
    assert!(!summary.has_failures());
    assert_eq!(summary.exit_code(), 0);
    assert!(summary.verdicts[1].is_expected_failure());
    assert!(summary.verdicts[2].is_unexpected_pass());
}

#[test]
fn test_diff_uses_original_lines_and_sorts_by_position() {
    let mut line_map = LineMap::new();
    for original in [3, 4, 7] {
        line_map.push(original);
    }
    let result = MatchResult {
        matched: Vec::new(),
        missing: vec![Expectation::new(3, ColumnRange::new(7, 11), "Type 'AB12' is not assignable")],
        unexpected: vec![
            Diagnostic::error(3, ColumnRange::new(14, 16), "Type 'AB' is not assignable to type 'AB12'.")
                .with_code(2322),
            Diagnostic::error(1, ColumnRange::new(6, 8), "Duplicate identifier 'AB'.\nAnother line."),
        ],
    };
    let verdict = Verdict::from_match(
        id("ab.ts"),
        PathBuf::from("ab.ts"),
        result,
        line_map,
        Duration::ZERO,
    );
    assert_eq!(verdict.outcome, Outcome::Mismatch);
    assert_eq!(
        verdict.diff(),
        "\
+ 3:6-7 error: Duplicate identifier 'AB'.
    Another line.
- 7:7-10 Type 'AB12' is not assignable
+ 7:14-15 error TS2322: Type 'AB' is not assignable to type 'AB12'.
"
    );
}

#[test]
fn test_diff_of_errored_verdict_names_the_error() {
    assert_eq!(errored("c.ts").diff(), "! END at line 3 has no open directive\n");
    assert_eq!(passed("a.ts").diff(), "");
}

#[test]
fn test_interrupted_run_exits_non_zero_even_when_clean() {
    let mut summary = RunSummary::new();
    summary.add_verdict(Verdict::from_match(
        SnippetId::new("a.ts"),
        PathBuf::from("a.ts"),
        MatchResult::default(),
        LineMap::new(),
        Duration::ZERO,
    ));
    assert_eq!(summary.exit_code(), 0);
    summary.interrupted = true;
    summary.skipped = 3;
    assert_eq!(summary.exit_code(), 130);
}
