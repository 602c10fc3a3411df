//! Human-readable run summary.

use std::fmt::Write as _;

use crate::verify::{Outcome, RunSummary, Verdict, XFAIL_FILE};

const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const DIM: &str = "2";

#[derive(Copy, Clone)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Color diff lines: `-` red, `+` green.
    fn diff(self, diff: &str) -> String {
        let mut out = String::new();
        for line in diff.lines() {
            let painted = match line.chars().next() {
                Some('-') => self.paint(RED, line),
                Some('+') => self.paint(GREEN, line),
                Some('!') => self.paint(YELLOW, line),
                _ => self.paint(DIM, line),
            };
            let _ = writeln!(out, "    {painted}");
        }
        out
    }
}

fn render_verdict(out: &mut String, verdict: &Verdict, verbose: bool, palette: Palette) {
    let id = &verdict.id;
    if verdict.is_unexpected_pass() {
        let _ = writeln!(
            out,
            "{} {id} (listed in {XFAIL_FILE} but passed; remove the entry)",
            palette.paint(YELLOW, "XPASS")
        );
        return;
    }
    if verdict.is_expected_failure() {
        if verbose {
            let _ = writeln!(out, "{} {id}", palette.paint(DIM, "XFAIL"));
        }
        return;
    }

    match &verdict.outcome {
        Outcome::Passed => {
            if verbose {
                let _ = writeln!(
                    out,
                    "{} {id} ({:.2?})",
                    palette.paint(GREEN, "PASS"),
                    verdict.duration
                );
            }
        }
        Outcome::Mismatch => {
            let _ = writeln!(
                out,
                "{} {id} ({} matched, {} missing, {} unexpected)",
                palette.paint(RED, "FAIL"),
                verdict.matched.len(),
                verdict.missing.len(),
                verdict.unexpected.len()
            );
            out.push_str(&palette.diff(&verdict.diff()));
        }
        Outcome::Errored(error) => {
            let _ = writeln!(
                out,
                "{} {id} [{}]: {error}",
                palette.paint(RED, "ERROR"),
                error.kind()
            );
        }
    }
}

/// Render the per-snippet results and the totals.
///
/// Passing snippets are listed only when `verbose` is set.
pub fn render_summary(summary: &RunSummary, verbose: bool, color: bool) -> String {
    let palette = Palette { enabled: color };
    let mut out = String::new();

    for verdict in &summary.verdicts {
        render_verdict(&mut out, verdict, verbose, palette);
    }

    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "Snippet Summary:");
    let _ = writeln!(
        out,
        "  {} passed, {} mismatched, {} errored ({} total)",
        summary.passed,
        summary.mismatched,
        summary.errored,
        summary.total()
    );
    if summary.expected_failures > 0 || summary.unexpected_passes > 0 {
        let _ = writeln!(
            out,
            "  {} expected failures, {} unexpected passes",
            summary.expected_failures, summary.unexpected_passes
        );
    }
    let _ = writeln!(out, "  Completed in {:.2?}", summary.duration);
    out.push('\n');

    let status = if summary.interrupted {
        palette.paint(
            YELLOW,
            &format!("INTERRUPTED ({} snippets not verified)", summary.skipped),
        )
    } else if summary.has_failures() {
        palette.paint(RED, "FAILED")
    } else if summary.total() == 0 {
        palette.paint(YELLOW, "NO SNIPPETS FOUND")
    } else {
        palette.paint(GREEN, "OK")
    };
    let _ = writeln!(out, "{status}");
    out
}
