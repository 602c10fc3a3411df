//! Pairing expected diagnostics with actual ones.
//!
//! Matching is greedy and one-to-one. Expectations are taken in source
//! order; each consumes the leftmost unconsumed diagnostic on its line
//! whose columns overlap the underline and whose message contains the
//! expected fragment.

use serde::Serialize;
use snip_diagnostic::Diagnostic;
use snip_ir::Expectation;

/// Markers elide parts of long messages with an ellipsis.
const ELLIPSES: [&str; 2] = ["...", "\u{2026}"];

/// An expectation together with the diagnostic that satisfied it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    pub expectation: Expectation,
    pub diagnostic: Diagnostic,
}

/// Result of matching one snippet's expectations against its diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: Vec<MatchedPair>,
    /// Expectations no diagnostic satisfied (false negatives).
    pub missing: Vec<Expectation>,
    /// Diagnostics no expectation claimed (false positives).
    pub unexpected: Vec<Diagnostic>,
}

impl MatchResult {
    /// Both failure sets are empty.
    pub fn is_success(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Whether the pieces of `fragment` between ellipses occur in `haystack`
/// in order. A fragment without an ellipsis is a plain substring test.
fn contains_in_order(haystack: &str, fragment: &str) -> bool {
    let mut pieces = vec![fragment];
    for ellipsis in ELLIPSES {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| piece.split(ellipsis))
            .collect();
    }

    let mut rest = haystack;
    for piece in pieces.into_iter().map(str::trim).filter(|p| !p.is_empty()) {
        match rest.find(piece) {
            Some(at) => rest = &rest[at + piece.len()..],
            None => return false,
        }
    }
    true
}

/// Case-sensitive containment of `fragment` in the diagnostic's message,
/// tried on the message as printed and with line breaks collapsed.
pub fn message_matches(fragment: &str, diagnostic: &Diagnostic) -> bool {
    if contains_in_order(&diagnostic.message, fragment) {
        return true;
    }
    diagnostic.message.contains('\n') && contains_in_order(&diagnostic.flat_message(), fragment)
}

fn is_candidate(expectation: &Expectation, diagnostic: &Diagnostic) -> bool {
    if diagnostic.line != expectation.line {
        return false;
    }
    if let Some(columns) = expectation.columns {
        if !columns.overlaps(diagnostic.columns) {
            return false;
        }
    }
    message_matches(&expectation.message, diagnostic)
}

/// Match `expectations` (in source order) against `diagnostics`.
pub fn match_diagnostics(expectations: &[Expectation], diagnostics: &[Diagnostic]) -> MatchResult {
    let mut consumed = vec![false; diagnostics.len()];
    let mut result = MatchResult::default();

    for expectation in expectations {
        let best = diagnostics
            .iter()
            .enumerate()
            .filter(|(i, d)| !consumed[*i] && is_candidate(expectation, d))
            .min_by_key(|(i, d)| (d.columns.start, *i))
            .map(|(i, _)| i);

        match best {
            Some(i) => {
                consumed[i] = true;
                result.matched.push(MatchedPair {
                    expectation: expectation.clone(),
                    diagnostic: diagnostics[i].clone(),
                });
            }
            None => result.missing.push(expectation.clone()),
        }
    }

    result.unexpected = diagnostics
        .iter()
        .zip(&consumed)
        .filter(|&(_, &used)| !used)
        .map(|(d, _)| d.clone())
        .collect();

    result
}
