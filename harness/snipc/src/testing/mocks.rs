//! Mock checker and snippet constructors.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use snip_check::{CompilerOptions, SourceKind, TypeChecker};
use snip_diagnostic::{Diagnostic, HarnessError};
use snip_ir::{ColumnRange, OptionValue, Snippet, SnippetId};

#[derive(Clone, Debug)]
struct Rule {
    needle: String,
    message: String,
    code: Option<u32>,
    /// Option that must be in effect for the rule to fire.
    requires: Option<String>,
}

/// A checker that reports a diagnostic wherever a configured substring
/// occurs, spanning exactly that substring.
#[derive(Debug, Default)]
pub struct MockChecker {
    rules: Vec<Rule>,
    failure: Option<HarnessError>,
    calls: AtomicUsize,
}

impl MockChecker {
    pub fn new() -> Self {
        MockChecker::default()
    }

    /// Report `message` at every occurrence of `needle`.
    #[must_use]
    pub fn flag(mut self, needle: &str, message: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            message: message.to_string(),
            code: None,
            requires: None,
        });
        self
    }

    /// Like [`MockChecker::flag`], with an error code.
    #[must_use]
    pub fn flag_code(mut self, needle: &str, code: u32, message: &str) -> Self {
        self = self.flag(needle, message);
        if let Some(rule) = self.rules.last_mut() {
            rule.code = Some(code);
        }
        self
    }

    /// Like [`MockChecker::flag`], but only while `option` is in effect.
    /// An unset option follows `strict`, as the strict-family options do.
    #[must_use]
    pub fn flag_under(mut self, option: &str, needle: &str, message: &str) -> Self {
        self = self.flag(needle, message);
        if let Some(rule) = self.rules.last_mut() {
            rule.requires = Some(option.to_string());
        }
        self
    }

    /// Fail every check with `error`.
    pub fn failing(error: HarnessError) -> Self {
        MockChecker {
            failure: Some(error),
            ..MockChecker::default()
        }
    }

    /// Number of `check` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

fn in_effect(options: &CompilerOptions, option: &str) -> bool {
    options
        .get(option)
        .and_then(OptionValue::as_bool)
        .unwrap_or_else(|| options.is_enabled("strict"))
}

fn one_based(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

impl TypeChecker for MockChecker {
    fn check(
        &self,
        text: &str,
        _: SourceKind,
        options: &CompilerOptions,
    ) -> Result<Vec<Diagnostic>, HarnessError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut out = Vec::new();
        for (index, line) in text.lines().enumerate() {
            for rule in &self.rules {
                if rule.requires.as_deref().is_some_and(|o| !in_effect(options, o)) {
                    continue;
                }
                for (byte, _) in line.match_indices(rule.needle.as_str()) {
                    let start = one_based(line[..byte].chars().count());
                    let width = u32::try_from(rule.needle.chars().count()).unwrap_or(u32::MAX);
                    let mut diagnostic = Diagnostic::error(
                        one_based(index),
                        ColumnRange::with_width(start, width),
                        rule.message.clone(),
                    );
                    diagnostic.code = rule.code;
                    out.push(diagnostic);
                }
            }
        }
        Ok(out)
    }
}

/// An in-memory snippet with its overlay header parsed.
///
/// Panics if the header is malformed; use it with well-formed test input.
pub fn snippet(id: &str, text: &str) -> Snippet {
    let overlay = match snip_source::parse_overlay(text) {
        Ok(overlay) => overlay,
        Err(e) => panic!("malformed overlay in test snippet {id}: {e}"),
    };
    Snippet::new(SnippetId::new(id), PathBuf::from(id), text.to_string(), overlay)
}
