//! Verification engine.
//!
//! Verifies snippets independently and collects verdicts in input order.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use snip_check::{check_snippet, CompilerOptions, SourceKind, TypeChecker};
use snip_ir::Snippet;

use super::cancel::CancelToken;
use super::discovery::{discover_snippets_in, load_snippet, SnippetFile};
use super::matcher::match_diagnostics;
use super::result::{RunSummary, Verdict};
use super::xfail::XFailSet;

/// Configuration for the runner.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Only verify snippets whose id contains this substring.
    pub filter: Option<String>,
    /// Verify snippets in parallel.
    pub parallel: bool,
    /// Worker count; `None` lets rayon choose.
    pub jobs: Option<usize>,
    /// Run-wide checker options. Snippet overlays apply on top of a copy.
    pub options: CompilerOptions,
    /// Directory snippet ids are relative to. Defaults to the verified path.
    pub root: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            filter: None,
            parallel: true,
            jobs: None,
            options: CompilerOptions::defaults(),
            root: None,
        }
    }
}

/// Verify one snippet: preprocess, check, match.
///
/// Any harness error becomes an errored verdict for this snippet only.
pub fn verify_snippet<C: TypeChecker + ?Sized>(
    checker: &C,
    base: &CompilerOptions,
    snippet: &Snippet,
) -> Verdict {
    let start = Instant::now();
    let id = snippet.id().clone();
    let path = snippet.path().to_path_buf();
    let kind = SourceKind::from_path(snippet.path()).unwrap_or_default();

    let prepared = match snip_source::prepare(snippet.text()) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::debug!(snippet = %id, error = %e, "snippet is malformed");
            return Verdict::errored(id, path, e, start.elapsed());
        }
    };

    let diagnostics =
        match check_snippet(checker, base, &prepared.compilable, kind, snippet.overlay()) {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                tracing::debug!(snippet = %id, error = %e, "checker failed");
                return Verdict::errored(id, path, e, start.elapsed());
            }
        };

    let result = match_diagnostics(&prepared.expectations, &diagnostics);
    tracing::debug!(
        snippet = %id,
        matched = result.matched.len(),
        missing = result.missing.len(),
        unexpected = result.unexpected.len(),
        "verified snippet"
    );
    Verdict::from_match(id, path, result, prepared.line_map, start.elapsed())
}

/// Snippet runner.
///
/// The checker and the base options are shared read-only by every worker;
/// nothing a snippet does is visible to another.
pub struct Runner<C> {
    checker: C,
    config: RunnerConfig,
    xfail: XFailSet,
    cancel: CancelToken,
}

impl<C: TypeChecker> Runner<C> {
    pub fn new(checker: C, config: RunnerConfig) -> Self {
        Runner {
            checker,
            config,
            xfail: XFailSet::empty(),
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_xfail(mut self, xfail: XFailSet) -> Self {
        self.xfail = xfail;
        self
    }

    /// Stop starting snippets once `cancel` is set. Snippets still being
    /// checked at that moment are abandoned; the summary keeps only those
    /// that finished before.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Verify all snippets in a path (file or directory).
    pub fn run(&self, path: &Path) -> RunSummary {
        let files = self.select(discover_snippets_in(path));
        tracing::info!(path = %path.display(), snippets = files.len(), "verifying snippets");
        self.execute(&files, |file| self.verify_file(file))
    }

    /// Verify already-loaded snippets.
    pub fn run_snippets(&self, snippets: &[Snippet]) -> RunSummary {
        let snippets: Vec<&Snippet> = snippets
            .iter()
            .filter(|s| self.selected(s.id().as_str()))
            .collect();
        self.execute(&snippets, |snippet| {
            verify_snippet(&self.checker, &self.config.options, snippet)
                .expecting_failure(self.xfail.is_expected_failure(snippet.id()))
        })
    }

    fn selected(&self, id: &str) -> bool {
        self.config.filter.as_deref().is_none_or(|f| id.contains(f))
    }

    fn select(&self, files: Vec<SnippetFile>) -> Vec<SnippetFile> {
        files
            .into_iter()
            .map(|file| match &self.config.root {
                Some(root) => file.relative_to(root),
                None => file,
            })
            .filter(|file| self.selected(file.id.as_str()))
            .collect()
    }

    fn verify_file(&self, file: &SnippetFile) -> Verdict {
        let start = Instant::now();
        let verdict = match load_snippet(file) {
            Ok(snippet) => verify_snippet(&self.checker, &self.config.options, &snippet),
            Err(e) => Verdict::errored(file.id.clone(), file.path.clone(), e, start.elapsed()),
        };
        verdict.expecting_failure(self.xfail.is_expected_failure(&file.id))
    }

    fn execute<T, F>(&self, items: &[T], verify: F) -> RunSummary
    where
        T: Sync,
        F: Fn(&T) -> Verdict + Sync,
    {
        let start = Instant::now();
        let verify = |item: &T| {
            if self.cancel.is_cancelled() {
                return None;
            }
            let verdict = verify(item);
            (!self.cancel.is_cancelled()).then_some(verdict)
        };
        let verdicts = if self.config.parallel {
            self.verify_parallel(items, &verify)
        } else {
            items.iter().map(&verify).collect()
        };

        let mut summary = RunSummary::new();
        for verdict in verdicts.into_iter().flatten() {
            summary.add_verdict(verdict);
        }
        summary.duration = start.elapsed();
        if self.cancel.is_cancelled() {
            summary.interrupted = true;
            summary.skipped = items.len() - summary.total();
            tracing::warn!(
                completed = summary.total(),
                skipped = summary.skipped,
                "run interrupted"
            );
        }

        tracing::info!(
            total = summary.total(),
            passed = summary.passed,
            failed = summary.failed(),
            "verification finished"
        );
        summary
    }

    /// Verify in parallel using a scoped rayon thread pool.
    ///
    /// `build_scoped` guarantees the pool is torn down before returning,
    /// which avoids the global pool's exit-time hang. `par_iter` keeps
    /// input order in the collected verdicts.
    fn verify_parallel<T, R, F>(&self, items: &[T], verify: &F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs.unwrap_or(0))
            .thread_name(|i| format!("snip-worker-{i}"))
            .build_scoped(
                rayon::ThreadBuilder::run,
                |pool| pool.install(|| items.par_iter().map(verify).collect::<Vec<_>>()),
            )
            .unwrap_or_else(|e| {
                tracing::warn!("failed to create thread pool ({e}), running sequentially");
                items.iter().map(verify).collect()
            })
    }
}
