//! The `verify` command: discover snippets, check them, report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use snip_check::{AmbientContext, TscChecker};

use crate::config::Config;
use crate::reporting::{render_summary, to_json, ColorMode, Format};
use crate::verify::{CancelToken, Runner, RunnerConfig, XFailSet};
use crate::{Error, Result};

/// Checker used when neither a flag, `SNIP_TSC` nor `snip.toml` names one.
pub const DEFAULT_TSC: &str = "tsc";

#[derive(Clone, Debug, Default, clap::Args)]
pub struct VerifyArgs {
    /// Snippet file or directory.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Only verify snippets whose id contains this substring.
    #[arg(long)]
    pub filter: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: Format,

    #[arg(long, value_enum, default_value_t)]
    pub color: ColorMode,

    /// Verify snippets one at a time.
    #[arg(long)]
    pub no_parallel: bool,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long, short)]
    pub jobs: Option<usize>,

    /// Per-snippet checker timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Type checker executable (`tsc`, or a `.js` entry point run with node).
    #[arg(long, env = "SNIP_TSC")]
    pub tsc: Option<PathBuf>,

    /// Declaration file made visible to every snippet.
    #[arg(long, env = "SNIP_AMBIENT")]
    pub ambient: Option<PathBuf>,
}

/// Build the checker from flags, environment and config, in that order.
pub fn build_checker(args: &VerifyArgs, config: &Config) -> Result<TscChecker> {
    let program = args
        .tsc
        .clone()
        .or_else(|| config.tsc())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TSC));

    let ambient = match args.ambient.clone().or_else(|| config.ambient()) {
        Some(path) => AmbientContext::load(&path).map_err(|e| Error::io(path, e))?,
        None => AmbientContext::none(),
    };

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .or_else(|| config.timeout());

    tracing::debug!(
        program = %program.display(),
        ambient = ambient.declarations().is_some(),
        timeout = ?timeout,
        "configured checker"
    );

    Ok(TscChecker::from_path(program)
        .with_ambient(ambient)
        .with_timeout(timeout))
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    path.canonicalize().map_err(|e| Error::io(path, e))
}

/// Run `snip verify` and return the process exit code.
///
/// Setting `cancel` (from an interrupt handler) stops the run; the report
/// then covers the snippets that completed.
pub fn run_verify(args: &VerifyArgs, verbose: bool, cancel: CancelToken) -> Result<i32> {
    let path = resolve_path(&args.path)?;
    let config = Config::discover(&path)?;
    let checker = build_checker(args, &config)?;

    let runner_config = RunnerConfig {
        filter: args.filter.clone(),
        parallel: !args.no_parallel,
        jobs: args.jobs,
        options: config.base_options()?,
        root: config.base_dir.clone(),
    };
    let runner = Runner::new(checker, runner_config)
        .with_xfail(XFailSet::load(&path))
        .with_cancel(cancel);
    let summary = runner.run(&path);

    match args.format {
        Format::Text => print!("{}", render_summary(&summary, verbose, args.color.enabled())),
        Format::Json => println!("{}", to_json(&summary)?),
    }

    Ok(summary.exit_code())
}
