//! `snip`: verify TypeScript snippets against their underline markers.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;

use clap::{Parser, Subcommand};
use snipc::commands::{list_markers, render_file, run_verify, strip_file, VerifyArgs};
use snipc::CancelToken;

#[derive(Parser)]
#[command(name = "snip", version, about = "Check TypeScript snippets against their expected diagnostics")]
struct Cli {
    /// Log at debug level and list passing snippets.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify every snippet under a path.
    Verify(VerifyArgs),
    /// Print the rendered (book) view of a snippet.
    Render { file: PathBuf },
    /// Print the text the checker sees.
    Strip { file: PathBuf },
    /// List the expectations a snippet's markers declare.
    Markers { file: PathBuf },
}

static TRACING_INIT: Once = Once::new();

/// Install the stderr subscriber.
///
/// `SNIP_LOG` takes precedence over `RUST_LOG`; without either, only
/// warnings are shown (`debug` with `-v`).
fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let default = if verbose { "debug" } else { "warn" };
        let filter = std::env::var("SNIP_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map_or_else(|_| EnvFilter::new(default), EnvFilter::new);

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}

/// Cancel the run on Ctrl-C so the snippets verified so far are still
/// reported.
fn cancel_on_interrupt() -> CancelToken {
    let cancel = CancelToken::new();
    let handler = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler.cancel()) {
        tracing::warn!("cannot install interrupt handler: {e}");
    }
    cancel
}

fn run(cli: Cli) -> snipc::Result<i32> {
    let output = match cli.command {
        Command::Verify(args) => return run_verify(&args, cli.verbose, cancel_on_interrupt()),
        Command::Render { file } => render_file(&file)?,
        Command::Strip { file } => strip_file(&file)?,
        Command::Markers { file } => list_markers(&file)?,
    };
    print!("{output}");
    Ok(0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
