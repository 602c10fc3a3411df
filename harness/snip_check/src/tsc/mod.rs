//! Running `tsc` as a child process.

mod output;

use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use snip_diagnostic::{Diagnostic, HarnessError};
use snip_ir::OptionValue;

use crate::ambient::AmbientContext;
use crate::checker::TypeChecker;
use crate::options::CompilerOptions;
use crate::source_kind::SourceKind;

use output::PROJECT_FILE;
pub use output::{parse_tsc_output, TscOutput};

/// Name of the ambient declarations file in a generated project.
const AMBIENT_FILE: &str = "ambient.d.ts";

/// How often a running `tsc` is polled when a timeout is set.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of one `tsc` process.
struct ProcessOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        // A partial read still leaves useful output in `buf`.
        let _ = pipe.read_to_string(&mut buf);
    }
    buf
}

/// Wait for `child`, killing it once `timeout` has elapsed.
///
/// Returns `None` if the process was killed.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Type checker backed by the TypeScript compiler.
///
/// Each call gets its own temporary project directory, so calls are
/// independent and safe to run in parallel.
#[derive(Clone, Debug)]
pub struct TscChecker {
    program: PathBuf,
    /// Arguments placed before the `tsc` flags, e.g. the script path
    /// when running `tsc.js` through `node`.
    leading_args: Vec<OsString>,
    ambient: AmbientContext,
    timeout: Option<Duration>,
}

impl TscChecker {
    /// Run `program` directly.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        TscChecker {
            program: program.into(),
            leading_args: Vec::new(),
            ambient: AmbientContext::none(),
            timeout: None,
        }
    }

    /// Run the compiler at `path`: through `node` if it is a `.js` file,
    /// directly otherwise.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.extension().is_some_and(|ext| ext == "js") {
            TscChecker::new("node").with_leading_args([path.into_os_string()])
        } else {
            TscChecker::new(path)
        }
    }

    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_ambient(mut self, ambient: AmbientContext) -> Self {
        self.ambient = ambient;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Write the snippet, ambient declarations and `tsconfig.json`.
    fn write_project(
        &self,
        dir: &Path,
        source_name: &str,
        text: &str,
        options: &CompilerOptions,
    ) -> std::io::Result<()> {
        fs::write(dir.join(source_name), text)?;

        let mut files = vec![source_name];
        if let Some(declarations) = self.ambient.declarations() {
            fs::write(dir.join(AMBIENT_FILE), declarations)?;
            files.push(AMBIENT_FILE);
        }

        let config = serde_json::json!({
            "compilerOptions": options.to_json(),
            "files": files,
        });
        let config = serde_json::to_string_pretty(&config)?;
        fs::write(dir.join(PROJECT_FILE), config)
    }

    fn run(&self, project: &Path) -> Result<ProcessOutput, HarnessError> {
        let mut child = Command::new(&self.program)
            .args(&self.leading_args)
            .arg("--project")
            .arg(project)
            .arg("--pretty")
            .arg("false")
            .current_dir(project)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                HarnessError::invocation(format!(
                    "cannot run `{}`: {e}",
                    self.program.display()
                ))
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout = thread::spawn(move || read_pipe(stdout));
        let stderr = thread::spawn(move || read_pipe(stderr));

        let status = wait_with_timeout(&mut child, self.timeout).map_err(|e| {
            HarnessError::invocation(format!("waiting for `{}`: {e}", self.program.display()))
        })?;

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        let Some(status) = status else {
            return Err(HarnessError::CheckerTimeout(
                self.timeout.unwrap_or_default(),
            ));
        };

        Ok(ProcessOutput {
            status,
            stdout,
            stderr,
        })
    }
}

impl TypeChecker for TscChecker {
    fn check(
        &self,
        text: &str,
        kind: SourceKind,
        options: &CompilerOptions,
    ) -> Result<Vec<Diagnostic>, HarnessError> {
        // A `.js` snippet is not part of the program unless `allowJs` is on.
        let mut options = options.clone();
        if kind.is_js() && options.get("allowJs").is_none() {
            options.set("allowJs", OptionValue::Bool(true));
        }

        let project = tempfile::Builder::new()
            .prefix("snip-")
            .tempdir()
            .map_err(|e| HarnessError::invocation(format!("cannot create project directory: {e}")))?;

        let source_name = kind.file_name();
        self.write_project(project.path(), source_name, text, &options)
            .map_err(|e| HarnessError::invocation(format!("cannot write project files: {e}")))?;

        let output = self.run(project.path())?;
        let parsed = parse_tsc_output(&output.stdout, source_name, text);

        if !parsed.global.is_empty() {
            return Err(HarnessError::invocation(parsed.global.join("\n")));
        }
        for foreign in &parsed.foreign {
            tracing::warn!(diagnostic = %foreign, "dropping diagnostic outside the snippet");
        }

        // 0: clean, 1 and 2: diagnostics reported.
        match output.status.code() {
            Some(0..=2) => {}
            code => {
                let detail = [output.stderr.trim(), output.stdout.trim()]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .unwrap_or("no output");
                return Err(HarnessError::invocation(match code {
                    Some(code) => format!("tsc exited with status {code}: {detail}"),
                    None => format!("tsc was terminated by a signal: {detail}"),
                }));
            }
        }

        if !output.status.success() && parsed.diagnostics.is_empty() && parsed.foreign.is_empty() {
            let detail = output.stderr.trim();
            return Err(HarnessError::invocation(if detail.is_empty() {
                "tsc failed without reporting a diagnostic".to_string()
            } else {
                detail.to_string()
            }));
        }

        tracing::debug!(
            diagnostics = parsed.diagnostics.len(),
            dropped = parsed.foreign.len(),
            "tsc finished"
        );
        Ok(parsed.diagnostics)
    }
}
