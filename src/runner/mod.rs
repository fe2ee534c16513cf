//! Multi-language execution runner.
//!
//! Runs candidate code as short-lived child processes in a scratch
//! directory. Isolation is wall-clock only: every step is raced against a
//! deadline and hard-killed on expiry. There is no namespace or filesystem
//! sandboxing here; deploy behind an outer sandbox if the host matters.

mod language;

pub use language::{Language, UnsupportedLanguage, detect_java_class_name, wrap_in_main_class};

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::common::token::random_token;

/// Wall-clock budget per step; compile and run are budgeted independently.
pub const EXECUTION_TIMEOUT: Duration = Duration::from_secs(5);

const JOB_TOKEN_LEN: usize = 9;

pub struct CodeRunner {
    scratch_dir: PathBuf,
    timeout: Duration,
}

enum StepError {
    TimedOut,
    Failed(String),
}

/// Removes every tracked scratch artifact when the job ends, on every exit
/// path including timeout. Missing files are ignored.
struct Scratch {
    paths: Vec<PathBuf>,
}

impl Scratch {
    fn new() -> Self {
        Self { paths: Vec::new() }
    }

    fn track(&mut self, path: PathBuf) -> PathBuf {
        self.paths.push(path.clone());
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        for path in &self.paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

impl CodeRunner {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self::with_timeout(scratch_dir, EXECUTION_TIMEOUT)
    }

    pub fn with_timeout(scratch_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            timeout,
        }
    }

    /// Run `source` under `language` and return the output text.
    ///
    /// Every failure mode (unknown language, compile error, runtime error,
    /// timeout) is reported through the returned string, never as an error:
    /// the caller shows whatever comes back in the output panel.
    pub async fn execute(&self, language: &str, source: &str) -> String {
        let language: Language = match language.parse() {
            Ok(language) => language,
            Err(e @ UnsupportedLanguage(_)) => return e.to_string(),
        };

        if let Err(e) = tokio::fs::create_dir_all(&self.scratch_dir).await {
            tracing::error!("failed to create scratch dir: {}", e);
            return "Error: execution environment unavailable".to_string();
        }

        let mut scratch = Scratch::new();
        let result = match language {
            Language::Java => self.run_java(source, &mut scratch).await,
            Language::Cpp => self.run_cpp(source, &mut scratch).await,
            Language::Go => self.run_go(source, &mut scratch).await,
        };

        match result {
            Ok(output) => output,
            Err(StepError::TimedOut) => format!(
                "Error: Execution timed out (limit: {} seconds)",
                self.timeout.as_secs()
            ),
            Err(StepError::Failed(message)) => message,
        }
    }

    async fn run_java(&self, source: &str, scratch: &mut Scratch) -> Result<String, StepError> {
        let (class_name, code) = match detect_java_class_name(source) {
            Some(name) => (name, source.to_string()),
            None => ("Main".to_string(), wrap_in_main_class(source)),
        };

        let src = scratch.track(self.scratch_dir.join(format!("{}.java", class_name)));
        scratch.track(self.scratch_dir.join(format!("{}.class", class_name)));
        write_source(&src, &code).await?;

        let mut compile = Command::new("javac");
        compile.arg(&src);
        self.run_compile_step(compile).await?;

        let mut run = Command::new("java");
        run.arg("-cp").arg(&self.scratch_dir).arg(&class_name);
        self.run_final_step(run).await
    }

    async fn run_cpp(&self, source: &str, scratch: &mut Scratch) -> Result<String, StepError> {
        let job = random_token(JOB_TOKEN_LEN);
        let src = scratch.track(self.scratch_dir.join(format!("{}.cpp", job)));
        let bin = scratch.track(self.scratch_dir.join(format!("{}.out", job)));
        write_source(&src, source).await?;

        let mut compile = Command::new("g++");
        compile.arg(&src).arg("-o").arg(&bin);
        self.run_compile_step(compile).await?;

        self.run_final_step(Command::new(&bin)).await
    }

    async fn run_go(&self, source: &str, scratch: &mut Scratch) -> Result<String, StepError> {
        let job = random_token(JOB_TOKEN_LEN);
        let src = scratch.track(self.scratch_dir.join(format!("{}.go", job)));
        write_source(&src, source).await?;

        let mut run = Command::new("go");
        run.arg("run").arg(&src);
        self.run_final_step(run).await
    }

    /// Intermediate step: success continues the pipeline, failure short
    /// circuits with the compiler's diagnostics.
    async fn run_compile_step(&self, command: Command) -> Result<(), StepError> {
        let output = self.run_step(command).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(StepError::Failed(resolve_failure(&output)))
        }
    }

    async fn run_final_step(&self, command: Command) -> Result<String, StepError> {
        let output = self.run_step(command).await?;
        if output.status.success() {
            Ok(resolve_success(&output))
        } else {
            Err(StepError::Failed(resolve_failure(&output)))
        }
    }

    async fn run_step(&self, mut command: Command) -> Result<std::process::Output, StepError> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Each step leads its own process group, so a timeout kill reaches
        // everything the step spawned, not just the direct child. `go run`
        // in particular execs the compiled user binary as a grandchild.
        #[cfg(unix)]
        command.process_group(0);

        let child = command
            .spawn()
            .map_err(|e| StepError::Failed(format!("Error: {}", e)))?;
        let pid = child.id();

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(StepError::Failed(format!("Error: {}", e))),
            Err(_) => {
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                Err(StepError::TimedOut)
            }
        }
    }
}

/// SIGKILL the whole process group of a timed-out step. The child was
/// spawned as a group leader, so its pid doubles as the pgid. ESRCH just
/// means the group already exited.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    unsafe {
        libc::killpg(pid as libc::pid_t, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

async fn write_source(path: &Path, code: &str) -> Result<(), StepError> {
    tokio::fs::write(path, code)
        .await
        .map_err(|e| StepError::Failed(format!("Error: {}", e)))
}

/// Success: stdout wins, stderr as fallback (some programs log there).
fn resolve_success(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        stdout.into_owned()
    } else {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}

/// Failure: diagnostics live on stderr; stdout is the fallback.
fn resolve_failure(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        return stderr.into_owned();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        stdout.into_owned()
    } else {
        "Error: execution failed".to_string()
    }
}
