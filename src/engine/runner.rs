//! Engine process runner
//!
//! Spawns the engine executable for one snippet (or the version query),
//! enforces a wall-clock deadline and classifies the result:
//! - completed (real exit code, zero or not),
//! - timed out (synthetic exit code 124, partial output kept),
//! - not startable (synthetic exit code 127).
//!
//! The runner never returns an error; every failure is an outcome.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::Instrument;
use uuid::Uuid;

/// Exit code reported when the deadline expires
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported when the executable cannot be started
pub const NOT_FOUND_EXIT_CODE: i32 = 127;

/// Appended to stderr after a timeout kill
pub const TIMEOUT_MARKER: &str = "Timed out";

/// Default drain window after killing a timed-out process
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_millis(500);

/// What the engine is asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `<cmd> -c <snippet>`
    Code(String),
    /// `<cmd> --version`
    Version,
}

/// One engine invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub invocation: Invocation,
    pub timeout: Duration,
}

impl InvocationRequest {
    /// Run a code snippet
    pub fn code(snippet: impl Into<String>, timeout: Duration) -> Self {
        Self {
            invocation: Invocation::Code(snippet.into()),
            timeout,
        }
    }

    /// Query the engine version
    pub fn version(timeout: Duration) -> Self {
        Self {
            invocation: Invocation::Version,
            timeout,
        }
    }

    /// Command-line arguments passed after the executable
    pub fn args(&self) -> Vec<&str> {
        match &self.invocation {
            Invocation::Code(snippet) => vec!["-c", snippet.as_str()],
            Invocation::Version => vec!["--version"],
        }
    }

    /// The snippet, if this is a code invocation
    pub fn snippet(&self) -> Option<&str> {
        match &self.invocation {
            Invocation::Code(snippet) => Some(snippet),
            Invocation::Version => None,
        }
    }
}

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Ran to completion with exit code 0
    Success,
    /// Ran to completion with a non-zero exit code
    NonZero,
    /// Killed after the deadline
    TimedOut,
    /// Executable could not be started
    NotFound,
}

/// Normalized result of one invocation
///
/// Streams are trimmed on construction and `succeeded()` is derived from
/// the exit code, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    exit_code: i32,
    stdout: String,
    stderr: String,
    kind: ExitKind,
}

impl InvocationOutcome {
    /// Process ran to completion
    pub fn completed(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: stdout.trim().to_string(),
            stderr: stderr.trim().to_string(),
            kind: if exit_code == 0 {
                ExitKind::Success
            } else {
                ExitKind::NonZero
            },
        }
    }

    /// Process was killed at the deadline; keeps whatever it had written
    pub fn timed_out(partial_stdout: &str, partial_stderr: &str) -> Self {
        let stderr = format!("{}\n{}", partial_stderr.trim(), TIMEOUT_MARKER);
        Self {
            exit_code: TIMEOUT_EXIT_CODE,
            stdout: partial_stdout.trim().to_string(),
            stderr: stderr.trim().to_string(),
            kind: ExitKind::TimedOut,
        }
    }

    /// Executable could not be started
    pub fn not_found(message: &str) -> Self {
        Self {
            exit_code: NOT_FOUND_EXIT_CODE,
            stdout: String::new(),
            stderr: message.trim().to_string(),
            kind: ExitKind::NotFound,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn kind(&self) -> ExitKind {
        self.kind
    }
}

/// Executes invocations against the engine
///
/// Implemented by [`ProcessRunner`]; tests substitute canned outcomes.
#[async_trait]
pub trait EngineRunner: Send + Sync {
    /// Run one invocation to an outcome
    async fn run(&self, request: InvocationRequest) -> InvocationOutcome;

    /// Executable name or path, for messages
    fn command(&self) -> &str;
}

/// Runs the engine as a child process
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    command: String,
    kill_grace: Duration,
}

impl ProcessRunner {
    /// Create runner for the given executable
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }

    /// Set the drain window used after a timeout kill
    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }

    fn spawn_failure_message(&self, err: &std::io::Error) -> String {
        if err.kind() == std::io::ErrorKind::NotFound {
            format!("Sage command not found: {}", self.command)
        } else {
            format!("Failed to start Sage command {}: {}", self.command, err)
        }
    }

    async fn execute(&self, request: &InvocationRequest) -> InvocationOutcome {
        let start = Instant::now();

        let mut cmd = Command::new(&self.command);
        cmd.args(request.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(command = %self.command, error = %e, "engine could not be started");
                return InvocationOutcome::not_found(&self.spawn_failure_message(&e));
            }
        };

        let mut stdout = StreamCollector::spawn(child.stdout.take());
        let mut stderr = StreamCollector::spawn(child.stderr.take());

        // The deadline covers both process exit and reaching EOF on its pipes
        let finished = timeout(request.timeout, async {
            let status = child.wait().await;
            stdout.wait_eof().await;
            stderr.wait_eof().await;
            status
        })
        .await;

        match finished {
            Ok(Ok(status)) => {
                let exit_code = status.code().unwrap_or(-1);
                tracing::debug!(
                    exit_code,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "engine finished"
                );
                InvocationOutcome::completed(exit_code, &stdout.snapshot(), &stderr.snapshot())
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "failed to wait for engine process");
                let stderr = format!("{}\nFailed to wait for Sage process: {}", stderr.snapshot(), e);
                InvocationOutcome::completed(-1, &stdout.snapshot(), &stderr)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = request.timeout.as_secs_f64(),
                    "engine timed out, killing process"
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "failed to kill timed-out engine process");
                }
                // Pipes close once the child is gone; a grandchild still
                // holding them only gets the grace window.
                let _ = timeout(self.kill_grace, async {
                    stdout.wait_eof().await;
                    stderr.wait_eof().await;
                })
                .await;
                InvocationOutcome::timed_out(&stdout.snapshot(), &stderr.snapshot())
            }
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("sage")
    }
}

#[async_trait]
impl EngineRunner for ProcessRunner {
    async fn run(&self, request: InvocationRequest) -> InvocationOutcome {
        let span = tracing::debug_span!(
            "invocation",
            id = %Uuid::new_v4(),
            command = %self.command,
            timeout_secs = request.timeout.as_secs_f64(),
        );
        self.execute(&request).instrument(span).await
    }

    fn command(&self) -> &str {
        &self.command
    }
}

/// Reads one child pipe into a shared buffer on a background task, so
/// output written before a kill is still available afterwards.
struct StreamCollector {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl StreamCollector {
    fn spawn<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let task = reader.map(|mut reader| {
            let sink = Arc::clone(&buffer);
            tokio::spawn(async move {
                let mut chunk = [0u8; 8192];
                loop {
                    match reader.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            if let Ok(mut buf) = sink.lock() {
                                buf.extend_from_slice(&chunk[..n]);
                            }
                        }
                    }
                }
            })
        });
        Self { buffer, task }
    }

    /// Wait until the pipe reaches EOF. Safe to call again after being
    /// cancelled mid-wait.
    async fn wait_eof(&mut self) {
        if let Some(task) = self.task.as_mut() {
            let _ = task.await;
            self.task = None;
        }
    }

    fn snapshot(&self) -> String {
        match self.buffer.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Drop for StreamCollector {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
