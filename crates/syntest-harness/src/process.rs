//! Subprocess execution with captured output and a poll-based timeout.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default timeout for spawned processes (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Errors raised by [`ProcessRunner`].
///
/// A process that runs to completion with a non-zero exit code is not an
/// error at this layer; callers inspect [`ProcessOutput::success`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The command vector was empty.
    #[error("cannot run an empty command")]
    EmptyCommand,

    /// The executable could not be spawned.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exceeded the configured timeout and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Waiting on the child failed.
    #[error("failed to wait for '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of a completed process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Captured stdout, lossily decoded.
    pub output: String,
    /// Captured stderr, lossily decoded.
    pub errors: String,
    /// Exit code, or -1 when terminated by a signal.
    pub exit_code: i32,
    /// True when the process exited with status zero.
    pub success: bool,
}

/// Spawns subprocesses in a working directory with captured stdout/stderr.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    /// Creates a runner with the default timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates a runner with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs `args` in `work_dir` with `env` merged into the inherited
    /// environment, waiting for exit and capturing both output streams.
    pub fn run(
        &self,
        args: &[String],
        work_dir: &Path,
        env: &HashMap<String, String>,
    ) -> Result<ProcessOutput, ProcessError> {
        let (program, rest) = args.split_first().ok_or(ProcessError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(rest)
            .current_dir(work_dir)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: program.clone(),
            source,
        })?;

        wait_with_timeout(child, program, self.timeout)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn wait_with_timeout(
    mut child: Child,
    command: &str,
    timeout: Duration,
) -> Result<ProcessOutput, ProcessError> {
    // Drain both pipes on reader threads while polling for exit. A child
    // that fills an undrained pipe buffer blocks on write and never exits,
    // which the poll loop would misreport as a timeout.
    let stdout = spawn_reader(child.stdout.take());
    let stderr = spawn_reader(child.stderr.take());

    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::Timeout {
                        command: command.to_string(),
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(source) => {
                return Err(ProcessError::WaitFailed {
                    command: command.to_string(),
                    source,
                })
            }
        }
    };

    Ok(ProcessOutput {
        output: join_reader(stdout),
        errors: join_reader(stderr),
        exit_code: status.code().unwrap_or(-1),
        success: status.success(),
    })
}

fn spawn_reader<R: Read + Send + 'static>(
    stream: Option<R>,
) -> Option<std::thread::JoinHandle<Vec<u8>>> {
    stream.map(|mut stream| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stream.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: Option<std::thread::JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
