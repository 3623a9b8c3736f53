//! Invocation of the external synthesis tool.
//!
//! The tool is run as a child process with captured output. A run that
//! exceeds its time limit is killed; everything else about the outcome
//! (including a non-zero exit) is handed back to the caller.

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};

/// Separator placed between stdout and stderr in a synthesis log.
pub const STDERR_SEPARATOR: &str = "\n\n=== STDERR ===\n";

/// Errors from running the synthesis tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The program could not be found or started.
    #[error("'{program}' not found: {source}")]
    NotFound {
        /// The program that was invoked.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// The program did not finish within its time limit and was killed.
    #[error("'{program}' timed out after {secs} s")]
    Timeout {
        /// The program that was invoked.
        program: String,
        /// The time limit in seconds.
        secs: u64,
    },

    /// Any other failure while running the program.
    #[error("failed to run '{program}': {source}")]
    Io {
        /// The program that was invoked.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Captured result of one tool run.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit status of the process.
    pub status: ExitStatus,
    /// Everything the process wrote to stdout.
    pub stdout: String,
    /// Everything the process wrote to stderr.
    pub stderr: String,
}

impl ToolOutput {
    /// The text stored in the synthesis log: stdout, then stderr under a
    /// separator when there was any.
    pub fn log_contents(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}{STDERR_SEPARATOR}{}", self.stdout, self.stderr)
        }
    }
}

/// Builds the single-threaded runtime that drives tool processes.
pub fn runtime() -> io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

/// Checks that the tool can be run and returns the first line of its version banner.
pub async fn check_tool(program: &str) -> Result<String, ToolError> {
    let output = Command::new(program)
        .arg("-V")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| spawn_error(program, source))?;
    if !output.status.success() {
        return Err(ToolError::Io {
            program: program.to_string(),
            source: io::Error::other(format!("version check exited with {}", output.status)),
        });
    }
    let banner = String::from_utf8_lossy(&output.stdout);
    Ok(banner
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(program)
        .to_string())
}

/// Runs `<program> -s <script>` in `workdir`, killing it after `timeout`.
pub async fn run_synthesis(
    program: &str,
    script: &Path,
    timeout: Duration,
    workdir: &Path,
) -> Result<ToolOutput, ToolError> {
    let mut command = Command::new(program);
    command.arg("-s").arg(script).current_dir(workdir);
    run_with_timeout(program, command, timeout).await
}

/// Runs `command` to completion, including the end of both output streams.
///
/// The child is killed when the deadline passes first.
async fn run_with_timeout(
    program: &str,
    mut command: Command,
    limit: Duration,
) -> Result<ToolOutput, ToolError> {
    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| spawn_error(program, source))?;

    let output = match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(ToolError::Io {
                program: program.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(ToolError::Timeout {
                program: program.to_string(),
                secs: limit.as_secs(),
            })
        }
    };

    Ok(ToolOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

fn spawn_error(program: &str, source: io::Error) -> ToolError {
    let program = program.to_string();
    if source.kind() == io::ErrorKind::NotFound {
        ToolError::NotFound { program, source }
    } else {
        ToolError::Io { program, source }
    }
}

/// Writes a synthesis log, creating its directory if needed.
pub fn write_log(path: &Path, output: &ToolOutput) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, output.log_contents())
}
