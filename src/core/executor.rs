//! Bounded execution of external programs.
//!
//! Hooks shell out to `git` and `pre-commit`. Every invocation carries a
//! timeout; a child that outlives it is killed and reported as timed out
//! rather than stalling the commit.

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Default timeout for external commands.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Output from a command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the command.
    pub exit_code: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Whether the command was killed due to timeout.
    pub timed_out: bool,
}

impl CommandOutput {
    /// Returns true if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }

    /// Returns stdout with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.trim()
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Working directory for the command.
    pub cwd: Option<PathBuf>,
    /// Timeout for the command.
    pub timeout: Duration,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ExecuteOptions {
    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }
}

/// Executor for running external programs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Executor;

impl Executor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs `program` with `args`, capturing output.
    ///
    /// A spawn failure (missing binary, permissions) is an error. A non-zero
    /// exit or a timeout is reported through [`CommandOutput`].
    pub async fn execute(
        &self,
        program: &str,
        args: &[&str],
        options: ExecuteOptions,
    ) -> Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref cwd) = options.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(program, ?args, timeout = ?options.timeout, "running command");

        // Dropping the output future on timeout kills the child.
        let Ok(result) = timeout(options.timeout, cmd.output()).await else {
            tracing::debug!(program, "command timed out");
            return Ok(CommandOutput {
                exit_code: 124,
                stdout: String::new(),
                stderr: "Command timed out".to_string(),
                timed_out: true,
            });
        };

        let output = result.map_err(|e| Error::io(format!("run {program}"), e))?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out: false,
        })
    }

    /// Like [`Executor::execute`], but a timeout becomes
    /// [`Error::CommandTimeout`] and a non-zero exit an [`Error::GitOperation`]
    /// style failure carrying stderr.
    pub async fn execute_checked(
        &self,
        program: &str,
        args: &[&str],
        options: ExecuteOptions,
    ) -> Result<CommandOutput> {
        let limit = options.timeout;
        let output = self.execute(program, args, options).await?;

        if output.timed_out {
            return Err(Error::CommandTimeout {
                command: command_line(program, args),
                timeout: humantime::format_duration(limit).to_string(),
            });
        }

        if !output.success() {
            return Err(Error::git(
                command_line(program, args),
                format!("exit code {}: {}", output.exit_code, output.stderr.trim()),
            ));
        }

        Ok(output)
    }

    /// Checks if a command exists in PATH.
    #[must_use]
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
