//! Git repository operations.
//!
//! Thin wrappers around the `git` binary. All of them go through the
//! [`Executor`] so they inherit its timeout.

use crate::core::error::{Error, Result};
use crate::core::executor::{ExecuteOptions, Executor};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Conventional git directory name, used when discovery fails.
pub const DEFAULT_GIT_DIR: &str = ".git";

/// Resolves the git directory (or the worktree's private git dir) for `cwd`.
pub async fn git_dir(cwd: &Path, timeout: Duration) -> Result<PathBuf> {
    let output = Executor::new()
        .execute(
            "git",
            &["rev-parse", "--git-dir"],
            ExecuteOptions::default().cwd(cwd).timeout(timeout),
        )
        .await?;

    let raw = output.trimmed_stdout();
    if !output.success() || raw.is_empty() {
        return Err(Error::NotGitRepo);
    }

    // Relative to the directory git ran in, not the repository root.
    let dir = PathBuf::from(raw);
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(cwd.join(dir))
    }
}

/// Returns the directory hook state lives in: the discovered git dir, or
/// `.git` under `cwd` when `cwd` is not recognised as a repository.
pub async fn state_dir(cwd: &Path, timeout: Duration) -> PathBuf {
    match git_dir(cwd, timeout).await {
        Ok(dir) => dir,
        Err(e) => {
            tracing::debug!(error = %e, "git dir discovery failed, assuming {DEFAULT_GIT_DIR}");
            cwd.join(DEFAULT_GIT_DIR)
        },
    }
}

/// Checks whether `file` is in the git index (staged or committed), as seen
/// from `cwd`.
///
/// Spawn errors are returned; a timeout or any non-zero exit means "not tracked".
pub async fn is_tracked(cwd: &Path, file: &str, timeout: Duration) -> Result<bool> {
    let output = Executor::new()
        .execute(
            "git",
            &["ls-files", "--error-unmatch", file],
            ExecuteOptions::default().cwd(cwd).timeout(timeout),
        )
        .await?;

    Ok(output.success())
}

/// Reads a value from the user's global git config.
///
/// Returns `Ok(None)` when the key is unset or empty.
pub async fn global_config(key: &str, timeout: Duration) -> Result<Option<String>> {
    let output = Executor::new()
        .execute(
            "git",
            &["config", "--global", key],
            ExecuteOptions::default().timeout(timeout),
        )
        .await?;

    if output.timed_out {
        return Err(Error::CommandTimeout {
            command: format!("git config --global {key}"),
            timeout: humantime::format_duration(timeout).to_string(),
        });
    }

    // `git config` exits 1 for an unset key.
    let value = output.trimmed_stdout();
    if !output.success() || value.is_empty() {
        return Ok(None);
    }

    Ok(Some(value.to_string()))
}
