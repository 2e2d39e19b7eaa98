//! CLI command implementations.

use crate::config::Config;
use crate::core::error::{Error, Result};
use crate::core::executor::DEFAULT_TIMEOUT;
use crate::core::git;
use crate::core::state::now_secs;
use crate::hooks::agents_md::AgentsMdValidator;
use crate::hooks::precommit::ComplianceCheck;
use crate::hooks::reminder::AttributionReminder;
use crate::hooks::version::VersionCheck;
use crate::hooks::{Hook, Report};
use console::style;
use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

/// Run a hook from the current directory and print its report.
pub fn hook(hook: Hook, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = load_hook_config(config_path);

    let outcome = std::env::current_dir()
        .map_err(|e| Error::io("get current dir", e))
        .and_then(|cwd| block_on(run_hook(hook, &config, &cwd)));

    match outcome {
        Ok(report) => {
            print_report(&report);
            Ok(report.status.into())
        },
        Err(e) if !hook.is_blocking() => {
            tracing::warn!(error = %e, "{hook} could not run, skipping");
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => Err(e),
    }
}

async fn run_hook(hook: Hook, config: &Config, repo_root: &Path) -> Report {
    match hook {
        Hook::AttributionReminder => {
            let state_dir = git::state_dir(repo_root, DEFAULT_TIMEOUT).await;
            AttributionReminder::new(&config.reminder, &state_dir).run()
        },
        Hook::CheckRhPrecommit => ComplianceCheck::new(&config.precommit, repo_root).run().await,
        Hook::CheckVersion => {
            let state_dir = git::state_dir(repo_root, DEFAULT_TIMEOUT).await;
            VersionCheck::from_config(&config.version, &state_dir)
                .run(now_secs())
                .await
        },
        Hook::ValidateAgentsMd => {
            AgentsMdValidator::new(&config.agents_md, repo_root)
                .run()
                .await
        },
    }
}

/// Loads config for a hook run. A broken config never stops a hook.
fn load_hook_config(config_path: Option<&Path>) -> Config {
    let loaded = match config_path {
        Some(path) => Config::load_from(path),
        None => Config::load_or_default(),
    };

    loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring configuration, using defaults");
        Config::default()
    })
}

/// Drives a future on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create runtime: {e}"),
        })?;

    Ok(runtime.block_on(future))
}

/// Prints a report to stdout, highlighting status lines.
fn print_report(report: &Report) {
    for line in &report.lines {
        if line.starts_with('❌') {
            println!("{}", style(line).red().bold());
        } else if line.starts_with('⚠') {
            println!("{}", style(line).yellow().bold());
        } else if line.starts_with('💡') || line.starts_with('📦') {
            println!("{}", style(line).cyan());
        } else {
            println!("{line}");
        }
    }
}

/// Show configuration.
pub fn config(raw: bool, config_path: Option<&Path>) -> Result<ExitCode> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => match Config::find_config_file() {
            Ok(path) => Some(path),
            Err(Error::ConfigNotFound { .. }) => None,
            Err(e) => return Err(e),
        },
    };

    let Some(path) = path else {
        eprintln!(
            "{} No configuration file found, using defaults",
            style("•").cyan()
        );
        print!("{}", Config::default_toml());
        return Ok(ExitCode::SUCCESS);
    };

    // Validate even when printing raw so a broken file is reported.
    let config = Config::load_from(&path)?;
    eprintln!("Configuration file: {}", path.display());

    let output = if raw {
        std::fs::read_to_string(&path).map_err(|e| Error::io("read config", e))?
    } else {
        toml::to_string_pretty(&config).map_err(|e| Error::Internal {
            message: format!("Failed to serialize config: {e}"),
        })?
    };

    std::io::stdout()
        .write_all(output.as_bytes())
        .map_err(|e| Error::io("write output", e))?;

    Ok(ExitCode::SUCCESS)
}

/// Generate shell completions.
pub fn completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    clap_complete::generate(
        shell,
        &mut super::Cli::command(),
        "rh-hooks",
        &mut std::io::stdout(),
    );
}
