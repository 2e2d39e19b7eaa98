//! Command-line interface for rh-hooks-ai.
//!
//! The `rh-hooks` binary exposes every hook as a subcommand:
//! - `ai-attribution-reminder`: one-time AI attribution tip
//! - `check-rh-precommit`: rh-pre-commit compliance
//! - `check-version`: cached self-update check
//! - `validate-agents-md`: AGENTS.md presence and quality
//!
//! plus `config` and `completions`. The per-hook binaries call
//! [`run_standalone`].

mod commands;

use crate::core::error::Result;
use crate::hooks::Hook;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "RH_HOOKS_CONFIG";

/// Pre-commit hooks for AI-assisted development.
#[derive(Debug, Parser)]
#[command(
    name = "rh-hooks",
    author,
    version,
    about = "Pre-commit hooks for AI-assisted development",
    long_about = r#"
rh-hooks bundles small, independent pre-commit hooks:

  ai-attribution-reminder   One-time tip about Assisted-by:/Generated-by: trailers
  check-rh-precommit        Require rh-pre-commit in .pre-commit-config.yaml
  check-version             Suggest upgrading when a newer release exists
  validate-agents-md        Require a tracked, non-trivial AGENTS.md

Each hook is normally run by the pre-commit framework from the repository root.
Settings can be overridden in rh-hooks.toml.
"#,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use color output.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Path to rh-hooks.toml (default: search upwards from the current directory).
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Always use color.
    Always,
    /// Auto-detect color support.
    #[default]
    Auto,
    /// Never use color.
    Never,
}

/// Arguments shared by hook subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct HookArgs {
    /// File names passed by the pre-commit framework (ignored).
    #[arg(hide = true)]
    pub files: Vec<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a one-time reminder about AI attribution trailers.
    #[command(name = "ai-attribution-reminder", visible_alias = "reminder")]
    AttributionReminder(HookArgs),

    /// Require rh-pre-commit in .pre-commit-config.yaml.
    #[command(name = "check-rh-precommit", visible_alias = "precommit")]
    CheckRhPrecommit(HookArgs),

    /// Check whether a newer release is available.
    #[command(name = "check-version", visible_alias = "version-check")]
    CheckVersion(HookArgs),

    /// Require a tracked, non-trivial AGENTS.md.
    #[command(name = "validate-agents-md", visible_alias = "agents-md")]
    ValidateAgentsMd(HookArgs),

    /// Show the effective configuration.
    Config {
        /// Output the configuration file as written.
        #[arg(long)]
        raw: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Returns the hook this subcommand runs, if any.
    #[must_use]
    pub const fn hook(&self) -> Option<Hook> {
        match self {
            Self::AttributionReminder(_) => Some(Hook::AttributionReminder),
            Self::CheckRhPrecommit(_) => Some(Hook::CheckRhPrecommit),
            Self::CheckVersion(_) => Some(Hook::CheckVersion),
            Self::ValidateAgentsMd(_) => Some(Hook::ValidateAgentsMd),
            Self::Config { .. } | Self::Completions { .. } => None,
        }
    }
}

/// Runs the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    setup_color(cli.color);

    let config_path = cli.config.as_deref();

    if let Some(hook) = cli.command.hook() {
        return commands::hook(hook, config_path);
    }

    match cli.command {
        Commands::Config { raw } => commands::config(raw, config_path),
        Commands::Completions { shell } => {
            commands::completions(shell);
            Ok(ExitCode::SUCCESS)
        },
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Runs a single hook with default logging, ignoring command-line arguments.
///
/// Entry point for the per-hook binaries.
pub fn run_standalone(hook: Hook) -> ExitCode {
    setup_logging(false, false);

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);

    match commands::hook(hook, config_path.as_deref()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        },
    }
}

/// Sets up logging based on verbosity flags.
fn setup_logging(verbose: bool, quiet: bool) {
    // Hooks share the terminal with the commit; stay quiet unless asked.
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up color output.
fn setup_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        },
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        },
        ColorChoice::Auto => {
            // Let console crate auto-detect
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cli_parsing_help() {
        // --help causes early exit, so this will be an error
        assert!(Cli::try_parse_from(["rh-hooks", "--help"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["rh-hooks"]).is_err());
    }

    // =========================================================================
    // Hook subcommand parsing tests
    // =========================================================================

    #[rstest]
    #[case("ai-attribution-reminder", Hook::AttributionReminder)]
    #[case("reminder", Hook::AttributionReminder)]
    #[case("check-rh-precommit", Hook::CheckRhPrecommit)]
    #[case("precommit", Hook::CheckRhPrecommit)]
    #[case("check-version", Hook::CheckVersion)]
    #[case("version-check", Hook::CheckVersion)]
    #[case("validate-agents-md", Hook::ValidateAgentsMd)]
    #[case("agents-md", Hook::ValidateAgentsMd)]
    fn test_parse_hook_subcommands(#[case] name: &str, #[case] hook: Hook) {
        let cli = Cli::try_parse_from(["rh-hooks", name]).expect("parse");
        assert_eq!(cli.command.hook(), Some(hook));
    }

    #[test]
    fn test_hook_ignores_filenames() {
        let cli = Cli::try_parse_from(["rh-hooks", "check-version", "src/lib.rs", "README.md"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Commands::CheckVersion(ref args) if args.files.len() == 2
        ));
    }

    #[test]
    fn test_subcommand_names_match_hook_ids() {
        for hook in Hook::ALL {
            let cli = Cli::try_parse_from(["rh-hooks", hook.name()]).expect("parse");
            assert_eq!(cli.command.hook(), Some(hook));
        }
    }

    // =========================================================================
    // Utility subcommand tests
    // =========================================================================

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(["rh-hooks", "config"]).expect("parse");
        assert!(matches!(cli.command, Commands::Config { raw: false }));
        assert_eq!(cli.command.hook(), None);
    }

    #[test]
    fn test_parse_config_raw() {
        let cli = Cli::try_parse_from(["rh-hooks", "config", "--raw"]).expect("parse");
        assert!(matches!(cli.command, Commands::Config { raw: true }));
    }

    #[test]
    fn test_parse_completions_bash() {
        let cli = Cli::try_parse_from(["rh-hooks", "completions", "bash"]).expect("parse");
        assert!(matches!(cli.command, Commands::Completions { .. }));
    }

    // =========================================================================
    // Global flags tests
    // =========================================================================

    #[test]
    fn test_parse_verbose_flag() {
        let cli = Cli::try_parse_from(["rh-hooks", "--verbose", "check-version"]).expect("parse");
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_quiet_after_subcommand() {
        let cli = Cli::try_parse_from(["rh-hooks", "agents-md", "-q"]).expect("parse");
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["rh-hooks", "--config", "/tmp/rh-hooks.toml", "config"])
            .expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rh-hooks.toml")));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["rh-hooks", "--color", "never", "reminder"]).expect("parse");
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_color_choice_default() {
        assert_eq!(ColorChoice::default(), ColorChoice::Auto);
    }
}
