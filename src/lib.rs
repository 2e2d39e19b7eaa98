//! # rh-hooks-ai
//!
//! Pre-commit hooks for AI-assisted development.
//!
//! Four small hooks, each usable on its own:
//!
//! - **ai-attribution-reminder**: prints a one-time tip about `Assisted-by:` and
//!   `Generated-by:` commit trailers, then stays silent
//! - **check-rh-precommit**: fails unless `.pre-commit-config.yaml` references
//!   the `rh-pre-commit` hook, and warns when the global template is missing
//! - **check-version**: suggests upgrading when a newer release exists, with a
//!   24 hour cache so the network is touched at most once a day
//! - **validate-agents-md**: requires a tracked, non-trivial `AGENTS.md`
//!
//! Hooks never print directly. Each returns a [`Report`] that the CLI renders.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rh_hooks_ai::config::Config;
//! use rh_hooks_ai::hooks::agents_md::AgentsMdValidator;
//!
//! #[tokio::main]
//! async fn main() -> rh_hooks_ai::Result<()> {
//!     let config = Config::load_or_default()?;
//!     let cwd = std::env::current_dir()
//!         .map_err(|e| rh_hooks_ai::Error::io("get current dir", e))?;
//!
//!     let report = AgentsMdValidator::new(&config.agents_md, &cwd).run().await;
//!     print!("{}", report.text());
//!
//!     if !report.success() {
//!         std::process::exit(1);
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/rh-hooks-ai/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cli;
pub mod config;
pub mod core;
pub mod hooks;

// Re-export main types for convenience
pub use config::Config;
pub use core::error::{Error, Result};
pub use hooks::{Hook, HookStatus, Report};
