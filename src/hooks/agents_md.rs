//! AGENTS.md validation.
//!
//! AGENTS.md gives AI coding assistants project context (see
//! <https://agentsmd.net/>). The file must be tracked by git, not merely
//! present on disk, and hold more than a placeholder.

use crate::config::AgentsMdConfig;
use crate::core::fallback::Fallback;
use crate::core::git;
use crate::hooks::Report;
use std::path::{Path, PathBuf};

const AGENTS_MD_STANDARD: &str = "https://agentsmd.net/";

/// Outcome of validating AGENTS.md, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentsMdVerdict {
    /// File is tracked and long enough.
    Valid,
    /// File is not in the git index.
    NotTracked,
    /// File is tracked but could not be read from the working tree.
    Unreadable(String),
    /// File is blank after trimming.
    Empty,
    /// File is shorter than the minimum after trimming.
    TooShort {
        /// Trimmed length in characters.
        length: usize,
        /// Required minimum.
        minimum: usize,
    },
}

/// Checks content length. Length is counted in characters after trimming
/// surrounding whitespace.
#[must_use]
pub fn evaluate_content(content: &str, min_length: usize) -> AgentsMdVerdict {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return AgentsMdVerdict::Empty;
    }

    let length = trimmed.chars().count();
    if length < min_length {
        return AgentsMdVerdict::TooShort {
            length,
            minimum: min_length,
        };
    }

    AgentsMdVerdict::Valid
}

/// The AGENTS.md validator hook.
#[derive(Debug, Clone)]
pub struct AgentsMdValidator {
    config: AgentsMdConfig,
    repo_root: PathBuf,
}

impl AgentsMdValidator {
    /// Creates the validator for the repository at `repo_root`.
    #[must_use]
    pub fn new(config: &AgentsMdConfig, repo_root: &Path) -> Self {
        Self {
            config: config.clone(),
            repo_root: repo_root.to_path_buf(),
        }
    }

    /// Runs the checks in order, stopping at the first failure.
    pub async fn validate(&self) -> AgentsMdVerdict {
        let file = &self.config.file;

        let tracked = git::is_tracked(&self.repo_root, file, self.config.command_timeout())
            .await
            .or_fallback("query tracked status", false);
        if !tracked {
            return AgentsMdVerdict::NotTracked;
        }

        match std::fs::read_to_string(self.repo_root.join(file)) {
            Ok(content) => evaluate_content(&content, self.config.min_length),
            Err(e) => AgentsMdVerdict::Unreadable(e.to_string()),
        }
    }

    /// Validates and renders the result.
    pub async fn run(&self) -> Report {
        let verdict = self.validate().await;
        tracing::debug!(?verdict, file = %self.config.file, "AGENTS.md validated");
        self.render(&verdict)
    }

    fn render(&self, verdict: &AgentsMdVerdict) -> Report {
        let file = &self.config.file;
        let mut report = Report::failed();

        match verdict {
            AgentsMdVerdict::Valid => return Report::passed(),
            AgentsMdVerdict::NotTracked => {
                report
                    .line(format!("❌ ERROR: {file} is not committed to git"))
                    .blank()
                    .line(format!(
                        "This repository requires an {file} file to provide context"
                    ))
                    .line("for AI coding assistants and developers.")
                    .blank()
                    .line("To fix this:")
                    .line(format!(
                        "  1. Create {file} in your repository root (if it doesn't exist)"
                    ))
                    .line("  2. Add project context, architecture, and coding guidelines")
                    .line(format!(
                        "  3. Commit the file: git add {file} && git commit"
                    ))
                    .blank()
                    .line(format!("See template: {}", self.config.template_url))
                    .line(format!("Standard: {AGENTS_MD_STANDARD}"));
            },
            AgentsMdVerdict::Unreadable(reason) => {
                report
                    .line(format!("❌ ERROR: {file} could not be read"))
                    .blank()
                    .line(format!("Reason: {reason}"))
                    .blank()
                    .line(format!(
                        "Make sure {file} exists in the working tree and is readable."
                    ));
            },
            AgentsMdVerdict::Empty => {
                report
                    .line(format!("❌ ERROR: {file} exists but is empty"))
                    .blank()
                    .line(format!(
                        "If you include an {file} file, it should contain useful"
                    ))
                    .line("context and instructions for AI coding assistants.")
                    .blank()
                    .line("Either add content or remove the file.")
                    .blank()
                    .line(format!("See: {AGENTS_MD_STANDARD}"));
            },
            AgentsMdVerdict::TooShort { length, minimum } => {
                report
                    .line(format!(
                        "❌ ERROR: {file} is too short (less than {minimum} characters)"
                    ))
                    .blank()
                    .line(format!("{file} should provide meaningful context for AI tools,"))
                    .line("such as project overview, architecture notes, or coding guidelines.")
                    .blank()
                    .line(format!("Current length: {length} characters"))
                    .line(format!("Minimum expected: {minimum} characters"))
                    .blank()
                    .line(format!("See: {AGENTS_MD_STANDARD}"));
            },
        }

        report
    }
}
