//! The hook suite.
//!
//! Each hook is independent and produces a [`Report`]: the lines to show the
//! user and whether the commit may proceed. Printing and exit codes are the
//! CLI's business.

pub mod agents_md;
pub mod precommit;
pub mod reminder;
pub mod version;

use std::fmt;
use std::process::ExitCode;

/// Hook identifiers, as used in `.pre-commit-hooks.yaml` and as subcommand names.
pub mod names {
    /// One-time AI attribution reminder.
    pub const ATTRIBUTION_REMINDER: &str = "ai-attribution-reminder";
    /// rh-pre-commit compliance check.
    pub const CHECK_RH_PRECOMMIT: &str = "check-rh-precommit";
    /// Cached self-update check.
    pub const CHECK_VERSION: &str = "check-version";
    /// AGENTS.md presence and quality check.
    pub const VALIDATE_AGENTS_MD: &str = "validate-agents-md";
}

/// The hooks in the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// See [`reminder`].
    AttributionReminder,
    /// See [`precommit`].
    CheckRhPrecommit,
    /// See [`version`].
    CheckVersion,
    /// See [`agents_md`].
    ValidateAgentsMd,
}

impl Hook {
    /// All hooks, in manifest order.
    pub const ALL: [Self; 4] = [
        Self::AttributionReminder,
        Self::CheckRhPrecommit,
        Self::CheckVersion,
        Self::ValidateAgentsMd,
    ];

    /// Returns the hook identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AttributionReminder => names::ATTRIBUTION_REMINDER,
            Self::CheckRhPrecommit => names::CHECK_RH_PRECOMMIT,
            Self::CheckVersion => names::CHECK_VERSION,
            Self::ValidateAgentsMd => names::VALIDATE_AGENTS_MD,
        }
    }

    /// Returns true if this hook can fail a commit.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::CheckRhPrecommit | Self::ValidateAgentsMd)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Hook {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|hook| hook.name() == s)
            .ok_or_else(|| format!("Unknown hook: {s}"))
    }
}

/// Outcome of a hook run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookStatus {
    /// The commit may proceed.
    #[default]
    Passed,
    /// The commit must be blocked.
    Failed,
}

impl HookStatus {
    /// Returns the process exit code for this status.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

impl From<HookStatus> for ExitCode {
    fn from(status: HookStatus) -> Self {
        Self::from(status.code())
    }
}

/// Lines to show the user, plus the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Verdict.
    pub status: HookStatus,
    /// Output lines, without trailing newlines.
    pub lines: Vec<String>,
}

impl Report {
    /// An empty, passing report.
    #[must_use]
    pub fn passed() -> Self {
        Self::default()
    }

    /// An empty, failing report.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            status: HookStatus::Failed,
            lines: Vec::new(),
        }
    }

    /// Appends a line.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Appends an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Appends all lines of another report, keeping this report's status
    /// unless the other one failed.
    pub fn extend(&mut self, other: Self) {
        if other.status == HookStatus::Failed {
            self.status = HookStatus::Failed;
        }
        self.lines.extend(other.lines);
    }

    /// Returns true if the commit may proceed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == HookStatus::Passed
    }

    /// Returns true if there is nothing to print.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the report as newline-terminated text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.iter().fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
    }
}
