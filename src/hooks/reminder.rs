//! One-time AI attribution reminder.
//!
//! Shows a tip about `Assisted-by:` / `Generated-by:` commit trailers the
//! first time it runs in a repository, then records that in a marker file.
//! Never blocks.

use crate::config::ReminderConfig;
use crate::core::fallback::Fallback;
use crate::core::state::Marker;
use crate::hooks::Report;
use std::path::Path;

/// The attribution reminder hook.
#[derive(Debug, Clone)]
pub struct AttributionReminder {
    marker: Marker,
    guidelines_url: String,
}

impl AttributionReminder {
    /// Creates the hook with its marker under `state_dir`.
    #[must_use]
    pub fn new(config: &ReminderConfig, state_dir: &Path) -> Self {
        Self {
            marker: Marker::new(state_dir.join(&config.marker_file)),
            guidelines_url: config.guidelines_url.clone(),
        }
    }

    /// Shows the reminder unless it was shown before.
    pub fn run(&self) -> Report {
        if self.marker.is_set() {
            tracing::debug!(marker = %self.marker.path().display(), "reminder already shown");
            return Report::passed();
        }

        let report = self.message();

        // Unset marker just means the reminder shows again next commit.
        self.marker.set().or_fallback("create reminder marker", ());

        report
    }

    fn message(&self) -> Report {
        let mut report = Report::passed();
        report
            .blank()
            .line("💡 Reminder: For AI-assisted commits, consider adding a trailer:")
            .blank()
            .line("    Assisted-by: Claude Code")
            .line("    Generated-by: GitHub Copilot")
            .blank()
            .line("A commit template has been configured in this repo to remind you.")
            .line("Use 'git commit' (without -m) to see it in your editor.")
            .blank()
            .line("Learn more:")
            .line(format!("  {}", self.guidelines_url))
            .blank()
            .line("(This reminder will only be shown once per repository)")
            .blank();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reminder(state_dir: &Path) -> AttributionReminder {
        AttributionReminder::new(&ReminderConfig::default(), state_dir)
    }

    #[test]
    fn test_first_run_shows_and_marks() {
        let temp = TempDir::new().expect("create temp dir");
        let git_dir = temp.path().join(".git");
        let hook = reminder(&git_dir);

        let report = hook.run();

        assert!(report.success());
        assert!(report.text().contains("Assisted-by: Claude Code"));
        assert!(report.text().contains("only be shown once"));
        assert!(git_dir.join(".ai-tip-shown").exists());
    }

    #[test]
    fn test_second_run_is_silent() {
        let temp = TempDir::new().expect("create temp dir");
        let hook = reminder(temp.path());

        let first = hook.run();
        let second = hook.run();

        assert!(!first.is_silent());
        assert!(second.is_silent());
        assert!(second.success());
    }

    #[test]
    fn test_unwritable_marker_still_succeeds() {
        let temp = TempDir::new().expect("create temp dir");
        // A file where the state directory should be makes the marker unwritable.
        let blocker = temp.path().join(".git");
        std::fs::write(&blocker, "gitdir: /elsewhere").expect("write blocker");
        let hook = reminder(&blocker);

        let first = hook.run();
        let second = hook.run();

        assert!(first.success());
        assert!(!first.is_silent());
        // Marker could not be written, so the reminder repeats.
        assert_eq!(first, second);
    }

    #[test]
    fn test_guidelines_url_from_config() {
        let temp = TempDir::new().expect("create temp dir");
        let config = ReminderConfig {
            guidelines_url: "https://example.com/ai".to_string(),
            ..ReminderConfig::default()
        };

        let report = AttributionReminder::new(&config, temp.path()).run();
        assert!(report.lines.contains(&"  https://example.com/ai".to_string()));
    }
}
