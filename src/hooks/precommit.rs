//! rh-pre-commit compliance check.
//!
//! Blocking part: the repository's `.pre-commit-config.yaml` must exist and
//! reference `rh-pre-commit`. Advisory part: if the `pre-commit` tool is
//! installed, warn when no global git template directory is set up, since
//! that is how new clones pick up the hooks automatically.

use crate::config::PrecommitConfig;
use crate::core::executor::{ExecuteOptions, Executor};
use crate::core::fallback::Fallback;
use crate::core::git;
use crate::hooks::Report;
use std::path::{Path, PathBuf};

/// Git config key holding the template directory for `git init`/`clone`.
pub const TEMPLATE_DIR_KEY: &str = "init.templateDir";

/// Result of the repository-local check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCompliance {
    /// Config exists and references the required hook.
    Compliant,
    /// No pre-commit config in the repository root.
    MissingConfig,
    /// Config exists but does not reference the required hook.
    MissingHook,
}

/// Result of the global installation probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalInstall {
    /// A template directory is configured and exists.
    Installed(PathBuf),
    /// The template directory is unset or missing on disk.
    NotInstalled,
    /// The probe could not run (tool missing, timeout, error).
    Unknown,
}

/// Decides local compliance from the config file content, if any.
#[must_use]
pub fn evaluate_local(content: Option<&str>, required_hook: &str) -> LocalCompliance {
    match content {
        None => LocalCompliance::MissingConfig,
        Some(text) if text.contains(required_hook) => LocalCompliance::Compliant,
        Some(_) => LocalCompliance::MissingHook,
    }
}

/// Decides the global state from a configured template directory value.
#[must_use]
pub fn evaluate_template_dir(value: Option<&str>) -> GlobalInstall {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return GlobalInstall::NotInstalled;
    };

    let path = expand_home(raw);
    if path.exists() {
        GlobalInstall::Installed(path)
    } else {
        GlobalInstall::NotInstalled
    }
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix("~/") {
        Some(rest) => rest,
        None if raw == "~" => "",
        None => return PathBuf::from(raw),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// The compliance check hook.
#[derive(Debug, Clone)]
pub struct ComplianceCheck {
    config: PrecommitConfig,
    repo_root: PathBuf,
    precommit_program: String,
}

impl ComplianceCheck {
    /// Creates the check for the repository at `repo_root`.
    #[must_use]
    pub fn new(config: &PrecommitConfig, repo_root: &Path) -> Self {
        Self {
            config: config.clone(),
            repo_root: repo_root.to_path_buf(),
            precommit_program: "pre-commit".to_string(),
        }
    }

    /// Overrides the `pre-commit` executable used by the global probe.
    #[must_use]
    pub fn with_precommit_program(mut self, program: impl Into<String>) -> Self {
        self.precommit_program = program.into();
        self
    }

    /// Runs both checks. Only the local one affects the status.
    pub async fn run(&self) -> Report {
        let local = self.check_local();
        if local != LocalCompliance::Compliant {
            return self.local_failure(local);
        }

        let mut report = Report::passed();
        if self.check_global().await == GlobalInstall::NotInstalled {
            report.extend(self.global_warning());
        }
        report
    }

    /// Reads the pre-commit config and evaluates it.
    #[must_use]
    pub fn check_local(&self) -> LocalCompliance {
        let path = self.repo_root.join(&self.config.config_file);
        if !path.exists() {
            return evaluate_local(None, &self.config.required_hook);
        }

        // Lossy: stray non-UTF-8 bytes must not hide the hook id.
        let bytes = std::fs::read(&path).or_fallback_with("read pre-commit config", Vec::new);
        let content = String::from_utf8_lossy(&bytes);

        evaluate_local(Some(&content), &self.config.required_hook)
    }

    /// Probes for a global installation. Any failure yields [`GlobalInstall::Unknown`].
    pub async fn check_global(&self) -> GlobalInstall {
        if !Executor::command_exists(&self.precommit_program) {
            tracing::debug!(program = %self.precommit_program, "not on PATH, skipping global check");
            return GlobalInstall::Unknown;
        }

        let timeout = self.config.command_timeout();
        let precommit_ok = Executor::new()
            .execute_checked(
                &self.precommit_program,
                &["--version"],
                ExecuteOptions::default().timeout(timeout),
            )
            .await
            .map(|_| true)
            .or_fallback("probe pre-commit", false);

        if !precommit_ok {
            return GlobalInstall::Unknown;
        }

        match git::global_config(TEMPLATE_DIR_KEY, timeout).await {
            Ok(value) => evaluate_template_dir(value.as_deref()),
            Err(e) => {
                tracing::debug!(error = %e, "read {TEMPLATE_DIR_KEY} failed, skipping global check");
                GlobalInstall::Unknown
            },
        }
    }

    fn local_failure(&self, local: LocalCompliance) -> Report {
        let cfg = &self.config;
        let mut report = Report::failed();

        match local {
            LocalCompliance::MissingConfig => {
                report
                    .line(format!(
                        "❌ ERROR: {} not found in repository root",
                        cfg.config_file
                    ))
                    .blank()
                    .line("This repository requires pre-commit hooks to be configured.")
                    .line(format!(
                        "Please set up pre-commit with {} included.",
                        cfg.required_hook
                    ))
                    .blank()
                    .line(format!("See: {}", cfg.docs_url));
            },
            LocalCompliance::MissingHook => {
                report
                    .line(format!(
                        "❌ ERROR: {} does not include {}",
                        cfg.config_file, cfg.required_hook
                    ))
                    .blank()
                    .line(format!(
                        "Red Hat repositories should include {} hooks for security/compliance.",
                        cfg.required_hook
                    ))
                    .blank()
                    .line(format!("Add this to your {}:", cfg.config_file))
                    .line("  repos:")
                    .line(format!("    - repo: {}", cfg.hook_repo))
                    .line(format!("      rev: {}", cfg.hook_rev))
                    .line("      hooks:")
                    .line(format!("        - id: {}", cfg.required_hook))
                    .blank()
                    .line(format!("Learn more: {}", cfg.docs_url));
            },
            LocalCompliance::Compliant => {},
        }

        report
    }

    fn global_warning(&self) -> Report {
        let cfg = &self.config;
        let mut report = Report::passed();
        report
            .blank()
            .line(format!(
                "⚠️  WARNING: {} does not appear to be installed globally",
                cfg.required_hook
            ))
            .blank()
            .line(format!(
                "For system-wide security, consider installing {} globally",
                cfg.required_hook
            ))
            .line("so all new repositories automatically get these hooks.")
            .blank()
            .line(format!("Installation instructions: {}", cfg.docs_url))
            .blank()
            .line("(This is just a warning - your commit will proceed)")
            .blank();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const COMPLIANT_CONFIG: &str = r#"
repos:
  - repo: https://gitlab.cee.redhat.com/infosec-public/developer-workbench/tools
    rev: rh-pre-commit-2.3.2
    hooks:
      - id: rh-pre-commit
"#;

    const OTHER_CONFIG: &str = r#"
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.4.0
    hooks:
      - id: trailing-whitespace
"#;

    fn check(root: &Path) -> ComplianceCheck {
        ComplianceCheck::new(&PrecommitConfig::default(), root)
            .with_precommit_program("definitely_not_pre_commit_12345")
    }

    // =========================================================================
    // Pure evaluation tests
    // =========================================================================

    #[rstest]
    #[case(None, LocalCompliance::MissingConfig)]
    #[case(Some(""), LocalCompliance::MissingHook)]
    #[case(Some(OTHER_CONFIG), LocalCompliance::MissingHook)]
    #[case(Some(COMPLIANT_CONFIG), LocalCompliance::Compliant)]
    #[case(Some("# uses rh-pre-commit somewhere"), LocalCompliance::Compliant)]
    fn test_evaluate_local(#[case] content: Option<&str>, #[case] expected: LocalCompliance) {
        assert_eq!(evaluate_local(content, "rh-pre-commit"), expected);
    }

    #[test]
    fn test_evaluate_template_dir_unset() {
        assert_eq!(evaluate_template_dir(None), GlobalInstall::NotInstalled);
        assert_eq!(evaluate_template_dir(Some("  ")), GlobalInstall::NotInstalled);
    }

    #[test]
    fn test_evaluate_template_dir_missing_on_disk() {
        let temp = TempDir::new().expect("create temp dir");
        let missing = temp.path().join("no-such-template");
        assert_eq!(
            evaluate_template_dir(missing.to_str()),
            GlobalInstall::NotInstalled
        );
    }

    #[test]
    fn test_evaluate_template_dir_exists() {
        let temp = TempDir::new().expect("create temp dir");
        assert_eq!(
            evaluate_template_dir(temp.path().to_str()),
            GlobalInstall::Installed(temp.path().to_path_buf())
        );
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.git-template"), home.join(".git-template"));
            assert_eq!(expand_home("~"), home.join(""));
        }
        assert_eq!(expand_home("/opt/tpl"), PathBuf::from("/opt/tpl"));
        assert_eq!(expand_home("~other/tpl"), PathBuf::from("~other/tpl"));
    }

    // =========================================================================
    // Hook tests
    // =========================================================================

    #[tokio::test]
    async fn test_missing_config_fails() {
        let temp = TempDir::new().expect("create temp dir");

        let report = check(temp.path()).run().await;

        assert!(!report.success());
        let text = report.text();
        assert!(text.contains("❌ ERROR: .pre-commit-config.yaml not found in repository root"));
        assert!(text.contains("See: https://gitlab.cee.redhat.com/"));
    }

    #[tokio::test]
    async fn test_config_without_hook_fails_with_snippet() {
        let temp = TempDir::new().expect("create temp dir");
        std::fs::write(temp.path().join(".pre-commit-config.yaml"), OTHER_CONFIG)
            .expect("write config");

        let report = check(temp.path()).run().await;

        assert!(!report.success());
        let text = report.text();
        assert!(text.contains("does not include rh-pre-commit"));
        assert!(text.contains("      rev: rh-pre-commit-2.3.2"));
        assert!(text.contains("        - id: rh-pre-commit"));
    }

    #[tokio::test]
    async fn test_compliant_config_passes_when_tool_missing() {
        let temp = TempDir::new().expect("create temp dir");
        std::fs::write(temp.path().join(".pre-commit-config.yaml"), COMPLIANT_CONFIG)
            .expect("write config");

        let hook = check(temp.path());
        assert_eq!(hook.check_global().await, GlobalInstall::Unknown);

        let report = hook.run().await;
        assert!(report.success());
        assert!(report.is_silent());
    }

    #[tokio::test]
    async fn test_precommit_exiting_non_zero_is_unknown() {
        let temp = TempDir::new().expect("create temp dir");
        let hook = ComplianceCheck::new(&PrecommitConfig::default(), temp.path())
            .with_precommit_program("false");

        assert_eq!(hook.check_global().await, GlobalInstall::Unknown);
    }

    #[tokio::test]
    async fn test_compliant_config_never_fails_on_global_state() {
        let temp = TempDir::new().expect("create temp dir");
        std::fs::write(temp.path().join(".pre-commit-config.yaml"), COMPLIANT_CONFIG)
            .expect("write config");

        // `true` stands in for an installed pre-commit; the template dir
        // then depends on the machine, which must not matter.
        let report = ComplianceCheck::new(&PrecommitConfig::default(), temp.path())
            .with_precommit_program("true")
            .run()
            .await;

        assert!(report.success());
        assert!(!report.text().contains("ERROR"));
    }

    #[test]
    fn test_global_warning_is_advisory() {
        let temp = TempDir::new().expect("create temp dir");
        let report = check(temp.path()).global_warning();

        assert!(report.success());
        let text = report.text();
        assert!(text.contains("⚠️  WARNING: rh-pre-commit does not appear to be installed globally"));
        assert!(text.contains("Installation instructions: https://gitlab.cee.redhat.com/"));
        assert!(text.contains("(This is just a warning - your commit will proceed)"));
    }

    #[test]
    fn test_non_utf8_config_still_matches() {
        let temp = TempDir::new().expect("create temp dir");
        let mut content = b"# \xff\xfe legacy comment\n".to_vec();
        content.extend_from_slice(COMPLIANT_CONFIG.as_bytes());
        std::fs::write(temp.path().join(".pre-commit-config.yaml"), content)
            .expect("write config");

        assert_eq!(check(temp.path()).check_local(), LocalCompliance::Compliant);
    }

    #[test]
    fn test_non_utf8_config_without_hook() {
        let temp = TempDir::new().expect("create temp dir");
        std::fs::write(
            temp.path().join(".pre-commit-config.yaml"),
            b"repos: \xff\xfe\n",
        )
        .expect("write config");

        assert_eq!(check(temp.path()).check_local(), LocalCompliance::MissingHook);
    }

    #[test]
    fn test_custom_required_hook() {
        let temp = TempDir::new().expect("create temp dir");
        std::fs::write(temp.path().join(".pre-commit-config.yaml"), OTHER_CONFIG)
            .expect("write config");

        let config = PrecommitConfig {
            required_hook: "trailing-whitespace".to_string(),
            ..PrecommitConfig::default()
        };

        let hook = ComplianceCheck::new(&config, temp.path());
        assert_eq!(hook.check_local(), LocalCompliance::Compliant);
    }
}
