//! Configuration handling for rh-hooks-ai.
//!
//! Every setting has a built-in default matching the published hook suite;
//! an optional `rh-hooks.toml` overrides individual fields.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "rh-hooks.toml";

/// Version string that marks a build from the development line.
pub const UNRELEASED_VERSION: &str = "main";

const RH_PRECOMMIT_URL: &str = "https://gitlab.cee.redhat.com/infosec-public/developer-workbench/tools/-/tree/main/rh-pre-commit?ref_type=heads";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attribution reminder settings.
    pub reminder: ReminderConfig,
    /// Pre-commit compliance settings.
    pub precommit: PrecommitConfig,
    /// Version check settings.
    pub version: VersionConfig,
    /// AGENTS.md validation settings.
    pub agents_md: AgentsMdConfig,
}

impl Config {
    /// Loads configuration or returns defaults if not found.
    pub fn load_or_default() -> Result<Self> {
        match Self::find_config_file() {
            Ok(path) => Self::load_from(&path),
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io("read config", e))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config_parse_with_source("Failed to parse TOML", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Finds the configuration file by searching up the directory tree.
    pub fn find_config_file() -> Result<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| Error::io("get current dir", e))?;

        let mut current = cwd.as_path();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::ConfigNotFound {
            path: cwd.join(CONFIG_FILE_NAME),
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        parse_duration("precommit.command_timeout", &self.precommit.command_timeout)?;
        parse_duration("version.cache_ttl", &self.version.cache_ttl)?;
        parse_duration("version.request_timeout", &self.version.request_timeout)?;
        parse_duration("agents_md.command_timeout", &self.agents_md.command_timeout)?;

        if self.precommit.required_hook.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                field: "precommit.required_hook".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.version.current.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                field: "version.current".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generates default configuration as a string.
    #[must_use]
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value).map_err(|_| Error::ConfigInvalid {
        field: field.to_string(),
        message: format!("Invalid duration: {value}"),
    })
}

/// Parses an already validated duration, falling back to `default` if it
/// somehow is not.
fn duration_or(value: &str, default: Duration) -> Duration {
    humantime::parse_duration(value).unwrap_or(default)
}

/// Attribution reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Marker file name, relative to the git directory.
    pub marker_file: String,
    /// Guidelines shown under "Learn more".
    pub guidelines_url: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            marker_file: ".ai-tip-shown".to_string(),
            guidelines_url: "https://source.redhat.com/projects_and_programs/ai/wiki/code_assistants_guidelines_for_responsible_use_of_ai_code_assistants".to_string(),
        }
    }
}

/// Pre-commit compliance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecommitConfig {
    /// Path of the pre-commit config, relative to the repository root.
    pub config_file: String,
    /// Identifier that must appear in the pre-commit config.
    pub required_hook: String,
    /// Repository URL shown in the remediation snippet.
    pub hook_repo: String,
    /// Revision shown in the remediation snippet.
    pub hook_rev: String,
    /// Documentation link.
    pub docs_url: String,
    /// Timeout for `pre-commit` and `git config` probes.
    pub command_timeout: String,
}

impl PrecommitConfig {
    /// Probe timeout as a [`Duration`].
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        duration_or(&self.command_timeout, Duration::from_secs(5))
    }
}

impl Default for PrecommitConfig {
    fn default() -> Self {
        Self {
            config_file: ".pre-commit-config.yaml".to_string(),
            required_hook: "rh-pre-commit".to_string(),
            hook_repo: "https://gitlab.cee.redhat.com/infosec-public/developer-workbench/tools"
                .to_string(),
            hook_rev: "rh-pre-commit-2.3.2".to_string(),
            docs_url: RH_PRECOMMIT_URL.to_string(),
            command_timeout: "5s".to_string(),
        }
    }
}

/// Version check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Release metadata endpoint (GitHub "latest release" API).
    pub release_url: String,
    /// Version this installation runs, or [`UNRELEASED_VERSION`].
    pub current: String,
    /// Cache file name, relative to the git directory.
    pub cache_file: String,
    /// How long a check result stays valid.
    pub cache_ttl: String,
    /// Timeout for the release request.
    pub request_timeout: String,
}

impl VersionConfig {
    /// Cache validity window as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        duration_or(&self.cache_ttl, Duration::from_secs(24 * 60 * 60))
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        duration_or(&self.request_timeout, Duration::from_secs(2))
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            release_url:
                "https://api.github.com/repos/openshift-hyperfleet/rh-hooks-ai/releases/latest"
                    .to_string(),
            current: concat!("v", env!("CARGO_PKG_VERSION")).to_string(),
            cache_file: ".rh-hooks-version-check".to_string(),
            cache_ttl: "24h".to_string(),
            request_timeout: "2s".to_string(),
        }
    }
}

/// AGENTS.md validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsMdConfig {
    /// File to validate, relative to the repository root.
    pub file: String,
    /// Minimum trimmed length in characters.
    pub min_length: usize,
    /// Timeout for the `git ls-files` query.
    pub command_timeout: String,
    /// Template link shown when the file is missing.
    pub template_url: String,
}

impl AgentsMdConfig {
    /// Query timeout as a [`Duration`].
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        duration_or(&self.command_timeout, Duration::from_secs(5))
    }
}

impl Default for AgentsMdConfig {
    fn default() -> Self {
        Self {
            file: "AGENTS.md".to_string(),
            min_length: 100,
            command_timeout: "5s".to_string(),
            template_url: "https://github.com/openshift-hyperfleet/rh-hooks-ai/blob/main/templates/AGENTS.md.template".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.precommit.required_hook, "rh-pre-commit");
        assert_eq!(config.agents_md.min_length, 100);
        assert_eq!(config.version.cache_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.version.request_timeout(), Duration::from_secs(2));
        assert_eq!(config.precommit.command_timeout(), Duration::from_secs(5));
        assert!(config.version.current.starts_with('v'));
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_duration() {
        let mut config = Config::default();
        config.version.cache_ttl = "soon".to_string();
        let err = config.validate().expect_err("should reject");
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "version.cache_ttl"));
    }

    #[test]
    fn test_empty_required_hook() {
        let mut config = Config::default();
        config.precommit.required_hook = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
[version]
current = "main"
cache_ttl = "1h"

[agents_md]
min_length = 20
"#,
        )
        .expect("write config");

        let config = Config::load_from(&path).expect("load config");
        assert_eq!(config.version.current, UNRELEASED_VERSION);
        assert_eq!(config.version.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.agents_md.min_length, 20);
        // Untouched sections keep their defaults
        assert_eq!(config.agents_md.file, "AGENTS.md");
        assert_eq!(config.precommit.config_file, ".pre-commit-config.yaml");
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[version\ncurrent = ").expect("write config");

        let err = Config::load_from(&path).expect_err("should fail");
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("create temp dir");
        let err = Config::load_from(&temp.path().join("nope.toml")).expect_err("should fail");
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml = Config::default_toml();
        assert!(toml.contains("[reminder]"));
        assert!(toml.contains("[precommit]"));
        assert!(toml.contains("[version]"));
        assert!(toml.contains("[agents_md]"));

        let parsed: Config = toml::from_str(&toml).expect("reparse defaults");
        assert!(parsed.validate().is_ok());
    }
}
