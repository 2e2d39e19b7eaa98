//! Cached self-update check.
//!
//! Asks the release API for the latest published tag at most once per cache
//! window and suggests `pre-commit autoupdate` when a newer one exists. Any
//! failure along the way is treated as "no update known"; this hook never
//! blocks a commit.

use crate::config::{VersionConfig, UNRELEASED_VERSION};
use crate::core::error::{Error, Result};
use crate::core::fallback::Fallback;
use crate::core::state::TtlRecord;
use crate::hooks::Report;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// `Accept` header for the GitHub REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Cached outcome of a version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionStatus {
    /// Whether a newer release exists.
    pub update_available: bool,
    /// Latest published tag, if the lookup succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
}

impl VersionStatus {
    /// Status recorded when the lookup failed.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            update_available: false,
            latest_version: None,
        }
    }
}

/// Returns true if `latest` should be offered as an upgrade over `current`.
///
/// Running from [`UNRELEASED_VERSION`] always has an upgrade. Otherwise
/// leading `v`s are stripped and the strings compared lexicographically.
/// That is not semver ordering: `"1.10.0" < "1.2.0"` and `"10" < "9"`.
/// Existing installs rely on this behavior, so it stays.
#[must_use]
pub fn is_newer(current: &str, latest: &str) -> bool {
    if current == UNRELEASED_VERSION {
        return true;
    }

    latest.trim_start_matches('v') > current.trim_start_matches('v')
}

/// Where the latest release tag comes from.
pub trait ReleaseSource {
    /// Fetches the latest published tag.
    fn latest_tag(&self) -> impl Future<Output = Result<String>>;
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
}

/// GitHub "latest release" endpoint.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    url: String,
    timeout: Duration,
}

impl GithubReleases {
    /// Creates a source querying `url` with the given request timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl ReleaseSource for GithubReleases {
    async fn latest_tag(&self) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::http(&self.url, e))?;

        let release: Release = client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::http(&self.url, e))?
            .json()
            .await
            .map_err(|e| Error::http(&self.url, e))?;

        release
            .tag_name
            .filter(|tag| !tag.trim().is_empty())
            .ok_or_else(|| Error::MalformedResponse {
                url: self.url.clone(),
                message: "missing tag_name".to_string(),
            })
    }
}

/// The version check hook.
#[derive(Debug)]
pub struct VersionCheck<S> {
    source: S,
    cache: TtlRecord<VersionStatus>,
    current: String,
}

impl VersionCheck<GithubReleases> {
    /// Creates the hook against the configured release API, caching under `state_dir`.
    #[must_use]
    pub fn from_config(config: &VersionConfig, state_dir: &Path) -> Self {
        Self::new(
            GithubReleases::new(&config.release_url, config.request_timeout()),
            config,
            state_dir,
        )
    }
}

impl<S: ReleaseSource> VersionCheck<S> {
    /// Creates the hook with an explicit release source.
    #[must_use]
    pub fn new(source: S, config: &VersionConfig, state_dir: &Path) -> Self {
        Self {
            source,
            cache: TtlRecord::new(state_dir.join(&config.cache_file), config.cache_ttl()),
            current: config.current.clone(),
        }
    }

    /// Runs the check as of `now` (seconds since the epoch).
    pub async fn run(&self, now: f64) -> Report {
        if let Some(cached) = self.cache.load(now).or_fallback("read version cache", None) {
            return self.render(&cached);
        }

        let status = match self.source.latest_tag().await {
            Ok(latest) => VersionStatus {
                update_available: is_newer(&self.current, &latest),
                latest_version: Some(latest),
            },
            Err(e) => {
                tracing::debug!(error = %e, "release lookup failed");
                VersionStatus::unknown()
            },
        };

        tracing::debug!(?status, current = %self.current, "version check");
        self.cache
            .store(status.clone(), now)
            .or_fallback("write version cache", ());

        self.render(&status)
    }

    fn render(&self, status: &VersionStatus) -> Report {
        let mut report = Report::passed();
        if !status.update_available {
            return report;
        }

        let latest = status.latest_version.as_deref().unwrap_or("unknown");
        report
            .blank()
            .line(format!(
                "📦 A newer version of {} is available: {latest}",
                env!("CARGO_PKG_NAME")
            ))
            .line(format!("   Current: {}", self.current))
            .blank()
            .line("   To update, run:")
            .line("     pre-commit autoupdate")
            .blank()
            .line("   Or manually update .pre-commit-config.yaml:")
            .line(format!("     rev: {latest}"))
            .blank()
            .line("   (This check runs once every 24 hours)")
            .blank();
        report
    }
}
