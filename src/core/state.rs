//! File-backed hook state.
//!
//! Every hook invocation is a fresh process, so anything remembered between
//! commits lives on disk under the git dir:
//!
//! - [`Marker`]: existence-only sentinel ("already done").
//! - [`TtlRecord`]: JSON record stamped with the time it was written, valid
//!   for a fixed window.
//!
//! Both are created on first miss, read on every invocation and never torn
//! down. Writes are last-writer-wins.

use crate::core::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Seconds since the Unix epoch, with sub-second precision.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn now_secs() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}

/// Sentinel file whose existence is the whole state.
#[derive(Debug, Clone)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    /// Creates a marker at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the marker path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the marker has been set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.path.exists()
    }

    /// Creates the marker (and its parent directories). Content is irrelevant.
    pub fn set(&self) -> Result<()> {
        create_parent(&self.path)?;
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(format!("create marker {}", self.path.display()), e))?;
        Ok(())
    }
}

/// On-disk shape of a [`TtlRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Stamped<T> {
    timestamp: f64,
    result: T,
}

/// JSON record valid for `ttl` after it was written.
#[derive(Debug, Clone)]
pub struct TtlRecord<T> {
    path: PathBuf,
    ttl: Duration,
    _value: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> TtlRecord<T> {
    /// Creates a record stored at `path`, valid for `ttl`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            _value: PhantomData,
        }
    }

    /// Returns the record path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored value if it was written less than `ttl` before `now`.
    ///
    /// A missing file is `Ok(None)`; so is an expired record.
    pub fn load(&self, now: f64) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::io(format!("read {}", self.path.display()), e))?;

        let stamped: Stamped<T> = serde_json::from_str(&raw).map_err(|source| Error::Cache {
            path: self.path.clone(),
            source,
        })?;

        let age = now - stamped.timestamp;
        if age < self.ttl.as_secs_f64() {
            tracing::debug!(path = %self.path.display(), age, "cache hit");
            Ok(Some(stamped.result))
        } else {
            tracing::debug!(path = %self.path.display(), age, "cache expired");
            Ok(None)
        }
    }

    /// Overwrites the record with `value`, stamped `now`.
    pub fn store(&self, value: T, now: f64) -> Result<()> {
        let stamped = Stamped {
            timestamp: now,
            result: value,
        };
        let json = serde_json::to_string(&stamped).map_err(|source| Error::Cache {
            path: self.path.clone(),
            source,
        })?;

        create_parent(&self.path)?;
        std::fs::write(&self.path, json)
            .map_err(|e| Error::io(format!("write {}", self.path.display()), e))
    }
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("create {}", parent.display()), e)),
        _ => Ok(()),
    }
}
