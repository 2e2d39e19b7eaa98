//! Error types for rh-hooks-ai.
//!
//! Hooks rarely surface these to the user: environmental failures are
//! collapsed into fallback values (see [`crate::core::fallback`]). They exist
//! so every fallible call has a typed error to log.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in rh-hooks-ai.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Configuration file not found.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path where config was expected.
        path: PathBuf,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        /// Description of the parse error.
        message: String,
        /// Optional source error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    ConfigInvalid {
        /// Field name that is invalid.
        field: String,
        /// Description of why it's invalid.
        message: String,
    },

    // =========================================================================
    // Git and subprocess errors
    // =========================================================================
    /// Not in a Git repository.
    #[error("Not in a Git repository")]
    NotGitRepo,

    /// Git operation failed.
    #[error("Git operation failed: {operation} - {message}")]
    GitOperation {
        /// Name of the operation that failed.
        operation: String,
        /// Error message.
        message: String,
    },

    /// External command did not finish in time.
    #[error("Command '{command}' timed out after {timeout}")]
    CommandTimeout {
        /// The command line that was run.
        command: String,
        /// Timeout duration as string.
        timeout: String,
    },

    // =========================================================================
    // I/O errors
    // =========================================================================
    /// File I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Description of what failed.
        message: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Release lookup errors
    // =========================================================================
    /// HTTP request failed (connect, timeout, non-2xx status).
    #[error("HTTP request to {url} failed")]
    Http {
        /// Requested URL.
        url: String,
        /// Source error.
        #[source]
        source: reqwest::Error,
    },

    /// Response arrived but did not carry what we need.
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse {
        /// Requested URL.
        url: String,
        /// What was wrong with it.
        message: String,
    },

    /// Cache record could not be encoded or decoded.
    #[error("Cache record at {path} is unusable")]
    Cache {
        /// Cache file path.
        path: PathBuf,
        /// Source error.
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Internal errors
    // =========================================================================
    /// Internal error (should never happen).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Creates a new configuration parse error with source.
    pub fn config_parse_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new I/O error with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new Git operation error.
    pub fn git(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GitOperation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a new HTTP error.
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Returns the process exit code for an error that reaches an entry point.
    ///
    /// Only configuration problems get their own code; hooks map every
    /// environmental failure to a verdict before it gets this far.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => {
                78 // EX_CONFIG
            },
            _ => 1,
        }
    }
}
