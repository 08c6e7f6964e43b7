//! Error types for the sample harness.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced while configuring or running a traversal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// Configuration could not be gathered from its providers.
    #[error("failed to gather configuration: {0}")]
    Gathering(#[from] Box<figment::Error>),

    /// A configuration value or overlay could not be converted.
    #[error("failed to convert configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration was well formed but unusable.
    #[error("invalid configuration for '{key}': {message}")]
    InvalidConfig {
        /// Configuration key that failed validation.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// The requested configuration profile is not declared.
    #[error("configuration profile '{0}' is not declared")]
    UnknownProfile(String),

    /// Filesystem failure while writing example files.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed when the failure occurred.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for HarnessError {
    fn from(err: figment::Error) -> Self {
        Self::Gathering(Box::new(err))
    }
}

impl HarnessError {
    /// Builds an [`HarnessError::InvalidConfig`] for `key`.
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type HarnessResult<T> = Result<T, HarnessError>;
