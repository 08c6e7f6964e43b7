//! Error types for `sample-guide`.

use camino::Utf8PathBuf;
use sample_harness::HarnessError;
use thiserror::Error;

/// Errors surfaced while building a guide.
#[derive(Debug, Error)]
pub enum GuideError {
    /// Configuration or traversal setup failed.
    #[error(transparent)]
    Harness(#[from] HarnessError),

    /// A sample file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON sample file failed to decode.
    #[error("failed to parse samples in {path}: {source}")]
    Json {
        /// File being decoded.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A TOML sample file failed to decode.
    #[error("failed to parse samples in {path}: {source}")]
    Toml {
        /// File being decoded.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The sample file extension is neither `json` nor `toml`.
    #[error("unsupported sample format '{0}'; use a .json or .toml file")]
    UnsupportedFormat(String),

    /// One or more sections stopped before their examples were written.
    #[error("{count} section(s) failed in the {flavour} guide")]
    SectionsFailed {
        /// Guide flavour being built.
        flavour: String,
        /// Number of failed section passes.
        count: usize,
    },

    /// One or more example probes failed.
    #[error("{count} example(s) failed in the {flavour} guide")]
    CasesFailed {
        /// Guide flavour being built.
        flavour: String,
        /// Number of failed cases.
        count: usize,
    },
}
