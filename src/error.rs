//! Error types for the scan pipeline
//!
//! Library code returns [`ScanError`]; the binary wraps it in `anyhow` with
//! context at the boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Cache entry does not exist
    #[error("cache entry not found: {key}")]
    NotFound { key: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Explorer answered with a non-success status. Fatal for the run.
    #[error("Failed to request {address} (status {status}). Response:\n{body}")]
    FetchFailed {
        address: String,
        status: u16,
        body: String,
    },

    /// Connection, TLS or timeout failure before a status was received
    #[error("explorer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed page for {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the explorer rather than local state
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. } | Self::Transport(_))
    }
}
