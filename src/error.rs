// src/error.rs
//! Application error types with structured error handling.
//!
//! Build-aborting conditions live in `AppError`. Recoverable per-asset
//! failures are classified into `AssetFetchFailure` instead — they are
//! logged and skipped, never raised.

use crate::types::{EntityId, ValidationError};
use std::fmt;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParse {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed raw content: {0}")]
    MalformedContent(String),

    #[error("Entity '{id}' references parent '{parent}' which does not exist in the raw content")]
    MissingParent { id: EntityId, parent: EntityId },

    #[error("Parent chain of entity '{id}' does not terminate at the root")]
    ParentCycle { id: EntityId },

    #[error("Entity '{id}' has no title; cannot derive a URL for it")]
    MissingTitle { id: EntityId },

    #[error("Entity '{id}' has no assigned URL; the hierarchy pass must run first")]
    UnassignedUrl { id: EntityId },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// Allow converting from anyhow::Error at the binary boundary.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::MalformedContent(err.to_string())
    }
}

/// Domain vocabulary for why localizing one asset failed.
///
/// This is not an error type — it's a classification of the failure reason.
/// Both classes are recoverable: a failed asset never aborts the run, it only
/// decides whether the reference rewrite happens for that occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetFetchFailure {
    /// The remote resource could not be retrieved (HTTP error, network
    /// failure). The original URL is left in place.
    RemoteAbsent { url: String, cause: String },
    /// The reference itself is unusable (unparseable URL, no basename).
    /// Skipped entirely; nothing is mutated for this file.
    MalformedReference { url: String, cause: String },
}

impl AssetFetchFailure {
    /// Classifies a transport-level error from an attempted download.
    pub fn from_request_error(url: &str, error: &reqwest::Error) -> Self {
        Self::RemoteAbsent {
            url: url.to_string(),
            cause: error.to_string(),
        }
    }

    pub fn malformed(url: &str, cause: impl Into<String>) -> Self {
        Self::MalformedReference {
            url: url.to_string(),
            cause: cause.into(),
        }
    }
}

impl fmt::Display for AssetFetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteAbsent { url, cause } => {
                write!(f, "remote resource absent: {} ({})", url, cause)
            }
            Self::MalformedReference { url, cause } => {
                write!(f, "malformed reference: {} ({})", url, cause)
            }
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
