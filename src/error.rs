//! Error taxonomy for a fetch-and-cache run
//!
//! Every failure is fatal to the run. The variants are grouped into
//! [`FailureKind`]s so callers and logs can tell a network problem from a bad
//! envelope or a malformed record, even though all of them are handled alike.

use std::error::Error as StdError;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Broad class of a run failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network failure or non-success HTTP status
    Fetch,
    /// Response lacks the success marker or the alerts array
    Envelope,
    /// Response body or an alert's geometry is not valid JSON
    Parse,
    /// Filesystem failure or invalid configuration
    Local,
}

/// Errors that abort a fetch-and-cache run
#[derive(Debug, Error)]
pub enum RunError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a status outside the 2xx range
    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// Response envelope is not a successful alerts payload
    #[error("Invalid response envelope: {0}")]
    Envelope(String),

    /// Response body is not valid JSON
    #[error("Failed to parse response body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// An alert record is not shaped like an alert
    #[error("Invalid alert at index {index}: {reason}")]
    InvalidAlert { index: usize, reason: String },

    /// An alert's `area_json` field does not hold valid JSON
    #[error("Invalid area_json in alert at index {index}")]
    InvalidGeometry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// An existing cache file does not hold a valid feature collection
    #[error("Invalid cache file {}", .path.display())]
    InvalidCache {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The feature collection could not be serialized
    #[error("Failed to serialize feature collection: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Reading or writing the data directory failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Run configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl RunError {
    /// Classifies the error
    pub fn kind(&self) -> FailureKind {
        match self {
            RunError::Request(_) | RunError::Status(_) => FailureKind::Fetch,
            RunError::Envelope(_) => FailureKind::Envelope,
            RunError::InvalidBody(_)
            | RunError::InvalidAlert { .. }
            | RunError::InvalidGeometry { .. } => FailureKind::Parse,
            RunError::InvalidCache { .. }
            | RunError::Serialize(_)
            | RunError::Io(_)
            | RunError::Config(_) => FailureKind::Local,
        }
    }

    /// The error message followed by the messages of its causes, outermost first
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut source = self.source();
        while let Some(cause) = source {
            let message = cause.to_string();
            // thiserror's `{0}` formatting already embeds the direct cause
            if !messages.iter().any(|m| m.ends_with(&message)) {
                messages.push(message);
            }
            source = cause.source();
        }
        messages
    }
}
