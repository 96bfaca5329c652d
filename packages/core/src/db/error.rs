//! Snapshot Error Types
//!
//! Errors raised while decoding a persisted chart. Every variant is
//! recoverable: callers fall back to a fresh chart.

use crate::models::ValidationError;
use thiserror::Error;

/// Snapshot decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Payload is not JSON at all
    #[error("Snapshot is not valid JSON: {0}")]
    InvalidJson(String),

    /// Envelope carries a version this build does not read
    #[error("Unsupported snapshot version: found {found:?}, expected {expected}")]
    UnsupportedVersion { found: Option<u64>, expected: u64 },

    /// Envelope or tree does not have the expected shape
    #[error("Malformed snapshot: {0}")]
    MalformedTree(String),

    /// Tree decoded but breaks a structural rule
    #[error("Snapshot tree is invalid: {0}")]
    InvalidTree(#[from] ValidationError),
}

impl SnapshotError {
    /// Create an invalid JSON error
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::InvalidJson(msg.into())
    }

    /// Create an unsupported version error
    pub fn unsupported_version(found: Option<u64>, expected: u64) -> Self {
        Self::UnsupportedVersion { found, expected }
    }

    /// Create a malformed tree error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTree(msg.into())
    }
}
