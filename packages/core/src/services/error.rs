//! Service Layer Error Types
//!
//! This module defines error types for organogram tree operations.
//!
//! Mutations on an id that does not resolve are strict: they return
//! `NodeNotFound` and leave the tree untouched. Cycles have no variant here;
//! they are ruled out ahead of time by excluding a node's own subtree from its
//! "reports to" choices.

use crate::models::ValidationError;
use thiserror::Error;

/// Tree operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgTreeError {
    /// Node not found by ID
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Parent is still an unconfigured placeholder
    #[error("Cannot add a direct report under unconfigured position: {id}")]
    CannotAddChild { id: String },

    /// Invalid update operation
    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    /// Validation failed for node or tree
    #[error("Node validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

impl OrgTreeError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a cannot-add-child error
    pub fn cannot_add_child(id: impl Into<String>) -> Self {
        Self::CannotAddChild { id: id.into() }
    }

    /// Create an invalid update error
    pub fn invalid_update(msg: impl Into<String>) -> Self {
        Self::InvalidUpdate(msg.into())
    }
}
