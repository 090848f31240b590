//! Error types for the editor core.
//!
//! - [`WorkspaceError`] - tree mutations rejected by the workspace
//! - [`ParseError`] - storage documents the YAML parser could not read
//!
//! Export and completion have no error type: they cannot fail.

use thiserror::Error;

use crate::models::NodeId;

/// Tree operation failures returned by [`Workspace`](super::Workspace).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// Referenced id does not exist
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// Operation does not apply to this node's type
    #[error("operation not valid for node {0}")]
    WrongKind(NodeId),
    /// Insert parent is absent or a file, or the target is reserved
    #[error("invalid target {0}")]
    InvalidTarget(NodeId),
    /// New name is empty or whitespace-only
    #[error("name must not be empty")]
    InvalidName,
}

/// A storage document that failed to parse.
///
/// Only seen inside the storage index; the document is skipped.
#[derive(Debug, Error)]
#[error("invalid document: {0}")]
pub struct ParseError(#[from] serde_yaml::Error);
