//! Data models and types for the editor core.
//!
//! Contains domain types for:
//! - [`Node`], [`NodeId`], [`NodeKind`], [`SeedNode`] - Workspace tree representation
//! - [`Selection`], [`Pane`] - Single and split view editing state
//! - [`Suggestion`], [`VariablePath`], [`WordRange`] - Completion results

mod completion;
mod node;
mod selection;

pub use completion::{Suggestion, SuggestionKind, ValueType, VariablePath, WordRange};
pub use node::{InvalidNodeId, Node, NodeId, NodeKind, NodeType, SeedNode};
pub use selection::{Pane, PaneError, Selection};
