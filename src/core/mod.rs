//! Core editing logic.
//!
//! This module provides:
//! - [`Workspace`] tree operations and immutable [`Snapshot`]s
//! - [`Selection`](crate::models::Selection) rules for single and split view
//! - [`StorageIndex`] and [`completion`] for context-sensitive suggestions
//! - [`export`] of a snapshot as a shell reconstruction script
//! - [`Session`], which ties them together for a host application

pub mod completion;
pub mod error;
pub mod export;
mod ids;
mod selection;
mod session;
mod storage;
mod workspace;

pub use completion::{complete, CompletionContext};
pub use error::{ParseError, WorkspaceError};
pub use export::{export_script, ExportStyle, Joiner, Quoting};
pub use ids::IdAllocator;
pub use session::{Session, SubscriptionId};
pub use storage::{parse_document, StorageIndex};
pub use workspace::{Snapshot, Workspace};
