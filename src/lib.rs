//! Editing core for Cocoon workflow projects.
//!
//! Holds an in-memory tree of directories and text files, tracks which
//! files are open in single or split view, offers completions for the
//! workflow language, and exports the tree as a shell script that
//! recreates it.
//!
//! ```
//! use cocoon_kickstart::{ExportStyle, Session};
//!
//! let session = Session::default();
//! let script = session.export(ExportStyle::Newline);
//! assert!(script.starts_with("mkdir -p \"storage\""));
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

#[cfg(feature = "web")]
mod bindings;

pub use crate::config::StorageOptions;
pub use crate::core::{
    complete, export_script, CompletionContext, ExportStyle, Session, Snapshot, StorageIndex,
    Workspace, WorkspaceError,
};
pub use crate::models::{Node, NodeId, NodeKind, NodeType, Pane, Selection, Suggestion};
