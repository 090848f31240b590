//! The editable node tree.
//!
//! [`Workspace`] owns the root and applies mutations by copying the path
//! to the changed node; [`Snapshot`] is a cheap immutable view of one
//! version of the tree.

use std::sync::Arc;

use serde::Serialize;

use crate::config::{self, DEFAULT_FOLDER_NAME, ROOT_NAME};
use crate::core::error::WorkspaceError;
use crate::core::ids::IdAllocator;
use crate::models::{Node, NodeId, NodeKind, NodeType, SeedNode};

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the workspace tree at one version.
///
/// Cloning is cheap: the tree is shared, and later mutations copy the
/// nodes they touch instead of altering this view.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    root: Arc<Node>,
    version: u64,
}

impl Snapshot {
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Mutation counter of the workspace this view was taken from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True if both views share the same root allocation.
    pub fn same_tree(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<&Node> {
        parent_in(&self.root, id)
    }

    /// True if `id` exists and is a file.
    pub fn is_file(&self, id: NodeId) -> bool {
        self.find(id).is_some_and(Node::is_file)
    }

    /// Every file in the tree, depth-first in stored order.
    pub fn files(&self) -> Vec<&Node> {
        let mut files = Vec::new();
        self.root.walk(&mut |node| {
            if node.is_file() {
                files.push(node);
            }
        });
        files
    }

    /// Path of a node relative to the root (`""` for the root itself).
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let indices = locate(&self.root, id)?;
        let mut node: &Node = &self.root;
        let mut parts = Vec::with_capacity(indices.len());
        for index in indices {
            node = node.children().get(index)?;
            parts.push(node.name.as_str());
        }
        Some(parts.join("/"))
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

// =============================================================================
// Workspace
// =============================================================================

/// Owner of the editable node tree.
///
/// Every successful mutation bumps [`version`](Self::version); snapshots
/// taken earlier keep their old tree.
#[derive(Clone, Debug)]
pub struct Workspace {
    root: Arc<Node>,
    ids: IdAllocator,
    version: u64,
}

impl Workspace {
    /// Create a workspace whose root holds `seed`.
    ///
    /// Seed nodes get ids in depth-first order starting at `1`, so the
    /// allocator always continues above every seed id.
    pub fn new(seed: Vec<SeedNode>) -> Self {
        let mut ids = IdAllocator::default();
        let children = seed
            .into_iter()
            .map(|node| plant(node, &mut ids))
            .collect();

        let root = Node {
            id: NodeId::Root,
            name: ROOT_NAME.to_string(),
            kind: NodeKind::Directory { children },
        };

        Self {
            root: Arc::new(root),
            ids,
            version: 0,
        }
    }

    /// Workspace with an empty root.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            root: Arc::clone(&self.root),
            version: self.version,
        }
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    /// Parent directory of `id`; `None` for the root or an unknown id.
    pub fn parent_of(&self, id: NodeId) -> Option<&Node> {
        parent_in(&self.root, id)
    }

    /// Append a new empty file or directory to `parent`.
    pub fn insert(&mut self, parent: NodeId, kind: NodeType) -> Result<NodeId, WorkspaceError> {
        if !self.find(parent).is_some_and(Node::is_directory) {
            return Err(WorkspaceError::InvalidTarget(parent));
        }
        let path = locate(&self.root, parent).ok_or(WorkspaceError::InvalidTarget(parent))?;

        let id = self.ids.allocate();
        let node = match kind {
            NodeType::File => Node::file(id, config::default_file_name(), ""),
            NodeType::Directory => Node::directory(id, DEFAULT_FOLDER_NAME),
        };

        match node_at_mut(&mut self.root, &path).map(|n| &mut n.kind) {
            Some(NodeKind::Directory { children }) => children.push(Arc::new(node)),
            _ => return Err(WorkspaceError::InvalidTarget(parent)),
        }

        self.bump("insert", id);
        Ok(id)
    }

    /// Detach `id` and its subtree.
    ///
    /// Returns the ids of every removed node (pre-order). Removing the
    /// root is a no-op that removes nothing.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>, WorkspaceError> {
        if id.is_root() {
            return Ok(Vec::new());
        }
        let mut path = locate(&self.root, id).ok_or(WorkspaceError::NotFound(id))?;
        let removed = self
            .find(id)
            .map(Node::subtree_ids)
            .ok_or(WorkspaceError::NotFound(id))?;
        let index = path.pop().ok_or(WorkspaceError::NotFound(id))?;

        match node_at_mut(&mut self.root, &path).map(|n| &mut n.kind) {
            Some(NodeKind::Directory { children }) if index < children.len() => {
                children.remove(index);
            }
            _ => return Err(WorkspaceError::NotFound(id)),
        }

        self.bump("remove", id);
        Ok(removed)
    }

    /// Rename a non-root node.
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<(), WorkspaceError> {
        if id.is_root() {
            return Err(WorkspaceError::InvalidTarget(id));
        }
        self.rename_node(id, name)
    }

    /// Rename any node, the root included.
    pub(crate) fn rename_node(&mut self, id: NodeId, name: &str) -> Result<(), WorkspaceError> {
        if name.trim().is_empty() {
            return Err(WorkspaceError::InvalidName);
        }
        let path = locate(&self.root, id).ok_or(WorkspaceError::NotFound(id))?;
        let node = node_at_mut(&mut self.root, &path).ok_or(WorkspaceError::NotFound(id))?;
        node.name = name.to_string();

        self.bump("rename", id);
        Ok(())
    }

    /// Replace the content of a file.
    pub fn set_content(&mut self, id: NodeId, text: &str) -> Result<(), WorkspaceError> {
        match self.find(id) {
            None => return Err(WorkspaceError::NotFound(id)),
            Some(node) if node.is_directory() => return Err(WorkspaceError::WrongKind(id)),
            Some(_) => {}
        }
        let path = locate(&self.root, id).ok_or(WorkspaceError::NotFound(id))?;

        match node_at_mut(&mut self.root, &path).map(|n| &mut n.kind) {
            Some(NodeKind::File { content }) => *content = text.to_string(),
            _ => return Err(WorkspaceError::WrongKind(id)),
        }

        self.bump("set_content", id);
        Ok(())
    }

    fn bump(&mut self, op: &'static str, id: NodeId) {
        self.version += 1;
        tracing::trace!(op, %id, version = self.version, "workspace mutated");
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(config::default_seed())
    }
}

// =============================================================================
// Tree Helpers
// =============================================================================

/// Turn a seed template into a node, allocating ids in pre-order.
fn plant(seed: SeedNode, ids: &mut IdAllocator) -> Arc<Node> {
    let id = ids.allocate();
    let node = match seed {
        SeedNode::File { name, content } => Node::file(id, name, content),
        SeedNode::Directory { name, children } => Node {
            id,
            name,
            kind: NodeKind::Directory {
                children: children.into_iter().map(|c| plant(c, ids)).collect(),
            },
        },
    };
    Arc::new(node)
}

/// Child indices leading from `node` to `id` (empty if `node` is the target).
fn locate(node: &Node, id: NodeId) -> Option<Vec<usize>> {
    if node.id == id {
        return Some(Vec::new());
    }
    node.children().iter().enumerate().find_map(|(i, child)| {
        locate(child, id).map(|mut rest| {
            rest.insert(0, i);
            rest
        })
    })
}

fn parent_in(node: &Node, id: NodeId) -> Option<&Node> {
    for child in node.children() {
        if child.id == id {
            return Some(node);
        }
        if let Some(parent) = parent_in(child, id) {
            return Some(parent);
        }
    }
    None
}

/// Follow `path` from `root`, copying shared nodes on the way down.
fn node_at_mut<'a>(mut node: &'a mut Arc<Node>, path: &[usize]) -> Option<&'a mut Node> {
    for &index in path {
        node = match &mut Arc::make_mut(node).kind {
            NodeKind::Directory { children } => children.get_mut(index)?,
            NodeKind::File { .. } => return None,
        };
    }
    Some(Arc::make_mut(node))
}
