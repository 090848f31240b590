//! Tree node types for the in-memory workspace.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::ROOT_ID;

// =============================================================================
// Node Identity
// =============================================================================

/// Stable identifier of a node, unique within one workspace.
///
/// The root always carries [`NodeId::Root`] (text `root`); every other node
/// gets a sequence number from the [`IdAllocator`](crate::core::IdAllocator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// Reserved id of the workspace root
    Root,
    /// Allocated id (rendered as its decimal value)
    Seq(u64),
}

impl NodeId {
    pub fn is_root(self) -> bool {
        matches!(self, NodeId::Root)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_ID),
            Self::Seq(n) => write!(f, "{}", n),
        }
    }
}

/// Error returned when text is neither `root` nor a decimal id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id: {0:?}")]
pub struct InvalidNodeId(pub String);

impl FromStr for NodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT_ID {
            return Ok(Self::Root);
        }
        s.parse::<u64>()
            .map(Self::Seq)
            .map_err(|_| InvalidNodeId(s.to_string()))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// Kind requested when inserting a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Directory,
    File,
}

/// Payload of a node, tagged by its type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory with children in insertion order
    Directory { children: Vec<Arc<Node>> },
    /// Text file
    File { content: String },
}

/// An element of the workspace tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Create an empty directory.
    pub fn directory(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    /// Create a file with the given content.
    pub fn file(id: NodeId, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Directory { .. } => NodeType::Directory,
            NodeKind::File { .. } => NodeType::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[Arc<Node>] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Content of a file (directories have none).
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Depth-first search of this subtree.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Ids of this node and all its descendants, in pre-order.
    pub fn subtree_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.walk(&mut |node| ids.push(node.id));
        ids
    }

    /// Visit this node and its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

// =============================================================================
// Seed Templates
// =============================================================================

/// Id-less node template used to populate a fresh workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedNode {
    Directory {
        name: String,
        children: Vec<SeedNode>,
    },
    File {
        name: String,
        content: String,
    },
}

impl SeedNode {
    pub fn dir(name: impl Into<String>, children: Vec<SeedNode>) -> Self {
        Self::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::File {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_text_form() {
        assert_eq!(NodeId::Root.to_string(), "root");
        assert_eq!(NodeId::Seq(42).to_string(), "42");
        assert_eq!("root".parse::<NodeId>(), Ok(NodeId::Root));
        assert_eq!("7".parse::<NodeId>(), Ok(NodeId::Seq(7)));
        assert!("seven".parse::<NodeId>().is_err());
        assert!("".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_node_id_serializes_as_text() {
        let json = serde_json::to_string(&NodeId::Seq(3)).unwrap();
        assert_eq!(json, "\"3\"");
        let back: NodeId = serde_json::from_str("\"root\"").unwrap();
        assert_eq!(back, NodeId::Root);
    }

    #[test]
    fn test_node_serializes_tagged() {
        let node = Node::file(NodeId::Seq(1), "main.yaml", "blocks:");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["id"], "1");
        assert_eq!(value["content"], "blocks:");
    }

    #[test]
    fn test_find_and_subtree_ids() {
        let mut dir = Node::directory(NodeId::Seq(1), "storage");
        if let NodeKind::Directory { children } = &mut dir.kind {
            children.push(Arc::new(Node::file(NodeId::Seq(2), "a.yaml", "")));
            children.push(Arc::new(Node::directory(NodeId::Seq(3), "nested")));
        }

        assert_eq!(dir.find(NodeId::Seq(3)).map(|n| n.name.as_str()), Some("nested"));
        assert!(dir.find(NodeId::Seq(9)).is_none());
        assert_eq!(
            dir.subtree_ids(),
            vec![NodeId::Seq(1), NodeId::Seq(2), NodeId::Seq(3)]
        );
    }

    #[test]
    fn test_file_has_no_children() {
        let file = Node::file(NodeId::Seq(1), "x", "y");
        assert!(file.children().is_empty());
        assert_eq!(file.content(), Some("y"));
        assert_eq!(file.node_type(), NodeType::File);
    }
}
