//! Node id allocation.

use crate::models::NodeId;

/// Hands out strictly increasing [`NodeId::Seq`] values.
///
/// Never yields [`NodeId::Root`] and never reuses a value, even after the
/// node that carried it has been removed.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Start allocating at `first`.
    pub fn new(first: u64) -> Self {
        Self { next: first }
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId::Seq(self.next);
        self.next += 1;
        id
    }

    /// Id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> NodeId {
        NodeId::Seq(self.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}
