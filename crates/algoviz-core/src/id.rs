//! Stable ID newtypes for visualized structures.
//!
//! Graph and list nodes are identified by distinct newtype wrappers over
//! `u32`, so a `ListNodeId` cannot be accidentally used where a
//! `GraphNodeId` is expected. Values are never used for identity: duplicate
//! values are legal in every structure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Graph node identifier. [`GraphInput::to_petgraph`](crate::GraphInput::to_petgraph)
/// maps it to a petgraph `NodeIndex` for reference computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphNodeId(pub u32);

/// Linked-list node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListNodeId(pub u32);

// Display implementations -- just print the inner value.

impl fmt::Display for GraphNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ListNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id counter scoped to one editor or generator session.
///
/// Every visualizer instance owns its own allocator, so two instances can
/// never hand out colliding ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `first`.
    pub fn starting_at(first: u32) -> Self {
        IdAllocator { next: first }
    }

    /// Creates an allocator that continues after the highest id in `used`.
    pub fn after<I>(used: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let next = used.into_iter().max().map_or(0, |max| max + 1);
        IdAllocator { next }
    }

    /// Returns the next raw id and advances the counter.
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns the id the next call to [`allocate`](Self::allocate) will hand out.
    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn graph_node(&mut self) -> GraphNodeId {
        GraphNodeId(self.allocate())
    }

    pub fn list_node(&mut self) -> ListNodeId {
        ListNodeId(self.allocate())
    }
}
