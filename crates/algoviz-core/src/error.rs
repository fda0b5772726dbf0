//! Core error types for algoviz-core.
//!
//! Uses `thiserror` for structured, matchable error variants. These cover
//! malformed inputs only: "not found", "empty" and "no path" outcomes are
//! ordinary terminal steps of a trace and never surface here.

use crate::id::{GraphNodeId, ListNodeId};
use thiserror::Error;

/// Invalid-invocation errors returned by trace generators.
///
/// Each variant indicates a caller bug (a structurally broken input), not an
/// algorithm outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Two graph nodes share the same id.
    #[error("duplicate graph node: GraphNodeId({id})", id = id.0)]
    DuplicateNode { id: GraphNodeId },

    /// An edge references a node that is not part of the graph.
    #[error("edge {source_id} -> {target_id} references unknown node {missing}")]
    DanglingEdge {
        source_id: GraphNodeId,
        target_id: GraphNodeId,
        missing: GraphNodeId,
    },

    /// The selected start or end node is not part of the graph.
    #[error("{role} node {id} is not part of the graph")]
    UnknownEndpoint { role: &'static str, id: GraphNodeId },

    /// A tree node violates the binary-search-tree ordering.
    #[error("tree is not a binary search tree: {value} is misplaced under {ancestor}")]
    NotABinarySearchTree { value: i64, ancestor: i64 },

    /// A list node links to an id that does not exist.
    #[error("list node {from} links to unknown node {missing}")]
    DanglingLink { from: ListNodeId, missing: ListNodeId },

    /// Following `next` from the head revisits a node.
    #[error("list contains a cycle through node {id}")]
    CyclicList { id: ListNodeId },

    /// The head/tail flags or the `prev` links disagree with the `next` chain.
    #[error("inconsistent list: {reason}")]
    InconsistentList { reason: String },

    /// Two list nodes share the same id.
    #[error("duplicate list node: ListNodeId({id})", id = id.0)]
    DuplicateListNode { id: ListNodeId },

    /// An algorithm or operation name could not be parsed.
    #[error("unknown {family} algorithm: '{name}'")]
    UnknownAlgorithm { family: &'static str, name: String },
}

/// Errors produced by interactive graph editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Structural edits are rejected while a trace is being played back.
    #[error("graph cannot be edited while playback is active")]
    PlaybackActive,

    /// The referenced node does not exist.
    #[error("node not found: GraphNodeId({id})", id = id.0)]
    NodeNotFound { id: GraphNodeId },

    /// The edge already exists (in either direction for undirected graphs).
    #[error("edge already exists: {source_id} -> {target_id}")]
    DuplicateEdge {
        source_id: GraphNodeId,
        target_id: GraphNodeId,
    },

    /// No edge connects the two nodes.
    #[error("edge not found: {source_id} -> {target_id}")]
    EdgeNotFound {
        source_id: GraphNodeId,
        target_id: GraphNodeId,
    },
}
