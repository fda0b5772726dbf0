//! Data model shared by the algoviz trace generators and the step player.
//!
//! Everything here is plain data: inputs for the five algorithm families,
//! the snapshots ([`Step`]) a generator records, and the [`Trace`] that
//! collects them.

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod id;
pub mod list;
pub mod metrics;
pub mod role;
pub mod samples;
pub mod step;
pub mod tree;

// Re-export commonly used types
pub use algorithm::{
    Algorithm, AlgorithmFamily, GraphAlgorithm, ListOperation, ListOperationKind, SearchAlgorithm,
    SortAlgorithm, TreeOperation, TreeOperationKind,
};
pub use error::{EditError, InputError};
pub use graph::{GraphEdge, GraphEditor, GraphInput, GraphNode};
pub use id::{GraphNodeId, IdAllocator, ListNodeId};
pub use list::{ListInput, ListKind, ListNode};
pub use metrics::{ArrayMetrics, GraphMetrics, ListMetrics, Metrics, TreeMetrics};
pub use role::{Role, RoleSet};
pub use step::{ArrayState, GraphState, ListState, Step, StepState, Trace, TreeState};
pub use tree::{TreeLayout, TreeNode};
