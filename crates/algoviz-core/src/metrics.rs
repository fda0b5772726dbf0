//! Instrumentation counters reported with every step.
//!
//! Counters start at zero and only grow within a trace. Structural gauges
//! (`nodes`, `height`, `length`) describe the current structure instead and
//! shrink after a delete.

use serde::{Deserialize, Serialize};

/// Counters for the array families (sorting and searching).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayMetrics {
    pub passes: u32,
    pub comparisons: u32,
    pub swaps: u32,
}

/// Counters for graph traversal and shortest path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub steps: u32,
    pub visited: u32,
    pub total_weight: u64,
}

/// Binary-search-tree metrics. `nodes` and `height` are gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMetrics {
    pub nodes: u32,
    pub height: u32,
    pub steps: u32,
}

/// Linked-list metrics. `length` is a gauge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetrics {
    pub steps: u32,
    pub comparisons: u32,
    pub length: u32,
}

/// The metrics record carried by a step, tagged by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metrics {
    Array(ArrayMetrics),
    Graph(GraphMetrics),
    Tree(TreeMetrics),
    List(ListMetrics),
}

impl Metrics {
    /// Returns the monotonic counters of this record as `(name, value)` pairs.
    ///
    /// Gauges are left out; callers use this to check that counters never
    /// decrease from one step to the next.
    pub fn counters(&self) -> Vec<(&'static str, u64)> {
        match self {
            Metrics::Array(m) => vec![
                ("passes", m.passes.into()),
                ("comparisons", m.comparisons.into()),
                ("swaps", m.swaps.into()),
            ],
            Metrics::Graph(m) => vec![
                ("steps", m.steps.into()),
                ("visited", m.visited.into()),
                ("total_weight", m.total_weight),
            ],
            Metrics::Tree(m) => vec![("steps", m.steps.into())],
            Metrics::List(m) => vec![
                ("steps", m.steps.into()),
                ("comparisons", m.comparisons.into()),
            ],
        }
    }

    pub fn as_array(&self) -> Option<&ArrayMetrics> {
        match self {
            Metrics::Array(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphMetrics> {
        match self {
            Metrics::Graph(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeMetrics> {
        match self {
            Metrics::Tree(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListMetrics> {
        match self {
            Metrics::List(m) => Some(m),
            _ => None,
        }
    }
}

impl From<ArrayMetrics> for Metrics {
    fn from(m: ArrayMetrics) -> Self {
        Metrics::Array(m)
    }
}

impl From<GraphMetrics> for Metrics {
    fn from(m: GraphMetrics) -> Self {
        Metrics::Graph(m)
    }
}

impl From<TreeMetrics> for Metrics {
    fn from(m: TreeMetrics) -> Self {
        Metrics::Tree(m)
    }
}

impl From<ListMetrics> for Metrics {
    fn from(m: ListMetrics) -> Self {
        Metrics::List(m)
    }
}
