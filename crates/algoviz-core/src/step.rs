//! Recorded snapshots and the traces that hold them.
//!
//! A [`Step`] owns a full structural copy of the visualized state at the
//! moment it was recorded. Steps never share mutable substructure with each
//! other or with the generator's working copy, so a [`Trace`] can be replayed,
//! inspected or serialized in any order.

use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, AlgorithmFamily};
use crate::graph::{GraphEdge, GraphInput, GraphNode};
use crate::id::GraphNodeId;
use crate::list::{ListInput, ListKind, ListNode};
use crate::metrics::Metrics;
use crate::role::{Role, RoleSet};
use crate::tree::TreeNode;

// ---------------------------------------------------------------------------
// Family states
// ---------------------------------------------------------------------------

/// Array contents plus one role set per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayState {
    pub values: Vec<i64>,
    pub roles: Vec<RoleSet>,
}

impl ArrayState {
    pub fn new(values: Vec<i64>) -> Self {
        let roles = vec![RoleSet::new(); values.len()];
        ArrayState { values, roles }
    }

    /// Indices whose role set contains `role`, ascending.
    pub fn indices_with(&self, role: Role) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, roles)| roles.contains(role))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub directed: bool,
    pub weighted: bool,
    pub start: Option<GraphNodeId>,
    pub end: Option<GraphNodeId>,
}

impl GraphState {
    pub fn node(&self, id: GraphNodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of nodes carrying `role`, in node order.
    pub fn nodes_with(&self, role: Role) -> Vec<GraphNodeId> {
        self.nodes
            .iter()
            .filter(|n| n.roles.contains(role))
            .map(|n| n.id)
            .collect()
    }
}

impl From<&GraphInput> for GraphState {
    fn from(input: &GraphInput) -> Self {
        GraphState {
            nodes: input.nodes.clone(),
            edges: input.edges.clone(),
            directed: input.directed,
            weighted: input.weighted,
            start: input.start,
            end: input.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeState {
    pub root: Option<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub kind: ListKind,
    pub nodes: Vec<ListNode>,
}

impl ListState {
    /// Converts the snapshot back into a role-free list the caller can adopt
    /// as its live input.
    pub fn to_input(&self) -> ListInput {
        let mut input = ListInput {
            kind: self.kind,
            nodes: self.nodes.clone(),
        };
        input.clear_roles();
        input
    }

    pub fn values(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.value.as_str()).collect()
    }
}

/// The family-specific state carried by a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepState {
    Array(ArrayState),
    Graph(GraphState),
    Tree(TreeState),
    List(ListState),
}

impl StepState {
    pub fn as_array(&self) -> Option<&ArrayState> {
        match self {
            StepState::Array(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphState> {
        match self {
            StepState::Graph(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeState> {
        match self {
            StepState::Tree(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListState> {
        match self {
            StepState::List(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Step and Trace
// ---------------------------------------------------------------------------

/// One immutable snapshot of an algorithm in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub state: StepState,
    pub message: String,
    pub metrics: Metrics,
}

/// The ordered, fully materialized output of one generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub algorithm: Algorithm,
    pub steps: Vec<Step>,
}

impl Trace {
    pub fn new(algorithm: Algorithm, steps: Vec<Step>) -> Self {
        Trace { algorithm, steps }
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.algorithm.family()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The terminal step, carrying the final metrics.
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.message.as_str()).collect()
    }

    /// Serializes the trace as compact JSON. Equal traces produce identical
    /// bytes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::SortAlgorithm;
    use crate::id::{IdAllocator, ListNodeId};
    use crate::metrics::ArrayMetrics;

    fn array_step(values: Vec<i64>, message: &str) -> Step {
        Step {
            state: StepState::Array(ArrayState::new(values)),
            message: message.to_string(),
            metrics: Metrics::Array(ArrayMetrics::default()),
        }
    }

    #[test]
    fn indices_with_role() {
        let mut state = ArrayState::new(vec![3, 1, 2]);
        state.roles[0].insert(Role::Sorted);
        state.roles[2].insert(Role::Sorted);
        assert_eq!(state.indices_with(Role::Sorted), vec![0, 2]);
        assert!(state.indices_with(Role::Found).is_empty());
    }

    #[test]
    fn trace_accessors() {
        let trace = Trace::new(
            Algorithm::Sort(SortAlgorithm::Bubble),
            vec![array_step(vec![2, 1], "start"), array_step(vec![1, 2], "done")],
        );
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.family(), AlgorithmFamily::Sort);
        assert_eq!(trace.last().unwrap().message, "done");
        assert_eq!(trace.messages(), vec!["start", "done"]);
    }

    #[test]
    fn json_is_deterministic() {
        let make = || {
            Trace::new(
                Algorithm::Sort(SortAlgorithm::Merge),
                vec![array_step(vec![4, 4, 1], "start")],
            )
        };
        assert_eq!(make().to_json().unwrap(), make().to_json().unwrap());
        let back: Trace = serde_json::from_str(&make().to_json().unwrap()).unwrap();
        assert_eq!(back, make());
    }

    #[test]
    fn list_state_to_input_drops_roles() {
        let input = ListInput::from_values(ListKind::Singly, ["a", "b"], &mut IdAllocator::default());
        let mut nodes = input.nodes.clone();
        nodes[1].roles.insert(Role::Found);
        let state = ListState {
            kind: ListKind::Singly,
            nodes,
        };
        let adopted = state.to_input();
        assert_eq!(adopted, input);
        assert_eq!(adopted.nodes[1].id, ListNodeId(1));
    }
}
