//! Graph input: labeled, positioned nodes plus an ordered edge list.
//!
//! [`GraphInput`] is the caller-owned description handed to the graph
//! generator. Edge order is significant: adjacency lists are built in edge
//! order, which fixes the visiting order of BFS/DFS and the relaxation order
//! of Dijkstra.
//!
//! [`GraphEditor`] wraps a `GraphInput` with the id allocator of one editing
//! session and implements the interactive editing operations (add/remove
//! node, add/remove edge, start/end selection).

use std::collections::HashSet;

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use petgraph::Graph;
use serde::{Deserialize, Serialize};

use crate::error::{EditError, InputError};
use crate::id::{GraphNodeId, IdAllocator};
use crate::role::RoleSet;

/// A positioned graph node.
///
/// `roles` and `distance` are presentation state; they are ignored on input
/// and filled in on the snapshots a generator records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: GraphNodeId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
    /// Tentative shortest-path distance; `None` means infinity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u64>,
}

impl GraphNode {
    pub fn new(id: GraphNodeId, label: impl Into<String>, x: f64, y: f64) -> Self {
        GraphNode {
            id,
            label: label.into(),
            x,
            y,
            roles: RoleSet::new(),
            distance: None,
        }
    }
}

/// A weighted edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: GraphNodeId,
    pub target: GraphNodeId,
    pub weight: u64,
    #[serde(default, skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
}

impl GraphEdge {
    pub fn new(source: GraphNodeId, target: GraphNodeId, weight: u64) -> Self {
        GraphEdge {
            source,
            target,
            weight,
            roles: RoleSet::new(),
        }
    }

    /// Returns `true` if this edge connects `from` to `to`, honoring
    /// direction only when `directed` is set.
    pub fn connects(&self, from: GraphNodeId, to: GraphNodeId, directed: bool) -> bool {
        (self.source == from && self.target == to)
            || (!directed && self.source == to && self.target == from)
    }
}

/// One entry of an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub node: GraphNodeId,
    pub weight: u64,
}

/// Adjacency relation keyed in node order, neighbor lists in edge order.
pub type Adjacency = IndexMap<GraphNodeId, Vec<Neighbor>>;

/// The full graph description handed to the graph generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub directed: bool,
    pub weighted: bool,
    #[serde(default)]
    pub start: Option<GraphNodeId>,
    #[serde(default)]
    pub end: Option<GraphNodeId>,
}

impl GraphInput {
    pub fn new(directed: bool, weighted: bool) -> Self {
        GraphInput {
            nodes: Vec::new(),
            edges: Vec::new(),
            directed,
            weighted,
            start: None,
            end: None,
        }
    }

    pub fn node(&self, id: GraphNodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the node's label, or its numeric id when the node is unknown.
    pub fn label(&self, id: GraphNodeId) -> String {
        self.node(id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Checks node uniqueness and that every edge and endpoint references an
    /// existing node.
    pub fn validate(&self) -> Result<(), InputError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(InputError::DuplicateNode { id: node.id });
            }
        }

        for edge in &self.edges {
            for end in [edge.source, edge.target] {
                if !ids.contains(&end) {
                    return Err(InputError::DanglingEdge {
                        source_id: edge.source,
                        target_id: edge.target,
                        missing: end,
                    });
                }
            }
        }

        for (role, endpoint) in [("start", self.start), ("end", self.end)] {
            if let Some(id) = endpoint {
                if !ids.contains(&id) {
                    return Err(InputError::UnknownEndpoint { role, id });
                }
            }
        }

        Ok(())
    }

    /// Builds the adjacency relation. Undirected graphs get both directions.
    ///
    /// Unweighted graphs report unit weights so shortest-path search counts
    /// hops.
    pub fn adjacency(&self) -> Adjacency {
        let mut adjacency: Adjacency = self.nodes.iter().map(|n| (n.id, Vec::new())).collect();

        for edge in &self.edges {
            let weight = if self.weighted { edge.weight } else { 1 };
            if let Some(list) = adjacency.get_mut(&edge.source) {
                list.push(Neighbor {
                    node: edge.target,
                    weight,
                });
            }
            if !self.directed {
                if let Some(list) = adjacency.get_mut(&edge.target) {
                    list.push(Neighbor {
                        node: edge.source,
                        weight,
                    });
                }
            }
        }

        adjacency
    }

    /// Index of the first edge connecting `from` to `to`.
    pub fn find_edge(&self, from: GraphNodeId, to: GraphNodeId) -> Option<usize> {
        self.edges
            .iter()
            .position(|e| e.connects(from, to, self.directed))
    }

    /// Drops every role and tentative distance.
    pub fn clear_roles(&mut self) {
        for node in &mut self.nodes {
            node.roles.clear();
            node.distance = None;
        }
        for edge in &mut self.edges {
            edge.roles.clear();
        }
    }

    /// Exports the graph as a directed petgraph graph whose node indices
    /// follow node order, together with the index of every node id.
    ///
    /// Undirected edges are added in both directions; weights are unit when
    /// the input is unweighted.
    pub fn to_petgraph(
        &self,
    ) -> Result<(Graph<GraphNodeId, u64>, IndexMap<GraphNodeId, NodeIndex<u32>>), InputError> {
        self.validate()?;

        let mut graph = Graph::<GraphNodeId, u64>::with_capacity(self.nodes.len(), self.edges.len());
        let mut index: IndexMap<GraphNodeId, NodeIndex<u32>> = IndexMap::new();
        for node in &self.nodes {
            index.insert(node.id, graph.add_node(node.id));
        }
        for edge in &self.edges {
            let weight = if self.weighted { edge.weight } else { 1 };
            graph.add_edge(index[&edge.source], index[&edge.target], weight);
            if !self.directed {
                graph.add_edge(index[&edge.target], index[&edge.source], weight);
            }
        }

        Ok((graph, index))
    }
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// Spreadsheet-style label for the `n`-th node: A..Z, AA..AZ, BA, ...
pub fn node_label(mut n: u32) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Interactive editor for a [`GraphInput`].
///
/// Owns the id allocator of one editing session. Every mutating method takes
/// the caller's `playback_active` flag: edits are only accepted while the
/// player is idle.
#[derive(Debug, Clone)]
pub struct GraphEditor {
    graph: GraphInput,
    ids: IdAllocator,
}

impl GraphEditor {
    /// Starts an editing session on `graph`. New ids continue after the
    /// highest id already present.
    pub fn new(graph: GraphInput) -> Self {
        let ids = IdAllocator::after(graph.nodes.iter().map(|n| n.id.0));
        GraphEditor { graph, ids }
    }

    pub fn graph(&self) -> &GraphInput {
        &self.graph
    }

    pub fn into_graph(self) -> GraphInput {
        self.graph
    }

    fn ensure_idle(playback_active: bool) -> Result<(), EditError> {
        if playback_active {
            Err(EditError::PlaybackActive)
        } else {
            Ok(())
        }
    }

    fn ensure_node(&self, id: GraphNodeId) -> Result<(), EditError> {
        self.graph
            .node(id)
            .map(|_| ())
            .ok_or(EditError::NodeNotFound { id })
    }

    /// Adds a node at `(x, y)` labeled after its id.
    pub fn add_node(&mut self, x: f64, y: f64, playback_active: bool) -> Result<GraphNodeId, EditError> {
        Self::ensure_idle(playback_active)?;
        let id = self.ids.graph_node();
        self.graph.nodes.push(GraphNode::new(id, node_label(id.0), x, y));
        Ok(id)
    }

    /// Removes a node, every incident edge, and any start/end selection that
    /// referenced it.
    pub fn remove_node(&mut self, id: GraphNodeId, playback_active: bool) -> Result<(), EditError> {
        Self::ensure_idle(playback_active)?;
        self.ensure_node(id)?;

        self.graph.nodes.retain(|n| n.id != id);
        self.graph.edges.retain(|e| e.source != id && e.target != id);
        if self.graph.start == Some(id) {
            self.graph.start = None;
        }
        if self.graph.end == Some(id) {
            self.graph.end = None;
        }
        Ok(())
    }

    /// Moves a node to a new position.
    pub fn move_node(&mut self, id: GraphNodeId, x: f64, y: f64, playback_active: bool) -> Result<(), EditError> {
        Self::ensure_idle(playback_active)?;
        let node = self
            .graph
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(EditError::NodeNotFound { id })?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    /// Appends an edge. Unweighted graphs store weight 1.
    pub fn add_edge(
        &mut self,
        source: GraphNodeId,
        target: GraphNodeId,
        weight: u64,
        playback_active: bool,
    ) -> Result<(), EditError> {
        Self::ensure_idle(playback_active)?;
        self.ensure_node(source)?;
        self.ensure_node(target)?;

        if self.graph.find_edge(source, target).is_some() {
            return Err(EditError::DuplicateEdge {
                source_id: source,
                target_id: target,
            });
        }

        let weight = if self.graph.weighted { weight } else { 1 };
        self.graph.edges.push(GraphEdge::new(source, target, weight));
        Ok(())
    }

    /// Removes the edge between `source` and `target` (either direction for
    /// undirected graphs).
    pub fn remove_edge(
        &mut self,
        source: GraphNodeId,
        target: GraphNodeId,
        playback_active: bool,
    ) -> Result<(), EditError> {
        Self::ensure_idle(playback_active)?;
        let directed = self.graph.directed;
        let before = self.graph.edges.len();
        self.graph
            .edges
            .retain(|e| !e.connects(source, target, directed));
        if self.graph.edges.len() == before {
            return Err(EditError::EdgeNotFound {
                source_id: source,
                target_id: target,
            });
        }
        Ok(())
    }

    pub fn set_start(&mut self, id: GraphNodeId, playback_active: bool) -> Result<(), EditError> {
        Self::ensure_idle(playback_active)?;
        self.ensure_node(id)?;
        self.graph.start = Some(id);
        Ok(())
    }

    pub fn set_end(&mut self, id: GraphNodeId, playback_active: bool) -> Result<(), EditError> {
        Self::ensure_idle(playback_active)?;
        self.ensure_node(id)?;
        self.graph.end = Some(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(directed: bool) -> GraphInput {
        let mut g = GraphInput::new(directed, true);
        for (i, label) in ["A", "B", "C"].iter().enumerate() {
            g.nodes
                .push(GraphNode::new(GraphNodeId(i as u32), *label, 0.0, 0.0));
        }
        g.edges.push(GraphEdge::new(GraphNodeId(0), GraphNodeId(1), 4));
        g.edges.push(GraphEdge::new(GraphNodeId(2), GraphNodeId(0), 1));
        g
    }

    #[test]
    fn adjacency_follows_edge_order() {
        let adj = triangle(false).adjacency();
        let a: Vec<_> = adj[&GraphNodeId(0)].iter().map(|n| n.node).collect();
        assert_eq!(a, vec![GraphNodeId(1), GraphNodeId(2)]);
        assert_eq!(adj.keys().copied().collect::<Vec<_>>(), vec![
            GraphNodeId(0),
            GraphNodeId(1),
            GraphNodeId(2)
        ]);
    }

    #[test]
    fn directed_adjacency_is_one_way() {
        let adj = triangle(true).adjacency();
        assert_eq!(adj[&GraphNodeId(0)].len(), 1);
        assert!(adj[&GraphNodeId(1)].is_empty());
    }

    #[test]
    fn unweighted_adjacency_uses_unit_weights() {
        let mut g = triangle(false);
        g.weighted = false;
        assert!(g.adjacency().values().flatten().all(|n| n.weight == 1));
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let mut g = triangle(false);
        g.edges.push(GraphEdge::new(GraphNodeId(1), GraphNodeId(9), 1));
        assert_eq!(
            g.validate(),
            Err(InputError::DanglingEdge {
                source_id: GraphNodeId(1),
                target_id: GraphNodeId(9),
                missing: GraphNodeId(9),
            })
        );
    }

    #[test]
    fn unknown_start_is_rejected() {
        let mut g = triangle(false);
        g.start = Some(GraphNodeId(5));
        assert!(matches!(
            g.validate(),
            Err(InputError::UnknownEndpoint { role: "start", .. })
        ));
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut g = triangle(false);
        g.nodes.push(GraphNode::new(GraphNodeId(1), "B2", 1.0, 1.0));
        assert_eq!(g.validate(), Err(InputError::DuplicateNode { id: GraphNodeId(1) }));
    }

    #[test]
    fn labels_are_spreadsheet_style() {
        assert_eq!(node_label(0), "A");
        assert_eq!(node_label(25), "Z");
        assert_eq!(node_label(26), "AA");
        assert_eq!(node_label(27), "AB");
        assert_eq!(node_label(52), "BA");
    }

    #[test]
    fn editor_rejects_edits_during_playback() {
        let mut editor = GraphEditor::new(triangle(false));
        assert_eq!(editor.add_node(1.0, 1.0, true), Err(EditError::PlaybackActive));
        assert_eq!(editor.graph().nodes.len(), 3);
    }

    #[test]
    fn editor_allocates_after_existing_ids() {
        let mut editor = GraphEditor::new(triangle(false));
        let id = editor.add_node(10.0, 20.0, false).unwrap();
        assert_eq!(id, GraphNodeId(3));
        assert_eq!(editor.graph().node(id).unwrap().label, "D");
    }

    #[test]
    fn remove_node_drops_edges_and_endpoints() {
        let mut g = triangle(false);
        g.start = Some(GraphNodeId(0));
        g.end = Some(GraphNodeId(2));
        let mut editor = GraphEditor::new(g);
        editor.remove_node(GraphNodeId(0), false).unwrap();
        let g = editor.into_graph();
        assert!(g.edges.is_empty());
        assert_eq!(g.start, None);
        assert_eq!(g.end, Some(GraphNodeId(2)));
    }

    #[test]
    fn undirected_duplicate_edge_is_rejected() {
        let mut editor = GraphEditor::new(triangle(false));
        assert_eq!(
            editor.add_edge(GraphNodeId(1), GraphNodeId(0), 2, false),
            Err(EditError::DuplicateEdge {
                source_id: GraphNodeId(1),
                target_id: GraphNodeId(0)
            })
        );
    }

    #[test]
    fn remove_missing_edge_is_an_error() {
        let mut editor = GraphEditor::new(triangle(true));
        assert!(editor.remove_edge(GraphNodeId(1), GraphNodeId(0), false).is_err());
        assert!(editor.remove_edge(GraphNodeId(0), GraphNodeId(1), false).is_ok());
    }

    #[test]
    fn petgraph_export_preserves_node_order() {
        let (graph, index) = triangle(false).to_petgraph().unwrap();
        let ids: Vec<GraphNodeId> = index.keys().copied().collect();
        assert_eq!(ids, vec![GraphNodeId(0), GraphNodeId(1), GraphNodeId(2)]);
        assert_eq!(graph[index[&GraphNodeId(2)]], GraphNodeId(2));
        assert_eq!(graph.node_count(), 3);
        // undirected edges are exported in both directions
        assert_eq!(graph.edge_count(), 4);
    }
}
