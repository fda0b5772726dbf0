//! Graph traversal (BFS, DFS) and single-pair shortest path (Dijkstra).
//!
//! The generator builds the adjacency relation once, in node order with
//! neighbor lists in edge order, so traversal order is fully determined by
//! the input.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use algoviz_core::graph::Adjacency;
use algoviz_core::{
    Algorithm, GraphAlgorithm, GraphInput, GraphMetrics, GraphNodeId, GraphState, InputError, Role,
    StepState, Trace,
};

use crate::recorder::Recorder;

type GraphRecorder = Recorder<GraphMetrics>;

/// Private working copy of the graph plus lookup tables.
struct Work {
    state: GraphState,
    adjacency: Adjacency,
    /// Node id -> position in `state.nodes`.
    slots: IndexMap<GraphNodeId, usize>,
}

impl Work {
    fn new(input: &GraphInput) -> Self {
        let mut cleared = input.clone();
        cleared.clear_roles();
        let slots = cleared
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
        Work {
            adjacency: cleared.adjacency(),
            state: GraphState::from(&cleared),
            slots,
        }
    }

    fn label(&self, id: GraphNodeId) -> String {
        self.slots
            .get(&id)
            .map(|&i| self.state.nodes[i].label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn node_roles(&mut self, id: GraphNodeId) -> Option<&mut algoviz_core::RoleSet> {
        let slot = *self.slots.get(&id)?;
        Some(&mut self.state.nodes[slot].roles)
    }

    fn set_processing(&mut self, id: GraphNodeId) {
        if let Some(roles) = self.node_roles(id) {
            roles.insert(Role::Processing);
        }
    }

    fn set_visited(&mut self, id: GraphNodeId) {
        if let Some(roles) = self.node_roles(id) {
            roles.remove(Role::Processing);
            roles.insert(Role::Visited);
        }
    }

    fn set_distance(&mut self, id: GraphNodeId, distance: Option<u64>) {
        if let Some(&slot) = self.slots.get(&id) {
            self.state.nodes[slot].distance = distance;
        }
    }

    /// Marks the first edge connecting `from` and `to` as visited.
    fn visit_edge(&mut self, from: GraphNodeId, to: GraphNodeId) {
        let directed = self.state.directed;
        if let Some(edge) = self
            .state
            .edges
            .iter_mut()
            .find(|e| e.connects(from, to, directed))
        {
            edge.roles.insert(Role::Visited);
        }
    }

    fn record(&self, rec: &mut GraphRecorder, message: impl Into<String>) {
        rec.record(StepState::Graph(self.state.clone()), message);
    }
}

/// Records `algorithm` over `input`.
///
/// Returns an error only for structurally invalid graphs. A missing start
/// (or missing end, for Dijkstra) yields a one-step informational trace.
pub fn generate(input: &GraphInput, algorithm: GraphAlgorithm) -> Result<Trace, InputError> {
    input.validate()?;

    let mut rec = GraphRecorder::new(Algorithm::Graph(algorithm));
    let mut work = Work::new(input);

    let Some(start) = input.start else {
        work.record(&mut rec, "Please select a start node");
        return Ok(rec.finish());
    };

    match algorithm {
        GraphAlgorithm::Bfs => bfs(&mut work, &mut rec, start),
        GraphAlgorithm::Dfs => {
            work.set_processing(start);
            work.record(&mut rec, format!("Starting DFS from node {}", work.label(start)));
            let mut visited = HashSet::new();
            dfs(&mut work, &mut rec, &mut visited, start);
            let m = rec.metrics;
            work.record(
                &mut rec,
                format!("DFS complete. Visited {} nodes in {} steps.", m.visited, m.steps),
            );
        }
        GraphAlgorithm::Dijkstra => {
            let Some(end) = input.end else {
                work.record(&mut rec, "Please select an end node for Dijkstra's algorithm");
                return Ok(rec.finish());
            };
            dijkstra(&mut work, &mut rec, start, end);
        }
    }

    Ok(rec.finish())
}

// ---------------------------------------------------------------------------
// Traversals
// ---------------------------------------------------------------------------

fn bfs(work: &mut Work, rec: &mut GraphRecorder, start: GraphNodeId) {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);

    work.set_processing(start);
    rec.metrics.visited = 1;
    work.record(rec, format!("Starting BFS from node {}", work.label(start)));

    while let Some(current) = queue.pop_front() {
        rec.metrics.steps += 1;
        work.set_visited(current);
        work.record(rec, format!("Visited node {}", work.label(current)));

        let neighbors = work.adjacency.get(&current).cloned().unwrap_or_default();
        for neighbor in neighbors {
            if visited.insert(neighbor.node) {
                queue.push_back(neighbor.node);
                rec.metrics.visited += 1;
                work.set_processing(neighbor.node);
                work.visit_edge(current, neighbor.node);
                work.record(rec, format!("Added node {} to queue", work.label(neighbor.node)));
            }
        }
    }

    let m = rec.metrics;
    work.record(
        rec,
        format!("BFS complete. Visited {} nodes in {} steps.", m.visited, m.steps),
    );
}

fn dfs(work: &mut Work, rec: &mut GraphRecorder, visited: &mut HashSet<GraphNodeId>, node: GraphNodeId) {
    visited.insert(node);
    rec.metrics.visited += 1;
    rec.metrics.steps += 1;
    work.set_visited(node);
    work.record(rec, format!("Visited node {}", work.label(node)));

    let neighbors = work.adjacency.get(&node).cloned().unwrap_or_default();
    for neighbor in neighbors {
        if !visited.contains(&neighbor.node) {
            work.set_processing(neighbor.node);
            work.visit_edge(node, neighbor.node);
            work.record(rec, format!("Exploring node {}", work.label(neighbor.node)));
            dfs(work, rec, visited, neighbor.node);
        }
    }
}

// ---------------------------------------------------------------------------
// Shortest path
// ---------------------------------------------------------------------------

fn dijkstra(work: &mut Work, rec: &mut GraphRecorder, start: GraphNodeId, end: GraphNodeId) {
    let ids: Vec<GraphNodeId> = work.slots.keys().copied().collect();
    let mut dist: IndexMap<GraphNodeId, Option<u64>> = ids.iter().map(|&id| (id, None)).collect();
    let mut previous: IndexMap<GraphNodeId, GraphNodeId> = IndexMap::new();
    let mut unvisited: Vec<GraphNodeId> = ids.clone();

    dist.insert(start, Some(0));
    for &id in &ids {
        work.set_distance(id, dist[&id]);
    }
    work.set_processing(start);
    work.record(
        rec,
        format!("Starting Dijkstra's algorithm from node {}", work.label(start)),
    );

    loop {
        // linear scan in node order; the first strict minimum wins
        let mut best: Option<(usize, u64)> = None;
        for (i, id) in unvisited.iter().enumerate() {
            if let Some(d) = dist[id] {
                if best.map_or(true, |(_, b)| d < b) {
                    best = Some((i, d));
                }
            }
        }
        let Some((index, current_dist)) = best else {
            break;
        };
        let current = unvisited.remove(index);

        rec.metrics.steps += 1;
        rec.metrics.visited += 1;
        work.set_visited(current);
        work.record(
            rec,
            format!("Visiting node {} with distance {}", work.label(current), current_dist),
        );

        if current == end {
            break;
        }

        let neighbors = work.adjacency.get(&current).cloned().unwrap_or_default();
        for neighbor in neighbors {
            if !unvisited.contains(&neighbor.node) {
                continue;
            }
            let alt = current_dist.saturating_add(neighbor.weight);
            if dist[&neighbor.node].map_or(true, |d| alt < d) {
                dist.insert(neighbor.node, Some(alt));
                previous.insert(neighbor.node, current);
                work.set_distance(neighbor.node, Some(alt));
                work.set_processing(neighbor.node);
                work.record(
                    rec,
                    format!("Updated distance to node {}: {}", work.label(neighbor.node), alt),
                );
            }
        }
    }

    match dist[&end] {
        Some(total) => {
            let mut path = vec![end];
            let mut current = end;
            while let Some(&prev) = previous.get(&current) {
                work.visit_edge(prev, current);
                path.push(prev);
                current = prev;
            }
            path.reverse();
            for &id in &path {
                if let Some(roles) = work.node_roles(id) {
                    roles.insert(Role::Highlighted);
                }
            }

            rec.metrics.total_weight = total;
            let labels: Vec<String> = path.iter().map(|&id| work.label(id)).collect();
            work.record(
                rec,
                format!(
                    "Shortest path found: {} with total weight {}",
                    labels.join(" → "),
                    total
                ),
            );
        }
        None => {
            work.record(
                rec,
                format!(
                    "No path found from {} to {}",
                    work.label(start),
                    work.label(end)
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::samples;
    use algoviz_core::{GraphEdge, GraphNode};

    fn line(directed: bool) -> GraphInput {
        let mut g = GraphInput::new(directed, true);
        for (i, label) in ["A", "B", "C"].iter().enumerate() {
            g.nodes.push(GraphNode::new(GraphNodeId(i as u32), *label, 0.0, 0.0));
        }
        g.edges.push(GraphEdge::new(GraphNodeId(0), GraphNodeId(1), 2));
        g.edges.push(GraphEdge::new(GraphNodeId(1), GraphNodeId(2), 3));
        g.start = Some(GraphNodeId(0));
        g.end = Some(GraphNodeId(2));
        g
    }

    #[test]
    fn missing_start_is_informational() {
        let mut g = samples::graph();
        g.start = None;
        let trace = generate(&g, GraphAlgorithm::Bfs).unwrap();
        assert_eq!(trace.messages(), vec!["Please select a start node"]);
    }

    #[test]
    fn dijkstra_missing_end_is_informational() {
        let mut g = samples::graph();
        g.end = None;
        let trace = generate(&g, GraphAlgorithm::Dijkstra).unwrap();
        assert_eq!(
            trace.messages(),
            vec!["Please select an end node for Dijkstra's algorithm"]
        );
        // traversals do not need an end node
        assert!(generate(&g, GraphAlgorithm::Dfs).unwrap().len() > 1);
    }

    #[test]
    fn dangling_edge_is_an_error() {
        let mut g = line(false);
        g.edges.push(GraphEdge::new(GraphNodeId(2), GraphNodeId(7), 1));
        assert!(generate(&g, GraphAlgorithm::Bfs).is_err());
    }

    #[test]
    fn bfs_visits_in_queue_order() {
        let trace = generate(&samples::graph(), GraphAlgorithm::Bfs).unwrap();
        let visits: Vec<&str> = trace
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("Visited node"))
            .collect();
        assert_eq!(
            visits,
            vec![
                "Visited node A",
                "Visited node B",
                "Visited node D",
                "Visited node C",
                "Visited node E",
                "Visited node F"
            ]
        );
        assert_eq!(
            trace.last().unwrap().message,
            "BFS complete. Visited 6 nodes in 6 steps."
        );
        assert_eq!(trace.steps[0].metrics.as_graph().unwrap().visited, 1);
    }

    #[test]
    fn dfs_follows_adjacency_order() {
        let trace = generate(&samples::graph(), GraphAlgorithm::Dfs).unwrap();
        let visits: Vec<&str> = trace
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("Visited node"))
            .collect();
        assert_eq!(
            visits,
            vec![
                "Visited node A",
                "Visited node B",
                "Visited node C",
                "Visited node F",
                "Visited node E",
                "Visited node D"
            ]
        );
        assert_eq!(trace.steps[0].metrics.as_graph().unwrap().visited, 0);
    }

    #[test]
    fn dijkstra_on_sample_graph() {
        let trace = generate(&samples::graph(), GraphAlgorithm::Dijkstra).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(
            last.message,
            "Shortest path found: A → D → E → F with total weight 8"
        );
        assert_eq!(last.metrics.as_graph().unwrap().total_weight, 8);

        let state = last.state.as_graph().unwrap();
        let path_edges: Vec<(u32, u32)> = state
            .edges
            .iter()
            .filter(|e| e.roles.contains(Role::Visited))
            .map(|e| (e.source.0, e.target.0))
            .collect();
        assert_eq!(path_edges, vec![(0, 3), (3, 4), (4, 5)]);
    }

    #[test]
    fn dijkstra_unreachable_end() {
        let g = line(true);
        let mut reversed = g.clone();
        reversed.start = Some(GraphNodeId(2));
        reversed.end = Some(GraphNodeId(0));
        let trace = generate(&reversed, GraphAlgorithm::Dijkstra).unwrap();
        assert_eq!(trace.last().unwrap().message, "No path found from C to A");
        assert_eq!(trace.last().unwrap().metrics.as_graph().unwrap().total_weight, 0);
    }

    #[test]
    fn unweighted_dijkstra_counts_hops() {
        let mut g = line(false);
        g.weighted = false;
        let trace = generate(&g, GraphAlgorithm::Dijkstra).unwrap();
        assert_eq!(trace.last().unwrap().metrics.as_graph().unwrap().total_weight, 2);
    }

    #[test]
    fn input_roles_are_ignored() {
        let mut g = line(false);
        g.nodes[2].roles.insert(Role::Visited);
        let trace = generate(&g, GraphAlgorithm::Bfs).unwrap();
        let first = trace.steps[0].state.as_graph().unwrap();
        assert!(!first.nodes[2].roles.contains(Role::Visited));
    }
}
