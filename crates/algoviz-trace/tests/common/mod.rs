//! Input builders shared by the integration suites.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use algoviz_core::{GraphEdge, GraphInput, GraphNode, GraphNodeId};

/// A graph of 2 to 8 nodes with random direction, weighting, edges and
/// endpoints. Parallel edges are skipped.
pub fn random_graph(rng: &mut ChaCha8Rng) -> GraphInput {
    let n = rng.gen_range(2..9u32);
    let mut input = GraphInput::new(rng.gen_bool(0.5), rng.gen_bool(0.8));
    for i in 0..n {
        input.nodes.push(GraphNode::new(GraphNodeId(i), i.to_string(), 0.0, 0.0));
    }
    for _ in 0..rng.gen_range(0..2 * n) {
        let source = GraphNodeId(rng.gen_range(0..n));
        let target = GraphNodeId(rng.gen_range(0..n));
        if source != target && input.find_edge(source, target).is_none() {
            input.edges.push(GraphEdge::new(source, target, rng.gen_range(1..10)));
        }
    }
    input.start = Some(GraphNodeId(rng.gen_range(0..n)));
    input.end = Some(GraphNodeId(rng.gen_range(0..n)));
    input
}
