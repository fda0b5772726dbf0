//! Ready-made inputs: the default structures each visualizer opens with, and
//! seeded random arrays.

use rand::Rng;

use crate::graph::{GraphEdge, GraphInput, GraphNode};
use crate::id::{GraphNodeId, IdAllocator};
use crate::list::{ListInput, ListKind};
use crate::tree::TreeNode;

/// Six positioned nodes A-F, weighted and undirected, start A and end F.
///
/// The shortest A to F path is A-D-E-F with total weight 8.
pub fn graph() -> GraphInput {
    let positions = [
        ("A", 100.0, 100.0),
        ("B", 250.0, 100.0),
        ("C", 400.0, 100.0),
        ("D", 100.0, 250.0),
        ("E", 250.0, 250.0),
        ("F", 400.0, 250.0),
    ];
    let nodes = positions
        .iter()
        .enumerate()
        .map(|(i, (label, x, y))| GraphNode::new(GraphNodeId(i as u32), *label, *x, *y))
        .collect();

    let edges = [(0, 1, 4), (0, 3, 2), (1, 2, 3), (1, 4, 3), (2, 5, 2), (3, 4, 1), (4, 5, 5)]
        .into_iter()
        .map(|(s, t, w)| GraphEdge::new(GraphNodeId(s), GraphNodeId(t), w))
        .collect();

    GraphInput {
        nodes,
        edges,
        directed: false,
        weighted: true,
        start: Some(GraphNodeId(0)),
        end: Some(GraphNodeId(5)),
    }
}

/// The balanced BST 50 / 30 70 / 20 40 60 80, laid out.
pub fn tree() -> TreeNode {
    let mut root = TreeNode::leaf(50);
    for value in [30, 70, 20, 40, 60, 80] {
        root.insert_value(value);
    }
    crate::tree::TreeLayout::default().apply(&mut root);
    root
}

pub const LIST_VALUES: [&str; 4] = ["10", "20", "30", "40"];

/// `10 -> 20 -> 30 -> 40` with ids 0 through 3.
pub fn list(kind: ListKind) -> ListInput {
    ListInput::from_values(kind, LIST_VALUES, &mut IdAllocator::default())
}

/// Random values in `5..=104`, as used for sorting.
pub fn random_array<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(5..=104)).collect()
}

/// Random values in `1..=100`, sorted ascending when `sorted` is set (binary
/// search needs sorted input).
pub fn random_search_array<R: Rng + ?Sized>(len: usize, sorted: bool, rng: &mut R) -> Vec<i64> {
    let mut values: Vec<i64> = (0..len).map(|_| rng.gen_range(1..=100)).collect();
    if sorted {
        values.sort_unstable();
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sample_graph_is_valid() {
        let g = graph();
        assert!(g.validate().is_ok());
        assert_eq!(g.nodes.len(), 6);
        assert_eq!(g.edges.len(), 7);
        assert_eq!(g.label(GraphNodeId(5)), "F");
    }

    #[test]
    fn sample_tree_matches_from_values() {
        let expected = TreeNode::from_values([50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(Some(tree()), expected);
    }

    #[test]
    fn sample_list_is_valid() {
        for kind in [ListKind::Singly, ListKind::Doubly] {
            let l = list(kind);
            assert!(l.validate().is_ok());
            assert_eq!(l.values(), LIST_VALUES.to_vec());
        }
    }

    #[test]
    fn random_arrays_are_seeded_and_bounded() {
        let a = random_array(50, &mut ChaCha8Rng::seed_from_u64(7));
        let b = random_array(50, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (5..=104).contains(v)));

        let s = random_search_array(30, true, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(s.windows(2).all(|w| w[0] <= w[1]));
        assert!(s.iter().all(|v| (1..=100).contains(v)));
    }
}
