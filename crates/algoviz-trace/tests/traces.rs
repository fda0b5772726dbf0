//! End-to-end checks of recorded traces: determinism, message sequences and
//! agreement with reference implementations.

use petgraph::algo::dijkstra;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use algoviz_core::{
    samples, GraphAlgorithm, GraphInput, ListKind, ListOperation, SearchAlgorithm, SortAlgorithm,
    TreeOperation,
};
use algoviz_trace::{graph, search, sort, tree, ListGenerator};

mod common;
use common::random_graph;

/// Shortest distance from `input.start` to `input.end` according to petgraph.
fn reference_distance(input: &GraphInput) -> Option<u64> {
    let (pg, index) = input.to_petgraph().unwrap();
    let start = index[&input.start.unwrap()];
    let end = index[&input.end.unwrap()];
    dijkstra(&pg, start, Some(end), |e| *e.weight()).get(&end).copied()
}

#[test]
fn dijkstra_matches_petgraph_on_sample() {
    let input = samples::graph();
    let trace = graph::generate(&input, GraphAlgorithm::Dijkstra).unwrap();
    let total = trace.last().unwrap().metrics.as_graph().unwrap().total_weight;
    assert_eq!(Some(total), reference_distance(&input));
}

#[test]
fn dijkstra_matches_petgraph_on_random_graphs() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..200 {
        let input = random_graph(&mut rng);
        let trace = graph::generate(&input, GraphAlgorithm::Dijkstra).unwrap();
        let last = trace.last().unwrap();
        match reference_distance(&input) {
            Some(expected) => {
                assert!(last.message.starts_with("Shortest path found"), "{input:?}");
                assert_eq!(last.metrics.as_graph().unwrap().total_weight, expected);
            }
            None => assert!(last.message.starts_with("No path found"), "{input:?}"),
        }
    }
}

#[test]
fn identical_inputs_give_identical_json() {
    let list = samples::list(ListKind::Doubly);
    let traces = || {
        vec![
            sort::generate(&[5, 3, 3, 1], SortAlgorithm::Merge),
            search::generate(&[2, 4, 6, 8, 10], 6, SearchAlgorithm::Binary),
            graph::generate(&samples::graph(), GraphAlgorithm::Bfs).unwrap(),
            tree::generate(Some(&samples::tree()), TreeOperation::Delete(30)).unwrap(),
            ListGenerator::for_list(&list)
                .generate(
                    &list,
                    ListOperation::Insert {
                        value: "15".into(),
                        position: 1,
                    },
                )
                .unwrap(),
        ]
    };
    for (a, b) in traces().iter().zip(traces().iter()) {
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }
}

#[test]
fn steps_do_not_alias() {
    let trace = sort::generate(&[3, 2, 1], SortAlgorithm::Bubble);
    let mut copy = trace.clone();
    if let algoviz_core::StepState::Array(state) = &mut copy.steps[0].state {
        state.values[0] = 99;
    }
    assert_eq!(trace.steps[0].state.as_array().unwrap().values, vec![3, 2, 1]);
    assert_eq!(trace.steps[1].state.as_array().unwrap().values, vec![3, 2, 1]);
}

#[test]
fn bubble_sort_messages() {
    let trace = sort::generate(&[2, 1], SortAlgorithm::Bubble);
    insta::assert_snapshot!(trace.messages().join("\n"), @r"
    Starting bubble sort on 2 elements
    Comparing 2 and 1
    Swapping 2 and 1
    Swapped: index 0 now holds 1
    Pass 1 complete: 2 is in place at index 1
    Array sorted with 1 comparisons, 1 swaps and 1 passes
    ");
}

#[test]
fn dijkstra_sample_messages() {
    let trace = graph::generate(&samples::graph(), GraphAlgorithm::Dijkstra).unwrap();
    insta::assert_snapshot!(trace.messages().join("\n"), @r"
    Starting Dijkstra's algorithm from node A
    Visiting node A with distance 0
    Updated distance to node B: 4
    Updated distance to node D: 2
    Visiting node D with distance 2
    Updated distance to node E: 3
    Visiting node E with distance 3
    Updated distance to node F: 8
    Visiting node B with distance 4
    Updated distance to node C: 7
    Visiting node C with distance 7
    Visiting node F with distance 8
    Shortest path found: A → D → E → F with total weight 8
    ");
}
