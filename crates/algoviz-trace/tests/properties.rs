//! Property tests over randomly generated inputs for every generator.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use algoviz_core::{
    GraphAlgorithm, ListInput, ListKind, ListOperation, Role, SearchAlgorithm, SortAlgorithm, Trace,
    TreeNode, TreeOperation,
};
use algoviz_trace::{graph, search, sort, tree, ListGenerator};

mod common;
use common::random_graph;

fn sort_algorithm() -> impl Strategy<Value = SortAlgorithm> {
    prop::sample::select(SortAlgorithm::ALL.to_vec())
}

/// Every counter is non-decreasing from one step to the next.
fn counters_are_monotonic(trace: &Trace) -> bool {
    trace.steps.windows(2).all(|pair| {
        pair[0]
            .metrics
            .counters()
            .iter()
            .zip(pair[1].metrics.counters())
            .all(|((_, before), (_, after))| *before <= after)
    })
}

proptest! {
    /// Terminal array is the sorted permutation of the input.
    #[test]
    fn prop_sort_is_correct(
        values in prop::collection::vec(-50i64..50, 0..24),
        algorithm in sort_algorithm(),
    ) {
        let trace = sort::generate(&values, algorithm);
        let last = trace.last().unwrap().state.as_array().unwrap();

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(&last.values, &expected);
        prop_assert_eq!(last.indices_with(Role::Sorted).len(), values.len());
        prop_assert!(counters_are_monotonic(&trace));
    }

    /// Every intermediate array is a permutation of the input.
    #[test]
    fn prop_sort_steps_are_permutations(
        values in prop::collection::vec(0i64..10, 0..12),
        algorithm in sort_algorithm(),
    ) {
        let mut expected = values.clone();
        expected.sort();
        for step in sort::generate(&values, algorithm).iter() {
            let mut snapshot = step.state.as_array().unwrap().values.clone();
            snapshot.sort();
            prop_assert_eq!(&snapshot, &expected);
        }
    }

    /// Graph counters never decrease, and regenerating from the same graph
    /// gives byte-identical JSON.
    #[test]
    fn prop_graph_traces_are_monotonic_and_deterministic(seed in any::<u64>()) {
        let input = random_graph(&mut ChaCha8Rng::seed_from_u64(seed));
        for algorithm in [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs, GraphAlgorithm::Dijkstra] {
            let trace = graph::generate(&input, algorithm).unwrap();
            prop_assert!(counters_are_monotonic(&trace), "{algorithm:?} on {input:?}");
            let again = graph::generate(&input, algorithm).unwrap();
            prop_assert_eq!(trace.to_json().unwrap(), again.to_json().unwrap());
        }
    }

    /// Binary search over sorted input agrees with the standard library.
    #[test]
    fn prop_binary_search_agrees(
        mut values in prop::collection::vec(0i64..200, 0..64),
        target in 0i64..200,
    ) {
        values.sort();
        values.dedup();
        let trace = search::generate(&values, target, SearchAlgorithm::Binary);
        let found = trace.last().unwrap().state.as_array().unwrap().indices_with(Role::Found);

        match values.binary_search(&target) {
            Ok(index) => prop_assert_eq!(found, vec![index]),
            Err(_) => prop_assert!(found.is_empty()),
        }

        let passes = trace.last().unwrap().metrics.as_array().unwrap().passes;
        let bound = usize::BITS - values.len().leading_zeros();
        prop_assert!(passes <= bound.max(1));
        prop_assert!(counters_are_monotonic(&trace));
    }

    /// Random insert/delete sequences keep the tree a valid BST that agrees
    /// with a reference set.
    #[test]
    fn prop_bst_invariant_holds(
        seed in prop::collection::vec(0i64..100, 0..12),
        ops in prop::collection::vec((any::<bool>(), 0i64..100), 1..20),
    ) {
        let mut root = TreeNode::from_values(seed.iter().copied());
        let mut reference: std::collections::BTreeSet<i64> = seed.into_iter().collect();

        for (is_insert, value) in ops {
            let op = if is_insert { TreeOperation::Insert(value) } else { TreeOperation::Delete(value) };
            let trace = tree::generate(root.as_ref(), op).unwrap();
            prop_assert!(counters_are_monotonic(&trace));

            root = trace.last().unwrap().state.as_tree().unwrap().root.clone();
            if is_insert {
                reference.insert(value);
            } else {
                reference.remove(&value);
            }

            let values = root.as_ref().map(|r| r.inorder_values()).unwrap_or_default();
            prop_assert_eq!(values, reference.iter().copied().collect::<Vec<_>>());
            if let Some(r) = &root {
                prop_assert!(r.validate().is_ok());
            }
        }
    }

    /// Any in-range list mutation leaves a well-formed list behind.
    #[test]
    fn prop_list_mutations_stay_valid(
        len in 0usize..8,
        doubly in any::<bool>(),
        position in 0usize..9,
        insert in any::<bool>(),
    ) {
        let kind = if doubly { ListKind::Doubly } else { ListKind::Singly };
        let values: Vec<String> = (0..len).map(|i| (i * 10).to_string()).collect();
        let list = ListInput::from_values(kind, values, &mut Default::default());
        let mut generator = ListGenerator::for_list(&list);

        let op = if insert {
            ListOperation::Insert { value: "new".into(), position }
        } else {
            ListOperation::Delete { position }
        };
        let trace = generator.generate(&list, op).unwrap();
        let adopted = trace.last().unwrap().state.as_list().unwrap().to_input();
        prop_assert!(adopted.validate().is_ok());

        let expected_len = match (insert, position) {
            (true, p) if p <= len => len + 1,
            (false, p) if p < len => len - 1,
            _ => len,
        };
        prop_assert_eq!(adopted.len(), expected_len);
        prop_assert!(counters_are_monotonic(&trace));
    }
}
