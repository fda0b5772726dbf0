//! Linear and binary search over an array.
//!
//! Not finding the target is an ordinary outcome: the trace simply ends with
//! a "not found" step.

use algoviz_core::{Algorithm, ArrayMetrics, ArrayState, Role, SearchAlgorithm, StepState, Trace};

use crate::recorder::Recorder;

type SearchRecorder = Recorder<ArrayMetrics>;

/// Records a search for `target` in `values`.
///
/// Binary search expects ascending input. Unsorted input is searched as-is
/// after a warning, so the result may be a false "not found".
pub fn generate(values: &[i64], target: i64, algorithm: SearchAlgorithm) -> Trace {
    let mut rec = SearchRecorder::new(Algorithm::Search(algorithm));
    let mut a = ArrayState::new(values.to_vec());

    record(
        &mut rec,
        &a,
        format!(
            "Starting {} for {} in {} elements",
            algorithm.title(),
            target,
            values.len()
        ),
    );

    let found = match algorithm {
        SearchAlgorithm::Linear => linear(&mut a, &mut rec, target),
        SearchAlgorithm::Binary => {
            if values.windows(2).any(|w| w[0] > w[1]) {
                tracing::warn!(
                    len = values.len(),
                    "binary search over unsorted input; result may be wrong"
                );
            }
            binary(&mut a, &mut rec, target)
        }
    };

    let m = rec.metrics;
    let message = match found {
        Some(index) => format!(
            "Found {} at index {} after {} comparisons and {} passes.",
            target, index, m.comparisons, m.passes
        ),
        None => format!(
            "{} not found in the array after {} comparisons and {} passes.",
            target, m.comparisons, m.passes
        ),
    };
    clear(&mut a);
    if let Some(index) = found {
        a.roles[index].insert(Role::Found);
    }
    record(&mut rec, &a, message);
    rec.finish()
}

fn record(rec: &mut SearchRecorder, a: &ArrayState, message: impl Into<String>) {
    rec.record(StepState::Array(a.clone()), message);
}

fn clear(a: &mut ArrayState) {
    for roles in &mut a.roles {
        roles.clear();
    }
}

fn linear(a: &mut ArrayState, rec: &mut SearchRecorder, target: i64) -> Option<usize> {
    rec.metrics.passes = 1;
    for i in 0..a.values.len() {
        rec.metrics.comparisons += 1;
        clear(a);
        a.roles[i].insert(Role::Checking);
        let value = a.values[i];
        record(rec, a, format!("Checking index {}: {}", i, value));

        if value == target {
            return Some(i);
        }
    }
    None
}

fn binary(a: &mut ArrayState, rec: &mut SearchRecorder, target: i64) -> Option<usize> {
    let mut left: isize = 0;
    let mut right: isize = a.values.len() as isize - 1;

    while left <= right {
        rec.metrics.passes += 1;
        rec.metrics.comparisons += 1;
        let mid = ((left + right) / 2) as usize;

        clear(a);
        for index in left as usize..=right as usize {
            a.roles[index].insert(Role::Window);
        }
        a.roles[mid].insert(Role::Checking);
        let value = a.values[mid];
        record(
            rec,
            a,
            format!(
                "Checking middle index {} (window {}..={}): {}",
                mid, left, right, value
            ),
        );

        if value == target {
            return Some(mid);
        } else if value < target {
            left = mid as isize + 1;
        } else {
            right = mid as isize - 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checking_steps(trace: &Trace) -> usize {
        trace
            .iter()
            .filter(|s| !s.state.as_array().unwrap().indices_with(Role::Checking).is_empty())
            .count()
    }

    #[test]
    fn binary_finds_middle_value() {
        let trace = generate(&[2, 4, 6, 8, 10], 6, SearchAlgorithm::Binary);
        let last = trace.last().unwrap();
        assert_eq!(last.state.as_array().unwrap().indices_with(Role::Found), vec![2]);
        assert!(checking_steps(&trace) <= 3);
        assert_eq!(
            last.message,
            "Found 6 at index 2 after 1 comparisons and 1 passes."
        );
    }

    #[test]
    fn binary_window_covers_live_range() {
        let trace = generate(&[2, 4, 6, 8, 10], 10, SearchAlgorithm::Binary);
        let second = trace.steps[2].state.as_array().unwrap();
        assert_eq!(second.indices_with(Role::Window), vec![3, 4]);
        assert_eq!(second.indices_with(Role::Checking), vec![3]);
    }

    #[test]
    fn binary_absent_target() {
        let trace = generate(&[1, 3, 5], 4, SearchAlgorithm::Binary);
        let last = trace.last().unwrap();
        assert!(last.message.starts_with("4 not found in the array"));
        assert!(last.state.as_array().unwrap().indices_with(Role::Found).is_empty());
    }

    #[test]
    fn linear_stops_at_first_match() {
        let trace = generate(&[7, 5, 5, 9], 5, SearchAlgorithm::Linear);
        let m = trace.last().unwrap().metrics.as_array().unwrap();
        assert_eq!((m.passes, m.comparisons), (1, 2));
        assert_eq!(
            trace.last().unwrap().state.as_array().unwrap().indices_with(Role::Found),
            vec![1]
        );
    }

    #[test]
    fn linear_not_found_checks_every_index() {
        let trace = generate(&[1, 2, 3], 8, SearchAlgorithm::Linear);
        assert_eq!(checking_steps(&trace), 3);
        assert_eq!(
            trace.last().unwrap().message,
            "8 not found in the array after 3 comparisons and 1 passes."
        );
    }

    #[test]
    fn empty_array_is_not_found() {
        for alg in [SearchAlgorithm::Linear, SearchAlgorithm::Binary] {
            let trace = generate(&[], 1, alg);
            assert_eq!(trace.len(), 2);
            assert!(trace.last().unwrap().message.contains("not found"));
        }
    }
}
