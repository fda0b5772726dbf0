//! Comparison sorts: bubble, insertion, selection, merge and quicksort.
//!
//! Every comparison, swap and placement is recorded as its own step. Passes
//! count outer iterations for the quadratic sorts, merge calls for merge sort
//! and partition calls for quicksort.

use algoviz_core::{Algorithm, ArrayMetrics, ArrayState, Role, SortAlgorithm, StepState, Trace};

use crate::recorder::Recorder;

type SortRecorder = Recorder<ArrayMetrics>;

/// Records a full sorting trace of `values`. The input slice is not touched.
pub fn generate(values: &[i64], algorithm: SortAlgorithm) -> Trace {
    let mut rec = SortRecorder::new(Algorithm::Sort(algorithm));
    let mut a = ArrayState::new(values.to_vec());
    let n = a.values.len();

    record(
        &mut rec,
        &a,
        format!("Starting {} on {} elements", algorithm.title(), n),
    );

    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(&mut a, &mut rec),
        SortAlgorithm::Insertion => insertion_sort(&mut a, &mut rec),
        SortAlgorithm::Selection => selection_sort(&mut a, &mut rec),
        SortAlgorithm::Merge => {
            if n > 1 {
                merge_sort(&mut a, &mut rec, 0, n, n);
            }
        }
        SortAlgorithm::Quick => {
            if n > 0 {
                quick_sort(&mut a, &mut rec, 0, n - 1);
            }
        }
    }

    for roles in &mut a.roles {
        roles.clear();
        roles.insert(Role::Sorted);
    }
    let m = rec.metrics;
    record(
        &mut rec,
        &a,
        format!(
            "Array sorted with {} comparisons, {} swaps and {} passes",
            m.comparisons, m.swaps, m.passes
        ),
    );
    rec.finish()
}

// ---------------------------------------------------------------------------
// Step helpers
// ---------------------------------------------------------------------------

fn record(rec: &mut SortRecorder, a: &ArrayState, message: impl Into<String>) {
    rec.record(StepState::Array(a.clone()), message);
}

/// Drops the per-step roles, keeping `Sorted`.
fn reset_transient(a: &mut ArrayState) {
    for roles in &mut a.roles {
        roles.remove(Role::Comparing);
        roles.remove(Role::Swapping);
        roles.remove(Role::Highlighted);
    }
}

fn mark(a: &mut ArrayState, index: usize, role: Role) {
    a.roles[index].insert(role);
}

fn compare(a: &mut ArrayState, rec: &mut SortRecorder, i: usize, j: usize) {
    reset_transient(a);
    mark(a, i, Role::Comparing);
    mark(a, j, Role::Comparing);
    rec.metrics.comparisons += 1;
    let message = format!("Comparing {} and {}", a.values[i], a.values[j]);
    record(rec, a, message);
}

/// Swaps two slots: one step before the move, one after.
fn swap(a: &mut ArrayState, rec: &mut SortRecorder, i: usize, j: usize) {
    reset_transient(a);
    mark(a, i, Role::Swapping);
    mark(a, j, Role::Swapping);
    let message = format!("Swapping {} and {}", a.values[i], a.values[j]);
    record(rec, a, message);

    a.values.swap(i, j);
    rec.metrics.swaps += 1;
    reset_transient(a);
    let message = format!("Swapped: index {} now holds {}", i, a.values[i]);
    record(rec, a, message);
}

// ---------------------------------------------------------------------------
// Quadratic sorts
// ---------------------------------------------------------------------------

fn bubble_sort(a: &mut ArrayState, rec: &mut SortRecorder) {
    let n = a.values.len();
    for i in 0..n.saturating_sub(1) {
        rec.metrics.passes += 1;
        let mut swapped = false;

        for j in 0..n - i - 1 {
            compare(a, rec, j, j + 1);
            if a.values[j] > a.values[j + 1] {
                swap(a, rec, j, j + 1);
                swapped = true;
            }
        }

        reset_transient(a);
        let last = n - i - 1;
        mark(a, last, Role::Sorted);
        let message = format!("Pass {} complete: {} is in place at index {}", i + 1, a.values[last], last);
        record(rec, a, message);

        if !swapped {
            record(rec, a, "No swaps in this pass, array is sorted");
            break;
        }
    }
}

fn insertion_sort(a: &mut ArrayState, rec: &mut SortRecorder) {
    let n = a.values.len();
    for i in 1..n {
        rec.metrics.passes += 1;
        let key = a.values[i];
        let mut j = i;

        while j > 0 {
            compare(a, rec, j - 1, j);
            if a.values[j - 1] > a.values[j] {
                swap(a, rec, j - 1, j);
                j -= 1;
            } else {
                break;
            }
        }

        reset_transient(a);
        for index in 0..=i {
            mark(a, index, Role::Sorted);
        }
        record(
            rec,
            a,
            format!("Inserted {} at index {}, first {} elements are sorted", key, j, i + 1),
        );
    }
}

fn selection_sort(a: &mut ArrayState, rec: &mut SortRecorder) {
    let n = a.values.len();
    for i in 0..n.saturating_sub(1) {
        rec.metrics.passes += 1;
        let mut min = i;

        for j in i + 1..n {
            compare(a, rec, min, j);
            if a.values[j] < a.values[min] {
                min = j;
                reset_transient(a);
                mark(a, min, Role::Highlighted);
                let message = format!("New minimum {} at index {}", a.values[min], min);
                record(rec, a, message);
            }
        }

        if min != i {
            swap(a, rec, i, min);
        }

        reset_transient(a);
        mark(a, i, Role::Sorted);
        let message = format!("Pass {} complete: {} is in place at index {}", i + 1, a.values[i], i);
        record(rec, a, message);
    }
}

// ---------------------------------------------------------------------------
// Merge sort
// ---------------------------------------------------------------------------

/// Sorts the half-open range `lo..hi`. `n` is the full array length, used to
/// recognize the outermost merge.
fn merge_sort(a: &mut ArrayState, rec: &mut SortRecorder, lo: usize, hi: usize, n: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort(a, rec, lo, mid, n);
    merge_sort(a, rec, mid, hi, n);
    merge(a, rec, lo, mid, hi, lo == 0 && hi == n);
}

fn merge(
    a: &mut ArrayState,
    rec: &mut SortRecorder,
    lo: usize,
    mid: usize,
    hi: usize,
    outermost: bool,
) {
    rec.metrics.passes += 1;

    reset_transient(a);
    for index in lo..hi {
        mark(a, index, Role::Highlighted);
    }
    let message = format!("Merging {:?} and {:?}", &a.values[lo..mid], &a.values[mid..hi]);
    record(rec, a, message);

    // a[k..m] holds the unplaced left run, a[m..hi] the unplaced right run
    let (mut k, mut m) = (lo, mid);
    while k < m && m < hi {
        reset_transient(a);
        mark(a, k, Role::Comparing);
        mark(a, m, Role::Comparing);
        rec.metrics.comparisons += 1;
        let message = format!("Comparing {} and {}", a.values[k], a.values[m]);
        record(rec, a, message);

        // ties go to the left run, which keeps the sort stable
        let from = if a.values[k] > a.values[m] {
            m += 1;
            m - 1
        } else {
            k
        };
        place(a, rec, from, k, outermost);
        k += 1;
    }

    while k < hi {
        place(a, rec, k, k, outermost);
        k += 1;
    }
}

/// Moves the value at `from` down to `to`, shifting `to..from` one slot
/// right: one step before the move, one after.
fn place(a: &mut ArrayState, rec: &mut SortRecorder, from: usize, to: usize, sorted: bool) {
    let value = a.values[from];
    reset_transient(a);
    mark(a, from, Role::Swapping);
    mark(a, to, Role::Swapping);
    record(rec, a, format!("Placing {} at index {}", value, to));

    a.values[to..=from].rotate_right(1);
    rec.metrics.swaps += 1;
    reset_transient(a);
    if sorted {
        mark(a, to, Role::Sorted);
    }
    record(rec, a, format!("Placed: index {} now holds {}", to, value));
}

// ---------------------------------------------------------------------------
// Quicksort
// ---------------------------------------------------------------------------

/// Sorts the inclusive range `lo..=hi`.
fn quick_sort(a: &mut ArrayState, rec: &mut SortRecorder, lo: usize, hi: usize) {
    if lo == hi {
        reset_transient(a);
        mark(a, lo, Role::Sorted);
        let message = format!("{} at index {} is a single element, already in place", a.values[lo], lo);
        record(rec, a, message);
        return;
    }

    let p = partition(a, rec, lo, hi);
    if p > lo {
        quick_sort(a, rec, lo, p - 1);
    }
    if p < hi {
        quick_sort(a, rec, p + 1, hi);
    }
}

/// Lomuto partition around the last element; returns the pivot's final
/// index.
fn partition(a: &mut ArrayState, rec: &mut SortRecorder, lo: usize, hi: usize) -> usize {
    rec.metrics.passes += 1;
    let pivot = a.values[hi];

    reset_transient(a);
    mark(a, hi, Role::Highlighted);
    record(
        rec,
        a,
        format!("Partitioning indices {}..={} around pivot {}", lo, hi, pivot),
    );

    let mut i = lo;
    for j in lo..hi {
        compare(a, rec, j, hi);
        if a.values[j] < pivot {
            swap(a, rec, i, j);
            i += 1;
        }
    }
    swap(a, rec, i, hi);

    reset_transient(a);
    mark(a, i, Role::Sorted);
    record(rec, a, format!("Pivot {} placed at index {}", pivot, i));
    i
}
