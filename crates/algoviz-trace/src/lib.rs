//! Trace generators for the five algorithm families.
//!
//! Each generator runs its algorithm eagerly over a private copy of the
//! input and returns the complete [`Trace`](algoviz_core::Trace):
//!
//! - [`sort::generate`]: bubble, insertion, selection, merge, quicksort
//! - [`search::generate`]: linear and binary search
//! - [`graph::generate`]: BFS, DFS, Dijkstra
//! - [`tree::generate`]: BST insert/delete/search and traversals
//! - [`list::ListGenerator`]: linked-list insert/delete/search/traverse
//!
//! Sorting and searching accept any array. The structural generators
//! validate their input and return [`InputError`](algoviz_core::InputError)
//! for malformed graphs, trees and lists. Outcomes such as "not found" or
//! "no path" are terminal steps, never errors.

pub mod graph;
pub mod list;
pub mod pseudocode;
pub mod recorder;
pub mod search;
pub mod sort;
pub mod tree;

pub use list::ListGenerator;
pub use recorder::Recorder;
