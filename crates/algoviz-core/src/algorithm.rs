//! Algorithm and operation selectors for the five visualized families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// The algorithm family a trace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmFamily {
    Sort,
    Search,
    Graph,
    Tree,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    Linear,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
}

/// A binary-search-tree operation together with its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum TreeOperation {
    Insert(i64),
    Delete(i64),
    Search(i64),
    Inorder,
    Preorder,
    Postorder,
}

/// The payload-free name of a [`TreeOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeOperationKind {
    Insert,
    Delete,
    Search,
    Inorder,
    Preorder,
    Postorder,
}

impl TreeOperation {
    pub fn kind(&self) -> TreeOperationKind {
        match self {
            TreeOperation::Insert(_) => TreeOperationKind::Insert,
            TreeOperation::Delete(_) => TreeOperationKind::Delete,
            TreeOperation::Search(_) => TreeOperationKind::Search,
            TreeOperation::Inorder => TreeOperationKind::Inorder,
            TreeOperation::Preorder => TreeOperationKind::Preorder,
            TreeOperation::Postorder => TreeOperationKind::Postorder,
        }
    }
}

/// A linked-list operation together with its operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ListOperation {
    Insert { value: String, position: usize },
    Delete { position: usize },
    Search { value: String },
    Traverse,
}

/// The payload-free name of a [`ListOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOperationKind {
    Insert,
    Delete,
    Search,
    Traverse,
}

impl ListOperation {
    pub fn kind(&self) -> ListOperationKind {
        match self {
            ListOperation::Insert { .. } => ListOperationKind::Insert,
            ListOperation::Delete { .. } => ListOperationKind::Delete,
            ListOperation::Search { .. } => ListOperationKind::Search,
            ListOperation::Traverse => ListOperationKind::Traverse,
        }
    }
}

/// Identifies what produced a trace: a family plus the concrete algorithm or
/// operation within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "name", rename_all = "snake_case")]
pub enum Algorithm {
    Sort(SortAlgorithm),
    Search(SearchAlgorithm),
    Graph(GraphAlgorithm),
    Tree(TreeOperationKind),
    List(ListOperationKind),
}

impl Algorithm {
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Algorithm::Sort(_) => AlgorithmFamily::Sort,
            Algorithm::Search(_) => AlgorithmFamily::Search,
            Algorithm::Graph(_) => AlgorithmFamily::Graph,
            Algorithm::Tree(_) => AlgorithmFamily::Tree,
            Algorithm::List(_) => AlgorithmFamily::List,
        }
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    /// Human-readable name used in step messages.
    pub fn title(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble sort",
            SortAlgorithm::Insertion => "insertion sort",
            SortAlgorithm::Selection => "selection sort",
            SortAlgorithm::Merge => "merge sort",
            SortAlgorithm::Quick => "quicksort",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }
}

impl SearchAlgorithm {
    pub fn title(&self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "linear search",
            SearchAlgorithm::Binary => "binary search",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "linear",
            SearchAlgorithm::Binary => "binary",
        }
    }
}

impl GraphAlgorithm {
    pub fn title(&self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "BFS",
            GraphAlgorithm::Dfs => "DFS",
            GraphAlgorithm::Dijkstra => "Dijkstra's algorithm",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "bfs",
            GraphAlgorithm::Dfs => "dfs",
            GraphAlgorithm::Dijkstra => "dijkstra",
        }
    }
}

impl TreeOperationKind {
    fn key(&self) -> &'static str {
        match self {
            TreeOperationKind::Insert => "insert",
            TreeOperationKind::Delete => "delete",
            TreeOperationKind::Search => "search",
            TreeOperationKind::Inorder => "inorder",
            TreeOperationKind::Preorder => "preorder",
            TreeOperationKind::Postorder => "postorder",
        }
    }
}

impl ListOperationKind {
    fn key(&self) -> &'static str {
        match self {
            ListOperationKind::Insert => "insert",
            ListOperationKind::Delete => "delete",
            ListOperationKind::Search => "search",
            ListOperationKind::Traverse => "traverse",
        }
    }
}

macro_rules! keyed_enum {
    ($ty:ty, $family:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $ty {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|candidate| candidate.key() == wanted)
                    .ok_or_else(|| InputError::UnknownAlgorithm {
                        family: $family,
                        name: s.to_string(),
                    })
            }
        }
    };
}

keyed_enum!(
    SortAlgorithm,
    "sort",
    [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ]
);
keyed_enum!(
    SearchAlgorithm,
    "search",
    [SearchAlgorithm::Linear, SearchAlgorithm::Binary]
);
keyed_enum!(
    GraphAlgorithm,
    "graph",
    [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs, GraphAlgorithm::Dijkstra]
);
keyed_enum!(
    TreeOperationKind,
    "tree",
    [
        TreeOperationKind::Insert,
        TreeOperationKind::Delete,
        TreeOperationKind::Search,
        TreeOperationKind::Inorder,
        TreeOperationKind::Preorder,
        TreeOperationKind::Postorder,
    ]
);
keyed_enum!(
    ListOperationKind,
    "list",
    [
        ListOperationKind::Insert,
        ListOperationKind::Delete,
        ListOperationKind::Search,
        ListOperationKind::Traverse,
    ]
);

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Sort(a) => write!(f, "sort/{a}"),
            Algorithm::Search(a) => write!(f, "search/{a}"),
            Algorithm::Graph(a) => write!(f, "graph/{a}"),
            Algorithm::Tree(a) => write!(f, "tree/{a}"),
            Algorithm::List(a) => write!(f, "list/{a}"),
        }
    }
}

/// Parses the `family/name` form produced by `Display`, e.g. `graph/dijkstra`.
impl FromStr for Algorithm {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || InputError::UnknownAlgorithm {
            family: "algorithm",
            name: s.to_string(),
        };
        let (family, name) = s.trim().split_once('/').ok_or_else(unknown)?;
        match family.to_ascii_lowercase().as_str() {
            "sort" => name.parse().map(Algorithm::Sort),
            "search" => name.parse().map(Algorithm::Search),
            "graph" => name.parse().map(Algorithm::Graph),
            "tree" => name.parse().map(Algorithm::Tree),
            "list" => name.parse().map(Algorithm::List),
            _ => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Quick".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Quick);
        assert_eq!(" bfs ".parse::<GraphAlgorithm>().unwrap(), GraphAlgorithm::Bfs);
    }

    #[test]
    fn algorithm_key_round_trips_through_display() {
        let algorithm: Algorithm = "graph/Dijkstra".parse().unwrap();
        assert_eq!(algorithm, Algorithm::Graph(GraphAlgorithm::Dijkstra));
        assert_eq!(algorithm.to_string(), "graph/dijkstra");
        assert!("dijkstra".parse::<Algorithm>().is_err());
        assert!("heap/sort".parse::<Algorithm>().is_err());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "bogo".parse::<SortAlgorithm>().unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownAlgorithm {
                family: "sort",
                name: "bogo".into()
            }
        );
    }

    #[test]
    fn display_matches_parse_key() {
        for alg in SortAlgorithm::ALL {
            assert_eq!(alg.to_string().parse::<SortAlgorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn operation_kinds() {
        assert_eq!(TreeOperation::Delete(4).kind(), TreeOperationKind::Delete);
        assert_eq!(
            ListOperation::Delete { position: 2 }.kind(),
            ListOperationKind::Delete
        );
        assert_eq!(
            Algorithm::Tree(TreeOperationKind::Inorder).family(),
            AlgorithmFamily::Tree
        );
        assert_eq!(
            Algorithm::Graph(GraphAlgorithm::Dijkstra).to_string(),
            "graph/dijkstra"
        );
    }
}
