//! Algorithm visualization trace CLI.
//!
//! Provides the `algoviz` binary: one subcommand per algorithm family that
//! records a trace and prints it, or replays it step by step through the
//! player with `--play`, plus `pseudocode` for the listing of an algorithm.
//!
//! Exit codes: 0 = success, 1 = invalid input, 3 = I/O or parse error.

mod render;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use tokio::sync::Notify;

use algoviz_core::{
    samples, Algorithm, GraphAlgorithm, GraphInput, IdAllocator, InputError, ListInput, ListKind,
    ListOperation, ListOperationKind, SearchAlgorithm, SortAlgorithm, Trace, TreeNode,
    TreeLayout, TreeOperation, TreeOperationKind,
};
use algoviz_player::{Player, PlayerConfig, Speed};
use algoviz_trace::{graph, pseudocode, search, sort, tree, ListGenerator};

use render::{Format, TerminalObserver};

/// Records algorithm traces and plays them back.
#[derive(Parser)]
#[command(name = "algoviz", about = "Algorithm visualization traces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Sort an array.
    Sort {
        /// bubble, insertion, selection, merge or quick.
        #[arg(short, long, default_value = "bubble")]
        algorithm: SortAlgorithm,

        #[command(flatten)]
        array: ArrayArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Search an array for a target value.
    Search {
        /// linear or binary.
        #[arg(short, long, default_value = "linear")]
        algorithm: SearchAlgorithm,

        /// Value to look for.
        #[arg(short, long)]
        target: i64,

        #[command(flatten)]
        array: ArrayArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Traverse a graph or find a shortest path.
    Graph {
        /// bfs, dfs or dijkstra.
        #[arg(short, long, default_value = "bfs")]
        algorithm: GraphAlgorithm,

        /// JSON graph file (default: the six-node sample graph).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Label of the start node, overriding the input.
        #[arg(long)]
        start: Option<String>,

        /// Label of the end node, overriding the input.
        #[arg(long)]
        end: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a binary-search-tree operation.
    Tree {
        /// insert, delete, search, inorder, preorder or postorder.
        #[arg(long, default_value = "inorder")]
        op: TreeOperationKind,

        /// Operand for insert, delete and search.
        #[arg(long, allow_negative_numbers = true)]
        value: Option<i64>,

        /// Comma-separated values inserted in order to build the tree.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        values: Option<Vec<i64>>,

        /// JSON tree file (default: the seven-node sample tree).
        #[arg(short, long, conflicts_with = "values")]
        input: Option<PathBuf>,

        /// JSON layout file overriding the root position and level spacing.
        #[arg(long)]
        layout: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a linked-list operation.
    List {
        /// insert, delete, search or traverse.
        #[arg(long, default_value = "traverse")]
        op: ListOperationKind,

        /// Operand for insert and search.
        #[arg(long)]
        value: Option<String>,

        /// Position for insert and delete.
        #[arg(long)]
        position: Option<usize>,

        /// Link structure for lists built from `--values` or the sample.
        #[arg(long, value_enum, default_value = "singly")]
        kind: KindArg,

        /// Comma-separated node values, head first.
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<String>>,

        /// JSON list file (default: 10 -> 20 -> 30 -> 40).
        #[arg(short, long, conflicts_with = "values")]
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the pseudocode listing of an algorithm, e.g. `graph/dijkstra`.
    Pseudocode {
        algorithm: Algorithm,
    },
}

/// Where the array for sort and search comes from.
#[derive(Args)]
struct ArrayArgs {
    /// Comma-separated values.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, conflicts_with_all = ["input", "random"])]
    values: Option<Vec<i64>>,

    /// JSON file holding an array of integers.
    #[arg(short, long, conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Generate this many random values (the default when no input is given).
    #[arg(long)]
    random: Option<usize>,

    /// Seed for random generation.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct OutputArgs {
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Replay the trace step by step instead of printing it at once.
    #[arg(long)]
    play: bool,

    /// Playback speed from 1 to 100 (default: from the config, else 50).
    #[arg(long)]
    speed: Option<u32>,

    /// JSON player configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Singly,
    Doubly,
}

impl From<KindArg> for ListKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Singly => ListKind::Singly,
            KindArg::Doubly => ListKind::Doubly,
        }
    }
}

const DEFAULT_RANDOM_LEN: usize = 10;

/// Errors surfaced to the user, each mapped to an exit code.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("{0}")]
    Usage(String),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode trace: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to start playback runtime: {0}")]
    Runtime(std::io::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(_) | CliError::Usage(_) => 1,
            CliError::Io { .. }
            | CliError::Parse { .. }
            | CliError::Encode(_)
            | CliError::Runtime(_) => 3,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = match run(cli.command) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {}", err);
            err.exit_code()
        }
    };
    process::exit(exit_code);
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Sort {
            algorithm,
            array,
            output,
        } => {
            let values = load_array(&array, |len, rng| samples::random_array(len, rng))?;
            emit(sort::generate(&values, algorithm), &output)
        }
        Commands::Search {
            algorithm,
            target,
            array,
            output,
        } => {
            let sorted = algorithm == SearchAlgorithm::Binary;
            let values = load_array(&array, |len, rng| {
                samples::random_search_array(len, sorted, rng)
            })?;
            emit(search::generate(&values, target, algorithm), &output)
        }
        Commands::Graph {
            algorithm,
            input,
            start,
            end,
            output,
        } => {
            let mut graph_input: GraphInput = match input {
                Some(path) => read_json(&path)?,
                None => samples::graph(),
            };
            if let Some(label) = start {
                graph_input.start = Some(find_label(&graph_input, &label)?);
            }
            if let Some(label) = end {
                graph_input.end = Some(find_label(&graph_input, &label)?);
            }
            emit(graph::generate(&graph_input, algorithm)?, &output)
        }
        Commands::Tree {
            op,
            value,
            values,
            input,
            layout,
            output,
        } => {
            let root: Option<TreeNode> = match (input, values) {
                (Some(path), _) => read_json(&path)?,
                (None, Some(values)) => TreeNode::from_values(values),
                (None, None) => Some(samples::tree()),
            };
            let operation = tree_operation(op, value)?;
            let layout: TreeLayout = match layout {
                Some(path) => read_json(&path)?,
                None => TreeLayout::default(),
            };
            emit(
                tree::generate_with_layout(root.as_ref(), operation, layout)?,
                &output,
            )
        }
        Commands::List {
            op,
            value,
            position,
            kind,
            values,
            input,
            output,
        } => {
            let list: ListInput = match (input, values) {
                (Some(path), _) => read_json(&path)?,
                (None, Some(values)) => {
                    ListInput::from_values(kind.into(), values, &mut IdAllocator::default())
                }
                (None, None) => samples::list(kind.into()),
            };
            let operation = list_operation(op, value, position)?;
            let trace = ListGenerator::for_list(&list).generate(&list, operation)?;
            emit(trace, &output)
        }
        Commands::Pseudocode { algorithm } => {
            for (number, line) in pseudocode::listing(algorithm).iter().enumerate() {
                println!("{:>3}  {}", number + 1, line);
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Input loading
// ---------------------------------------------------------------------------

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_array(
    args: &ArrayArgs,
    random: impl FnOnce(usize, &mut ChaCha8Rng) -> Vec<i64>,
) -> Result<Vec<i64>, CliError> {
    if let Some(values) = &args.values {
        return Ok(values.clone());
    }
    if let Some(path) = &args.input {
        return read_json(path);
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "generating random input");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(random(args.random.unwrap_or(DEFAULT_RANDOM_LEN), &mut rng))
}

fn find_label(input: &GraphInput, label: &str) -> Result<algoviz_core::GraphNodeId, CliError> {
    input
        .nodes
        .iter()
        .find(|node| node.label == label)
        .map(|node| node.id)
        .ok_or_else(|| CliError::Usage(format!("no node labelled '{}'", label)))
}

fn tree_operation(kind: TreeOperationKind, value: Option<i64>) -> Result<TreeOperation, CliError> {
    let operand = || {
        value.ok_or_else(|| CliError::Usage(format!("tree {} requires --value", kind)))
    };
    Ok(match kind {
        TreeOperationKind::Insert => TreeOperation::Insert(operand()?),
        TreeOperationKind::Delete => TreeOperation::Delete(operand()?),
        TreeOperationKind::Search => TreeOperation::Search(operand()?),
        TreeOperationKind::Inorder => TreeOperation::Inorder,
        TreeOperationKind::Preorder => TreeOperation::Preorder,
        TreeOperationKind::Postorder => TreeOperation::Postorder,
    })
}

fn list_operation(
    kind: ListOperationKind,
    value: Option<String>,
    position: Option<usize>,
) -> Result<ListOperation, CliError> {
    let missing = |flag: &str| CliError::Usage(format!("list {} requires {}", kind, flag));
    Ok(match kind {
        ListOperationKind::Insert => ListOperation::Insert {
            value: value.ok_or_else(|| missing("--value"))?,
            position: position.ok_or_else(|| missing("--position"))?,
        },
        ListOperationKind::Delete => ListOperation::Delete {
            position: position.ok_or_else(|| missing("--position"))?,
        },
        ListOperationKind::Search => ListOperation::Search {
            value: value.ok_or_else(|| missing("--value"))?,
        },
        ListOperationKind::Traverse => ListOperation::Traverse,
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn emit(trace: Trace, output: &OutputArgs) -> Result<(), CliError> {
    if output.play {
        return play(trace, output);
    }
    match output.format {
        Format::Text => print!("{}", render::trace_text(&trace)),
        Format::Json => println!("{}", trace.to_json_pretty()?),
    }
    Ok(())
}

/// Replays `trace` through a [`Player`] and returns once it completes.
fn play(trace: Trace, output: &OutputArgs) -> Result<(), CliError> {
    let config: PlayerConfig = match &output.config {
        Some(path) => read_json(path)?,
        None => PlayerConfig::default(),
    };
    let speed = output.speed.map(Speed::new).unwrap_or(config.speed);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(async {
        let done = Arc::new(Notify::new());
        let observer = Arc::new(TerminalObserver::new(output.format, Arc::clone(&done)));
        let player = Player::with_config(observer, config);
        player.start(trace, speed);
        done.notified().await;
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("algoviz").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn parses_sort_values() {
        match parse(&["sort", "-a", "merge", "--values", "5,-3,1"]) {
            Commands::Sort {
                algorithm, array, ..
            } => {
                assert_eq!(algorithm, SortAlgorithm::Merge);
                assert_eq!(array.values, Some(vec![5, -3, 1]));
            }
            _ => panic!("expected sort"),
        }
    }

    #[test]
    fn rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["algoviz", "sort", "-a", "bogo"]).is_err());
    }

    #[test]
    fn parses_pseudocode_key() {
        match parse(&["pseudocode", "tree/delete"]) {
            Commands::Pseudocode { algorithm } => {
                assert_eq!(algorithm, Algorithm::Tree(TreeOperationKind::Delete))
            }
            _ => panic!("expected pseudocode"),
        }
    }

    #[test]
    fn tree_operand_is_required() {
        let err = tree_operation(TreeOperationKind::Insert, None).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "tree insert requires --value");
        assert_eq!(
            tree_operation(TreeOperationKind::Search, Some(4)).unwrap(),
            TreeOperation::Search(4)
        );
    }

    #[test]
    fn list_insert_needs_value_and_position() {
        let err = list_operation(ListOperationKind::Insert, Some("x".into()), None).unwrap_err();
        assert_eq!(err.to_string(), "list insert requires --position");
        assert_eq!(
            list_operation(ListOperationKind::Delete, None, Some(2)).unwrap(),
            ListOperation::Delete { position: 2 }
        );
    }

    #[test]
    fn unknown_start_label_is_a_usage_error() {
        let err = find_label(&samples::graph(), "Z").unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn seeded_random_input_is_reproducible() {
        let args = ArrayArgs {
            values: None,
            input: None,
            random: Some(6),
            seed: Some(9),
        };
        let a = load_array(&args, |len, rng| samples::random_array(len, rng)).unwrap();
        let b = load_array(&args, |len, rng| samples::random_array(len, rng)).unwrap();
        assert_eq!(a.len(), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn parses_tree_layout_path() {
        match parse(&["tree", "--op", "preorder", "--layout", "layout.json"]) {
            Commands::Tree { op, layout, .. } => {
                assert_eq!(op, TreeOperationKind::Preorder);
                assert_eq!(layout, Some(PathBuf::from("layout.json")));
            }
            _ => panic!("expected tree"),
        }
    }

    #[test]
    fn partial_layout_file_keeps_defaults() {
        let path = std::env::temp_dir()
            .join(format!("algoviz-layout-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"root_x": 120.0}"#).unwrap();
        let layout: TreeLayout = read_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(layout.root_x, 120.0);
        assert_eq!(layout.level_gap, TreeLayout::default().level_gap);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_json::<Vec<i64>>(Path::new("/nonexistent/input.json")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
