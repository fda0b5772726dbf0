//! Plain-text rendering of traces and the terminal playback observer.

use std::io::Write;
use std::sync::Arc;

use algoviz_core::{ListKind, Metrics, Role, Step, StepState, Trace};
use algoviz_player::PlaybackObserver;
use tokio::sync::Notify;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// One step as a numbered message followed by an indented state summary.
pub fn step_text(index: usize, step: &Step) -> String {
    format!("{index:>4}  {}\n      {}", step.message, state_summary(&step.state))
}

pub fn metrics_text(metrics: &Metrics) -> String {
    let mut parts: Vec<String> = metrics
        .counters()
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    match metrics {
        Metrics::Tree(m) => {
            parts.push(format!("nodes={}", m.nodes));
            parts.push(format!("height={}", m.height));
        }
        Metrics::List(m) => parts.push(format!("length={}", m.length)),
        Metrics::Array(_) | Metrics::Graph(_) => {}
    }
    parts.join(" ")
}

pub fn trace_text(trace: &Trace) -> String {
    let mut out = format!("{} ({} steps)\n", trace.algorithm, trace.len());
    for (index, step) in trace.iter().enumerate() {
        out.push_str(&step_text(index, step));
        out.push('\n');
    }
    if let Some(last) = trace.last() {
        out.push_str(&format!("metrics: {}\n", metrics_text(&last.metrics)));
    }
    out
}

fn state_summary(state: &StepState) -> String {
    match state {
        StepState::Array(array) => {
            let cells: Vec<String> = array
                .values
                .iter()
                .zip(&array.roles)
                .map(|(value, roles)| {
                    if roles.contains(Role::Found) {
                        format!("({value})")
                    } else if roles.contains(Role::Comparing)
                        || roles.contains(Role::Swapping)
                        || roles.contains(Role::Checking)
                    {
                        format!("*{value}")
                    } else {
                        value.to_string()
                    }
                })
                .collect();
            format!("[{}]", cells.join(" "))
        }
        StepState::Graph(graph) => {
            let visited: Vec<String> = graph
                .nodes_with(Role::Visited)
                .into_iter()
                .filter_map(|id| graph.node(id))
                .map(|node| match node.distance {
                    Some(d) => format!("{}:{d}", node.label),
                    None => node.label.clone(),
                })
                .collect();
            format!("visited: {}", visited.join(" "))
        }
        StepState::Tree(tree) => match &tree.root {
            Some(root) => format!("inorder: {:?}", root.inorder_values()),
            None => "empty tree".to_string(),
        },
        StepState::List(list) => {
            if list.nodes.is_empty() {
                return "empty list".to_string();
            }
            let arrow = match list.kind {
                ListKind::Singly => " -> ",
                ListKind::Doubly => " <-> ",
            };
            list.values().join(arrow)
        }
    }
}

/// Prints each emitted step to stdout and wakes the waiting caller on
/// completion.
pub struct TerminalObserver {
    format: Format,
    done: Arc<Notify>,
}

impl TerminalObserver {
    pub fn new(format: Format, done: Arc<Notify>) -> Self {
        TerminalObserver { format, done }
    }
}

impl PlaybackObserver for TerminalObserver {
    fn on_step(&self, index: usize, step: &Step) {
        let line = match self.format {
            Format::Text => step_text(index, step),
            Format::Json => match serde_json::to_string(step) {
                Ok(json) => json,
                Err(err) => {
                    tracing::warn!(index, "failed to encode step: {err}");
                    return;
                }
            },
        };
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();
    }

    fn on_complete(&self) {
        self.done.notify_one();
    }
}
