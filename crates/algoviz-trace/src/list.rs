//! Singly and doubly linked list insert, delete, search and traversal.
//!
//! The working list keeps its nodes in head-to-tail storage order. A node
//! being inserted is placed at its target index while still unlinked, so the
//! renderer can show it next to where it will end up.

use std::collections::HashMap;

use algoviz_core::{
    Algorithm, IdAllocator, InputError, ListInput, ListMetrics, ListNode, ListNodeId,
    ListOperation, ListState, Role, StepState, Trace,
};

use crate::recorder::Recorder;

type ListRecorder = Recorder<ListMetrics>;

/// List trace generator for one visualizer session.
///
/// Owns the id allocator, so ids handed to inserted nodes never collide with
/// ids it handed out earlier in the same session.
#[derive(Debug, Clone, Default)]
pub struct ListGenerator {
    ids: IdAllocator,
}

impl ListGenerator {
    pub fn new(ids: IdAllocator) -> Self {
        ListGenerator { ids }
    }

    /// Starts a session whose ids continue after the highest id in `list`.
    pub fn for_list(list: &ListInput) -> Self {
        ListGenerator {
            ids: IdAllocator::after(list.nodes.iter().map(|n| n.id.0)),
        }
    }

    /// The id the next inserted node will receive.
    pub fn next_id(&self) -> ListNodeId {
        ListNodeId(self.ids.peek())
    }

    /// Records `operation` applied to `list`. The input is never modified;
    /// use [`ListState::to_input`] on the terminal step to adopt the result.
    pub fn generate(&mut self, list: &ListInput, operation: ListOperation) -> Result<Trace, InputError> {
        list.validate()?;

        let mut rec = ListRecorder::new(Algorithm::List(operation.kind()));
        let mut work = Work::new(list);

        match operation {
            ListOperation::Insert { value, position } => {
                if position > work.len() {
                    let message = format!(
                        "Cannot insert at position {} (list length: {})",
                        position,
                        work.len()
                    );
                    work.record(&mut rec, message);
                } else {
                    let id = self.ids.list_node();
                    insert(&mut work, &mut rec, id, &value, position);
                }
            }
            ListOperation::Delete { position } => delete(&mut work, &mut rec, position),
            ListOperation::Search { value } => search(&mut work, &mut rec, &value),
            ListOperation::Traverse => traverse(&mut work, &mut rec),
        }

        Ok(rec.finish())
    }
}

// ---------------------------------------------------------------------------
// Working copy
// ---------------------------------------------------------------------------

struct Work {
    state: ListState,
}

impl Work {
    fn new(list: &ListInput) -> Self {
        let mut nodes = list.nodes.clone();
        for node in &mut nodes {
            node.roles.clear();
        }
        Work {
            state: ListState {
                kind: list.kind,
                nodes,
            },
        }
    }

    fn len(&self) -> usize {
        self.state.nodes.len()
    }

    fn doubly(&self) -> bool {
        self.state.kind.is_doubly()
    }

    fn node(&mut self, index: usize) -> &mut ListNode {
        &mut self.state.nodes[index]
    }

    /// Leaves `Highlighted` on exactly the given indices.
    fn highlight_only(&mut self, indices: &[usize]) {
        for (i, node) in self.state.nodes.iter_mut().enumerate() {
            if indices.contains(&i) {
                node.roles.insert(Role::Highlighted);
            } else {
                node.roles.remove(Role::Highlighted);
            }
        }
    }

    /// Number of nodes reachable from the head.
    fn linked_len(&self) -> u32 {
        let by_id: HashMap<ListNodeId, &ListNode> =
            self.state.nodes.iter().map(|n| (n.id, n)).collect();
        let mut current = self.state.nodes.iter().find(|n| n.is_head);
        let mut length = 0u32;
        while let Some(node) = current {
            length += 1;
            if length as usize > self.state.nodes.len() {
                break;
            }
            current = node.next.and_then(|id| by_id.get(&id).copied());
        }
        length
    }

    fn record(&self, rec: &mut ListRecorder, message: impl Into<String>) {
        rec.metrics.length = self.linked_len();
        rec.record(StepState::List(self.state.clone()), message);
    }
}

/// One highlighted hop per node before `position`.
fn walk_to(work: &mut Work, rec: &mut ListRecorder, position: usize, label: &str, extra: Option<usize>) {
    for current in 0..position {
        rec.metrics.steps += 1;
        let mut marked = vec![current];
        marked.extend(extra);
        work.highlight_only(&marked);
        work.record(
            rec,
            format!("{label}: Traverse to position {}/{}", current + 1, position),
        );
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn insert(work: &mut Work, rec: &mut ListRecorder, id: ListNodeId, value: &str, position: usize) {
    let old_len = work.len();
    let mut created = ListNode::detached(id, value);
    created.roles.insert(Role::Highlighted);
    work.state.nodes.insert(position, created);
    work.record(rec, format!("Step 1: Create a new node with value {value}"));

    if position == 0 {
        if old_len == 0 {
            let node = work.node(0);
            node.is_head = true;
            node.is_tail = true;
            node.roles.remove(Role::Highlighted);
            work.record(
                rec,
                "Step 2: Set the new node as both head and tail (empty list)",
            );
            return;
        }

        let doubly = work.doubly();
        let old_head_id = work.state.nodes[1].id;
        work.node(0).next = Some(old_head_id);
        if doubly {
            work.node(1).prev = Some(id);
        }
        work.record(rec, "Step 2: Point new node's next to the current head");

        work.node(1).is_head = false;
        let node = work.node(0);
        node.is_head = true;
        node.roles.remove(Role::Highlighted);
        work.record(rec, "Step 3: Update head to point to the new node");
        return;
    }

    walk_to(work, rec, position, "Step 2", Some(position));

    let doubly = work.doubly();
    let prev = position - 1;
    let prev_id = work.state.nodes[prev].id;
    if position < old_len {
        let next_id = work.state.nodes[position + 1].id;
        work.node(position).next = Some(next_id);
        work.node(prev).next = Some(id);
        if doubly {
            work.node(position).prev = Some(prev_id);
            work.node(position + 1).prev = Some(id);
        }
        work.highlight_only(&[prev, position]);
        work.record(
            rec,
            format!(
                "Step 3: Insert new node between nodes at positions {} and {}",
                position - 1,
                position
            ),
        );
    } else {
        let tail = work.node(prev);
        tail.next = Some(id);
        tail.is_tail = false;
        let node = work.node(position);
        node.is_tail = true;
        if doubly {
            node.prev = Some(prev_id);
        }
        work.highlight_only(&[prev, position]);
        work.record(rec, "Step 3: Append new node at the end of the list");
    }

    work.highlight_only(&[]);
    work.record(
        rec,
        format!("Insertion complete: Node with value {value} inserted at position {position}"),
    );
}

fn delete(work: &mut Work, rec: &mut ListRecorder, position: usize) {
    let len = work.len();
    if len == 0 {
        work.record(rec, "Cannot delete from an empty list");
        return;
    }
    if position >= len {
        work.record(
            rec,
            format!("Position {position} is out of bounds (list length: {len})"),
        );
        return;
    }

    if position == 0 {
        work.highlight_only(&[0]);
        work.record(rec, "Step 1: Identify the head node to delete");

        let removed_value = work.state.nodes[0].value.clone();
        if len > 1 {
            work.node(0).is_head = false;
            let new_head = work.node(1);
            new_head.is_head = true;
            new_head.prev = None;
            work.record(rec, "Step 2: Update head pointer to the next node");

            work.state.nodes.remove(0);
            work.highlight_only(&[]);
            work.record(rec, format!("Step 3: Remove the node with value {removed_value}"));
        } else {
            work.state.nodes.clear();
            work.record(
                rec,
                format!("Step 2: Remove the only node in the list (value: {removed_value})"),
            );
        }
        return;
    }

    walk_to(work, rec, position, "Step 1", None);

    work.highlight_only(&[position]);
    work.record(
        rec,
        format!("Step 2: Identify the node at position {position} to delete"),
    );

    let doubly = work.doubly();
    let prev = position - 1;
    let prev_id = work.state.nodes[prev].id;
    if position + 1 < len {
        let next_id = work.state.nodes[position + 1].id;
        work.node(prev).next = Some(next_id);
        if doubly {
            work.node(position + 1).prev = Some(prev_id);
        }
        work.highlight_only(&[prev, position]);
        work.record(
            rec,
            format!("Step 3: Update pointers to bypass the node at position {position}"),
        );
    } else {
        let new_tail = work.node(prev);
        new_tail.next = None;
        new_tail.is_tail = true;
        work.node(position).is_tail = false;
        work.highlight_only(&[prev, position]);
        work.record(rec, "Step 3: Update the previous node to be the new tail");
    }

    let removed = work.state.nodes.remove(position);
    work.highlight_only(&[]);
    work.record(
        rec,
        format!("Step 4: Remove the node with value {}", removed.value),
    );
}

fn search(work: &mut Work, rec: &mut ListRecorder, value: &str) {
    let len = work.len();
    if len == 0 {
        work.record(rec, "Cannot search in an empty list");
        return;
    }

    work.highlight_only(&[0]);
    let head_value = work.state.nodes[0].value.clone();
    work.record(
        rec,
        format!("Step 1: Start search at the head node (value: {head_value})"),
    );

    let mut position = 0;
    loop {
        rec.metrics.comparisons += 1;
        if work.state.nodes[position].value == value {
            work.node(position).roles.insert(Role::Found);
            work.record(rec, format!("Found value {value} at position {position}!"));
            return;
        }

        if position + 1 == len {
            work.record(
                rec,
                format!("Reached the end of the list. Value {value} not found."),
            );
            break;
        }

        rec.metrics.steps += 1;
        position += 1;
        work.highlight_only(&[position]);
        work.record(rec, format!("Moving to next node (position {position})"));
    }

    work.highlight_only(&[]);
    work.record(
        rec,
        format!("Search complete: Value {value} not found in the list"),
    );
}

fn traverse(work: &mut Work, rec: &mut ListRecorder) {
    let len = work.len();
    if len == 0 {
        work.record(rec, "List is empty, nothing to traverse");
        return;
    }

    for position in 0..len {
        if position > 0 {
            rec.metrics.steps += 1;
        }
        work.highlight_only(&[position]);
        let value = work.state.nodes[position].value.clone();
        work.record(
            rec,
            format!("Traversal: Visiting node at position {position} (value: {value})"),
        );
    }

    work.highlight_only(&[]);
    work.record(rec, format!("Traversal complete: Visited {len} nodes"));
}
