//! Binary-search-tree insert, delete, search and the three depth-first
//! traversals.
//!
//! The generator works on a private index arena so that a node can be linked
//! or spliced the moment it is created or removed. Every recorded step
//! rebuilds an owned, laid-out `TreeNode` tree from the arena.

use algoviz_core::{
    Algorithm, InputError, Role, RoleSet, StepState, Trace, TreeLayout, TreeMetrics, TreeNode,
    TreeOperation, TreeState,
};

use crate::recorder::Recorder;

type TreeRecorder = Recorder<TreeMetrics>;

/// Records `operation` applied to the tree rooted at `root`, laid out with
/// the default [`TreeLayout`].
pub fn generate(root: Option<&TreeNode>, operation: TreeOperation) -> Result<Trace, InputError> {
    generate_with_layout(root, operation, TreeLayout::default())
}

pub fn generate_with_layout(
    root: Option<&TreeNode>,
    operation: TreeOperation,
    layout: TreeLayout,
) -> Result<Trace, InputError> {
    if let Some(node) = root {
        node.validate()?;
    }

    let mut arena = Arena::from_tree(root, layout);
    let mut rec = TreeRecorder::new(Algorithm::Tree(operation.kind()));

    match operation {
        TreeOperation::Insert(value) => {
            arena.record(&mut rec, format!("Starting insertion of value {value}"));
            let root = arena.root;
            let inserted = insert(&mut arena, &mut rec, Link::Root, root, value);
            arena.clear_roles();
            let message = if inserted {
                format!("Insertion complete: Value {value} inserted into the tree")
            } else {
                format!("Insertion skipped: Value {value} already exists in the tree")
            };
            arena.record(&mut rec, message);
        }
        TreeOperation::Delete(value) => {
            arena.record(&mut rec, format!("Starting deletion of value {value}"));
            let root = arena.root;
            let deleted = delete(&mut arena, &mut rec, Link::Root, root, value);
            arena.clear_roles();
            let message = if deleted {
                format!("Deletion complete: Value {value} removed from the tree")
            } else {
                format!("Deletion failed: Value {value} not found in the tree")
            };
            arena.record(&mut rec, message);
        }
        TreeOperation::Search(value) => {
            arena.record(&mut rec, format!("Starting search for value {value}"));
            let found = search(&mut arena, &mut rec, value);
            let message = if found {
                format!("Search complete: Value {value} found in the tree")
            } else {
                format!("Search complete: Value {value} not found in the tree")
            };
            arena.record(&mut rec, message);
        }
        TreeOperation::Inorder | TreeOperation::Preorder | TreeOperation::Postorder => {
            let order = Order::from_operation(operation);
            arena.record(&mut rec, order.start_message());
            let mut visited = Vec::new();
            if let Some(root) = arena.root {
                traverse(&mut arena, &mut rec, order, root, &mut visited);
            }
            arena.record(
                &mut rec,
                format!("{} traversal complete: [{}]", order.title(), join(&visited)),
            );
        }
    }

    Ok(rec.finish())
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Where a subtree hangs: the root pointer or one side of a parent.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Child(usize, Side),
}

#[derive(Debug, Clone)]
struct Slot {
    value: i64,
    left: Option<usize>,
    right: Option<usize>,
    roles: RoleSet,
}

/// Index-linked working copy of the tree. Removed slots are left behind
/// unreachable.
#[derive(Debug)]
struct Arena {
    slots: Vec<Slot>,
    root: Option<usize>,
    layout: TreeLayout,
}

impl Arena {
    fn from_tree(root: Option<&TreeNode>, layout: TreeLayout) -> Self {
        let mut arena = Arena {
            slots: Vec::new(),
            root: None,
            layout,
        };
        arena.root = root.map(|node| arena.copy_in(node));
        arena
    }

    fn copy_in(&mut self, node: &TreeNode) -> usize {
        let left = node.left.as_deref().map(|n| self.copy_in(n));
        let right = node.right.as_deref().map(|n| self.copy_in(n));
        self.slots.push(Slot {
            value: node.value,
            left,
            right,
            roles: RoleSet::new(),
        });
        self.slots.len() - 1
    }

    fn alloc(&mut self, value: i64) -> usize {
        self.slots.push(Slot {
            value,
            left: None,
            right: None,
            roles: RoleSet::new(),
        });
        self.slots.len() - 1
    }

    fn child(&self, index: usize, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.slots[index].left,
            Side::Right => self.slots[index].right,
        }
    }

    fn set_link(&mut self, link: Link, target: Option<usize>) {
        match link {
            Link::Root => self.root = target,
            Link::Child(parent, Side::Left) => self.slots[parent].left = target,
            Link::Child(parent, Side::Right) => self.slots[parent].right = target,
        }
    }

    fn roles(&mut self, index: usize) -> &mut RoleSet {
        &mut self.slots[index].roles
    }

    fn clear_roles(&mut self) {
        for slot in &mut self.slots {
            slot.roles.clear();
        }
    }

    fn count_from(&self, index: Option<usize>) -> u32 {
        index.map_or(0, |i| {
            1 + self.count_from(self.slots[i].left) + self.count_from(self.slots[i].right)
        })
    }

    fn height_from(&self, index: Option<usize>) -> u32 {
        index.map_or(0, |i| {
            1 + self
                .height_from(self.slots[i].left)
                .max(self.height_from(self.slots[i].right))
        })
    }

    fn build(&self, index: usize) -> TreeNode {
        let slot = &self.slots[index];
        TreeNode {
            value: slot.value,
            left: slot.left.map(|i| Box::new(self.build(i))),
            right: slot.right.map(|i| Box::new(self.build(i))),
            x: 0.0,
            y: 0.0,
            roles: slot.roles.clone(),
        }
    }

    fn snapshot(&self) -> TreeState {
        let mut root = self.root.map(|i| self.build(i));
        if let Some(node) = root.as_mut() {
            self.layout.apply(node);
        }
        TreeState { root }
    }

    /// Refreshes the structural gauges and records the current tree.
    fn record(&self, rec: &mut TreeRecorder, message: impl Into<String>) {
        rec.metrics.nodes = self.count_from(self.root);
        rec.metrics.height = self.height_from(self.root);
        rec.record(StepState::Tree(self.snapshot()), message);
    }
}

/// Marks `index` as compared against `value` and records the step.
fn compare(arena: &mut Arena, rec: &mut TreeRecorder, index: usize, value: i64) {
    rec.metrics.steps += 1;
    arena.roles(index).insert(Role::Comparing);
    let node_value = arena.slots[index].value;
    arena.record(rec, format!("Comparing {value} with {node_value}"));
}

/// Records the descent decision at `index` and returns the side taken, or
/// `None` when `value` equals the node's value.
fn descend(arena: &mut Arena, rec: &mut TreeRecorder, index: usize, value: i64) -> Option<Side> {
    let node_value = arena.slots[index].value;
    let side = if value < node_value {
        Side::Left
    } else if value > node_value {
        Side::Right
    } else {
        return None;
    };

    let roles = arena.roles(index);
    roles.remove(Role::Comparing);
    roles.insert(Role::Highlighted);
    let message = match side {
        Side::Left => format!("{value} < {node_value}, going left"),
        Side::Right => format!("{value} > {node_value}, going right"),
    };
    arena.record(rec, message);
    Some(side)
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

fn insert(arena: &mut Arena, rec: &mut TreeRecorder, link: Link, node: Option<usize>, value: i64) -> bool {
    let Some(index) = node else {
        rec.metrics.steps += 1;
        let created = arena.alloc(value);
        arena.roles(created).insert(Role::Highlighted);
        arena.set_link(link, Some(created));
        arena.record(rec, format!("Created new node with value {value}"));
        return true;
    };

    compare(arena, rec, index, value);
    match descend(arena, rec, index, value) {
        Some(side) => {
            let child = arena.child(index, side);
            insert(arena, rec, Link::Child(index, side), child, value)
        }
        None => {
            let roles = arena.roles(index);
            roles.remove(Role::Comparing);
            roles.insert(Role::Highlighted);
            arena.record(rec, format!("Value {value} already exists in the tree"));
            false
        }
    }
}

fn delete(arena: &mut Arena, rec: &mut TreeRecorder, link: Link, node: Option<usize>, value: i64) -> bool {
    let Some(index) = node else {
        arena.record(rec, format!("Value {value} not found in the tree"));
        return false;
    };

    compare(arena, rec, index, value);
    if let Some(side) = descend(arena, rec, index, value) {
        let child = arena.child(index, side);
        return delete(arena, rec, Link::Child(index, side), child, value);
    }

    let roles = arena.roles(index);
    roles.remove(Role::Comparing);
    roles.insert(Role::Highlighted);
    arena.record(rec, format!("Found node with value {value} to delete"));

    let slot = &arena.slots[index];
    match (slot.left, slot.right) {
        (None, None) => {
            arena.set_link(link, None);
            arena.record(rec, format!("Node {value} has no children, removing it"));
        }
        (None, Some(right)) => {
            arena.set_link(link, Some(right));
            arena.record(
                rec,
                format!("Node {value} has only right child, replacing with right child"),
            );
        }
        (Some(left), None) => {
            arena.set_link(link, Some(left));
            arena.record(
                rec,
                format!("Node {value} has only left child, replacing with left child"),
            );
        }
        (Some(_), Some(right)) => {
            arena.record(rec, format!("Node {value} has two children, finding successor"));
            let successor = find_min(arena, rec, right);
            let successor_value = arena.slots[successor].value;
            arena.record(
                rec,
                format!("Replacing {value} with successor {successor_value}"),
            );
            arena.slots[index].value = successor_value;
            delete(
                arena,
                rec,
                Link::Child(index, Side::Right),
                Some(right),
                successor_value,
            );
        }
    }
    true
}

/// Walks the left spine from `start`, one step per hop.
fn find_min(arena: &mut Arena, rec: &mut TreeRecorder, start: usize) -> usize {
    let mut current = start;
    while let Some(left) = arena.slots[current].left {
        arena.roles(current).insert(Role::Processing);
        let value = arena.slots[current].value;
        arena.record(
            rec,
            format!("Looking for minimum value in right subtree, checking {value}"),
        );
        let roles = arena.roles(current);
        roles.remove(Role::Processing);
        roles.insert(Role::Highlighted);
        rec.metrics.steps += 1;
        current = left;
    }
    let value = arena.slots[current].value;
    arena.record(rec, format!("Found minimum value: {value}"));
    current
}

fn search(arena: &mut Arena, rec: &mut TreeRecorder, value: i64) -> bool {
    let mut node = arena.root;
    while let Some(index) = node {
        compare(arena, rec, index, value);
        match descend(arena, rec, index, value) {
            Some(side) => node = arena.child(index, side),
            None => {
                let roles = arena.roles(index);
                roles.remove(Role::Comparing);
                roles.insert(Role::Found);
                arena.record(rec, format!("Found value {value} in the tree!"));
                return true;
            }
        }
    }
    arena.record(rec, format!("Value {value} not found in the tree"));
    false
}

// ---------------------------------------------------------------------------
// Traversals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Inorder,
    Preorder,
    Postorder,
}

impl Order {
    fn from_operation(operation: TreeOperation) -> Self {
        match operation {
            TreeOperation::Preorder => Order::Preorder,
            TreeOperation::Postorder => Order::Postorder,
            _ => Order::Inorder,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Order::Inorder => "Inorder",
            Order::Preorder => "Preorder",
            Order::Postorder => "Postorder",
        }
    }

    fn start_message(self) -> &'static str {
        match self {
            Order::Inorder => "Starting inorder traversal (Left -> Root -> Right)",
            Order::Preorder => "Starting preorder traversal (Root -> Left -> Right)",
            Order::Postorder => "Starting postorder traversal (Left -> Right -> Root)",
        }
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn traverse(arena: &mut Arena, rec: &mut TreeRecorder, order: Order, index: usize, visited: &mut Vec<i64>) {
    rec.metrics.steps += 1;

    if order == Order::Preorder {
        visit(arena, rec, index, visited);
    }
    if let Some(left) = arena.slots[index].left {
        let suffix = if order == Order::Preorder { "" } else { " first" };
        go_to(arena, rec, index, format!("going to left subtree{suffix}"));
        traverse(arena, rec, order, left, visited);
    }
    if order == Order::Inorder {
        visit(arena, rec, index, visited);
    }
    if let Some(right) = arena.slots[index].right {
        go_to(arena, rec, index, "going to right subtree".to_string());
        traverse(arena, rec, order, right, visited);
    }
    if order == Order::Postorder {
        visit(arena, rec, index, visited);
    }
}

fn go_to(arena: &mut Arena, rec: &mut TreeRecorder, index: usize, what: String) {
    arena.roles(index).insert(Role::Processing);
    let value = arena.slots[index].value;
    arena.record(rec, format!("At node {value}, {what}"));
    arena.roles(index).remove(Role::Processing);
}

fn visit(arena: &mut Arena, rec: &mut TreeRecorder, index: usize, visited: &mut Vec<i64>) {
    arena.roles(index).insert(Role::Visited);
    let value = arena.slots[index].value;
    visited.push(value);
    arena.record(
        rec,
        format!("Visiting node {value}, traversal so far: [{}]", join(visited)),
    );
}
