//! Binary-search-tree nodes and their on-screen layout.
//!
//! Subtrees are exclusively owned through `Box`, so a cloned tree never
//! shares structure with its source. Values are unique within a valid tree.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::role::RoleSet;

/// A node of a binary search tree with its cached layout position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<TreeNode>>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        TreeNode {
            value,
            left: None,
            right: None,
            x: 0.0,
            y: 0.0,
            roles: RoleSet::new(),
        }
    }

    /// Builds a tree by inserting `values` in order. Duplicates are skipped.
    /// The result is laid out with the default [`TreeLayout`].
    pub fn from_values<I>(values: I) -> Option<TreeNode>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut root: Option<TreeNode> = None;
        for value in values {
            match root.as_mut() {
                Some(node) => {
                    node.insert_value(value);
                }
                None => root = Some(TreeNode::leaf(value)),
            }
        }
        if let Some(node) = root.as_mut() {
            TreeLayout::default().apply(node);
        }
        root
    }

    /// Plain BST insert without layout. Returns `false` if `value` is already
    /// present.
    pub fn insert_value(&mut self, value: i64) -> bool {
        let slot = if value < self.value {
            &mut self.left
        } else if value > self.value {
            &mut self.right
        } else {
            return false;
        };
        match slot {
            Some(child) => child.insert_value(value),
            None => {
                *slot = Some(Box::new(TreeNode::leaf(value)));
                true
            }
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        let mut node = Some(self);
        while let Some(n) = node {
            node = if value < n.value {
                n.left.as_deref()
            } else if value > n.value {
                n.right.as_deref()
            } else {
                return true;
            };
        }
        false
    }

    /// Values in ascending (inorder) order.
    pub fn inorder_values(&self) -> Vec<i64> {
        let mut out = Vec::new();
        let mut stack: Vec<&TreeNode> = Vec::new();
        let mut current = Some(self);
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push(node.value);
                current = node.right.as_deref();
            }
        }
        out
    }

    pub fn count(&self) -> u32 {
        1 + self.left.as_ref().map_or(0, |n| n.count()) + self.right.as_ref().map_or(0, |n| n.count())
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> u32 {
        let left = self.left.as_ref().map_or(0, |n| n.height());
        let right = self.right.as_ref().map_or(0, |n| n.height());
        1 + left.max(right)
    }

    /// Checks strict BST ordering (which also rules out duplicate values).
    pub fn validate(&self) -> Result<(), InputError> {
        fn check(node: &TreeNode, lower: Option<i64>, upper: Option<i64>) -> Result<(), InputError> {
            if let Some(bound) = lower {
                if node.value <= bound {
                    return Err(InputError::NotABinarySearchTree {
                        value: node.value,
                        ancestor: bound,
                    });
                }
            }
            if let Some(bound) = upper {
                if node.value >= bound {
                    return Err(InputError::NotABinarySearchTree {
                        value: node.value,
                        ancestor: bound,
                    });
                }
            }
            if let Some(left) = &node.left {
                check(left, lower, Some(node.value))?;
            }
            if let Some(right) = &node.right {
                check(right, Some(node.value), upper)?;
            }
            Ok(())
        }

        check(self, None, None)
    }

    /// Drops every role in the subtree.
    pub fn clear_roles(&mut self) {
        self.roles.clear();
        if let Some(left) = self.left.as_mut() {
            left.clear_roles();
        }
        if let Some(right) = self.right.as_mut() {
            right.clear_roles();
        }
    }
}

/// Node count of an optional tree.
pub fn count(root: Option<&TreeNode>) -> u32 {
    root.map_or(0, TreeNode::count)
}

/// Height of an optional tree; the empty tree has height 0.
pub fn height(root: Option<&TreeNode>) -> u32 {
    root.map_or(0, TreeNode::height)
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Top-down layout parameters. Children sit `offset` to either side of their
/// parent, and the offset halves at every level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLayout {
    pub root_x: f64,
    pub root_y: f64,
    pub level_gap: f64,
    pub initial_offset: f64,
}

impl Default for TreeLayout {
    fn default() -> Self {
        TreeLayout {
            root_x: 400.0,
            root_y: 50.0,
            level_gap: 80.0,
            initial_offset: 200.0,
        }
    }
}

impl TreeLayout {
    /// Recomputes `x`/`y` for every node under `root`.
    pub fn apply(&self, root: &mut TreeNode) {
        self.place(root, self.root_x, self.root_y, self.initial_offset);
    }

    fn place(&self, node: &mut TreeNode, x: f64, y: f64, offset: f64) {
        node.x = x;
        node.y = y;
        let next = offset / 2.0;
        if let Some(left) = node.left.as_mut() {
            self.place(left, x - offset, y + self.level_gap, next);
        }
        if let Some(right) = node.right.as_mut() {
            self.place(right, x + offset, y + self.level_gap, next);
        }
    }

    /// Position of the node reached by following `path` from the root
    /// (`false` = left, `true` = right).
    pub fn position(&self, path: &[bool]) -> (f64, f64) {
        let mut x = self.root_x;
        let mut y = self.root_y;
        let mut offset = self.initial_offset;
        for &right in path {
            x = if right { x + offset } else { x - offset };
            y += self.level_gap;
            offset /= 2.0;
        }
        (x, y)
    }
}
