//! Singly and doubly linked lists, stored as a flat head-to-tail node vector
//! with explicit id links.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::id::{IdAllocator, ListNodeId};
use crate::role::RoleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Singly,
    Doubly,
}

impl ListKind {
    pub fn is_doubly(self) -> bool {
        matches!(self, ListKind::Doubly)
    }
}

/// One list node. Identity is the id; values may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    pub id: ListNodeId,
    pub value: String,
    #[serde(default)]
    pub next: Option<ListNodeId>,
    /// Always `None` on singly linked lists.
    #[serde(default)]
    pub prev: Option<ListNodeId>,
    #[serde(default)]
    pub is_head: bool,
    #[serde(default)]
    pub is_tail: bool,
    #[serde(default, skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
}

impl ListNode {
    /// A fresh node that is not linked into any list yet.
    pub fn detached(id: ListNodeId, value: impl Into<String>) -> Self {
        ListNode {
            id,
            value: value.into(),
            next: None,
            prev: None,
            is_head: false,
            is_tail: false,
            roles: RoleSet::new(),
        }
    }
}

/// A linked list handed to the list generator. `nodes` is ordered head to
/// tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInput {
    pub kind: ListKind,
    pub nodes: Vec<ListNode>,
}

impl ListInput {
    pub fn empty(kind: ListKind) -> Self {
        ListInput {
            kind,
            nodes: Vec::new(),
        }
    }

    /// Builds a well-linked list, drawing ids from `ids`.
    pub fn from_values<I, S>(kind: ListKind, values: I, ids: &mut IdAllocator) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nodes: Vec<ListNode> = values
            .into_iter()
            .map(|v| ListNode::detached(ids.list_node(), v))
            .collect();
        relink(kind, &mut nodes);
        ListInput { kind, nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Values in head-to-tail order.
    pub fn values(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.value.as_str()).collect()
    }

    /// Checks that the links form exactly one chain from the head flag to the
    /// tail flag, in storage order, with `prev` mirroring `next` on doubly
    /// linked lists.
    pub fn validate(&self) -> Result<(), InputError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(InputError::DuplicateListNode { id: node.id });
            }
        }

        for node in &self.nodes {
            for link in [node.next, node.prev].into_iter().flatten() {
                if !ids.contains(&link) {
                    return Err(InputError::DanglingLink {
                        from: node.id,
                        missing: link,
                    });
                }
            }
        }

        let heads = self.nodes.iter().filter(|n| n.is_head).count();
        let tails = self.nodes.iter().filter(|n| n.is_tail).count();
        if self.nodes.is_empty() {
            return Ok(());
        }
        if heads != 1 || tails != 1 {
            return Err(InputError::InconsistentList {
                reason: format!("expected one head and one tail, found {heads} and {tails}"),
            });
        }
        if !self.nodes[0].is_head {
            return Err(InputError::InconsistentList {
                reason: format!("head flag is not on the first stored node {}", self.nodes[0].id),
            });
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            if !seen.insert(node.id) {
                return Err(InputError::CyclicList { id: node.id });
            }

            let expected_next = self.nodes.get(index + 1).map(|n| n.id);
            if node.next != expected_next {
                if let Some(next) = node.next {
                    if seen.contains(&next) {
                        return Err(InputError::CyclicList { id: next });
                    }
                }
                return Err(InputError::InconsistentList {
                    reason: format!("node {} does not link to the node stored after it", node.id),
                });
            }

            let is_last = expected_next.is_none();
            if node.is_tail != is_last {
                return Err(InputError::InconsistentList {
                    reason: format!("tail flag does not match the end of the chain at node {}", node.id),
                });
            }

            let expected_prev = match self.kind {
                ListKind::Doubly if index > 0 => Some(self.nodes[index - 1].id),
                _ => None,
            };
            if node.prev != expected_prev {
                return Err(InputError::InconsistentList {
                    reason: format!("prev link of node {} disagrees with next links", node.id),
                });
            }
        }

        Ok(())
    }

    pub fn clear_roles(&mut self) {
        for node in &mut self.nodes {
            node.roles.clear();
        }
    }
}

/// Rewrites `next`, `prev` and the head/tail flags so that `nodes` forms a
/// chain in storage order.
pub fn relink(kind: ListKind, nodes: &mut [ListNode]) {
    let ids: Vec<ListNodeId> = nodes.iter().map(|n| n.id).collect();
    let last = ids.len().saturating_sub(1);
    for (index, node) in nodes.iter_mut().enumerate() {
        node.next = ids.get(index + 1).copied();
        node.prev = if kind.is_doubly() && index > 0 {
            Some(ids[index - 1])
        } else {
            None
        };
        node.is_head = index == 0;
        node.is_tail = index == last;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(kind: ListKind) -> ListInput {
        ListInput::from_values(kind, ["10", "20", "30"], &mut IdAllocator::default())
    }

    #[test]
    fn from_values_links_in_order() {
        let l = list(ListKind::Doubly);
        assert_eq!(l.values(), vec!["10", "20", "30"]);
        assert!(l.nodes[0].is_head);
        assert!(l.nodes[2].is_tail);
        assert_eq!(l.nodes[1].prev, Some(ListNodeId(0)));
        assert_eq!(l.nodes[1].next, Some(ListNodeId(2)));
        assert!(l.validate().is_ok());
    }

    #[test]
    fn singly_lists_have_no_prev() {
        let l = list(ListKind::Singly);
        assert!(l.nodes.iter().all(|n| n.prev.is_none()));
        assert!(l.validate().is_ok());
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(ListInput::empty(ListKind::Singly).validate().is_ok());
    }

    #[test]
    fn dangling_link_is_rejected() {
        let mut l = list(ListKind::Singly);
        l.nodes[2].next = Some(ListNodeId(42));
        assert_eq!(
            l.validate(),
            Err(InputError::DanglingLink {
                from: ListNodeId(2),
                missing: ListNodeId(42)
            })
        );
    }

    #[test]
    fn cycle_is_rejected() {
        let mut l = list(ListKind::Singly);
        l.nodes[2].next = Some(ListNodeId(0));
        assert_eq!(l.validate(), Err(InputError::CyclicList { id: ListNodeId(0) }));
    }

    #[test]
    fn two_heads_are_rejected() {
        let mut l = list(ListKind::Singly);
        l.nodes[1].is_head = true;
        assert!(matches!(l.validate(), Err(InputError::InconsistentList { .. })));
    }

    #[test]
    fn prev_mismatch_is_rejected() {
        let mut l = list(ListKind::Doubly);
        l.nodes[2].prev = Some(ListNodeId(0));
        assert!(matches!(l.validate(), Err(InputError::InconsistentList { .. })));
    }

    #[test]
    fn duplicate_values_are_legal() {
        let l = ListInput::from_values(ListKind::Singly, ["7", "7"], &mut IdAllocator::default());
        assert!(l.validate().is_ok());
    }
}
