//! Presentation roles attached to elements of a recorded state.
//!
//! Roles are hints for the renderer only. They carry no algorithmic meaning
//! and every generator clears them on its private copy before an operation
//! starts.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A transient marker on one array slot, graph node/edge, tree node or list
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Element is one side of the comparison being made.
    Comparing,
    /// Element is about to move.
    Swapping,
    /// Element has reached its final position.
    Sorted,
    /// Element is the one currently examined by a search.
    Checking,
    /// Element lies inside the live binary-search window.
    Window,
    /// Element matched the search target.
    Found,
    /// Node or edge has been visited.
    Visited,
    /// Node is queued or about to be explored.
    Processing,
    /// Node is on the current path or otherwise emphasized.
    Highlighted,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Comparing => "comparing",
            Role::Swapping => "swapping",
            Role::Sorted => "sorted",
            Role::Checking => "checking",
            Role::Window => "window",
            Role::Found => "found",
            Role::Visited => "visited",
            Role::Processing => "processing",
            Role::Highlighted => "highlighted",
        };
        f.write_str(name)
    }
}

/// The set of roles held by one element.
///
/// Almost every element carries zero, one or two roles at a time, so the set
/// is stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(SmallVec<[Role; 2]>);

impl RoleSet {
    pub fn new() -> Self {
        RoleSet(SmallVec::new())
    }

    /// Adds `role`; adding a role twice is a no-op.
    pub fn insert(&mut self, role: Role) {
        if !self.0.contains(&role) {
            self.0.push(role);
        }
    }

    pub fn remove(&mut self, role: Role) {
        self.0.retain(|r| *r != role);
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut roles = RoleSet::new();
        roles.insert(Role::Visited);
        roles.insert(Role::Visited);
        assert_eq!(roles.iter().count(), 1);
    }

    #[test]
    fn remove_only_drops_named_role() {
        let mut roles: RoleSet = [Role::Processing, Role::Visited].into_iter().collect();
        roles.remove(Role::Processing);
        assert!(roles.contains(Role::Visited));
        assert!(!roles.contains(Role::Processing));
    }

    #[test]
    fn serializes_as_plain_list() {
        let roles: RoleSet = [Role::Checking, Role::Window].into_iter().collect();
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(json, r#"["checking","window"]"#);
    }
}
