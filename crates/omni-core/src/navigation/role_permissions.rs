// ============================================================================
// OmniCore Core - Role Permission Resolver
// File: crates/omni-core/src/navigation/role_permissions.rs
// Description: Per-role granted id sets and tri-state selection derivation
// ============================================================================

use std::collections::{BTreeMap, BTreeSet};

use omni_shared::EntityId;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::tree::MenuTree;
use crate::domain::{MenuItem, SelectionState};

static EMPTY_SET: RolePermissionSet = RolePermissionSet {
    granted: BTreeSet::new(),
};

/// Ids directly granted to one role. Parent states are derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionSet {
    granted: BTreeSet<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
}

/// Result of a subtree toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionToggle {
    pub action: ToggleAction,
    /// Ids the action was applied to: the clicked node and all descendants.
    pub applied: Vec<EntityId>,
    /// How many of those actually changed membership.
    pub changed: usize,
}

impl RolePermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntityId>,
    {
        Self {
            granted: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.granted.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.granted.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// Tri-state for `node`.
    ///
    /// Only direct children's own membership is inspected, not their derived
    /// state: a selection made solely on grandchildren leaves an intermediate
    /// parent at its own membership.
    pub fn selection_state(&self, node: &MenuItem) -> SelectionState {
        let own = if self.contains(&node.id) {
            SelectionState::Checked
        } else {
            SelectionState::Unchecked
        };

        if node.children.is_empty() {
            return own;
        }

        let selected = node
            .children
            .iter()
            .filter(|child| self.contains(&child.id))
            .count();

        if selected == 0 {
            own
        } else if selected == node.children.len() {
            SelectionState::Checked
        } else {
            SelectionState::Indeterminate
        }
    }

    /// Force-sets the whole subtree at `node_id` to one membership: added when
    /// the node itself is not granted, removed otherwise.
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn toggle(&mut self, tree: &MenuTree, node_id: &str) -> Option<PermissionToggle> {
        let applied = tree.subtree_ids(node_id);
        if applied.is_empty() {
            return None;
        }

        let action = if self.contains(node_id) {
            ToggleAction::Removed
        } else {
            ToggleAction::Added
        };

        let mut changed = 0;
        for id in &applied {
            let flipped = match action {
                ToggleAction::Added => self.granted.insert(id.clone()),
                ToggleAction::Removed => self.granted.remove(id),
            };
            if flipped {
                changed += 1;
            }
        }

        Some(PermissionToggle {
            action,
            applied,
            changed,
        })
    }
}

/// One rendered line of the role matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub id: EntityId,
    pub label: String,
    pub path: String,
    pub depth: usize,
    pub state: SelectionState,
}

/// Permission sets of every role, keyed by role id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionMatrix {
    sets: BTreeMap<EntityId, RolePermissionSet>,
}

impl RolePermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roles without an entry read as the empty set.
    pub fn permissions(&self, role_id: &str) -> &RolePermissionSet {
        self.sets.get(role_id).unwrap_or(&EMPTY_SET)
    }

    pub fn replace(&mut self, role_id: impl Into<EntityId>, set: RolePermissionSet) {
        self.sets.insert(role_id.into(), set);
    }

    pub fn remove_role(&mut self, role_id: &str) -> Option<RolePermissionSet> {
        self.sets.remove(role_id)
    }

    pub fn toggle(&mut self, role_id: &str, tree: &MenuTree, node_id: &str) -> Option<PermissionToggle> {
        let outcome = self
            .sets
            .entry(role_id.to_string())
            .or_default()
            .toggle(tree, node_id)?;

        info!(
            "Role {} permission toggle on {}: {:?} {} ids ({} changed)",
            role_id,
            node_id,
            outcome.action,
            outcome.applied.len(),
            outcome.changed
        );
        Some(outcome)
    }

    /// Drops ids that no longer exist in `tree` from every role.
    pub fn retain_known(&mut self, tree: &MenuTree) {
        for set in self.sets.values_mut() {
            set.granted.retain(|id| tree.contains(id));
        }
    }

    pub fn rows(&self, role_id: &str, tree: &MenuTree) -> Vec<MatrixRow> {
        let set = self.permissions(role_id);
        tree.visit()
            .map(|v| MatrixRow {
                id: v.node.id.clone(),
                label: v.node.label.clone(),
                path: v.node.path.clone(),
                depth: v.depth,
                state: set.selection_state(v.node),
            })
            .collect()
    }
}
