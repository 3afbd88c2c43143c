// ============================================================================
// OmniCore Core - User Override Resolver
// File: crates/omni-core/src/navigation/user_overrides.rs
// Description: Flat per-user GRANT/DENY/INHERIT overrides
// ============================================================================

use std::collections::BTreeMap;

use omni_shared::EntityId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::tree::MenuTree;
use crate::domain::{OverrideMarker, OverrideState};

static EMPTY_MAP: UserOverrideMap = UserOverrideMap {
    overrides: BTreeMap::new(),
};

/// Per-node overrides for one user. Absent ids are `Inherit`.
///
/// Writes are point writes: nothing propagates to children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserOverrideMap {
    overrides: BTreeMap<EntityId, OverrideState>,
}

impl UserOverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node_id: &str) -> OverrideState {
        self.overrides.get(node_id).copied().unwrap_or_default()
    }

    /// Writing `Inherit` drops the entry.
    pub fn set(&mut self, node_id: impl Into<EntityId>, state: OverrideState) {
        let node_id = node_id.into();
        match state {
            OverrideState::Inherit => {
                self.overrides.remove(&node_id);
            }
            _ => {
                self.overrides.insert(node_id, state);
            }
        }
    }

    pub fn reset_all(&mut self) {
        self.overrides.clear();
    }

    /// Explicit (non-inherit) entries, ordered by node id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, OverrideState)> {
        self.overrides.iter().map(|(id, state)| (id.as_str(), *state))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// One rendered line of the override grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideRow {
    pub id: EntityId,
    pub label: String,
    pub path: String,
    pub depth: usize,
    pub state: OverrideState,
    pub marker: OverrideMarker,
}

/// Override maps of every user, keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideRegistry {
    users: BTreeMap<EntityId, UserOverrideMap>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overrides(&self, user_id: &str) -> &UserOverrideMap {
        self.users.get(user_id).unwrap_or(&EMPTY_MAP)
    }

    pub fn get(&self, user_id: &str, node_id: &str) -> OverrideState {
        self.overrides(user_id).get(node_id)
    }

    pub fn set(&mut self, user_id: &str, node_id: &str, state: OverrideState) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .set(node_id, state);
        debug!("User {} override on {} set to {}", user_id, node_id, state.as_str());
    }

    pub fn reset_all(&mut self, user_id: &str) {
        if let Some(map) = self.users.get_mut(user_id) {
            let cleared = map.len();
            map.reset_all();
            info!("User {} overrides reset ({} cleared)", user_id, cleared);
        }
    }

    /// Drops overrides on ids that no longer exist in `tree`.
    pub fn retain_known(&mut self, tree: &MenuTree) {
        for map in self.users.values_mut() {
            map.overrides.retain(|id, _| tree.contains(id));
        }
    }

    pub fn remove_user(&mut self, user_id: &str) -> Option<UserOverrideMap> {
        self.users.remove(user_id)
    }

    pub fn rows(&self, user_id: &str, tree: &MenuTree) -> Vec<OverrideRow> {
        let map = self.overrides(user_id);
        tree.visit()
            .map(|v| {
                let state = map.get(&v.node.id);
                OverrideRow {
                    id: v.node.id.clone(),
                    label: v.node.label.clone(),
                    path: v.node.path.clone(),
                    depth: v.depth,
                    state,
                    marker: state.marker(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuItem;

    fn tree() -> MenuTree {
        MenuTree::new(vec![
            MenuItem::new("m2", "Resources", "/resources")
                .with_child(MenuItem::new("m2-1", "Files", "/resources/files"))
                .with_child(MenuItem::new("m2-2", "Mapping", "/resources/mapping")),
            MenuItem::new("m4", "People", "/users"),
        ])
        .unwrap()
    }

    #[test]
    fn test_unset_ids_inherit() {
        let map = UserOverrideMap::new();
        assert_eq!(map.get("m2"), OverrideState::Inherit);
        assert_eq!(map.get("never-existed"), OverrideState::Inherit);
    }

    #[test]
    fn test_parent_override_leaves_children_untouched() {
        let mut map = UserOverrideMap::new();
        map.set("m2-1", OverrideState::Grant);
        map.set("m2", OverrideState::Deny);

        assert_eq!(map.get("m2"), OverrideState::Deny);
        assert_eq!(map.get("m2-1"), OverrideState::Grant);
        assert_eq!(map.get("m2-2"), OverrideState::Inherit);
    }

    #[test]
    fn test_set_inherit_clears_entry() {
        let mut map = UserOverrideMap::new();
        map.set("m4", OverrideState::Grant);
        map.set("m4", OverrideState::Inherit);
        assert!(map.is_empty());
        assert_eq!(map.get("m4"), OverrideState::Inherit);
    }

    #[test]
    fn test_reset_all_reverts_everything() {
        let mut map = UserOverrideMap::new();
        map.set("m2", OverrideState::Grant);
        map.set("m2-2", OverrideState::Deny);
        map.set("m4", OverrideState::Deny);
        map.reset_all();
        for id in ["m2", "m2-2", "m4"] {
            assert_eq!(map.get(id), OverrideState::Inherit);
        }
    }

    #[test]
    fn test_registry_isolates_users() {
        let mut registry = OverrideRegistry::new();
        registry.set("1", "m2", OverrideState::Deny);
        assert_eq!(registry.get("1", "m2"), OverrideState::Deny);
        assert_eq!(registry.get("2", "m2"), OverrideState::Inherit);

        registry.reset_all("2");
        assert_eq!(registry.get("1", "m2"), OverrideState::Deny);
        registry.reset_all("1");
        assert_eq!(registry.get("1", "m2"), OverrideState::Inherit);
    }

    #[test]
    fn test_rows_follow_tree_order_with_markers() {
        let mut registry = OverrideRegistry::new();
        registry.set("1", "m2-2", OverrideState::Grant);
        let rows = registry.rows("1", &tree());

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m2-1", "m2-2", "m4"]);
        assert_eq!(rows[2].marker, OverrideMarker::Affirmative);
        assert_eq!(rows[0].marker, OverrideMarker::Neutral);
        assert_eq!(rows[2].depth, 1);
    }
}
