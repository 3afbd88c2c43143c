//! Extension point for combining role-derived state with a user override.
//!
//! The console shows the two side by side and never merges them, so no
//! precedence rule ships with this crate. Callers that need one supply a
//! [`PrecedencePolicy`].

use omni_shared::EntityId;
use serde::Serialize;

use super::role_permissions::RolePermissionSet;
use super::tree::MenuTree;
use super::user_overrides::UserOverrideMap;
use crate::domain::{OverrideState, SelectionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveAccess {
    Allowed,
    Denied,
}

pub trait PrecedencePolicy {
    fn resolve(&self, role_state: SelectionState, user_override: OverrideState) -> EffectiveAccess;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveRow {
    pub id: EntityId,
    pub role_state: SelectionState,
    pub user_override: OverrideState,
    pub access: EffectiveAccess,
}

/// Applies `policy` to every node in traversal order.
pub fn effective_rows<P: PrecedencePolicy + ?Sized>(
    tree: &MenuTree,
    role_set: &RolePermissionSet,
    overrides: &UserOverrideMap,
    policy: &P,
) -> Vec<EffectiveRow> {
    tree.visit()
        .map(|v| {
            let role_state = role_set.selection_state(v.node);
            let user_override = overrides.get(&v.node.id);
            EffectiveRow {
                id: v.node.id.clone(),
                role_state,
                user_override,
                access: policy.resolve(role_state, user_override),
            }
        })
        .collect()
}
