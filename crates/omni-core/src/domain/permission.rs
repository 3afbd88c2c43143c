//! Permission value types shared by the role and user resolvers

use serde::{Deserialize, Serialize};

/// Tri-state checkbox value derived for a role over the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    Checked,
    Unchecked,
    /// Some, but not all, direct children are selected.
    Indeterminate,
}

impl SelectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionState::Checked => "checked",
            SelectionState::Unchecked => "unchecked",
            SelectionState::Indeterminate => "indeterminate",
        }
    }
}

/// Per-user, per-node override value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverrideState {
    #[default]
    Inherit,
    Grant,
    Deny,
}

impl OverrideState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideState::Inherit => "INHERIT",
            OverrideState::Grant => "GRANT",
            OverrideState::Deny => "DENY",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INHERIT" => Some(OverrideState::Inherit),
            "GRANT" => Some(OverrideState::Grant),
            "DENY" => Some(OverrideState::Deny),
            _ => None,
        }
    }

    /// Visual marker used when rendering. Carries no enforcement meaning.
    pub fn marker(&self) -> OverrideMarker {
        match self {
            OverrideState::Grant => OverrideMarker::Affirmative,
            OverrideState::Deny => OverrideMarker::Negative,
            OverrideState::Inherit => OverrideMarker::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideMarker {
    Affirmative,
    Negative,
    Neutral,
}
