// ============================================================================
// OmniCore Core - Menu Item Entity
// File: crates/omni-core/src/domain/menu_item.rs
// Description: Navigation node owned by the menu tree
// ============================================================================

use omni_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Navigation node.
///
/// Children are owned by value; their order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    pub id: EntityId,

    #[validate(length(min = 1, max = 100, message = "Label must be between 1 and 100 characters"))]
    pub label: String,

    #[validate(length(min = 1, max = 255, message = "Path must be between 1 and 255 characters"))]
    pub path: String,

    #[serde(default)]
    pub icon: String,

    /// Shown in navigation or hidden, independent of any permission.
    pub is_visible: bool,

    pub parent_id: Option<EntityId>,

    #[serde(default)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Leaf node with no parent.
    pub fn new(id: impl Into<EntityId>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
            icon: String::new(),
            is_visible: true,
            parent_id: None,
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Appends `child`, rewriting its `parent_id` to this node.
    pub fn with_child(mut self, mut child: MenuItem) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Fields an administrator edits when adding or changing a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuDraft {
    #[validate(length(min = 1, max = 100, message = "Label must be between 1 and 100 characters"))]
    pub label: String,

    #[validate(length(min = 1, max = 255, message = "Path must be between 1 and 255 characters"))]
    pub path: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

fn default_visible() -> bool {
    true
}

impl MenuDraft {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            icon: String::new(),
            is_visible: true,
            parent_id: None,
        }
    }

    pub fn under(mut self, parent_id: impl Into<EntityId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Trims label, path and icon, then validates what will be stored.
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let draft = Self {
            label: self.label.trim().to_string(),
            path: self.path.trim().to_string(),
            icon: self.icon.trim().to_string(),
            ..self
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_child_sets_parent() {
        let menu = MenuItem::new("m2", "Resources", "/resources")
            .with_child(MenuItem::new("m2-1", "Files", "/resources/files"));
        assert_eq!(menu.children[0].parent_id.as_deref(), Some("m2"));
        assert!(!menu.is_leaf());
        assert!(menu.is_root());
    }

    #[test]
    fn test_draft_validation() {
        assert!(MenuDraft::new("Dashboard", "/dashboard").validate().is_ok());
        assert!(MenuDraft::new("", "/dashboard").validate().is_err());
        assert!(MenuDraft::new("Dashboard", "").validate().is_err());
    }

    #[test]
    fn test_normalized_rejects_blank_after_trim() {
        let draft = MenuDraft::new("  Logs ", " /logs ").normalized().unwrap();
        assert_eq!(draft.label, "Logs");
        assert_eq!(draft.path, "/logs");

        assert!(MenuDraft::new("   ", "/logs").normalized().is_err());
        assert!(MenuDraft::new("Logs", " \t ").normalized().is_err());
    }

    #[test]
    fn test_draft_defaults_visible() {
        let draft: MenuDraft = serde_json::from_str(r#"{"label":"Logs","path":"/logs"}"#).unwrap();
        assert!(draft.is_visible);
        assert_eq!(draft.parent_id, None);
    }
}
