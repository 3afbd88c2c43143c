// ============================================================================
// OmniCore Core - Role Entities
// File: crates/omni-core/src/domain/role.rs
// Description: Role catalog entries and the coarse account role
// ============================================================================

use omni_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Coarse account role carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Administrator,
    StandardUser,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Administrator => "administrator",
            UserRole::StandardUser => "standard_user",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "administrator" | "admin" => Some(UserRole::Administrator),
            "standard_user" | "user" => Some(UserRole::StandardUser),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Administrator
    }
}

/// Role catalog entry. Menu permissions are keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoleDefinition {
    pub id: EntityId,

    #[validate(length(min = 2, max = 100, message = "Role name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 50, message = "Role code must be between 2 and 50 characters"))]
    pub code: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,

    /// Built-in roles cannot be removed from the catalog.
    pub is_system: bool,
}

impl RoleDefinition {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
        is_system: bool,
    ) -> Result<Self, validator::ValidationErrors> {
        let role = Self {
            id: id.into(),
            name: name.into().trim().to_string(),
            code: normalize_code(&code.into()),
            description: description.into().trim().to_string(),
            is_system,
        };

        role.validate()?;
        Ok(role)
    }
}

/// Uppercases a role code and joins its words with `_`.
pub fn normalize_code(code: &str) -> String {
    code.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Editable fields of a catalog role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl RoleDraft {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn into_role(self, id: impl Into<EntityId>, is_system: bool) -> Result<RoleDefinition, validator::ValidationErrors> {
        RoleDefinition::new(id, self.name, self.code, self.description, is_system)
    }
}
