//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("Menu id already exists: {0}")]
    DuplicateMenuId(String),

    #[error("Menu {id} declares parent {declared:?} but is nested under {actual:?}")]
    ParentMismatch {
        id: String,
        declared: Option<String>,
        actual: Option<String>,
    },

    #[error("Moving menu {id} under {parent_id} would create a cycle")]
    CycleDetected { id: String, parent_id: String },

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Role code already exists: {0}")]
    DuplicateRoleCode(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("System role {0} cannot be removed or recoded")]
    SystemRoleProtected(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
