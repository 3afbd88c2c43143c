//! # OmniCore Core - Domain Module
//! 
//! Domain entities for the admin console.

pub mod menu_item;
pub mod permission;
pub mod role;
pub mod user;

// Re-export all entities and enums
pub use menu_item::{MenuDraft, MenuItem};
pub use permission::{OverrideMarker, OverrideState, SelectionState};
pub use role::{normalize_code, RoleDefinition, RoleDraft, UserRole};
pub use user::{PasswordReset, User, UserDraft, UserStatus};
