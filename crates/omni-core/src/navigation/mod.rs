//! Navigation tree and the two menu permission resolvers.
//!
//! The role resolver derives tri-state selection from a per-role id set; the
//! user resolver is a flat GRANT/DENY/INHERIT map. They are independent and
//! never combined here; see [`effective`] for the extension point.

pub mod effective;
pub mod role_permissions;
pub mod tree;
pub mod user_overrides;

pub use effective::{effective_rows, EffectiveAccess, EffectiveRow, PrecedencePolicy};
pub use role_permissions::{MatrixRow, PermissionToggle, RolePermissionMatrix, RolePermissionSet, ToggleAction};
pub use tree::{FlatMenuEntry, MenuTree, ShiftDirection, Visit, Visited};
pub use user_overrides::{OverrideRegistry, OverrideRow, UserOverrideMap};
