// ============================================================================
// OmniCore Core - Console State
// File: crates/omni-core/src/state.rs
// Description: Process-lifetime state container for the admin console
// ============================================================================

use chrono::Utc;
use omni_shared::new_id;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    normalize_code, OverrideState, PasswordReset, RoleDefinition, RoleDraft, User, UserDraft,
    UserRole, UserStatus,
};
use crate::error::DomainError;
use crate::navigation::{
    MatrixRow, MenuTree, OverrideRow, OverrideRegistry, PermissionToggle, RolePermissionMatrix,
};
use crate::seed;

/// Session-level UI state: which account role is being previewed and whether
/// the sidebar is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleState {
    pub current_role: UserRole,
    pub sidebar_collapsed: bool,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            current_role: UserRole::Administrator,
            sidebar_collapsed: false,
        }
    }
}

impl ConsoleState {
    pub fn set_role(&mut self, role: UserRole) {
        self.current_role = role;
    }

    /// Returns the new collapsed flag.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}

/// Everything the console holds in memory. Created once at startup and
/// discarded at exit; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct ConsoleStore {
    pub state: ConsoleState,
    pub menu: MenuTree,
    pub roles: Vec<RoleDefinition>,
    pub users: Vec<User>,
    pub role_permissions: RolePermissionMatrix,
    pub overrides: OverrideRegistry,
}

impl ConsoleStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store preloaded with the mock menu, roles, users and role grants.
    pub fn seeded() -> Result<Self, DomainError> {
        let store = Self {
            state: ConsoleState::default(),
            menu: seed::menu()?,
            roles: seed::roles()?,
            users: seed::users()?,
            role_permissions: seed::role_permissions(),
            overrides: OverrideRegistry::new(),
        };
        info!(
            "Console store seeded: {} menu items, {} roles, {} users",
            store.menu.len(),
            store.roles.len(),
            store.users.len()
        );
        Ok(store)
    }

    pub fn role(&self, role_id: &str) -> Result<&RoleDefinition, DomainError> {
        self.roles
            .iter()
            .find(|role| role.id == role_id)
            .ok_or_else(|| DomainError::RoleNotFound(role_id.to_string()))
    }

    pub fn user(&self, user_id: &str) -> Result<&User, DomainError> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
    }

    pub fn role_matrix(&self, role_id: &str) -> Result<Vec<MatrixRow>, DomainError> {
        self.role(role_id)?;
        Ok(self.role_permissions.rows(role_id, &self.menu))
    }

    /// Subtree toggle for a known role. An unknown menu id yields `Ok(None)`.
    pub fn toggle_role_permission(
        &mut self,
        role_id: &str,
        menu_id: &str,
    ) -> Result<Option<PermissionToggle>, DomainError> {
        self.role(role_id)?;
        Ok(self.role_permissions.toggle(role_id, &self.menu, menu_id))
    }

    pub fn override_rows(&self, user_id: &str) -> Result<Vec<OverrideRow>, DomainError> {
        self.user(user_id)?;
        Ok(self.overrides.rows(user_id, &self.menu))
    }

    pub fn set_user_override(
        &mut self,
        user_id: &str,
        menu_id: &str,
        state: OverrideState,
    ) -> Result<(), DomainError> {
        self.user(user_id)?;
        if !self.menu.contains(menu_id) {
            return Err(DomainError::MenuNotFound(menu_id.to_string()));
        }
        self.overrides.set(user_id, menu_id, state);
        Ok(())
    }

    pub fn reset_user_overrides(&mut self, user_id: &str) -> Result<(), DomainError> {
        self.user(user_id)?;
        self.overrides.reset_all(user_id);
        Ok(())
    }

    /// Removes one menu item and forgets grants and overrides that named it.
    pub fn remove_menu(&mut self, menu_id: &str) -> Result<(), DomainError> {
        self.menu.remove(menu_id)?;
        self.role_permissions.retain_known(&self.menu);
        self.overrides.retain_known(&self.menu);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Role catalog
    // ------------------------------------------------------------------

    /// Adds a custom (non-system) role with no menu grants.
    pub fn add_role(&mut self, draft: RoleDraft) -> Result<RoleDefinition, DomainError> {
        let role = draft.into_role(new_id(), false)?;
        self.ensure_unique_code(&role.code, None)?;

        info!("Role added: {} ({})", role.id, role.code);
        self.roles.push(role.clone());
        Ok(role)
    }

    /// Rewrites name, code and description. A system role keeps its code.
    pub fn update_role(&mut self, role_id: &str, draft: RoleDraft) -> Result<RoleDefinition, DomainError> {
        let current = self.role(role_id)?;
        let is_system = current.is_system;
        if is_system && normalize_code(&draft.code) != current.code {
            return Err(DomainError::SystemRoleProtected(role_id.to_string()));
        }

        let role = draft.into_role(role_id, is_system)?;
        self.ensure_unique_code(&role.code, Some(role_id))?;

        let slot = self
            .roles
            .iter_mut()
            .find(|r| r.id == role_id)
            .ok_or_else(|| DomainError::RoleNotFound(role_id.to_string()))?;
        *slot = role.clone();

        info!("Role updated: {}", role_id);
        Ok(role)
    }

    /// Deletes a custom role and its permission set. System roles stay.
    pub fn remove_role(&mut self, role_id: &str) -> Result<RoleDefinition, DomainError> {
        if self.role(role_id)?.is_system {
            return Err(DomainError::SystemRoleProtected(role_id.to_string()));
        }

        let position = self
            .roles
            .iter()
            .position(|r| r.id == role_id)
            .ok_or_else(|| DomainError::RoleNotFound(role_id.to_string()))?;
        let role = self.roles.remove(position);
        self.role_permissions.remove_role(role_id);

        info!("Role removed: {} ({})", role.id, role.code);
        Ok(role)
    }

    fn ensure_unique_code(&self, code: &str, except: Option<&str>) -> Result<(), DomainError> {
        let taken = self
            .roles
            .iter()
            .any(|r| r.code == code && Some(r.id.as_str()) != except);
        if taken {
            return Err(DomainError::DuplicateRoleCode(code.to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // User directory
    // ------------------------------------------------------------------

    pub fn add_user(&mut self, draft: UserDraft) -> Result<User, DomainError> {
        let user = User::from_draft(new_id(), draft, Utc::now().date_naive())?;
        self.ensure_unique_username(&user.username, None)?;

        info!("User added: {} ({})", user.id, user.username);
        self.users.push(user.clone());
        Ok(user)
    }

    /// Replaces the editable fields; id, creation date and last login stay.
    pub fn update_user(&mut self, user_id: &str, draft: UserDraft) -> Result<User, DomainError> {
        let current = self.user(user_id)?;
        let mut user = User::from_draft(user_id, draft, current.created_at)?;
        user.last_login = current.last_login;
        self.ensure_unique_username(&user.username, Some(user_id))?;

        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;
        *slot = user.clone();

        info!("User updated: {}", user_id);
        Ok(user)
    }

    /// Lock, unlock or park an account.
    pub fn set_user_status(&mut self, user_id: &str, status: UserStatus) -> Result<User, DomainError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;
        let previous = user.status;
        user.status = status;

        info!(
            "User {} status: {} -> {}",
            user_id,
            previous.as_str(),
            status.as_str()
        );
        Ok(user.clone())
    }

    /// Deletes a user together with their overrides.
    pub fn remove_user(&mut self, user_id: &str) -> Result<User, DomainError> {
        let position = self
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;
        let user = self.users.remove(position);
        self.overrides.remove_user(user_id);

        info!("User removed: {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Validates a reset request for a known user. Nothing is stored.
    pub fn reset_password(&self, user_id: &str, reset: &PasswordReset) -> Result<&User, DomainError> {
        let user = self.user(user_id)?;
        reset.check().map_err(DomainError::ValidationError)?;

        match reset {
            PasswordReset::Email => info!("Password reset link issued for user {}", user_id),
            PasswordReset::Manual { .. } => info!("Password set manually for user {}", user_id),
        }
        Ok(user)
    }

    fn ensure_unique_username(&self, username: &str, except: Option<&str>) -> Result<(), DomainError> {
        let taken = self
            .users
            .iter()
            .any(|u| u.username == username && Some(u.id.as_str()) != except);
        if taken {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectionState;
    use crate::navigation::ToggleAction;

    #[test]
    fn test_console_state_defaults_and_toggles() {
        let mut state = ConsoleState::default();
        assert_eq!(state.current_role, UserRole::Administrator);
        assert!(state.toggle_sidebar());
        assert!(!state.toggle_sidebar());
        state.set_role(UserRole::StandardUser);
        assert_eq!(state.current_role, UserRole::StandardUser);
    }

    #[test]
    fn test_unknown_role_and_user() {
        let mut store = ConsoleStore::seeded().unwrap();
        assert_eq!(store.role_matrix("r9"), Err(DomainError::RoleNotFound("r9".to_string())));
        assert_eq!(
            store.set_user_override("99", "m1", OverrideState::Grant),
            Err(DomainError::UserNotFound("99".to_string()))
        );
        assert_eq!(
            store.set_user_override("1", "nope", OverrideState::Grant),
            Err(DomainError::MenuNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_auditor_starts_empty_and_toggles() {
        let mut store = ConsoleStore::seeded().unwrap();
        assert!(store
            .role_matrix("r3")
            .unwrap()
            .iter()
            .all(|row| row.state == SelectionState::Unchecked));

        let toggle = store.toggle_role_permission("r3", "m3").unwrap().unwrap();
        assert_eq!(toggle.action, ToggleAction::Added);
        assert_eq!(toggle.applied.len(), 3);
        assert!(store.toggle_role_permission("r3", "ghost").unwrap().is_none());
    }

    #[test]
    fn test_remove_menu_purges_references() {
        let mut store = ConsoleStore::seeded().unwrap();
        store.set_user_override("1", "m2-1", OverrideState::Deny).unwrap();
        store.remove_menu("m2-1").unwrap();

        assert!(!store.role_permissions.permissions("r1").contains("m2-1"));
        assert!(store.overrides.overrides("1").is_empty());
    }

    #[test]
    fn test_override_rows_for_user() {
        let mut store = ConsoleStore::seeded().unwrap();
        store.set_user_override("2", "m3", OverrideState::Grant).unwrap();
        let rows = store.override_rows("2").unwrap();
        assert_eq!(rows.len(), store.menu.len());
        assert_eq!(rows.iter().find(|r| r.id == "m3").unwrap().state, OverrideState::Grant);

        store.reset_user_overrides("2").unwrap();
        assert!(store.override_rows("2").unwrap().iter().all(|r| r.state == OverrideState::Inherit));
    }

    fn draft(username: &str) -> UserDraft {
        UserDraft {
            username: username.to_string(),
            full_name: "Pham Thi H".to_string(),
            email: format!("{}@omnicore.pro", username),
            phone: String::new(),
            role: UserRole::StandardUser,
            department: "Finance".to_string(),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn test_add_and_remove_custom_role() {
        let mut store = ConsoleStore::seeded().unwrap();
        let role = store
            .add_role(RoleDraft::new("Storage Keeper", "storage keeper").with_description("Owns quotas"))
            .unwrap();
        assert_eq!(role.code, "STORAGE_KEEPER");
        assert!(!role.is_system);
        assert_eq!(store.roles.len(), 4);

        store.toggle_role_permission(&role.id, "m2").unwrap();
        assert!(!store.role_permissions.permissions(&role.id).is_empty());

        store.remove_role(&role.id).unwrap();
        assert_eq!(store.roles.len(), 3);
        assert!(store.role_permissions.permissions(&role.id).is_empty());
        assert_eq!(
            store.role_matrix(&role.id),
            Err(DomainError::RoleNotFound(role.id.clone()))
        );
    }

    #[test]
    fn test_system_roles_are_protected() {
        let mut store = ConsoleStore::seeded().unwrap();
        assert_eq!(
            store.remove_role("r1"),
            Err(DomainError::SystemRoleProtected("r1".to_string()))
        );
        assert!(store.role_permissions.permissions("r1").contains("m1"));

        let recode = RoleDraft::new("Root", "ROOT");
        assert_eq!(
            store.update_role("r1", recode),
            Err(DomainError::SystemRoleProtected("r1".to_string()))
        );

        let renamed = store
            .update_role("r1", RoleDraft::new("Root Administrator", "super admin"))
            .unwrap();
        assert_eq!(renamed.name, "Root Administrator");
        assert!(renamed.is_system);

        store.remove_role("r3").unwrap();
        assert_eq!(store.roles.len(), 2);
    }

    #[test]
    fn test_role_codes_are_unique() {
        let mut store = ConsoleStore::seeded().unwrap();
        assert_eq!(
            store.add_role(RoleDraft::new("Another Auditor", "auditor")),
            Err(DomainError::DuplicateRoleCode("AUDITOR".to_string()))
        );
        assert_eq!(
            store.update_role("r3", RoleDraft::new("Auditor", "office user")),
            Err(DomainError::DuplicateRoleCode("OFFICE_USER".to_string()))
        );
        assert!(store.update_role("r3", RoleDraft::new("Auditor", "AUDITOR")).is_ok());
    }

    #[test]
    fn test_add_update_and_remove_user() {
        let mut store = ConsoleStore::seeded().unwrap();
        let user = store.add_user(draft("phamh")).unwrap();
        assert_eq!(store.users.len(), 5);
        assert!(user.last_login.is_none());

        assert_eq!(
            store.add_user(draft("PhamH")),
            Err(DomainError::DuplicateUsername("phamh".to_string()))
        );

        let mut edit = draft("phamh");
        edit.department = "Legal".to_string();
        edit.role = UserRole::Administrator;
        let updated = store.update_user(&user.id, edit).unwrap();
        assert_eq!(updated.department, "Legal");
        assert_eq!(updated.created_at, user.created_at);

        store.set_user_override(&user.id, "m1", OverrideState::Deny).unwrap();
        store.remove_user(&user.id).unwrap();
        assert_eq!(store.users.len(), 4);
        assert!(store.overrides.overrides(&user.id).is_empty());
        assert!(matches!(store.user(&user.id), Err(DomainError::UserNotFound(_))));
    }

    #[test]
    fn test_update_user_keeps_history_and_rejects_taken_username() {
        let mut store = ConsoleStore::seeded().unwrap();
        let before = store.user("2").unwrap().clone();

        let updated = store.update_user("2", draft("thib")).unwrap();
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(updated.last_login, before.last_login);

        assert_eq!(
            store.update_user("2", draft("vana")),
            Err(DomainError::DuplicateUsername("vana".to_string()))
        );
        assert!(matches!(store.update_user("404", draft("ghost")), Err(DomainError::UserNotFound(_))));
    }

    #[test]
    fn test_lock_and_unlock_user() {
        let mut store = ConsoleStore::seeded().unwrap();
        let locked = store.set_user_status("3", UserStatus::Locked).unwrap();
        assert_eq!(locked.status, UserStatus::Locked);
        assert!(!store.user("3").unwrap().is_active());

        store.set_user_status("3", UserStatus::Active).unwrap();
        assert!(store.user("3").unwrap().is_active());
        assert!(store.set_user_status("404", UserStatus::Locked).is_err());
    }

    #[test]
    fn test_reset_password_checks_user_and_input() {
        let store = ConsoleStore::seeded().unwrap();
        assert_eq!(store.reset_password("1", &PasswordReset::Email).unwrap().email, "vana@omnicore.pro");

        let short = PasswordReset::Manual { new_password: "123".to_string() };
        assert!(matches!(store.reset_password("1", &short), Err(DomainError::ValidationError(_))));
        assert!(matches!(
            store.reset_password("404", &PasswordReset::Email),
            Err(DomainError::UserNotFound(_))
        ));
    }
}
