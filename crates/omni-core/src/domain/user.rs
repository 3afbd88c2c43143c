// ============================================================================
// OmniCore Core - User Entity
// File: crates/omni-core/src/domain/user.rs
// ============================================================================

use chrono::NaiveDate;
use omni_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::role::UserRole;

/// Account status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Locked,
    Pending,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Locked => "locked",
            UserStatus::Pending => "pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(UserStatus::Active),
            "locked" => Some(UserStatus::Locked),
            "pending" => Some(UserStatus::Pending),
            _ => None,
        }
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Pending
    }
}

/// Console user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: EntityId,

    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 20, message = "Phone number too long"))]
    pub phone: String,

    pub role: UserRole,
    pub department: String,
    pub status: UserStatus,
    pub created_at: NaiveDate,
    pub last_login: Option<NaiveDate>,
}

impl User {
    pub fn new(
        id: impl Into<EntityId>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        department: impl Into<String>,
        created_at: NaiveDate,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: id.into(),
            username: username.into().trim().to_lowercase(),
            full_name: full_name.into().trim().to_string(),
            email: email.into().trim().to_lowercase(),
            phone: String::new(),
            role,
            department: department.into(),
            status: UserStatus::Active,
            created_at,
            last_login: None,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_last_login(mut self, last_login: NaiveDate) -> Self {
        self.last_login = Some(last_login);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Builds a user from form input; `created_at` is kept by edits.
    pub fn from_draft(
        id: impl Into<EntityId>,
        draft: UserDraft,
        created_at: NaiveDate,
    ) -> Result<Self, validator::ValidationErrors> {
        let mut user = Self::new(
            id,
            draft.username,
            draft.full_name,
            draft.email,
            draft.role,
            draft.department.trim(),
            created_at,
        )?;
        user.phone = draft.phone.trim().to_string();
        user.status = draft.status;
        user.validate()?;
        Ok(user)
    }
}

/// Fields of the user create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub department: String,
    #[serde(default = "default_status")]
    pub status: UserStatus,
}

fn default_role() -> UserRole {
    UserRole::StandardUser
}

fn default_status() -> UserStatus {
    UserStatus::Active
}

/// How an administrator resets a password. No credential is stored by the
/// console; the request is only validated and acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PasswordReset {
    /// Reset link mailed to the account address.
    Email,
    /// Administrator types the new password.
    Manual { new_password: String },
}

impl PasswordReset {
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    pub fn check(&self) -> Result<(), String> {
        match self {
            PasswordReset::Email => Ok(()),
            PasswordReset::Manual { new_password } => {
                if new_password.chars().count() < Self::MIN_PASSWORD_LENGTH {
                    Err(format!(
                        "New password must be at least {} characters",
                        Self::MIN_PASSWORD_LENGTH
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }
}
