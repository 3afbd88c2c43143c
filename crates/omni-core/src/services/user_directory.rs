// ============================================================================
// OmniCore Core - User Directory
// File: crates/omni-core/src/services/user_directory.rs
// Description: Filtering and status statistics for the user listing
// ============================================================================

use serde::de::value::StringDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{User, UserRole, UserStatus};

/// Listing filters. Every field is optional; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilters {
    /// Case-insensitive substring of full name or username.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<UserRole>,
    pub department: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<UserStatus>,
}

/// An empty filter value (`role=`) means "all", same as leaving it out.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            let value: StringDeserializer<D::Error> = value.trim().to_string().into_deserializer();
            T::deserialize(value).map(Some)
        }
        _ => Ok(None),
    }
}

impl UserFilters {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.role.is_none()
            && self.department_filter().is_none()
            && self.status.is_none()
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            if !user.full_name.to_lowercase().contains(&term)
                && !user.username.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        if self.department_filter().is_some_and(|dept| dept != user.department) {
            return false;
        }
        if self.status.is_some_and(|status| status != user.status) {
            return false;
        }
        true
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn department_filter(&self) -> Option<&str> {
        self.department.as_deref().filter(|s| !s.is_empty())
    }
}

pub fn filter_users<'a>(users: &'a [User], filters: &UserFilters) -> Vec<&'a User> {
    users.iter().filter(|user| filters.matches(user)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub locked: usize,
    pub pending: usize,
}

pub fn status_counts(users: &[User]) -> StatusCounts {
    users.iter().fold(
        StatusCounts {
            total: users.len(),
            ..StatusCounts::default()
        },
        |mut counts, user| {
            match user.status {
                UserStatus::Active => counts.active += 1,
                UserStatus::Locked => counts.locked += 1,
                UserStatus::Pending => counts.pending += 1,
            }
            counts
        },
    )
}
