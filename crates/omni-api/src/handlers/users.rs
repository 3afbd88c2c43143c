// ============================================================================
// OmniCore API - User Handlers
// File: crates/omni-api/src/handlers/users.rs
// ============================================================================
//! User directory: listing, create/edit/remove, status changes, password
//! resets, and per-user permission overrides

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use omni_core::navigation::OverrideRow;
use omni_core::services::{filter_users, status_counts, StatusCounts, UserFilters};
use omni_core::{OverrideState, PasswordReset, User, UserDraft, UserStatus};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetOverrideRequest {
    pub state: OverrideState,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: UserStatus,
}

#[derive(Debug, Serialize)]
pub struct PasswordResetResponse {
    pub user_id: String,
    pub message: String,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<UserFilters>,
) -> ApiResult<Vec<User>> {
    let store = state.store.read();
    let users = filter_users(&store.users, &filters)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::ok(users))
}

/// GET /api/v1/users/stats
pub async fn user_stats(State(state): State<AppState>) -> ApiResult<StatusCounts> {
    let store = state.store.read();
    Ok(ApiResponse::ok(status_counts(&store.users)))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<UserDraft>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state.store.write().add_user(draft)?;
    Ok(ApiResponse::created(user))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<User> {
    let user = state.store.read().user(&user_id)?.clone();
    Ok(ApiResponse::ok(user))
}

/// PUT /api/v1/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(draft): ApiJson<UserDraft>,
) -> ApiResult<User> {
    let user = state.store.write().update_user(&user_id, draft)?;
    Ok(ApiResponse::ok(user))
}

/// DELETE /api/v1/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<User> {
    let user = state.store.write().remove_user(&user_id)?;
    Ok(ApiResponse::ok(user))
}

/// PUT /api/v1/users/{user_id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(payload): ApiJson<SetStatusRequest>,
) -> ApiResult<User> {
    let user = state.store.write().set_user_status(&user_id, payload.status)?;
    Ok(ApiResponse::ok(user))
}

/// POST /api/v1/users/{user_id}/password-reset
pub async fn reset_password(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(reset): ApiJson<PasswordReset>,
) -> ApiResult<PasswordResetResponse> {
    let store = state.store.read();
    let user = store.reset_password(&user_id, &reset)?;
    let message = match reset {
        PasswordReset::Email => format!("Reset link sent to {}", user.email),
        PasswordReset::Manual { .. } => format!("Password updated for {}", user.full_name),
    };
    Ok(ApiResponse::ok(PasswordResetResponse { user_id, message }))
}

/// GET /api/v1/users/{user_id}/overrides
pub async fn user_overrides(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<OverrideRow>> {
    let rows = state.store.read().override_rows(&user_id)?;
    Ok(ApiResponse::ok(rows))
}

/// PUT /api/v1/users/{user_id}/overrides/{menu_id}
pub async fn set_override(
    State(state): State<AppState>,
    Path((user_id, menu_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<SetOverrideRequest>,
) -> ApiResult<Vec<OverrideRow>> {
    let mut store = state.store.write();
    store.set_user_override(&user_id, &menu_id, payload.state)?;
    Ok(ApiResponse::ok(store.override_rows(&user_id)?))
}

/// DELETE /api/v1/users/{user_id}/overrides
pub async fn reset_overrides(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<OverrideRow>> {
    let mut store = state.store.write();
    store.reset_user_overrides(&user_id)?;
    Ok(ApiResponse::ok(store.override_rows(&user_id)?))
}
