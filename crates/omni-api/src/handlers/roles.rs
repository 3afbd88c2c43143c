//! Role catalog and the tri-state permission matrix

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use omni_core::navigation::{MatrixRow, ToggleAction};
use omni_core::{RoleDefinition, RoleDraft};
use omni_shared::EntityId;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// `None` when the menu id is unknown and nothing happened.
    pub action: Option<ToggleAction>,
    pub applied: Vec<EntityId>,
    pub changed: usize,
    pub rows: Vec<MatrixRow>,
}

/// GET /api/v1/roles
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Vec<RoleDefinition>> {
    let store = state.store.read();
    Ok(ApiResponse::ok(store.roles.clone()))
}

/// POST /api/v1/roles
pub async fn create_role(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<RoleDraft>,
) -> Result<(StatusCode, Json<ApiResponse<RoleDefinition>>), ApiError> {
    let role = state.store.write().add_role(draft)?;
    Ok(ApiResponse::created(role))
}

/// PUT /api/v1/roles/{role_id}
pub async fn update_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    ApiJson(draft): ApiJson<RoleDraft>,
) -> ApiResult<RoleDefinition> {
    let role = state.store.write().update_role(&role_id, draft)?;
    Ok(ApiResponse::ok(role))
}

/// DELETE /api/v1/roles/{role_id}
pub async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<RoleDefinition> {
    let role = state.store.write().remove_role(&role_id)?;
    Ok(ApiResponse::ok(role))
}

/// GET /api/v1/roles/{role_id}/permissions
pub async fn role_permissions(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Vec<MatrixRow>> {
    let rows = state.store.read().role_matrix(&role_id)?;
    Ok(ApiResponse::ok(rows))
}

/// POST /api/v1/roles/{role_id}/permissions/{menu_id}/toggle
pub async fn toggle_permission(
    State(state): State<AppState>,
    Path((role_id, menu_id)): Path<(String, String)>,
) -> ApiResult<ToggleResponse> {
    let mut store = state.store.write();
    let toggle = store.toggle_role_permission(&role_id, &menu_id)?;
    let rows = store.role_matrix(&role_id)?;

    let response = match toggle {
        Some(t) => ToggleResponse {
            action: Some(t.action),
            applied: t.applied,
            changed: t.changed,
            rows,
        },
        None => ToggleResponse {
            action: None,
            applied: Vec::new(),
            changed: 0,
            rows,
        },
    };
    Ok(ApiResponse::ok(response))
}
