use axum::extract::State;
use omni_core::{ConsoleState, UserRole};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

/// GET /api/v1/session
pub async fn current_session(State(state): State<AppState>) -> ApiResult<ConsoleState> {
    Ok(ApiResponse::ok(state.store.read().state))
}

/// PUT /api/v1/session/role
pub async fn set_role(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SetRoleRequest>,
) -> ApiResult<ConsoleState> {
    let mut store = state.store.write();
    store.state.set_role(payload.role);
    Ok(ApiResponse::ok(store.state))
}

/// POST /api/v1/session/sidebar/toggle
pub async fn toggle_sidebar(State(state): State<AppState>) -> ApiResult<ConsoleState> {
    let mut store = state.store.write();
    store.state.toggle_sidebar();
    Ok(ApiResponse::ok(store.state))
}
