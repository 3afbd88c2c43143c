// ============================================================================
// OmniCore API - Menu Handlers
// File: crates/omni-api/src/handlers/menus.rs
// ============================================================================
//! Menu tree CRUD (add, update, remove, reparent, visibility, sibling order)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use omni_core::navigation::{FlatMenuEntry, MenuTree, ShiftDirection};
use omni_core::{MenuDraft, MenuItem};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// `None` moves the item to the root level.
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShiftRequest {
    pub direction: ShiftDirection,
}

#[derive(Debug, Serialize)]
pub struct VisibilityResponse {
    pub id: String,
    pub is_visible: bool,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub id: String,
    /// Direct children lifted into the removed item's place.
    pub promoted: usize,
}

/// GET /api/v1/menus
pub async fn list_menus(State(state): State<AppState>) -> ApiResult<MenuTree> {
    let store = state.store.read();
    Ok(ApiResponse::ok(store.menu.clone()))
}

/// GET /api/v1/menus/flat
pub async fn flat_menus(State(state): State<AppState>) -> ApiResult<Vec<FlatMenuEntry>> {
    let store = state.store.read();
    Ok(ApiResponse::ok(store.menu.flatten()))
}

/// POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<MenuDraft>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    let mut store = state.store.write();
    let id = store.menu.add(draft)?;
    let item = store
        .menu
        .find(&id)
        .cloned()
        .ok_or_else(|| ApiError::InternalError(format!("menu {} vanished after insert", id)))?;
    Ok(ApiResponse::created(item))
}

/// PUT /api/v1/menus/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<MenuDraft>,
) -> ApiResult<MenuItem> {
    let mut store = state.store.write();
    store.menu.update(&id, draft)?;
    let item = store
        .menu
        .find(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Menu not found: {}", id)))?;
    Ok(ApiResponse::ok(item))
}

/// DELETE /api/v1/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<RemovedResponse> {
    let mut store = state.store.write();
    let promoted = store
        .menu
        .find(&id)
        .map(|item| item.children.len())
        .ok_or_else(|| ApiError::NotFound(format!("Menu not found: {}", id)))?;
    store.remove_menu(&id)?;

    info!("Menu {} removed, {} children promoted", id, promoted);
    Ok(ApiResponse::ok(RemovedResponse { id, promoted }))
}

/// POST /api/v1/menus/{id}/visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<VisibilityResponse> {
    let is_visible = state.store.write().menu.toggle_visibility(&id)?;
    Ok(ApiResponse::ok(VisibilityResponse { id, is_visible }))
}

/// POST /api/v1/menus/{id}/move
pub async fn move_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<MoveRequest>,
) -> ApiResult<MenuTree> {
    let mut store = state.store.write();
    store.menu.reparent(&id, payload.parent_id.as_deref())?;
    Ok(ApiResponse::ok(store.menu.clone()))
}

/// POST /api/v1/menus/{id}/shift
pub async fn shift_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ShiftRequest>,
) -> ApiResult<MenuTree> {
    let mut store = state.store.write();
    store.menu.shift(&id, payload.direction)?;
    Ok(ApiResponse::ok(store.menu.clone()))
}
