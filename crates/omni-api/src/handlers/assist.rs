// ============================================================================
// OmniCore API - Assist Handlers
// File: crates/omni-api/src/handlers/assist.rs
// ============================================================================
//! Generated SRS/BRD documents, user security notes, and role suggestions.
//! Generation failures come back as placeholder text with a 200.

use axum::extract::{Path, State};
use omni_assist::{document_code, render_markdown, DocumentKind};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct DocumentRequest {
    pub kind: DocumentKind,

    #[validate(length(min = 1, max = 200, message = "Feature name must be between 1 and 200 characters"))]
    pub feature: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub code: String,
    pub kind: DocumentKind,
    pub feature: String,
    pub markdown: String,
    pub html: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoleSuggestionRequest {
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SecurityAnalysisResponse {
    pub user_id: String,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct RoleSuggestionResponse {
    pub suggestion: String,
}

/// POST /api/v1/assist/documents
pub async fn generate_document(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DocumentRequest>,
) -> ApiResult<DocumentResponse> {
    payload.validate()?;

    let feature = payload.feature.trim().to_string();
    let markdown = state.assistant.generate_document(payload.kind, &feature).await;

    Ok(ApiResponse::ok(DocumentResponse {
        code: document_code(payload.kind, &feature),
        kind: payload.kind,
        html: render_markdown(&markdown),
        markdown,
        feature,
    }))
}

/// POST /api/v1/assist/users/{user_id}/security
pub async fn analyze_user_security(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<SecurityAnalysisResponse> {
    // The read guard must be gone before the await.
    let user = {
        let store = state.store.read();
        store.user(&user_id)?.clone()
    };
    let analysis = state.assistant.analyze_user_security(&user).await;
    Ok(ApiResponse::ok(SecurityAnalysisResponse { user_id, analysis }))
}

/// POST /api/v1/assist/role-suggestion
pub async fn suggest_role(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RoleSuggestionRequest>,
) -> ApiResult<RoleSuggestionResponse> {
    payload.validate()?;
    let suggestion = state
        .assistant
        .suggest_role(&payload.department, &payload.description)
        .await;
    Ok(ApiResponse::ok(RoleSuggestionResponse { suggestion }))
}
