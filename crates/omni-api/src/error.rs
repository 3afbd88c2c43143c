use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use omni_core::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MenuNotFound(_) | DomainError::RoleNotFound(_) | DomainError::UserNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::DuplicateMenuId(_)
            | DomainError::CycleDetected { .. }
            | DomainError::DuplicateRoleCode(_)
            | DomainError::DuplicateUsername(_)
            | DomainError::SystemRoleProtected(_) => ApiError::Conflict(err.to_string()),
            DomainError::ParentMismatch { .. } | DomainError::ValidationError(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::RoleNotFound("r9".into()), StatusCode::NOT_FOUND),
            (DomainError::UserNotFound("u9".into()), StatusCode::NOT_FOUND),
            (DomainError::MenuNotFound("m9".into()), StatusCode::NOT_FOUND),
            (
                DomainError::CycleDetected { id: "m2".into(), parent_id: "m2-1".into() },
                StatusCode::CONFLICT,
            ),
            (DomainError::ValidationError("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::SystemRoleProtected("r1".into()), StatusCode::CONFLICT),
            (DomainError::DuplicateUsername("vana".into()), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
