use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use omni_api::{router, AppState};
use omni_assist::{AssistError, GenerationRequest, TextGenerator};
use omni_core::ConsoleStore;
use omni_shared::config::AppConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Echoes the model name, or fails when built with `failing`.
struct EchoGenerator {
    failing: bool,
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AssistError> {
        if self.failing {
            return Err(AssistError::Network("offline".to_string()));
        }
        Ok(format!("# Draft\n\nmodel: {}", request.model))
    }
}

fn app_with(failing: bool) -> Router {
    let config = AppConfig::from_defaults().unwrap();
    let store = ConsoleStore::seeded().unwrap();
    router(AppState::new(config, store, Arc::new(EchoGenerator { failing })))
}

fn app() -> Router {
    app_with(false)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn state_of(rows: &Value, id: &str) -> String {
    rows.as_array()
        .unwrap()
        .iter()
        .find(|row| row["id"] == id)
        .map(|row| row["state"].as_str().unwrap().to_string())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_role_matrix_states() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/roles/r2/permissions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let rows = &body["data"];
    assert_eq!(state_of(rows, "m1"), "checked");
    assert_eq!(state_of(rows, "m2"), "indeterminate");
    assert_eq!(state_of(rows, "m2-2"), "unchecked");
    assert_eq!(state_of(rows, "m3"), "unchecked");
}

#[tokio::test]
async fn test_toggle_subtree_and_unknown_menu() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/roles/r3/permissions/m3/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["action"], "added");
    assert_eq!(body["data"]["changed"], 3);
    assert_eq!(state_of(&body["data"]["rows"], "m3"), "checked");
    assert_eq!(state_of(&body["data"]["rows"], "m3-2"), "checked");

    let (status, body) = send(&app, Method::POST, "/api/v1/roles/r3/permissions/nope/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["changed"], 0);
    assert!(body["data"]["action"].is_null());
}

#[tokio::test]
async fn test_unknown_role_is_not_found() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/roles/r404/permissions", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_menu_crud_flow() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/menus",
        Some(json!({ "label": "Reports", "path": "/reports", "parent_id": "m2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["parent_id"], "m2");
    assert_eq!(body["data"]["is_visible"], true);

    let (_, body) = send(&app, Method::POST, &format!("/api/v1/menus/{}/visibility", id), None).await;
    assert_eq!(body["data"]["is_visible"], false);

    let (status, _) = send(&app, Method::POST, "/api/v1/menus/m2/move", Some(json!({ "parent_id": "m2-1" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/menus/m2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["promoted"], 3);

    let (_, body) = send(&app, Method::GET, "/api/v1/menus/flat", None).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids[..5], ["m1", "m2-1", "m2-2", id.as_str(), "m3"]);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/menus",
        Some(json!({ "label": "", "path": "/x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_overrides_flow() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/users/2/overrides/m3-1",
        Some(json!({ "state": "GRANT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let row = body["data"].as_array().unwrap().iter().find(|r| r["id"] == "m3-1").unwrap().clone();
    assert_eq!(row["state"], "GRANT");
    assert_eq!(row["marker"], "affirmative");

    let (status, _) = send(&app, Method::PUT, "/api/v1/users/99/overrides/m1", Some(json!({ "state": "DENY" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/users/2/overrides", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().iter().all(|r| r["state"] == "INHERIT"));
}

#[tokio::test]
async fn test_user_listing_filters_and_stats() {
    let app = app();

    let (_, body) = send(&app, Method::GET, "/api/v1/users?search=VAN&department=Engineering", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["vana", "vanc"]);

    let (_, body) = send(&app, Method::GET, "/api/v1/users?role=administrator", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/v1/users/stats", None).await;
    assert_eq!(body["data"]["total"], 4);
    assert_eq!(body["data"]["active"], 4);
}

#[tokio::test]
async fn test_session_role_and_sidebar() {
    let app = app();

    let (_, body) = send(&app, Method::GET, "/api/v1/session", None).await;
    assert_eq!(body["data"]["current_role"], "administrator");
    assert_eq!(body["data"]["sidebar_collapsed"], false);

    let (_, body) = send(&app, Method::PUT, "/api/v1/session/role", Some(json!({ "role": "standard_user" }))).await;
    assert_eq!(body["data"]["current_role"], "standard_user");

    let (_, body) = send(&app, Method::POST, "/api/v1/session/sidebar/toggle", None).await;
    assert_eq!(body["data"]["sidebar_collapsed"], true);
}

#[tokio::test]
async fn test_generate_document() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/assist/documents",
        Some(json!({ "kind": "SRS", "feature": "File Management" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["code"], "SRS-FILE-MANAGEMENT-001");
    assert_eq!(body["data"]["markdown"], "# Draft\n\nmodel: gemini-3-pro-preview");
    assert!(body["data"]["html"].as_str().unwrap().contains("<h1>Draft</h1>"));
}

#[tokio::test]
async fn test_assist_failures_degrade_to_placeholders() {
    let app = app_with(true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/assist/documents",
        Some(json!({ "kind": "BRD", "feature": "Quota" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["markdown"], omni_assist::assistant::BRD_PLACEHOLDER);

    let (status, body) = send(&app, Method::POST, "/api/v1/assist/users/1/security", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["analysis"], omni_assist::assistant::SECURITY_PLACEHOLDER);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/assist/role-suggestion",
        Some(json!({ "department": "Finance", "description": "Approves invoices" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["suggestion"], omni_assist::assistant::ROLE_PLACEHOLDER);

    let (status, _) = send(&app, Method::POST, "/api/v1/assist/users/404/security", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_filters_list_everyone() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/users?search=&role=&department=&status=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, body) = send(&app, Method::GET, "/api/v1/users?role=guest", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_role_catalog_management() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/roles",
        Some(json!({ "name": "Finance Approver", "code": "finance approver" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["code"], "FINANCE_APPROVER");
    assert_eq!(body["data"]["is_system"], false);
    let role_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/roles",
        Some(json!({ "name": "Copy", "code": "FINANCE_APPROVER" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/roles/r1",
        Some(json!({ "name": "Root", "code": "ROOT" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/roles/r1",
        Some(json!({ "name": "Root", "code": "super admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Root");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/roles/r1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/api/v1/roles/{role_id}/permissions/m2/toggle");
    let (_, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(body["data"]["changed"], 3);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/roles/{role_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/roles/{role_id}/permissions"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_management_flow() {
    let app = app();
    let form = json!({
        "username": "lina",
        "full_name": "Lina Tran",
        "email": "lina@omnicore.local",
        "department": "Finance"
    });

    let (status, body) = send(&app, Method::POST, "/api/v1/users", Some(form.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "standard_user");
    assert_eq!(body["data"]["status"], "active");
    let user_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::POST, "/api/v1/users", Some(form)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{user_id}"),
        Some(json!({
            "username": "lina",
            "full_name": "Lina Tran",
            "email": "lina.tran@omnicore.local",
            "role": "administrator",
            "department": "Finance"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "lina.tran@omnicore.local");
    assert_eq!(body["data"]["role"], "administrator");

    let (status, body) = send(&app, Method::PUT, "/api/v1/users/3/status", Some(json!({ "status": "locked" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "locked");
    let (_, body) = send(&app, Method::GET, "/api/v1/users/stats", None).await;
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["locked"], 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/1/password-reset",
        Some(json!({ "method": "email" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["message"].as_str().unwrap().starts_with("Reset link sent to "));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/1/password-reset",
        Some(json!({ "method": "manual", "new_password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/users/404/password-reset",
        Some(json!({ "method": "email" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
