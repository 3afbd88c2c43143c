use axum::{
    routing::{get, post, put},
    Router,
};
use omni_shared::constants::API_PREFIX;
use tower_http::trace::TraceLayer;

use crate::handlers::{assist, health, menus, roles, session, users};
use crate::state::AppState;

/// Builds the console router with all routes under `/api/v1`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Menu tree
        .route("/menus", get(menus::list_menus).post(menus::create_menu))
        .route("/menus/flat", get(menus::flat_menus))
        .route("/menus/{id}", put(menus::update_menu).delete(menus::delete_menu))
        .route("/menus/{id}/visibility", post(menus::toggle_visibility))
        .route("/menus/{id}/move", post(menus::move_menu))
        .route("/menus/{id}/shift", post(menus::shift_menu))
        // Role permissions
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route("/roles/{role_id}", put(roles::update_role).delete(roles::delete_role))
        .route("/roles/{role_id}/permissions", get(roles::role_permissions))
        .route(
            "/roles/{role_id}/permissions/{menu_id}/toggle",
            post(roles::toggle_permission),
        )
        // Users and overrides
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/stats", get(users::user_stats))
        .route(
            "/users/{user_id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/users/{user_id}/status", put(users::set_status))
        .route("/users/{user_id}/password-reset", post(users::reset_password))
        .route(
            "/users/{user_id}/overrides",
            get(users::user_overrides).delete(users::reset_overrides),
        )
        .route("/users/{user_id}/overrides/{menu_id}", put(users::set_override))
        // Session
        .route("/session", get(session::current_session))
        .route("/session/role", put(session::set_role))
        .route("/session/sidebar/toggle", post(session::toggle_sidebar))
        // Assistant
        .route("/assist/documents", post(assist::generate_document))
        .route("/assist/users/{user_id}/security", post(assist::analyze_user_security))
        .route("/assist/role-suggestion", post(assist::suggest_role));

    Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
