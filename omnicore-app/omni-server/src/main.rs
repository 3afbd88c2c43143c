use axum::http::{header, HeaderName, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{info, warn};

use omni_api::{router, AppState};
use omni_assist::GeminiClient;
use omni_core::ConsoleStore;
use omni_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry
    let _guard = omni_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    let store = if config.console.seed_mock_data {
        ConsoleStore::seeded()?
    } else {
        ConsoleStore::empty()
    };

    if std::env::var(&config.assist.api_key_env).map_or(true, |key| key.trim().is_empty()) {
        warn!(
            "{} is not set; assistant endpoints will return placeholder text",
            config.assist.api_key_env
        );
    }
    let generator = Arc::new(GeminiClient::new(config.assist.clone()));

    let state = AppState::new(config.clone(), store, generator);

    let request_id = HeaderName::from_static("x-request-id");
    let app = router(state)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
