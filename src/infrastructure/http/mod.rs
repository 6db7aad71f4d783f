pub mod request_id;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, page, tts::TtsController};
use crate::domain::tts::ConfigCollector;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router
pub fn create_router(
    collector: Arc<ConfigCollector>,
    tts_controller: Arc<TtsController>,
) -> Router {
    // Form and TTS API
    let tts_routes = Router::new()
        .route("/api/tts/options", get(TtsController::options))
        .route("/api/tts/synthesize", post(TtsController::synthesize))
        .with_state(tts_controller);

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(collector)
        .merge(tts_routes)
        .fallback(page::not_found)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    collector: Arc<ConfigCollector>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(collector, tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
