use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::ConfigCollector;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// The service is usable without a default key; the flag only tells the
/// operator whether users must bring their own.
pub async fn health_ready(State(collector): State<Arc<ConfigCollector>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "tts": "available",
            "default_credential": collector.has_default_credential()
        })),
    )
}
