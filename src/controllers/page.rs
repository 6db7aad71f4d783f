use axum::response::Html;

use crate::error::AppError;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / - The single-page form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Fallback for unknown routes
pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
