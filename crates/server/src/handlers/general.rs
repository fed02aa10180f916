//! # General Route Handlers
//!
//! The embedded single-page UI and the health check.

use crate::types::HealthResponse;
use axum::{response::Html, Json};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// The handler for the root (`/`) endpoint.
pub async fn root() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Video info extractor is running".to_string(),
    })
}
