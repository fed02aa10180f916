//! # Extraction Handlers
//!
//! `/api/extract` runs the full pipeline for one URL. `/api/debug` reports on
//! what the desktop page looks like from this host without extracting.

use super::{require_url, AppError, AppState, UrlRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;
use tubemeta::{PageDiagnostics, VideoInfo};
use url::Url;

/// Handler for `POST /api/extract`.
pub async fn extract_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<VideoInfo>, AppError> {
    let url = require_url(payload)?;

    let host_allowed = Url::parse(&url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| app_state.config.is_allowed_host(host)))
        .unwrap_or(false);
    if !host_allowed {
        return Err(AppError::BadRequest("Invalid YouTube URL".to_string()));
    }

    info!("Extracting info for URL: {url}");
    let info = app_state.client.video_info(&url).await;
    Ok(Json(info))
}

/// Handler for `POST /api/debug`.
pub async fn debug_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<PageDiagnostics>, AppError> {
    let url = require_url(payload)?;
    info!("DEBUG: Diagnosing URL: {url}");
    let report = app_state.client.diagnose(&url).await?;
    Ok(Json(report))
}
