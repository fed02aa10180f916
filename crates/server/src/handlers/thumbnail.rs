//! # Thumbnail Handlers

use super::{AppError, AppState};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::info;
use tubemeta::VideoId;

/// Handler for `GET /api/download-thumbnail/{video_id}`.
///
/// Streams the best available thumbnail back as a JPEG attachment.
pub async fn download_thumbnail_handler(
    State(app_state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let video_id = VideoId::new(&video_id)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid video ID: '{video_id}'")))?;

    let bytes = app_state.client.download_thumbnail(&video_id).await?;
    info!("Serving thumbnail for {video_id} ({} bytes)", bytes.len());

    let headers = [
        (header::CONTENT_TYPE, "image/jpeg".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{video_id}_thumbnail.jpg\""),
        ),
    ];
    Ok((headers, bytes))
}
