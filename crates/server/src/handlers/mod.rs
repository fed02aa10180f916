//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `tubemeta-server`.
//! The handlers are split into sub-modules by concern: the UI and health
//! routes, metadata extraction, and thumbnails.

// Sub-modules for different handler categories.
pub mod extract;
pub mod general;
pub mod thumbnail;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use extract::*;
pub use general::*;
pub use thumbnail::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState, types::UrlRequest};
use axum::{extract::rejection::JsonRejection, Json};
use tracing::debug;

/// Pulls the URL out of a request body, rejecting a missing or blank one.
///
/// A body that is absent or not JSON counts as a missing URL.
pub(crate) fn require_url(
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected request body: {rejection}");
        AppError::BadRequest("No URL provided".to_string())
    })?;
    request
        .url()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("No URL provided".to_string()))
}
