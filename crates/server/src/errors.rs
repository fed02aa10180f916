use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use tubemeta::ExtractError;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request was structurally invalid. The message is returned verbatim.
    BadRequest(String),
    /// The requested resource does not exist. The message is returned verbatim.
    NotFound(String),
    /// Errors originating from `tubemeta`.
    Extract(ExtractError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `ExtractError` to `AppError`.
impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(msg) => {
                warn!("Bad request: {msg}");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Extract(err) => {
                error!("ExtractError: {:?}", err);
                match err {
                    ExtractError::ThumbnailNotFound(_) => {
                        (StatusCode::NOT_FOUND, "Thumbnail not found".to_string())
                    }
                    ExtractError::IdentifierParse(_) => {
                        (StatusCode::BAD_REQUEST, err.to_string())
                    }
                    ExtractError::Network(_)
                    | ExtractError::Status { .. }
                    | ExtractError::BlockedResponse(_) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Upstream request failed: {err}"),
                    ),
                    ExtractError::PatternNotFound(_)
                    | ExtractError::EncodingRepair(_)
                    | ExtractError::Decode(_)
                    | ExtractError::Regex(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
