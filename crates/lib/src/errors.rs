use thiserror::Error;

/// Custom error types for the extraction pipeline.
///
/// None of these ever reach the caller of `extract` or `extract_tags`: the
/// orchestrator and the tag scanner log them and fall back to sentinel values.
/// They do surface from the thumbnail and diagnostics helpers.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Response from {0} appears to be blocked")]
    BlockedResponse(String),
    #[error("No pattern matched for field '{0}'")]
    PatternNotFound(&'static str),
    #[error("Text repair failed: {0}")]
    EncodingRepair(String),
    #[error("Could not extract video ID from URL: {0}")]
    IdentifierParse(String),
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Thumbnail not found for video {0}")]
    ThumbnailNotFound(String),
}
