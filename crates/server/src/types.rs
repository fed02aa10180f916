use serde::{Deserialize, Serialize};

/// The body accepted by `/api/extract` and `/api/debug`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl UrlRequest {
    /// The trimmed URL, or `None` when it is missing or blank.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
