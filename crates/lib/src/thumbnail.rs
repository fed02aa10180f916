//! Thumbnail lookup and download.
//!
//! Thumbnails are addressed by identifier and quality. Candidates are tried
//! best quality first and the first one that answers 200 wins.

use crate::config::ExtractorConfig;
use crate::errors::ExtractError;
use crate::fetch::{FetchRequest, PageFetcher};
use crate::video_id::VideoId;
use tracing::{debug, warn};

/// Probes each candidate with HEAD and returns the first URL that exists.
pub async fn resolve_thumbnail(
    fetcher: &dyn PageFetcher,
    config: &ExtractorConfig,
    video_id: &VideoId,
) -> Option<String> {
    for url in video_id.thumbnail_urls(&config.thumbnail_base_url) {
        let request = FetchRequest::head(&url, "", config.thumbnail_probe_timeout());
        match fetcher.fetch(request).await {
            Ok(response) if response.status == 200 => return Some(url),
            Ok(response) => debug!("Thumbnail probe {url} returned {}", response.status),
            Err(e) => debug!("Thumbnail probe {url} failed: {e}"),
        }
    }
    None
}

/// Downloads the best available thumbnail as JPEG bytes.
pub async fn download_thumbnail(
    fetcher: &dyn PageFetcher,
    config: &ExtractorConfig,
    video_id: &VideoId,
) -> Result<Vec<u8>, ExtractError> {
    for url in video_id.thumbnail_urls(&config.thumbnail_base_url) {
        let request = FetchRequest::get(&url, "", config.thumbnail_download_timeout());
        match fetcher.fetch(request).await {
            Ok(response) if response.status == 200 => return Ok(response.body),
            Ok(response) => debug!("Thumbnail {url} returned {}", response.status),
            Err(e) => warn!("Error downloading thumbnail from {url}: {e}"),
        }
    }
    Err(ExtractError::ThumbnailNotFound(video_id.to_string()))
}
