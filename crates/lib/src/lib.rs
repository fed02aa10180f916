//! # Video Metadata Extraction
//!
//! This crate pulls the title, description, tags and thumbnail of a public
//! video out of its watch page. The page markup is undocumented and changes
//! often, so extraction runs a chain of independent strategies (desktop page,
//! mobile page, oEmbed endpoint) and merges their partial results.

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fetch;
pub mod normalize;
pub mod orchestrator;
pub mod patterns;
pub mod strategies;
pub mod tags;
pub mod thumbnail;
pub mod types;
pub mod video_id;

pub use config::{DelayRange, ExtractorConfig};
pub use diagnostics::PageDiagnostics;
pub use errors::ExtractError;
pub use fetch::{FetchMethod, FetchRequest, FetchResponse, HttpFetcher, PageFetcher};
pub use normalize::normalize;
pub use strategies::{ExtractionResult, Strategy};
pub use types::{VideoInfo, VideoInfoClient, VideoInfoClientBuilder};
pub use video_id::{parse_video_id, VideoId};

use tracing::{info, warn};

impl VideoInfoClient {
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts title and description. Never fails; see `Orchestrator::extract`.
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        info!("[extract] Extracting info for URL: {url}");
        self.orchestrator.extract(url).await
    }

    /// Extracts up to `max_tags` unique tags. Any failure yields an empty list.
    pub async fn extract_tags(&self, url: &str) -> Vec<String> {
        match tags::fetch_tags(self.fetcher.as_ref(), &self.config, &self.patterns.tags, url).await
        {
            Ok(tags) => {
                info!("[extract_tags] Found {} tags", tags.len());
                tags
            }
            Err(e) => {
                warn!("[extract_tags] Error extracting tags: {e}");
                Vec::new()
            }
        }
    }

    /// Returns the URL of the best thumbnail that currently exists, if any.
    pub async fn resolve_thumbnail(&self, video_id: &VideoId) -> Option<String> {
        thumbnail::resolve_thumbnail(self.fetcher.as_ref(), &self.config, video_id).await
    }

    /// Downloads the best available thumbnail.
    pub async fn download_thumbnail(&self, video_id: &VideoId) -> Result<Vec<u8>, ExtractError> {
        thumbnail::download_thumbnail(self.fetcher.as_ref(), &self.config, video_id).await
    }

    /// Fetches the page once and reports what the extractor would see.
    pub async fn diagnose(&self, url: &str) -> Result<PageDiagnostics, ExtractError> {
        diagnostics::diagnose(self.fetcher.as_ref(), &self.config, &self.patterns.probes, url).await
    }

    /// Runs the full pipeline for one URL: extraction, tags and thumbnail.
    pub async fn video_info(&self, url: &str) -> VideoInfo {
        let result = self.extract(url).await;
        let tags = self.extract_tags(url).await;

        let video_id = parse_video_id(url);
        let thumbnail = match &video_id {
            Some(id) => self.resolve_thumbnail(id).await,
            None => None,
        };

        info!(
            "[video_info] Extraction completed. Title: {}",
            result.title.chars().take(50).collect::<String>()
        );
        VideoInfo {
            title: result.title,
            description: result.description,
            tags,
            thumbnail,
            video_id: video_id.map(|id| id.to_string()),
        }
    }
}
