//! # Page Diagnostics
//!
//! A one-shot report on what the desktop page looks like from this host:
//! whether it seems blocked, which markup landmarks are present, and a few
//! raw samples for each title and description probe. Used to tell whether a
//! failed extraction is a pattern drift or an anti-bot wall.

use crate::config::ExtractorConfig;
use crate::errors::ExtractError;
use crate::fetch::{FetchRequest, PageFetcher};
use crate::patterns::ProbePatterns;
use regex::Regex;
use serde::Serialize;

const SAMPLES_PER_PROBE: usize = 3;
const PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDiagnostics {
    pub url: String,
    pub response_status: u16,
    pub content_length: usize,
    pub is_likely_blocked: bool,
    pub has_video_details_json: bool,
    pub has_title_tag: bool,
    pub has_og_tags: bool,
    pub title_samples: Vec<String>,
    pub description_samples: Vec<String>,
    pub content_preview: String,
}

impl PageDiagnostics {
    /// Builds the report from a fetched page body.
    pub fn from_page(
        url: &str,
        status: u16,
        content: &str,
        config: &ExtractorConfig,
        probes: &ProbePatterns,
    ) -> Self {
        let content_length = content.chars().count();
        let lower = content.to_lowercase();
        let is_likely_blocked = content_length < config.blocked_min_length
            || config
                .diagnostic_block_markers
                .iter()
                .any(|marker| lower.contains(marker.as_str()));

        Self {
            url: url.to_string(),
            response_status: status,
            content_length,
            is_likely_blocked,
            has_video_details_json: content.contains("\"videoDetails\""),
            has_title_tag: content.contains("<title>"),
            has_og_tags: content.contains("og:title"),
            title_samples: samples(&probes.title, content),
            description_samples: samples(&probes.description, content),
            content_preview: content.chars().take(PREVIEW_CHARS).collect(),
        }
    }
}

fn samples(probes: &[Regex], content: &str) -> Vec<String> {
    probes
        .iter()
        .flat_map(|probe| {
            probe
                .captures_iter(content)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .take(SAMPLES_PER_PROBE)
        })
        .collect()
}

/// Fetches `url` once with the desktop user agent and reports on the body.
/// The status code is recorded, not checked; transport errors propagate.
pub async fn diagnose(
    fetcher: &dyn PageFetcher,
    config: &ExtractorConfig,
    probes: &ProbePatterns,
    url: &str,
) -> Result<PageDiagnostics, ExtractError> {
    let request = FetchRequest::get(url, &config.user_agents.desktop, config.page_timeout());
    let response = fetcher.fetch(request).await?;
    Ok(PageDiagnostics::from_page(
        url,
        response.status,
        &response.text(),
        config,
        probes,
    ))
}
