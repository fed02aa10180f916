//! # Tag Extraction
//!
//! Tags live in one of several JSON arrays embedded in the watch page. Each
//! array shape contributes its quoted literals in order; the combined list is
//! trimmed, deduplicated and capped.

use crate::config::ExtractorConfig;
use crate::errors::ExtractError;
use crate::fetch::{polite_delay, FetchRequest, PageFetcher};
use crate::patterns::TagPatterns;
use std::collections::HashSet;
use tracing::debug;

/// Collects up to `max` unique tags from `content`.
///
/// Only the first occurrence of each array shape is read. Returns
/// `PatternNotFound` when none of the shapes appear at all.
pub fn collect_tags(
    patterns: &TagPatterns,
    content: &str,
    max: usize,
) -> Result<Vec<String>, ExtractError> {
    let mut matched_any = false;
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for (key, regex) in &patterns.arrays {
        let Some(body) = regex.captures(content).and_then(|caps| caps.get(1)) else {
            continue;
        };
        matched_any = true;
        debug!("Found tag array '{key}'");

        for literal in patterns.literal.captures_iter(body.as_str()) {
            let tag = literal[1].trim();
            if tag.is_empty() || !seen.insert(tag.to_string()) {
                continue;
            }
            tags.push(tag.to_string());
        }
    }

    if !matched_any {
        return Err(ExtractError::PatternNotFound("tags"));
    }
    tags.truncate(max);
    Ok(tags)
}

/// Fetches the desktop page for `url` and collects its tags.
pub async fn fetch_tags(
    fetcher: &dyn PageFetcher,
    config: &ExtractorConfig,
    patterns: &TagPatterns,
    url: &str,
) -> Result<Vec<String>, ExtractError> {
    polite_delay(config.tags_delay).await;

    let request = FetchRequest::get(url, &config.user_agents.desktop, config.tags_timeout());
    let response = fetcher.fetch(request).await?.error_for_status()?;
    collect_tags(patterns, &response.text(), config.max_tags)
}
