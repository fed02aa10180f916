//! Strategy 1: the full desktop watch page.

use super::{apply_rules, ExtractionResult, Strategy, StrategyContext};
use crate::errors::ExtractError;
use crate::fetch::{polite_delay, FetchRequest};
use async_trait::async_trait;
use tracing::{info, warn};

/// Headers a desktop browser sends alongside its user agent.
pub const DESKTOP_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.5"),
    ("dnt", "1"),
];

/// Fetches the desktop page and reads the embedded player JSON first, falling
/// back to `<title>` and Open Graph tags.
pub struct DesktopPageStrategy {
    context: StrategyContext,
}

impl DesktopPageStrategy {
    pub fn new(context: StrategyContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Strategy for DesktopPageStrategy {
    fn name(&self) -> &'static str {
        "desktop"
    }

    async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        let config = &self.context.config;
        polite_delay(config.page_delay).await;

        let request = FetchRequest::get(url, &config.user_agents.desktop, config.page_timeout())
            .headers(DESKTOP_HEADERS);
        let response = self.context.fetcher.fetch(request).await?.error_for_status()?;
        let content = response.text();
        info!("Desktop page content length: {}", content.chars().count());

        if config.looks_blocked(&content) {
            warn!("Desktop request for {url} appears to be blocked");
            return Err(ExtractError::BlockedResponse(url.to_string()));
        }

        Ok(apply_rules(&self.context.patterns.desktop, &content))
    }
}
