//! Strategy 3: the identifier-based path.
//!
//! The oEmbed endpoint gives a reliable title but no description, so a second
//! page request fills that in. When any part of that path fails the strategy
//! falls back to a bare request with a minimal user agent.

use super::{apply_rules, ExtractionResult, Strategy, StrategyContext, TITLE_NOT_FOUND};
use crate::errors::ExtractError;
use crate::fetch::{polite_delay, FetchRequest};
use crate::normalize::normalize;
use crate::patterns::first_match;
use crate::video_id::parse_video_id;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Deserialize)]
struct OembedResponse {
    title: Option<String>,
}

pub struct EmbedEndpointStrategy {
    context: StrategyContext,
}

impl EmbedEndpointStrategy {
    pub fn new(context: StrategyContext) -> Self {
        Self { context }
    }

    async fn via_oembed(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        let config = &self.context.config;
        let request = FetchRequest::get(
            &config.oembed_endpoint,
            &config.user_agents.embed,
            config.embed_timeout(),
        )
        .query("url", url)
        .query("format", "json");
        let response = self.context.fetcher.fetch(request).await?;
        if response.status != 200 {
            return Err(ExtractError::Status {
                url: response.url,
                status: response.status,
            });
        }

        let oembed: OembedResponse = serde_json::from_slice(&response.body)?;
        let title = oembed
            .title
            .map(|title| normalize(&title))
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

        let page_request =
            FetchRequest::get(url, &config.user_agents.embed, config.embed_timeout());
        let page = self.context.fetcher.fetch(page_request).await?;
        let description = first_match(&self.context.patterns.embed_description, &page.text());

        info!("oEmbed lookup succeeded");
        Ok(ExtractionResult::from_fields(Some(title), description))
    }

    async fn via_minimal_page(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        let config = &self.context.config;
        let request = FetchRequest::get(url, &config.user_agents.minimal, config.page_timeout());
        let response = self.context.fetcher.fetch(request).await?;
        info!("Using minimal page extraction");
        Ok(apply_rules(&self.context.patterns.minimal, &response.text()))
    }
}

#[async_trait]
impl Strategy for EmbedEndpointStrategy {
    fn name(&self) -> &'static str {
        "embed"
    }

    async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        let video_id =
            parse_video_id(url).ok_or_else(|| ExtractError::IdentifierParse(url.to_string()))?;
        debug!(%video_id, "Parsed video ID");

        polite_delay(self.context.config.embed_delay).await;

        match self.via_oembed(url).await {
            Ok(result) => Ok(result),
            Err(e) => {
                debug!("oEmbed path failed, falling back: {e}");
                self.via_minimal_page(url).await
            }
        }
    }
}
