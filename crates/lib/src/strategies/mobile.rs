//! Strategy 2: the mobile site, which renders a lighter page with different
//! markup and no anti-bot interstitial check.

use super::{apply_rules, ExtractionResult, Strategy, StrategyContext};
use crate::errors::ExtractError;
use crate::fetch::{polite_delay, FetchRequest};
use async_trait::async_trait;
use tracing::info;

pub struct MobilePageStrategy {
    context: StrategyContext,
}

impl MobilePageStrategy {
    pub fn new(context: StrategyContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Strategy for MobilePageStrategy {
    fn name(&self) -> &'static str {
        "mobile"
    }

    async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        let config = &self.context.config;
        polite_delay(config.page_delay).await;

        let mobile_url = config.mobile_url(url);
        let request = FetchRequest::get(&mobile_url, &config.user_agents.mobile, config.page_timeout());
        let response = self.context.fetcher.fetch(request).await?.error_for_status()?;
        let content = response.text();
        info!("Mobile page content length: {}", content.chars().count());

        Ok(apply_rules(&self.context.patterns.mobile, &content))
    }
}
