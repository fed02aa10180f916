use crate::config::ExtractorConfig;
use crate::errors::ExtractError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::orchestrator::Orchestrator;
use crate::patterns::Patterns;
use crate::strategies::{default_strategies, Strategy, StrategyContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A client that extracts video metadata through a chain of strategies.
pub struct VideoInfoClient {
    pub(crate) config: Arc<ExtractorConfig>,
    pub(crate) fetcher: Arc<dyn PageFetcher>,
    pub(crate) patterns: Arc<Patterns>,
    pub(crate) orchestrator: Orchestrator,
}

impl fmt::Debug for VideoInfoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoInfoClient")
            .field("strategies", &self.orchestrator.strategy_names())
            .field("oembed_endpoint", &self.config.oembed_endpoint)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `VideoInfoClient` instances.
///
/// Everything is optional: the defaults are the production configuration,
/// a `reqwest`-backed fetcher and the three built-in strategies.
#[derive(Default)]
pub struct VideoInfoClientBuilder {
    config: Option<ExtractorConfig>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    strategies: Option<Vec<Box<dyn Strategy>>>,
}

impl VideoInfoClientBuilder {
    /// Creates a new `VideoInfoClientBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tubemeta::VideoInfoClientBuilder;
    ///
    /// let builder = VideoInfoClientBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extractor configuration.
    pub fn config(mut self, config: ExtractorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the transport used for every outbound request.
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replaces the built-in strategy chain.
    pub fn strategies(mut self, strategies: Vec<Box<dyn Strategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Builds the `VideoInfoClient`.
    ///
    /// Fails if the HTTP client cannot be constructed or a pattern does not
    /// compile.
    pub fn build(self) -> Result<VideoInfoClient, ExtractError> {
        let config = Arc::new(self.config.unwrap_or_default());
        let fetcher: Arc<dyn PageFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new()?),
        };
        let patterns = Arc::new(Patterns::compile()?);

        let strategies = match self.strategies {
            Some(strategies) => strategies,
            None => default_strategies(&StrategyContext {
                fetcher: fetcher.clone(),
                config: config.clone(),
                patterns: patterns.clone(),
            }),
        };

        Ok(VideoInfoClient {
            config,
            fetcher,
            patterns,
            orchestrator: Orchestrator::new(strategies),
        })
    }
}

/// Everything the API returns for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
    pub video_id: Option<String>,
}
