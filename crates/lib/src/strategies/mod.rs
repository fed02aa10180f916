//! # Extraction Strategies
//!
//! A strategy is one independent page-fetch-and-extract procedure. Each one
//! fetches its own variant of the page and runs its own rule tables, so a
//! failure in one never affects the next.

pub mod desktop;
pub mod embed;
pub mod mobile;

pub use desktop::DesktopPageStrategy;
pub use embed::EmbedEndpointStrategy;
pub use mobile::MobilePageStrategy;

use crate::config::ExtractorConfig;
use crate::errors::ExtractError;
use crate::fetch::PageFetcher;
use crate::patterns::{first_match, FieldRules, Patterns};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TITLE_NOT_FOUND: &str = "Title not found";
pub const DESCRIPTION_NOT_FOUND: &str = "Description not found";
/// Marker older callers used for a failed field. Treated like a sentinel.
pub const ERROR_MARKER: &str = "Error";

pub const ALL_METHODS_FAILED_TITLE: &str = "All extraction methods failed";
pub const ALL_METHODS_FAILED_DESCRIPTION: &str = "Could not extract video information";

/// The title and description pulled out of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub description: String,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            title: TITLE_NOT_FOUND.to_string(),
            description: DESCRIPTION_NOT_FOUND.to_string(),
        }
    }
}

impl ExtractionResult {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// The pair returned when no strategy produced a usable title.
    pub fn all_failed() -> Self {
        Self::new(ALL_METHODS_FAILED_TITLE, ALL_METHODS_FAILED_DESCRIPTION)
    }

    /// Builds a result from optional fields, filling gaps with sentinels.
    pub fn from_fields(title: Option<String>, description: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| TITLE_NOT_FOUND.to_string()),
            description: description.unwrap_or_else(|| DESCRIPTION_NOT_FOUND.to_string()),
        }
    }

    pub fn has_title(&self) -> bool {
        is_found(&self.title, TITLE_NOT_FOUND)
    }

    pub fn has_description(&self) -> bool {
        is_found(&self.description, DESCRIPTION_NOT_FOUND)
    }

    pub fn outcome(self) -> StrategyOutcome {
        StrategyOutcome {
            title_found: self.has_title(),
            description_found: self.has_description(),
            result: self,
        }
    }
}

fn is_found(value: &str, sentinel: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != sentinel && value != ERROR_MARKER
}

/// An `ExtractionResult` tagged with which fields actually hold content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOutcome {
    pub result: ExtractionResult,
    pub title_found: bool,
    pub description_found: bool,
}

impl StrategyOutcome {
    pub fn is_complete(&self) -> bool {
        self.title_found && self.description_found
    }
}

/// The shared, immutable collaborators every strategy needs.
#[derive(Clone)]
pub struct StrategyContext {
    pub fetcher: Arc<dyn PageFetcher>,
    pub config: Arc<ExtractorConfig>,
    pub patterns: Arc<Patterns>,
}

/// A generic trait for one extraction procedure.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the page for `url` and extracts title and description.
    async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError>;
}

/// Runs a title/description rule table over `content`.
pub(crate) fn apply_rules(rules: &FieldRules, content: &str) -> ExtractionResult {
    ExtractionResult::from_fields(
        first_match(&rules.title, content),
        first_match(&rules.description, content),
    )
}

/// The three built-in strategies, in the order they are tried.
pub fn default_strategies(context: &StrategyContext) -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(DesktopPageStrategy::new(context.clone())),
        Box::new(MobilePageStrategy::new(context.clone())),
        Box::new(EmbedEndpointStrategy::new(context.clone())),
    ]
}
