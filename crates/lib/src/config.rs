//! # Extractor Configuration
//!
//! Immutable knobs for the extraction pipeline: user agents, politeness
//! delays, timeouts, the blocked-response heuristic and the endpoints the
//! strategies talk to. A single `ExtractorConfig` is built at startup and
//! shared by reference with every strategy.

use serde::Deserialize;
use std::time::Duration;

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";
pub const EMBED_USER_AGENT: &str = "Mozilla/5.0 (compatible; TubemetaExtractor/1.0)";
pub const MINIMAL_USER_AGENT: &str = "curl/7.68.0";

/// An inclusive range of milliseconds to sleep before a network request.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that never sleeps. Used by tests.
    pub const fn none() -> Self {
        Self::new(0, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.max_ms == 0
    }
}

/// The user agents sent by each fetch procedure.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UserAgents {
    pub desktop: String,
    pub mobile: String,
    pub embed: String,
    pub minimal: String,
}

impl Default for UserAgents {
    fn default() -> Self {
        Self {
            desktop: DESKTOP_USER_AGENT.to_string(),
            mobile: MOBILE_USER_AGENT.to_string(),
            embed: EMBED_USER_AGENT.to_string(),
            minimal: MINIMAL_USER_AGENT.to_string(),
        }
    }
}

/// Configuration for the whole extraction pipeline.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractorConfig {
    pub user_agents: UserAgents,
    /// Delay before the desktop and mobile page requests.
    pub page_delay: DelayRange,
    /// Delay before the oEmbed request.
    pub embed_delay: DelayRange,
    /// Delay before the tag scan request.
    pub tags_delay: DelayRange,
    pub page_timeout_secs: u64,
    pub embed_timeout_secs: u64,
    pub tags_timeout_secs: u64,
    pub thumbnail_probe_timeout_secs: u64,
    pub thumbnail_download_timeout_secs: u64,
    /// Desktop responses shorter than this many characters are treated as blocked.
    pub blocked_min_length: usize,
    /// Lowercase phrases that mark a desktop response as blocked.
    pub blocked_markers: Vec<String>,
    /// Extra phrases only the diagnostics probe looks for.
    pub diagnostic_block_markers: Vec<String>,
    pub desktop_host: String,
    pub mobile_host: String,
    pub oembed_endpoint: String,
    pub thumbnail_base_url: String,
    pub max_tags: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_agents: UserAgents::default(),
            page_delay: DelayRange::new(500, 2000),
            embed_delay: DelayRange::new(500, 2000),
            tags_delay: DelayRange::new(500, 1500),
            page_timeout_secs: 15,
            embed_timeout_secs: 10,
            tags_timeout_secs: 10,
            thumbnail_probe_timeout_secs: 5,
            thumbnail_download_timeout_secs: 10,
            blocked_min_length: 1000,
            blocked_markers: vec!["unusual traffic".to_string()],
            diagnostic_block_markers: vec![
                "unusual traffic".to_string(),
                "captcha".to_string(),
                "blocked".to_string(),
            ],
            desktop_host: "www.youtube.com".to_string(),
            mobile_host: "m.youtube.com".to_string(),
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            thumbnail_base_url: "https://img.youtube.com/vi".to_string(),
            max_tags: 20,
        }
    }
}

impl ExtractorConfig {
    /// A configuration with every politeness delay disabled.
    pub fn without_delays(mut self) -> Self {
        self.page_delay = DelayRange::none();
        self.embed_delay = DelayRange::none();
        self.tags_delay = DelayRange::none();
        self
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_secs(self.embed_timeout_secs)
    }

    pub fn tags_timeout(&self) -> Duration {
        Duration::from_secs(self.tags_timeout_secs)
    }

    pub fn thumbnail_probe_timeout(&self) -> Duration {
        Duration::from_secs(self.thumbnail_probe_timeout_secs)
    }

    pub fn thumbnail_download_timeout(&self) -> Duration {
        Duration::from_secs(self.thumbnail_download_timeout_secs)
    }

    /// Applies the desktop blocked-response heuristic to a page body.
    pub fn looks_blocked(&self, content: &str) -> bool {
        if content.chars().count() < self.blocked_min_length {
            return true;
        }
        let lower = content.to_lowercase();
        self.blocked_markers
            .iter()
            .any(|marker| lower.contains(marker.as_str()))
    }

    /// Rewrites a desktop page URL to its mobile equivalent.
    pub fn mobile_url(&self, url: &str) -> String {
        url.replace(&self.desktop_host, &self.mobile_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_blocked_short_body() {
        let config = ExtractorConfig::default();
        assert!(config.looks_blocked("<html></html>"));
    }

    #[test]
    fn test_looks_blocked_marker_is_case_insensitive() {
        let config = ExtractorConfig::default();
        let body = format!("{}Our systems have detected Unusual Traffic", "x".repeat(1200));
        assert!(config.looks_blocked(&body));
        assert!(!config.looks_blocked(&"x".repeat(1200)));
    }

    #[test]
    fn test_mobile_url_rewrite() {
        let config = ExtractorConfig::default();
        assert_eq!(
            config.mobile_url("https://www.youtube.com/watch?v=abc"),
            "https://m.youtube.com/watch?v=abc"
        );
        assert_eq!(config.mobile_url("https://youtu.be/abc"), "https://youtu.be/abc");
    }
}
