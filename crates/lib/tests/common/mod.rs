#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup and page fixtures for the integration tests.

use std::sync::{Arc, Once};
use tubemeta::fetch::PageFetcher;
use tubemeta::patterns::Patterns;
use tubemeta::strategies::StrategyContext;
use tubemeta::ExtractorConfig;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=abc123";
pub const MOBILE_WATCH_URL: &str = "https://m.youtube.com/watch?v=abc123";
pub const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// The production configuration with every politeness delay disabled.
pub fn test_config() -> ExtractorConfig {
    ExtractorConfig::default().without_delays()
}

pub fn context(fetcher: Arc<dyn PageFetcher>, config: ExtractorConfig) -> StrategyContext {
    StrategyContext {
        fetcher,
        config: Arc::new(config),
        patterns: Arc::new(Patterns::compile().expect("patterns compile")),
    }
}

/// A desktop watch page long enough to pass the blocked-response check.
pub fn desktop_page(title: &str, description: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{title} - YouTube</title></head><body>
<script>var ytInitialPlayerResponse = {{"videoDetails":{{"videoId":"abc123","title":"{title}","lengthSeconds":"212","keywords":["rust","async"],"shortDescription":"{description}"}}}};</script>
<div>{padding}</div></body></html>"#,
        padding = "lorem ipsum ".repeat(100),
    )
}

/// A mobile page that carries only the `<title>` and Open Graph tags.
pub fn mobile_page(title: &str, description: &str) -> String {
    format!(
        r#"<html><head><title>{title} - YouTube</title><meta property="og:description" content="{description}"></head></html>"#
    )
}
