//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state holds the configuration and one
//! `VideoInfoClient`, whose HTTP client and compiled patterns are shared by
//! every request.

use crate::config::AppConfig;
use std::sync::Arc;
use tubemeta::{VideoInfoClient, VideoInfoClientBuilder};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The extraction client.
    pub client: Arc<VideoInfoClient>,
}

impl AppState {
    /// Wraps an already built client, e.g. one with a mock transport.
    pub fn new(config: AppConfig, client: VideoInfoClient) -> Self {
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
        }
    }
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let client = VideoInfoClientBuilder::new()
        .config(config.extractor.clone())
        .build()?;
    Ok(AppState::new(config, client))
}
