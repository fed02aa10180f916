//! # Application Configuration
//!
//! This module defines the configuration structure for the `tubemeta-server`
//! and the logic for loading it from an optional `config.yml` file and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;
use tubemeta::ExtractorConfig;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Hosts accepted by `/api/extract`. Subdomains of a listed host are accepted too.
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,
    /// Settings for the extraction pipeline.
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_hosts: default_allowed_hosts(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Whether `host` is one of the allowed hosts or a subdomain of one.
    pub fn is_allowed_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            let allowed = allowed.to_ascii_lowercase();
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    5000
}

fn default_allowed_hosts() -> Vec<String> {
    vec!["youtube.com".to_string(), "youtu.be".to_string()]
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Every field has a default, so the file is optional unless a path is passed
/// explicitly.
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `TUBEMETA_...` variables
///   (e.g., `TUBEMETA_EXTRACTOR__BLOCKED_MIN_LENGTH`). `TUBEMETA_ALLOWED_HOSTS`
///   takes a comma separated list.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let config_path = match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            Some((path.to_string(), content))
        }
        None => {
            let default_path = format!("{base_path}/config.yml");
            read_and_substitute(&default_path)?.map(|content| (default_path, content))
        }
    };

    if let Some((path, content)) = config_path {
        info!("Loading configuration from '{path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    } else {
        info!("No config.yml found, using defaults and environment.");
    }

    let settings = builder
        // Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("TUBEMETA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("allowed_hosts"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
