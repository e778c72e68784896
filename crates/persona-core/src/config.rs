//! Configuration management for the wallet persona engine.

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub narrative: NarrativeConfig,
}

/// Settings for the external narrative generator.
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    /// Chat-completions endpoint URL. Unset disables the remote generator.
    pub endpoint: Option<String>,
    /// Model identifier sent with each request.
    pub model: String,
    /// Bearer token for the endpoint, when it requires one.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Retry attempts for transient failures before falling back.
    pub max_retries: u32,
}

impl NarrativeConfig {
    /// Whether a remote generator can be constructed from this config.
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            api_key: None,
            request_timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = NarrativeConfig::default();

        Ok(Self {
            narrative: NarrativeConfig {
                endpoint: env::var("NARRATIVE_ENDPOINT").ok(),
                model: env::var("NARRATIVE_MODEL").unwrap_or(defaults.model),
                api_key: env::var("NARRATIVE_API_KEY").ok(),
                request_timeout_secs: parse_var(
                    "NARRATIVE_TIMEOUT_SECS",
                    defaults.request_timeout_secs,
                )?,
                max_retries: parse_var("NARRATIVE_MAX_RETRIES", defaults.max_retries)?,
            },
        })
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            narrative: NarrativeConfig::default(),
        }
    }
}

/// Parse an environment variable, erroring on a malformed value rather
/// than silently falling back.
#[allow(clippy::result_large_err)]
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| Error::Config {
            message: format!("{} has invalid value: {}", name, raw),
        }),
        Err(_) => Ok(default),
    }
}
