//! Remote narrative model client.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. Rate limits
//! and server errors are retried with exponential backoff; other client
//! errors fail immediately so the caller can fall back to the template.

use crate::generator::{Narrative, NarrativeGenerator, NarrativeMode, NarrativeSource};
use crate::prompt;
use persona_core::config::NarrativeConfig;
use persona_core::types::WalletFeatureRecord;
use persona_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

/// Sampling temperature for persona prose.
const TEMPERATURE: f64 = 0.7;
/// Nucleus sampling cutoff.
const TOP_P: f64 = 0.9;

/// Client for a hosted chat-completions model.
pub struct RemoteNarrativeGenerator {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_retries: u32,
    http_client: reqwest::Client,
}

impl RemoteNarrativeGenerator {
    /// Create a client for an endpoint with default timeouts.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .connect_timeout(StdDuration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            max_retries: 2,
            http_client,
        }
    }

    /// Build from configuration; requires an endpoint to be set.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self> {
        let endpoint = config.endpoint.clone().ok_or_else(|| Error::Config {
            message: "NARRATIVE_ENDPOINT not configured".to_string(),
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(StdDuration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            endpoint,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_retries: config.max_retries,
            http_client,
        })
    }

    /// Set the bearer token sent with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Execute the completion POST with retry and exponential backoff.
    ///
    /// Retries on 5xx server errors and 429 rate-limit responses (with a
    /// longer backoff for 429). All other 4xx errors fail immediately.
    async fn post_with_retry(&self, request: &ChatRequest<'_>) -> Result<reqwest::Response> {
        let attempts = self.max_retries + 1;
        let mut last_error = None;

        for attempt in 0..attempts {
            let mut builder = self.http_client.post(&self.endpoint).json(request);
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }

            match builder.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response)
                    if response.status().as_u16() == 429 || response.status().is_server_error() =>
                {
                    let status = response.status();
                    let is_rate_limited = status.as_u16() == 429;
                    warn!(
                        attempt = attempt + 1,
                        status = %status,
                        rate_limited = is_rate_limited,
                        "Retryable narrative API error, backing off"
                    );
                    last_error = Some(Error::Narrative {
                        message: format!(
                            "{}: {}",
                            if is_rate_limited {
                                "Rate limited"
                            } else {
                                "Server error"
                            },
                            status
                        ),
                        status: Some(status.as_u16()),
                    });

                    if attempt + 1 < attempts {
                        let backoff = if is_rate_limited {
                            StdDuration::from_millis(2000 * 2u64.pow(attempt))
                        } else {
                            StdDuration::from_millis(500 * 2u64.pow(attempt))
                        };
                        tokio::time::sleep(backoff).await;
                    }
                    continue;
                }
                Ok(response) => {
                    // Client error (4xx except 429), don't retry
                    return Err(Error::Narrative {
                        message: format!("Narrative API error: {}", response.status()),
                        status: Some(response.status().as_u16()),
                    });
                }
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        error = %e,
                        "Narrative request failed, backing off"
                    );
                    last_error = Some(Error::Narrative {
                        message: format!("HTTP request error: {}", e),
                        status: None,
                    });
                }
            }

            if attempt + 1 < attempts {
                let backoff = StdDuration::from_millis(500 * 2u64.pow(attempt));
                tokio::time::sleep(backoff).await;
            }
        }

        Err(last_error.unwrap_or(Error::Narrative {
            message: "Max retries exceeded".to_string(),
            status: None,
        }))
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for RemoteNarrativeGenerator {
    async fn generate(
        &self,
        record: &WalletFeatureRecord,
        mode: NarrativeMode,
    ) -> Result<Narrative> {
        let content = prompt::build_prompt(record, mode);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &content,
            }],
            max_tokens: mode.max_tokens(),
            temperature: TEMPERATURE,
            top_p: TOP_P,
        };

        let response = self.post_with_retry(&request).await?;
        let completion: ChatResponse = response.json().await.map_err(|e| Error::Narrative {
            message: format!("Completion parse error: {}", e),
            status: None,
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Narrative {
                message: "Model returned an empty completion".to_string(),
                status: None,
            });
        }

        debug!(
            wallet = %record.short_address(),
            chars = text.len(),
            "Generated remote narrative"
        );

        Ok(Narrative::new(text, NarrativeSource::Remote))
    }
}

impl std::fmt::Debug for RemoteNarrativeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteNarrativeGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
