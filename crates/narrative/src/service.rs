//! Narrative service with timeout and fallback.
//!
//! Wraps the configured generator so narrative generation can never sink
//! a profile request: the remote call runs under a deadline, and any
//! failure or timeout degrades to the deterministic template.

use crate::generator::{Narrative, NarrativeGenerator, NarrativeMode};
use crate::remote::RemoteNarrativeGenerator;
use crate::template::TemplateNarrativeGenerator;
use persona_core::config::NarrativeConfig;
use persona_core::types::WalletFeatureRecord;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Narrative service with a primary generator and a template fallback.
pub struct NarrativeService {
    generator: Option<Arc<dyn NarrativeGenerator>>,
    fallback: TemplateNarrativeGenerator,
    timeout: Duration,
}

impl NarrativeService {
    /// Build from configuration.
    ///
    /// Without an endpoint, or when the remote client cannot be built, the
    /// service runs template-only.
    pub fn from_config(config: &NarrativeConfig) -> Self {
        let generator: Option<Arc<dyn NarrativeGenerator>> = if config.is_enabled() {
            match RemoteNarrativeGenerator::from_config(config) {
                Ok(remote) => {
                    info!(model = %config.model, "Narrative service using remote model");
                    Some(Arc::new(remote))
                }
                Err(e) => {
                    warn!(error = %e, "Could not build remote narrative client, using templates");
                    None
                }
            }
        } else {
            info!("Narrative service running template-only");
            None
        };

        Self {
            generator,
            fallback: TemplateNarrativeGenerator::new(),
            timeout: config.request_timeout(),
        }
    }

    /// Build a service that only renders templates.
    pub fn template_only() -> Self {
        Self {
            generator: None,
            fallback: TemplateNarrativeGenerator::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build around an explicit generator with a deadline.
    pub fn with_generator(generator: Arc<dyn NarrativeGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            fallback: TemplateNarrativeGenerator::new(),
            timeout,
        }
    }

    /// Generate prose for a profiled wallet.
    ///
    /// Never fails: a generator error or a blown deadline falls back to
    /// the template render.
    pub async fn generate(&self, record: &WalletFeatureRecord, mode: NarrativeMode) -> Narrative {
        if let Some(generator) = &self.generator {
            match tokio::time::timeout(self.timeout, generator.generate(record, mode)).await {
                Ok(Ok(narrative)) => return narrative,
                Ok(Err(e)) => {
                    warn!(
                        wallet = %record.short_address(),
                        error = %e,
                        "Narrative generation failed, falling back to template"
                    );
                }
                Err(_) => {
                    warn!(
                        wallet = %record.short_address(),
                        timeout_secs = self.timeout.as_secs(),
                        "Narrative generation timed out, falling back to template"
                    );
                }
            }
        }

        self.fallback.render(record, mode)
    }
}
