//! Narrative generation capability.
//!
//! A generator turns a profiled wallet record into markdown prose. The
//! remote implementation talks to a hosted model; the template
//! implementation renders deterministically from the record alone.

use chrono::{DateTime, Utc};
use persona_core::types::WalletFeatureRecord;
use persona_core::Result;
use serde::{Deserialize, Serialize};

/// Requested level of narrative detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeMode {
    /// Full persona write-up with sections.
    #[default]
    Detailed,
    /// A few sentences for list views.
    Brief,
}

impl NarrativeMode {
    /// Completion budget requested from the remote model.
    pub fn max_tokens(&self) -> u32 {
        match self {
            NarrativeMode::Detailed => 800,
            NarrativeMode::Brief => 300,
        }
    }
}

/// Which implementation produced a narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    /// Hosted language model.
    Remote,
    /// Deterministic template over the record.
    Template,
    /// Fixed text, used in tests.
    Static,
}

/// A generated narrative with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    /// Markdown-formatted prose.
    pub text: String,
    /// Which generator produced it.
    pub source: NarrativeSource,
    /// When it was produced.
    pub generated_at: DateTime<Utc>,
}

impl Narrative {
    /// Wrap generated text with its source.
    pub fn new(text: impl Into<String>, source: NarrativeSource) -> Self {
        Self {
            text: text.into(),
            source,
            generated_at: Utc::now(),
        }
    }
}

/// Capability to turn a feature record into prose.
#[async_trait::async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Generate markdown prose for a profiled wallet.
    async fn generate(
        &self,
        record: &WalletFeatureRecord,
        mode: NarrativeMode,
    ) -> Result<Narrative>;
}

/// Fixed-output generator for tests.
pub struct StaticNarrativeGenerator {
    text: String,
}

impl StaticNarrativeGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for StaticNarrativeGenerator {
    async fn generate(
        &self,
        _record: &WalletFeatureRecord,
        _mode: NarrativeMode,
    ) -> Result<Narrative> {
        Ok(Narrative::new(self.text.clone(), NarrativeSource::Static))
    }
}
