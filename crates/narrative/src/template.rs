//! Deterministic template narrative.
//!
//! Renders markdown straight from the record. Used when the remote model
//! is disabled, times out, or keeps failing, so a profile always ships
//! with some prose.

use crate::generator::{Narrative, NarrativeGenerator, NarrativeMode, NarrativeSource};
use persona_core::types::WalletFeatureRecord;
use persona_core::Result;

/// Template-based narrative generator.
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrativeGenerator;

impl TemplateNarrativeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render a narrative synchronously.
    ///
    /// The text is a pure function of the record, so repeated renders of
    /// the same record are identical.
    pub fn render(&self, record: &WalletFeatureRecord, mode: NarrativeMode) -> Narrative {
        let text = match mode {
            NarrativeMode::Detailed => render_detailed(record),
            NarrativeMode::Brief => render_brief(record),
        };
        Narrative::new(text, NarrativeSource::Template)
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for TemplateNarrativeGenerator {
    async fn generate(
        &self,
        record: &WalletFeatureRecord,
        mode: NarrativeMode,
    ) -> Result<Narrative> {
        Ok(self.render(record, mode))
    }
}

fn render_detailed(record: &WalletFeatureRecord) -> String {
    let mut text = format!("# Wallet Persona: {}\n\n", record.short_address());

    text.push_str("## Overview\n");
    text.push_str(&format!(
        "Wallet `{}` holds ${:.2} in total on {}: ${:.2} in tokens, ${:.2} in DeFi positions, and a native balance of {:.2}.\n\n",
        record.short_address(),
        record.total_networth,
        record.chain.as_deref().unwrap_or("an unknown chain"),
        record.token_balance_usd,
        record.total_defi_usd,
        record.native_balance,
    ));

    text.push_str("## Holdings\n");
    text.push_str(&format!(
        "- {} token(s) held{}\n",
        record.token_count,
        top_tokens_suffix(record)
    ));
    text.push_str(&format!(
        "- {} DeFi protocol(s) in use\n",
        record.defi_protocols
    ));
    text.push_str(&format!(
        "- {} NFT collection(s) collected\n\n",
        record.unique_nft_collections
    ));

    text.push_str("## Scores\n");
    text.push_str(&format!(
        "- Health: {} / 100\n- Risk: {} / 100\n- Activity: {} / 100\n\n",
        record.wallet_health_score, record.risk_score, record.activity_score
    ));

    text.push_str("## Persona\n");
    if record.classifications.is_empty() {
        text.push_str("No persona tags matched this wallet.\n");
    } else {
        for tag in &record.classifications {
            text.push_str(&format!("- **{}**: {}\n", tag.name(), tag.description()));
        }
    }
    text.push('\n');

    text.push_str("## Recommendations\n");
    if record.recommendations.is_empty() {
        text.push_str("No recommendations at this time.\n");
    } else {
        for (index, recommendation) in record.recommendations.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", index + 1, recommendation));
        }
    }

    text
}

fn render_brief(record: &WalletFeatureRecord) -> String {
    let tags = if record.classifications.is_empty() {
        "no persona tags".to_string()
    } else {
        record
            .classifications
            .iter()
            .map(|tag| tag.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Wallet {} holds ${:.2} across {} token(s), {} DeFi protocol(s), and {} NFT collection(s). \
         Health {} / risk {} / activity {}. Persona: {}.",
        record.short_address(),
        record.total_networth,
        record.token_count,
        record.defi_protocols,
        record.unique_nft_collections,
        record.wallet_health_score,
        record.risk_score,
        record.activity_score,
        tags,
    )
}

fn top_tokens_suffix(record: &WalletFeatureRecord) -> String {
    if record.top_tokens.is_empty() {
        String::new()
    } else {
        format!(", led by {}", record.top_tokens.join(", "))
    }
}
