//! Rule-based persona classification for wallet feature records.
//!
//! Evaluates a fixed, ordered rule list against the scored record. Every
//! matching rule fires (multi-label), the output order is the rule order,
//! and no tag can appear twice.

use persona_core::types::{PersonaTag, WalletFeatureRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for persona rule thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Net worth floor for `whale`, in USD.
    pub whale_min_networth: Decimal,

    /// Risk score floor for `degen`.
    pub degen_min_risk: u32,
    /// Activity score floor for `degen`.
    pub degen_min_activity: u32,

    /// Distinct-protocol floor for `defi_power_user`.
    pub defi_min_protocols: u64,

    /// Distinct-collection floor for `nft_collector`.
    pub collector_min_collections: u64,

    /// Activity score ceiling for `hodler`.
    pub hodler_max_activity: u32,
    /// Net worth floor for `hodler`, in USD.
    pub hodler_min_networth: Decimal,

    /// Net worth ceiling under which a silent wallet is `new_or_inactive`.
    pub inactive_max_networth: Decimal,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            // Whale: seven figures of net worth
            whale_min_networth: Decimal::new(1_000_000, 0),

            // Degen: high risk and high activity together
            degen_min_risk: 70,
            degen_min_activity: 70,

            // DeFi power user: capital across several protocols
            defi_min_protocols: 3,

            // NFT collector: several distinct collections
            collector_min_collections: 5,

            // Hodler: quiet but holding real value
            hodler_max_activity: 20,
            hodler_min_networth: Decimal::new(10_000, 0),

            // New or inactive: silent with near-zero holdings
            inactive_max_networth: Decimal::new(100, 0),
        }
    }
}

/// Persona classifier using ordered threshold rules.
pub struct PersonaClassifier {
    config: ClassifierConfig,
}

impl PersonaClassifier {
    /// Create a new classifier with default thresholds.
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    /// Create with custom thresholds.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Evaluate every rule in order against a scored record.
    pub fn classify(&self, record: &WalletFeatureRecord) -> Vec<PersonaTag> {
        let mut tags = Vec::new();

        if let Some(tag) = self.check_whale(record) {
            tags.push(tag);
        }
        if let Some(tag) = self.check_degen(record) {
            tags.push(tag);
        }
        if let Some(tag) = self.check_defi_power_user(record) {
            tags.push(tag);
        }
        if let Some(tag) = self.check_nft_collector(record) {
            tags.push(tag);
        }
        if let Some(tag) = self.check_hodler(record) {
            tags.push(tag);
        }
        if let Some(tag) = self.check_new_or_inactive(record) {
            tags.push(tag);
        }

        debug!(
            wallet = %record.short_address(),
            tags = tags.len(),
            "Classified wallet persona"
        );

        tags
    }

    fn check_whale(&self, record: &WalletFeatureRecord) -> Option<PersonaTag> {
        if record.total_networth >= self.config.whale_min_networth {
            Some(PersonaTag::Whale)
        } else {
            None
        }
    }

    fn check_degen(&self, record: &WalletFeatureRecord) -> Option<PersonaTag> {
        if record.risk_score >= self.config.degen_min_risk
            && record.activity_score >= self.config.degen_min_activity
        {
            Some(PersonaTag::Degen)
        } else {
            None
        }
    }

    fn check_defi_power_user(&self, record: &WalletFeatureRecord) -> Option<PersonaTag> {
        if record.defi_protocols >= self.config.defi_min_protocols {
            Some(PersonaTag::DefiPowerUser)
        } else {
            None
        }
    }

    fn check_nft_collector(&self, record: &WalletFeatureRecord) -> Option<PersonaTag> {
        if record.unique_nft_collections >= self.config.collector_min_collections {
            Some(PersonaTag::NftCollector)
        } else {
            None
        }
    }

    fn check_hodler(&self, record: &WalletFeatureRecord) -> Option<PersonaTag> {
        if record.activity_score <= self.config.hodler_max_activity
            && record.total_networth >= self.config.hodler_min_networth
        {
            Some(PersonaTag::Hodler)
        } else {
            None
        }
    }

    /// Zero lifetime transactions, not merely a zero activity score: a
    /// wallet that traded in the past and went quiet is not new.
    fn check_new_or_inactive(&self, record: &WalletFeatureRecord) -> Option<PersonaTag> {
        if record.total_transactions() == 0
            && record.total_networth < self.config.inactive_max_networth
        {
            Some(PersonaTag::NewOrInactive)
        } else {
            None
        }
    }
}

impl Default for PersonaClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with default thresholds.
pub fn classify(record: &WalletFeatureRecord) -> Vec<PersonaTag> {
    PersonaClassifier::new().classify(record)
}
