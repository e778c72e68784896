//! Advisory recommendation engine.
//!
//! Maps the tag set and score triple of a classified record to an ordered,
//! deduplicated list of advisory strings. Each concern category emits at
//! most one recommendation, and categories are evaluated in a fixed
//! priority order so the output is deterministic.

use persona_core::types::{PersonaTag, WalletFeatureRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Advice categories, listed in emission priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    /// Portfolio risk is running hot.
    RiskMitigation,
    /// Holdings are thin for the capital involved.
    Diversification,
    /// Large holdings deserve hardened custody.
    SecurityHygiene,
    /// Wallet has no on-chain footprint yet.
    Exploration,
}

impl Concern {
    /// All categories in priority order.
    pub fn all() -> [Concern; 4] {
        [
            Concern::RiskMitigation,
            Concern::Diversification,
            Concern::SecurityHygiene,
            Concern::Exploration,
        ]
    }
}

/// Thresholds for the advisory rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Risk score above which risk-mitigation advice fires.
    pub high_risk_score: u32,
    /// Net worth floor before thin holdings are worth flagging.
    pub diversification_min_networth: Decimal,
    /// Distinct-token floor for a funded wallet.
    pub diversification_min_tokens: u64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            // Matches the high-risk band of the risk score
            high_risk_score: 70,
            // Below this, concentration is not worth nagging about
            diversification_min_networth: Decimal::new(1_000, 0),
            diversification_min_tokens: 3,
        }
    }
}

/// Recommendation engine over classified wallet records.
pub struct RecommendationEngine {
    config: RecommenderConfig,
}

impl RecommendationEngine {
    /// Create a new engine with default thresholds.
    pub fn new() -> Self {
        Self {
            config: RecommenderConfig::default(),
        }
    }

    /// Create with custom thresholds.
    pub fn with_config(config: RecommenderConfig) -> Self {
        Self { config }
    }

    /// Evaluate every concern category in priority order.
    ///
    /// Returns at most one advisory string per category, with exact
    /// duplicates dropped. A record raising no concern yields an empty list.
    pub fn recommend(&self, record: &WalletFeatureRecord) -> Vec<String> {
        let mut recommendations = Vec::new();
        let mut seen = HashSet::new();

        for concern in Concern::all() {
            let advice = match concern {
                Concern::RiskMitigation => self.check_risk_mitigation(record),
                Concern::Diversification => self.check_diversification(record),
                Concern::SecurityHygiene => self.check_security_hygiene(record),
                Concern::Exploration => self.check_exploration(record),
            };

            if let Some(text) = advice {
                if seen.insert(text.clone()) {
                    recommendations.push(text);
                }
            }
        }

        debug!(
            wallet = %record.short_address(),
            count = recommendations.len(),
            "Generated recommendations"
        );

        recommendations
    }

    fn check_risk_mitigation(&self, record: &WalletFeatureRecord) -> Option<String> {
        if record.risk_score > self.config.high_risk_score {
            Some(format!(
                "Risk score {} is elevated. Consider trimming your largest position or unwinding part of your DeFi exposure.",
                record.risk_score
            ))
        } else {
            None
        }
    }

    /// Thin holdings only matter once there is real capital at stake.
    /// The first weak dimension wins, so the category emits one string.
    fn check_diversification(&self, record: &WalletFeatureRecord) -> Option<String> {
        if record.total_networth < self.config.diversification_min_networth {
            return None;
        }

        if record.token_count < self.config.diversification_min_tokens {
            return Some(format!(
                "Portfolio spans only {} token(s). Spreading across more assets would reduce concentration.",
                record.token_count
            ));
        }

        if record.defi_protocols == 0 {
            return Some(
                "No DeFi positions detected. Established lending or staking protocols could put idle balances to work."
                    .to_string(),
            );
        }

        if record.unique_nft_collections == 0 {
            return Some(
                "Holdings are entirely fungible. A small NFT allocation would diversify the portfolio profile."
                    .to_string(),
            );
        }

        None
    }

    fn check_security_hygiene(&self, record: &WalletFeatureRecord) -> Option<String> {
        if record.has_tag(PersonaTag::Whale) {
            Some(
                "Holdings of this size warrant a hardware wallet or multisig setup and a periodic review of token approvals."
                    .to_string(),
            )
        } else {
            None
        }
    }

    fn check_exploration(&self, record: &WalletFeatureRecord) -> Option<String> {
        if record.has_tag(PersonaTag::NewOrInactive) {
            Some(
                "This wallet has little on-chain history. Fund it and make a first swap to start building a track record."
                    .to_string(),
            )
        } else {
            None
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Recommend with default thresholds.
pub fn recommend(record: &WalletFeatureRecord) -> Vec<String> {
    RecommendationEngine::new().recommend(record)
}
