//! Score normalization for wallet feature records.
//!
//! Converts raw aggregates into three bounded integer scores (health,
//! risk, activity). Each score is a weighted composite of components
//! normalized into [0.0, 1.0], scaled to 0-100, rounded, and clamped.
//! Absent data always yields 0, never an error.

use persona_core::types::{ActivityPoint, WalletFeatureRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};
use tracing::debug;

use crate::extractor::PositionTotals;

/// Normalized score components for one wallet, all in the 0-1 range.
///
/// Components are clamped on construction so every weighted composite
/// stays in range no matter how the weights are tuned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Token diversification: 10 distinct tokens = 1.0.
    pub token_diversity: f64,
    /// DeFi protocol breadth: 5 distinct protocols = 1.0.
    pub protocol_breadth: f64,
    /// NFT collection breadth: 10 distinct collections = 1.0.
    pub collection_breadth: f64,
    /// Net worth on a log10 curve: $10M = 1.0.
    pub networth_depth: f64,
    /// Largest single position as a share of net worth.
    pub concentration: f64,
    /// DeFi value as a share of net worth.
    pub defi_exposure: f64,
    /// Recent transaction volume on a log curve: 100 tx/period = 1.0.
    pub activity_volume: f64,
    /// Recent-half share of transaction activity (0.5 = steady).
    pub activity_trend: f64,
}

impl ScoreComponents {
    /// Normalize raw features into components.
    ///
    /// Position totals are taken separately because the record itself only
    /// carries aggregate sums, not individual position sizes.
    pub fn from_record(record: &WalletFeatureRecord, totals: &PositionTotals) -> Self {
        let networth = decimal_to_f64(record.total_networth);
        let (recent_mean, older_mean) = split_period_means(&record.activity_timeline);

        Self {
            token_diversity: (record.token_count as f64 / 10.0).clamp(0.0, 1.0),
            protocol_breadth: (record.defi_protocols as f64 / 5.0).clamp(0.0, 1.0),
            collection_breadth: (record.unique_nft_collections as f64 / 10.0).clamp(0.0, 1.0),
            networth_depth: ((1.0 + networth).log10() / 7.0).clamp(0.0, 1.0),
            concentration: share_of(totals.largest_position_usd(), record.total_networth),
            defi_exposure: share_of(record.total_defi_usd, record.total_networth),
            activity_volume: ((1.0 + recent_mean).ln() / (101.0_f64).ln()).clamp(0.0, 1.0),
            activity_trend: trend_share(recent_mean, older_mean, &record.activity_timeline),
        }
    }

    /// Portfolio health composite, 0-100.
    pub fn health(&self, weights: &HealthWeights) -> u32 {
        to_score(
            self.token_diversity * weights.tokens
                + self.protocol_breadth * weights.protocols
                + self.collection_breadth * weights.collections
                + self.networth_depth * weights.networth,
        )
    }

    /// Risk exposure composite, 0-100.
    pub fn risk(&self, weights: &RiskWeights) -> u32 {
        to_score(
            self.concentration * weights.concentration
                + self.defi_exposure * weights.defi_exposure,
        )
    }

    /// Activity level composite, 0-100.
    pub fn activity(&self, weights: &ActivityWeights) -> u32 {
        to_score(self.activity_volume * weights.volume + self.activity_trend * weights.trend)
    }
}

/// Weight table for the health composite. Weights sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthWeights {
    pub tokens: f64,
    pub protocols: f64,
    pub collections: f64,
    pub networth: f64,
}

impl HealthWeights {
    /// Net worth carries half the score; diversification the other half.
    pub const DEFAULT: Self = Self {
        tokens: 0.25,
        protocols: 0.15,
        collections: 0.10,
        networth: 0.50,
    };
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weight table for the risk composite. Weights sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    pub concentration: f64,
    pub defi_exposure: f64,
}

impl RiskWeights {
    /// Concentration dominates; DeFi exposure is the secondary signal.
    pub const DEFAULT: Self = Self {
        concentration: 0.6,
        defi_exposure: 0.4,
    };
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weight table for the activity composite. Weights sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityWeights {
    pub volume: f64,
    pub trend: f64,
}

impl ActivityWeights {
    /// Recent volume dominates; the trend direction refines it.
    pub const DEFAULT: Self = Self {
        volume: 0.7,
        trend: 0.3,
    };
}

impl Default for ActivityWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Compute all three scores with default weights and write them onto the
/// record.
pub fn apply_scores(record: &mut WalletFeatureRecord, totals: &PositionTotals) {
    let components = ScoreComponents::from_record(record, totals);

    record.wallet_health_score = components.health(&HealthWeights::DEFAULT);
    record.risk_score = components.risk(&RiskWeights::DEFAULT);
    record.activity_score = components.activity(&ActivityWeights::DEFAULT);

    debug!(
        wallet = %record.short_address(),
        health = record.wallet_health_score,
        risk = record.risk_score,
        activity = record.activity_score,
        "Scored wallet"
    );
}

/// Scale a [0, 1] composite to an integer score in [0, 100].
fn to_score(composite: f64) -> u32 {
    (composite * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Fraction of `whole` taken by `part`, clamped to [0, 1]. Zero when the
/// whole is not positive.
fn share_of(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (decimal_to_f64(part) / decimal_to_f64(whole)).clamp(0.0, 1.0)
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Mean transactions of the recent and older halves of the timeline.
/// A single-period series counts entirely as recent.
fn split_period_means(timeline: &[ActivityPoint]) -> (f64, f64) {
    if timeline.is_empty() {
        return (0.0, 0.0);
    }

    let counts: Vec<f64> = timeline
        .iter()
        .map(|point| point.transactions_total as f64)
        .collect();
    let (older, recent) = counts.split_at(counts.len() / 2);

    (mean_of(recent), mean_of(older))
}

fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Data::new(values.to_vec()).mean().unwrap_or(0.0)
}

/// Recent-half share of total activity: 0.5 = steady, 1.0 = all recent,
/// 0.0 = gone quiet. Zero for a series with no transactions at all.
fn trend_share(recent_mean: f64, older_mean: f64, timeline: &[ActivityPoint]) -> f64 {
    let total: u64 = timeline.iter().map(|point| point.transactions_total).sum();
    if total == 0 {
        return 0.0;
    }
    if timeline.len() < 2 {
        return 0.5;
    }

    let denominator = recent_mean + older_mean;
    if denominator == 0.0 {
        return 0.0;
    }
    recent_mean / denominator
}
