//! Wallet feature record produced by the profiling pipeline.

use crate::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tag::PersonaTag;

/// One point of the per-period transaction timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    /// Opaque period label from the source table (kept in table order).
    pub period: String,
    /// Total transactions observed in the period.
    pub transactions_total: u64,
}

/// Behavioral features extracted and derived for a single wallet.
///
/// Built in one pass by the extraction pipeline and never patched
/// afterwards; recomputing over the same registry yields an identical
/// record. Numeric fields default to zero and sequences to empty when the
/// underlying tables have nothing for the wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletFeatureRecord {
    /// Wallet address in canonical lowercase form.
    pub address: String,

    /// Chain label from the profile table, when present.
    pub chain: Option<String>,

    /// Linked social handle, when present.
    pub social_handle: Option<String>,

    /// Native coin balance in USD.
    pub native_balance: Decimal,

    /// Combined USD value of all token positions.
    pub token_balance_usd: Decimal,

    /// Combined USD value of all DeFi positions.
    pub total_defi_usd: Decimal,

    /// Net worth: native balance + token value + DeFi value.
    pub total_networth: Decimal,

    /// Number of distinct tokens with positive combined value.
    pub token_count: u64,

    /// Up to ten token symbols, descending by combined USD value.
    /// Ties are broken by symbol in ascending lexical order.
    pub top_tokens: Vec<String>,

    /// Number of distinct DeFi protocols with positive combined value.
    pub defi_protocols: u64,

    /// Number of distinct NFT collections held.
    pub unique_nft_collections: u64,

    /// Per-period transaction counts, in source table order.
    pub activity_timeline: Vec<ActivityPoint>,

    /// Portfolio health score, 0-100.
    pub wallet_health_score: u32,

    /// Risk exposure score, 0-100.
    pub risk_score: u32,

    /// Activity level score, 0-100.
    pub activity_score: u32,

    /// Persona tags in classifier rule order, no duplicates.
    pub classifications: Vec<PersonaTag>,

    /// Advisory texts in priority order, no duplicates.
    pub recommendations: Vec<String>,
}

impl WalletFeatureRecord {
    /// Estimated USD value attributed to each NFT collection when no
    /// appraisal data is available.
    pub const NFT_COLLECTION_USD_ESTIMATE: Decimal = Decimal::ONE_HUNDRED;

    /// Total transactions across the whole timeline.
    pub fn total_transactions(&self) -> u64 {
        self.activity_timeline
            .iter()
            .map(|point| point.transactions_total)
            .sum()
    }

    /// Abbreviated address form: first six and last four characters.
    pub fn short_address(&self) -> String {
        if self.address.len() >= 10 {
            format!(
                "{}...{}",
                &self.address[..6],
                &self.address[self.address.len() - 4..]
            )
        } else {
            self.address.clone()
        }
    }

    /// USD split of the portfolio across tokens, DeFi, and NFTs.
    pub fn portfolio_allocation(&self) -> PortfolioAllocation {
        PortfolioAllocation {
            tokens_usd: self.token_balance_usd,
            defi_usd: self.total_defi_usd,
            nft_estimate_usd: Decimal::from(self.unique_nft_collections)
                * Self::NFT_COLLECTION_USD_ESTIMATE,
        }
    }

    /// Check whether a persona tag was assigned.
    pub fn has_tag(&self, tag: PersonaTag) -> bool {
        self.classifications.contains(&tag)
    }

    /// Render the full record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// USD breakdown of a wallet portfolio by asset class.
///
/// NFT value is an estimate (collections times a flat per-collection
/// figure) since holdings carry no appraisal data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub tokens_usd: Decimal,
    pub defi_usd: Decimal,
    pub nft_estimate_usd: Decimal,
}

impl PortfolioAllocation {
    /// Combined USD value across all asset classes.
    pub fn total(&self) -> Decimal {
        self.tokens_usd + self.defi_usd + self.nft_estimate_usd
    }

    /// Check whether every asset class is empty.
    pub fn is_empty(&self) -> bool {
        self.total() == Decimal::ZERO
    }
}
