//! Feature extraction joining per-wallet dataset rows into one record.
//!
//! Shared by the profiling service and anything else that needs raw
//! features without scores (exports, benchmarks).

use persona_core::address::WalletAddress;
use persona_core::datasets::{DatasetRegistry, DefiRow, NftRow, ProfileRow, TokenRow};
use persona_core::types::{ActivityPoint, WalletFeatureRecord};
use persona_core::Result;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Maximum number of symbols reported in `top_tokens`.
pub const TOP_TOKENS_LIMIT: usize = 10;

/// Extract the base feature record for a validated address.
///
/// Returns `None` when no table holds a single row for the wallet. Scores,
/// classifications, and recommendations are left at their defaults; the
/// rest of the pipeline fills them in.
pub fn extract_features(
    address: &WalletAddress,
    registry: &DatasetRegistry,
) -> Option<WalletFeatureRecord> {
    if !registry.has_rows_for(address) {
        debug!(wallet = %address, "No dataset rows for wallet");
        return None;
    }

    let mut record = WalletFeatureRecord {
        address: address.as_str().to_string(),
        ..Default::default()
    };

    // Token holdings: per-symbol totals, positive only, largest first
    let totals = position_totals(address, registry);
    record.token_count = totals.tokens.len() as u64;
    record.token_balance_usd = totals.tokens.iter().map(|(_, value)| *value).sum();
    record.top_tokens = totals
        .tokens
        .iter()
        .take(TOP_TOKENS_LIMIT)
        .map(|(symbol, _)| symbol.clone())
        .collect();

    // DeFi positions: per-protocol totals, same discipline
    record.defi_protocols = totals.protocols.len() as u64;
    record.total_defi_usd = totals.protocols.iter().map(|(_, value)| *value).sum();

    // NFT holdings: distinct collections, presence only
    record.unique_nft_collections = count_collections(registry.nfts_for(address));

    // Activity timeline, unmodified and in table order
    record.activity_timeline = registry
        .activity_for(address)
        .iter()
        .map(|row| ActivityPoint {
            period: row.period.clone(),
            transactions_total: row.transactions_total,
        })
        .collect();

    apply_profile(&mut record, registry.profiles_for(address));

    record.total_networth =
        record.native_balance + record.token_balance_usd + record.total_defi_usd;

    debug!(
        wallet = %record.short_address(),
        networth = %record.total_networth,
        tokens = record.token_count,
        protocols = record.defi_protocols,
        collections = record.unique_nft_collections,
        "Extracted wallet features"
    );

    Some(record)
}

/// Validate a raw address string, then extract.
///
/// Fails with `Error::InvalidAddress` before touching the registry.
pub fn extract_features_for(
    input: &str,
    registry: &DatasetRegistry,
) -> Result<Option<WalletFeatureRecord>> {
    let address = WalletAddress::parse(input)?;
    Ok(extract_features(&address, registry))
}

/// Aggregated per-position USD totals for one wallet.
///
/// Kept separate from the record so the risk scorer can see individual
/// position sizes, which the record deliberately does not carry.
#[derive(Debug, Clone, Default)]
pub struct PositionTotals {
    /// Per-symbol token totals, descending by value, symbol breaking ties.
    pub tokens: Vec<(String, Decimal)>,
    /// Per-protocol DeFi totals, same ordering.
    pub protocols: Vec<(String, Decimal)>,
}

impl PositionTotals {
    /// Largest single position across tokens and protocols.
    pub fn largest_position_usd(&self) -> Decimal {
        let top_token = self
            .tokens
            .first()
            .map(|(_, value)| *value)
            .unwrap_or_default();
        let top_protocol = self
            .protocols
            .first()
            .map(|(_, value)| *value)
            .unwrap_or_default();
        top_token.max(top_protocol)
    }
}

/// Compute per-symbol and per-protocol totals for a wallet.
pub fn position_totals(address: &WalletAddress, registry: &DatasetRegistry) -> PositionTotals {
    PositionTotals {
        tokens: aggregate_totals(
            registry
                .tokens_for(address)
                .iter()
                .map(|row: &TokenRow| (row.token_symbol.as_str(), row.usd_value)),
        ),
        protocols: aggregate_totals(
            registry
                .defi_for(address)
                .iter()
                .map(|row: &DefiRow| (row.protocol.as_str(), row.usd_value)),
        ),
    }
}

/// Sum USD per key, drop non-positive totals, order by total descending
/// with the key ascending as the tie-break.
fn aggregate_totals<'a>(
    entries: impl Iterator<Item = (&'a str, Decimal)>,
) -> Vec<(String, Decimal)> {
    let mut totals: HashMap<&'a str, Decimal> = HashMap::new();
    for (key, value) in entries {
        *totals.entry(key).or_default() += value;
    }

    let mut positive: Vec<(String, Decimal)> = totals
        .into_iter()
        .filter(|(_, total)| *total > Decimal::ZERO)
        .map(|(key, total)| (key.to_string(), total))
        .collect();
    positive.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    positive
}

/// Count distinct non-blank collection names.
fn count_collections(rows: &[NftRow]) -> u64 {
    let collections: HashSet<&str> = rows
        .iter()
        .map(|row| row.collection.trim())
        .filter(|collection| !collection.is_empty())
        .collect();
    collections.len() as u64
}

/// Apply profile metadata: first non-empty handle and chain, balance from
/// the first row with negatives clamped to zero.
fn apply_profile(record: &mut WalletFeatureRecord, rows: &[ProfileRow]) {
    record.social_handle = rows
        .iter()
        .filter_map(|row| row.social_handle.as_deref())
        .map(str::trim)
        .find(|handle| !handle.is_empty())
        .map(str::to_string);

    record.chain = rows
        .iter()
        .filter_map(|row| row.chain.as_deref())
        .map(str::trim)
        .find(|chain| !chain.is_empty())
        .map(str::to_string);

    record.native_balance = rows
        .first()
        .map(|row| row.native_balance.max(Decimal::ZERO))
        .unwrap_or_default();
}
