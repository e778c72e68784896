//! Dataset registry joining per-wallet rows across extracted tables.
//!
//! An ingestion job hands the registry one batch of rows per table
//! (tokens, defi, nfts, stats, profile). The registry indexes every table
//! by normalized wallet address so the extraction pipeline can join all
//! rows for one wallet without scanning. A missing table is just an empty
//! table; nothing here fails on absent data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::address::WalletAddress;

/// A token-holding row from the `tokens` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRow {
    /// Owning wallet address, any casing.
    pub wallet: String,
    /// Token ticker symbol.
    pub token_symbol: String,
    /// Position value in USD.
    pub usd_value: Decimal,
}

impl TokenRow {
    pub fn new(wallet: &str, token_symbol: &str, usd_value: Decimal) -> Self {
        Self {
            wallet: wallet.to_string(),
            token_symbol: token_symbol.to_string(),
            usd_value,
        }
    }
}

/// A DeFi position row from the `defi` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefiRow {
    /// Owning wallet address, any casing.
    pub wallet: String,
    /// Protocol name.
    pub protocol: String,
    /// Position value in USD.
    pub usd_value: Decimal,
}

impl DefiRow {
    pub fn new(wallet: &str, protocol: &str, usd_value: Decimal) -> Self {
        Self {
            wallet: wallet.to_string(),
            protocol: protocol.to_string(),
            usd_value,
        }
    }
}

/// An NFT-holding row from the `nfts` table. Presence only, no appraisal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftRow {
    /// Owning wallet address, any casing.
    pub wallet: String,
    /// Collection name.
    pub collection: String,
}

impl NftRow {
    pub fn new(wallet: &str, collection: &str) -> Self {
        Self {
            wallet: wallet.to_string(),
            collection: collection.to_string(),
        }
    }
}

/// A per-period activity row from the `stats` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    /// Owning wallet address, any casing.
    pub wallet: String,
    /// Opaque period label. Rows are kept in table order, so labels only
    /// need to be consistently ordered by the producer.
    pub period: String,
    /// Transactions observed in the period.
    pub transactions_total: u64,
}

impl ActivityRow {
    pub fn new(wallet: &str, period: &str, transactions_total: u64) -> Self {
        Self {
            wallet: wallet.to_string(),
            period: period.to_string(),
            transactions_total,
        }
    }
}

/// A wallet metadata row from the `profile` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Owning wallet address, any casing.
    pub wallet: String,
    /// Linked social handle, when known.
    pub social_handle: Option<String>,
    /// Native coin balance in USD.
    pub native_balance: Decimal,
    /// Chain label, when known.
    pub chain: Option<String>,
}

impl ProfileRow {
    pub fn new(wallet: &str, native_balance: Decimal) -> Self {
        Self {
            wallet: wallet.to_string(),
            social_handle: None,
            native_balance,
            chain: None,
        }
    }

    /// Set the social handle.
    pub fn with_social_handle(mut self, handle: &str) -> Self {
        self.social_handle = Some(handle.to_string());
        self
    }

    /// Set the chain label.
    pub fn with_chain(mut self, chain: &str) -> Self {
        self.chain = Some(chain.to_string());
        self
    }
}

/// Per-table row totals for a built registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub tokens: usize,
    pub defi: usize,
    pub nfts: usize,
    pub activity: usize,
    pub profiles: usize,
}

impl RowCounts {
    /// Total rows across all tables.
    pub fn total(&self) -> usize {
        self.tokens + self.defi + self.nfts + self.activity + self.profiles
    }
}

/// Collects table rows and builds an indexed [`DatasetRegistry`].
#[derive(Debug, Default)]
pub struct DatasetRegistryBuilder {
    tokens: Vec<TokenRow>,
    defi: Vec<DefiRow>,
    nfts: Vec<NftRow>,
    activity: Vec<ActivityRow>,
    profiles: Vec<ProfileRow>,
}

impl DatasetRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the `tokens` table.
    pub fn tokens(mut self, rows: Vec<TokenRow>) -> Self {
        self.tokens = rows;
        self
    }

    /// Supply the `defi` table.
    pub fn defi(mut self, rows: Vec<DefiRow>) -> Self {
        self.defi = rows;
        self
    }

    /// Supply the `nfts` table.
    pub fn nfts(mut self, rows: Vec<NftRow>) -> Self {
        self.nfts = rows;
        self
    }

    /// Supply the `stats` table.
    pub fn activity(mut self, rows: Vec<ActivityRow>) -> Self {
        self.activity = rows;
        self
    }

    /// Supply the `profile` table.
    pub fn profiles(mut self, rows: Vec<ProfileRow>) -> Self {
        self.profiles = rows;
        self
    }

    /// Index all supplied rows by normalized wallet address.
    pub fn build(self) -> DatasetRegistry {
        let counts = RowCounts {
            tokens: self.tokens.len(),
            defi: self.defi.len(),
            nfts: self.nfts.len(),
            activity: self.activity.len(),
            profiles: self.profiles.len(),
        };

        let registry = DatasetRegistry {
            tokens: index_rows(self.tokens, |row| &row.wallet),
            defi: index_rows(self.defi, |row| &row.wallet),
            nfts: index_rows(self.nfts, |row| &row.wallet),
            activity: index_rows(self.activity, |row| &row.wallet),
            profiles: index_rows(self.profiles, |row| &row.wallet),
            counts,
            built_at: Utc::now(),
        };

        info!(
            tokens = counts.tokens,
            defi = counts.defi,
            nfts = counts.nfts,
            activity = counts.activity,
            profiles = counts.profiles,
            wallets = registry.wallet_count(),
            "Built dataset registry"
        );

        registry
    }
}

/// Group rows by normalized wallet key, preserving input order per wallet.
fn index_rows<R, F>(rows: Vec<R>, wallet: F) -> HashMap<String, Vec<R>>
where
    F: Fn(&R) -> &str,
{
    let mut indexed: HashMap<String, Vec<R>> = HashMap::new();
    for row in rows {
        let key = normalize_key(wallet(&row));
        indexed.entry(key).or_default().push(row);
    }
    indexed
}

/// Lookup key for a raw wallet column value. Rows that do not carry a
/// parseable address simply never match a validated lookup.
fn normalize_key(wallet: &str) -> String {
    wallet.trim().to_lowercase()
}

/// Immutable, address-indexed snapshot of all extracted tables.
pub struct DatasetRegistry {
    tokens: HashMap<String, Vec<TokenRow>>,
    defi: HashMap<String, Vec<DefiRow>>,
    nfts: HashMap<String, Vec<NftRow>>,
    activity: HashMap<String, Vec<ActivityRow>>,
    profiles: HashMap<String, Vec<ProfileRow>>,
    counts: RowCounts,
    built_at: DateTime<Utc>,
}

impl DatasetRegistry {
    pub fn builder() -> DatasetRegistryBuilder {
        DatasetRegistryBuilder::new()
    }

    /// A registry with no rows in any table.
    pub fn empty() -> Self {
        Self::builder().build()
    }

    /// Token rows for a wallet, empty when the table has none.
    pub fn tokens_for(&self, address: &WalletAddress) -> &[TokenRow] {
        self.tokens
            .get(address.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// DeFi rows for a wallet, empty when the table has none.
    pub fn defi_for(&self, address: &WalletAddress) -> &[DefiRow] {
        self.defi
            .get(address.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// NFT rows for a wallet, empty when the table has none.
    pub fn nfts_for(&self, address: &WalletAddress) -> &[NftRow] {
        self.nfts
            .get(address.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Activity rows for a wallet in table order, empty when absent.
    pub fn activity_for(&self, address: &WalletAddress) -> &[ActivityRow] {
        self.activity
            .get(address.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Profile rows for a wallet, empty when the table has none.
    pub fn profiles_for(&self, address: &WalletAddress) -> &[ProfileRow] {
        self.profiles
            .get(address.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any table holds at least one row for the wallet.
    pub fn has_rows_for(&self, address: &WalletAddress) -> bool {
        !self.tokens_for(address).is_empty()
            || !self.defi_for(address).is_empty()
            || !self.nfts_for(address).is_empty()
            || !self.activity_for(address).is_empty()
            || !self.profiles_for(address).is_empty()
    }

    /// Number of distinct wallet keys across all tables.
    pub fn wallet_count(&self) -> usize {
        let mut wallets: std::collections::HashSet<&str> = std::collections::HashSet::new();
        wallets.extend(self.tokens.keys().map(String::as_str));
        wallets.extend(self.defi.keys().map(String::as_str));
        wallets.extend(self.nfts.keys().map(String::as_str));
        wallets.extend(self.activity.keys().map(String::as_str));
        wallets.extend(self.profiles.keys().map(String::as_str));
        wallets.len()
    }

    /// Per-table row totals.
    pub fn row_counts(&self) -> RowCounts {
        self.counts
    }

    /// When this snapshot was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Whether every table is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.total() == 0
    }
}
