//! Prompt construction for the remote narrative model.

use crate::generator::NarrativeMode;
use persona_core::types::WalletFeatureRecord;

/// Build the user prompt sent to the model for a profiled wallet.
pub fn build_prompt(record: &WalletFeatureRecord, mode: NarrativeMode) -> String {
    match mode {
        NarrativeMode::Detailed => detailed_prompt(record),
        NarrativeMode::Brief => brief_prompt(record),
    }
}

fn detailed_prompt(record: &WalletFeatureRecord) -> String {
    format!(
        "Generate a detailed persona profile for crypto wallet {} based on the following on-chain data:\n\
         - Total networth: ${:.2}\n\
         - Native balance: {:.2}\n\
         - Token balance: ${:.2}\n\
         - Chain: {}\n\
         - Wallet Health Score: {} / 100\n\
         - Risk Score: {} / 100 (higher means riskier)\n\
         - Activity Score: {} / 100\n\
         - Token Count: {} tokens held\n\
         - Top Tokens: {}\n\
         - DeFi Protocols: {} engaged\n\
         - Total DeFi USD: ${:.2}\n\
         - NFT Collections: {}\n\
         - Classifications: {}\n\
         - Social Handle: {}\n\n\
         Fictional Persona Journey:\n{}\n\n\
         Based on these, create a rich, fictional persona including:\n\
         1. Crypto Identity: Who they are in the crypto ecosystem\n\
         2. Trading Style: Their approach, time horizon, transaction patterns\n\
         3. Risk Profile: Their comfort with different types of risk\n\
         4. Blockchain Preferences: Why they choose this chain\n\
         5. Personalized Recommendations: 3-4 specific products or strategies\n\n\
         Format your response as a well-structured markdown document with headers for each section.",
        record.short_address(),
        record.total_networth,
        record.native_balance,
        record.token_balance_usd,
        record.chain.as_deref().unwrap_or("unknown"),
        record.wallet_health_score,
        record.risk_score,
        record.activity_score,
        record.token_count,
        join_or_none(&record.top_tokens),
        record.defi_protocols,
        record.total_defi_usd,
        record.unique_nft_collections,
        tags_line(record),
        record.social_handle.as_deref().unwrap_or("N/A"),
        journey_line(record),
    )
}

fn brief_prompt(record: &WalletFeatureRecord) -> String {
    format!(
        "Create a brief crypto persona for wallet {} with ${:.2} total worth on {} chain. \
         Include identity type, risk profile, and 1-2 recommendations.",
        record.short_address(),
        record.total_networth,
        record.chain.as_deref().unwrap_or("unknown"),
    )
}

/// One-line activity arc for the journey section, derived from the
/// per-period transaction timeline.
fn journey_line(record: &WalletFeatureRecord) -> String {
    let total = record.total_transactions();
    if total == 0 {
        return "No transaction history yet.".to_string();
    }

    let counts: Vec<u64> = record
        .activity_timeline
        .iter()
        .map(|point| point.transactions_total)
        .collect();
    let (older, recent) = counts.split_at(counts.len() / 2);
    let older_total: u64 = older.iter().sum();
    let recent_total: u64 = recent.iter().sum();

    let trend = if older_total == 0 {
        "all of it recent"
    } else if recent_total > older_total {
        "picking up pace over time"
    } else if recent_total < older_total {
        "tapering off after a busier stretch"
    } else {
        "holding a steady rhythm"
    };

    format!(
        "{} transaction(s) across {} period(s), {}.",
        total,
        record.activity_timeline.len(),
        trend
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn tags_line(record: &WalletFeatureRecord) -> String {
    if record.classifications.is_empty() {
        "None".to_string()
    } else {
        record
            .classifications
            .iter()
            .map(|tag| tag.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
