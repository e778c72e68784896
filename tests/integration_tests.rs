//! Integration tests for the profiling pipeline.
//!
//! These tests verify that the major components work together correctly:
//! registry lookups feeding the extractor, scores and tags landing on the
//! record, and narratives rendering from finished profiles.

use persona_core::datasets::{ActivityRow, DatasetRegistry, DefiRow, NftRow, ProfileRow, TokenRow};
use rust_decimal::Decimal;

const DIVERSIFIED_WHALE: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const CONCENTRATED_WHALE: &str = "0xcccccccccccccccccccccccccccccccccccccccc";
const DORMANT_WALLET: &str = "0xdddddddddddddddddddddddddddddddddddddddd";
const SPLIT_ROWS_WALLET: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Registry with one wallet per shape the pipeline has to handle: a
/// diversified seven-figure portfolio, the same net worth parked in a
/// single token, a wallet that never transacted, and token rows split
/// across duplicate symbols.
fn fixture_registry() -> DatasetRegistry {
    let mut tokens = vec![
        TokenRow::new(SPLIT_ROWS_WALLET, "ARB", Decimal::new(200, 0)),
        TokenRow::new(SPLIT_ROWS_WALLET, "ARB", Decimal::new(300, 0)),
        TokenRow::new(SPLIT_ROWS_WALLET, "BTC", Decimal::new(1500, 0)),
        TokenRow::new(SPLIT_ROWS_WALLET, "CRV", Decimal::ZERO),
        TokenRow::new(CONCENTRATED_WHALE, "PEPE", Decimal::new(5_000_000, 0)),
    ];
    for symbol in ["AAVE", "CRV", "LDO", "LINK", "MKR", "RPL", "SNX", "UNI"] {
        tokens.push(TokenRow::new(
            DIVERSIFIED_WHALE,
            symbol,
            Decimal::new(500_000, 0),
        ));
    }

    let defi = ["aave", "compound", "lido", "uniswap"]
        .iter()
        .map(|protocol| DefiRow::new(DIVERSIFIED_WHALE, protocol, Decimal::new(250_000, 0)))
        .collect();

    DatasetRegistry::builder()
        .tokens(tokens)
        .defi(defi)
        .activity(vec![
            ActivityRow::new(DIVERSIFIED_WHALE, "2024-01", 40),
            ActivityRow::new(DIVERSIFIED_WHALE, "2024-02", 60),
            ActivityRow::new(CONCENTRATED_WHALE, "2024-01", 40),
            ActivityRow::new(CONCENTRATED_WHALE, "2024-02", 60),
            ActivityRow::new(DORMANT_WALLET, "2024-01", 0),
            ActivityRow::new(DORMANT_WALLET, "2024-02", 0),
        ])
        .profiles(vec![ProfileRow::new(DORMANT_WALLET, Decimal::ZERO)])
        .build()
}

/// Test that the full pipeline profiles a diversified whale end to end:
/// extraction, scoring, classification, and recommendations all land on
/// one record.
#[test]
fn test_diversified_whale_profile() {
    use persona_core::types::PersonaTag;
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let record = service.profile(DIVERSIFIED_WHALE).unwrap().unwrap();

    // 8 tokens x 500k + 4 protocols x 250k = 5M net worth.
    assert_eq!(record.total_networth, Decimal::new(5_000_000, 0));
    assert_eq!(record.token_count, 8);
    assert_eq!(record.defi_protocols, 4);
    assert_eq!(record.token_balance_usd, Decimal::new(4_000_000, 0));
    assert_eq!(record.total_defi_usd, Decimal::new(1_000_000, 0));

    // Equal token values rank alphabetically.
    assert_eq!(record.top_tokens.first().map(String::as_str), Some("AAVE"));
    assert_eq!(record.top_tokens.len(), 8);

    // Health: 0.25*0.8 + 0.15*0.8 + 0.5*(log10(5M)/7) = 0.798 -> 80.
    assert_eq!(record.wallet_health_score, 80);
    // Risk: 0.6*(500k/5M) + 0.4*(1M/5M) = 0.14 -> 14.
    assert_eq!(record.risk_score, 14);
    // Activity: 0.7*(ln61/ln101) + 0.3*(60/100) = 0.804 -> 80.
    assert_eq!(record.activity_score, 80);

    assert_eq!(
        record.classifications,
        vec![PersonaTag::Whale, PersonaTag::DefiPowerUser]
    );

    // Diversification advice (no NFTs) outranks whale security hygiene.
    assert_eq!(record.recommendations.len(), 2);
    assert!(record.recommendations[0].contains("entirely fungible"));
    assert!(record.recommendations[1].contains("hardware wallet"));
}

/// Test that parking the same net worth in a single token raises the risk
/// score well above the diversified layout.
#[test]
fn test_concentration_raises_risk() {
    use persona_core::types::PersonaTag;
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let diversified = service.profile(DIVERSIFIED_WHALE).unwrap().unwrap();
    let concentrated = service.profile(CONCENTRATED_WHALE).unwrap().unwrap();

    // Same net worth, same whale tag.
    assert_eq!(concentrated.total_networth, diversified.total_networth);
    assert!(concentrated.has_tag(PersonaTag::Whale));
    assert!(diversified.has_tag(PersonaTag::Whale));

    // One position holding 100% of value: 0.6*1.0 = 0.6 -> 60.
    assert_eq!(concentrated.risk_score, 60);
    assert!(concentrated.risk_score > diversified.risk_score);
}

/// Test that duplicate symbol rows are summed before ranking and that
/// zero-value symbols drop out of the counts.
#[test]
fn test_token_rows_aggregate_across_duplicates() {
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let record = service.profile(SPLIT_ROWS_WALLET).unwrap().unwrap();

    // ARB 200 + 300 = 500, BTC 1500, CRV 0 dropped.
    assert_eq!(record.top_tokens, vec!["BTC", "ARB"]);
    assert_eq!(record.token_count, 2);
    assert_eq!(record.token_balance_usd, Decimal::new(2000, 0));
    assert_eq!(record.total_networth, Decimal::new(2000, 0));
}

/// Test that a wallet with rows but no transactions and no holdings comes
/// out as new-or-inactive with zeroed scores.
#[test]
fn test_dormant_wallet_scores_zero() {
    use persona_core::types::PersonaTag;
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let record = service.profile(DORMANT_WALLET).unwrap().unwrap();

    assert_eq!(record.total_networth, Decimal::ZERO);
    assert_eq!(record.wallet_health_score, 0);
    assert_eq!(record.risk_score, 0);
    assert_eq!(record.activity_score, 0);
    assert_eq!(record.classifications, vec![PersonaTag::NewOrInactive]);

    // The only advice for an unused wallet is to start using it.
    assert_eq!(record.recommendations.len(), 1);
    assert!(record.recommendations[0].contains("on-chain history"));
}

/// Test that a malformed address fails before any dataset lookup while a
/// valid-but-unknown address profiles to nothing.
#[test]
fn test_address_validation_gates_the_pipeline() {
    use persona_core::Error;
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());

    let result = service.profile("not-an-address");
    assert!(matches!(result, Err(Error::InvalidAddress { .. })));

    let unknown = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";
    assert!(service.profile(unknown).unwrap().is_none());
}

/// Test that checksummed input reaches the same rows as lowercase input
/// and that the record reports the canonical form.
#[test]
fn test_lookup_ignores_address_casing() {
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let record = service
        .profile(&DIVERSIFIED_WHALE.to_uppercase())
        .unwrap()
        .unwrap();

    assert_eq!(record.address, DIVERSIFIED_WHALE);
    assert_eq!(record.token_count, 8);
}

/// Test that profiling is deterministic: the same wallet over the same
/// data renders byte-identical JSON, within one service and across
/// independently built services.
#[test]
fn test_repeated_profiles_are_byte_identical() {
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let first = service.profile(DIVERSIFIED_WHALE).unwrap().unwrap();
    let second = service.profile(DIVERSIFIED_WHALE).unwrap().unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let fresh_service = ProfileService::new(fixture_registry());
    let third = fresh_service.profile(DIVERSIFIED_WHALE).unwrap().unwrap();
    assert_eq!(first.to_json().unwrap(), third.to_json().unwrap());
}

/// Test that swapping in a new registry changes what later profiles see.
#[test]
fn test_registry_swap_takes_effect() {
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let before = service.profile(SPLIT_ROWS_WALLET).unwrap().unwrap();
    assert_eq!(before.token_count, 2);

    service.swap_registry(
        DatasetRegistry::builder()
            .tokens(vec![TokenRow::new(
                SPLIT_ROWS_WALLET,
                "BTC",
                Decimal::new(9000, 0),
            )])
            .build(),
    );

    let after = service.profile(SPLIT_ROWS_WALLET).unwrap().unwrap();
    assert_eq!(after.token_count, 1);
    assert_eq!(after.total_networth, Decimal::new(9000, 0));
}

/// Test that scores stay inside 0-100 even when every input is far past
/// its normalization ceiling.
#[test]
fn test_scores_capped_for_extreme_wallet() {
    use persona_engine::ProfileService;

    let wallet = "0xffffffffffffffffffffffffffffffffffffffff";
    let tokens = (0..30)
        .map(|i| TokenRow::new(wallet, &format!("T{:02}", i), Decimal::new(1_000_000, 0)))
        .collect();
    let defi = (0..5)
        .map(|i| DefiRow::new(wallet, &format!("protocol-{}", i), Decimal::new(10_000_000, 0)))
        .collect();
    let nfts = (0..25)
        .map(|i| NftRow::new(wallet, &format!("collection-{}", i)))
        .collect();
    let registry = DatasetRegistry::builder()
        .tokens(tokens)
        .defi(defi)
        .nfts(nfts)
        .activity(vec![
            ActivityRow::new(wallet, "2024-01", 5000),
            ActivityRow::new(wallet, "2024-02", 8000),
        ])
        .build();

    let service = ProfileService::new(registry);
    let record = service.profile(wallet).unwrap().unwrap();

    // Every health component saturates at its ceiling.
    assert_eq!(record.wallet_health_score, 100);
    assert!(record.risk_score <= 100);
    assert!(record.activity_score <= 100);
}

/// Test that the template narrative renders a finished profile into
/// markdown with the portfolio numbers and persona tags visible.
#[tokio::test]
async fn test_template_narrative_renders_profile() {
    use narrative::{NarrativeMode, NarrativeService, NarrativeSource};
    use persona_engine::ProfileService;

    let service = ProfileService::new(fixture_registry());
    let record = service.profile(DIVERSIFIED_WHALE).unwrap().unwrap();

    let narrator = NarrativeService::template_only();
    let detailed = narrator.generate(&record, NarrativeMode::Detailed).await;

    assert_eq!(detailed.source, NarrativeSource::Template);
    assert!(detailed.text.contains("# Wallet Persona: 0xbbbb...bbbb"));
    assert!(detailed.text.contains("$5000000.00"));
    assert!(detailed.text.contains("- **Whale**"));
    assert!(detailed.text.contains("- **DeFi Power User**"));

    let brief = narrator.generate(&record, NarrativeMode::Brief).await;
    assert!(!brief.text.contains('\n'));
    assert!(brief.text.contains("Persona: Whale, DeFi Power User."));
}

/// Test that a configured primary generator wins over the template and
/// that default config (no endpoint) still produces prose.
#[tokio::test]
async fn test_narrative_generator_selection() {
    use narrative::{NarrativeMode, NarrativeService, NarrativeSource, StaticNarrativeGenerator};
    use persona_core::config::NarrativeConfig;
    use persona_engine::ProfileService;
    use std::sync::Arc;
    use std::time::Duration;

    let service = ProfileService::new(fixture_registry());
    let record = service.profile(CONCENTRATED_WHALE).unwrap().unwrap();

    let primary = Arc::new(StaticNarrativeGenerator::new("A creature of conviction."));
    let narrator = NarrativeService::with_generator(primary, Duration::from_secs(1));
    let narrative = narrator.generate(&record, NarrativeMode::Brief).await;
    assert_eq!(narrative.text, "A creature of conviction.");
    assert_eq!(narrative.source, NarrativeSource::Static);

    // No endpoint configured: the service quietly stays on templates.
    let from_config = NarrativeService::from_config(&NarrativeConfig::default());
    let fallback = from_config.generate(&record, NarrativeMode::Brief).await;
    assert_eq!(fallback.source, NarrativeSource::Template);
    assert!(fallback.text.contains("$5000000.00"));
}
