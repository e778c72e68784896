//! Profile a set of demo wallets end to end.
//!
//! Run with:
//! ```
//! cargo run --example profile_wallet
//! ```
//!
//! Set `NARRATIVE_ENDPOINT` to route prose through a hosted model;
//! without it the deterministic template renders the narrative.

use narrative::{NarrativeMode, NarrativeService};
use persona_core::config::Config;
use persona_core::datasets::{ActivityRow, DatasetRegistry, DefiRow, NftRow, ProfileRow, TokenRow};
use persona_engine::ProfileService;
use rust_decimal::Decimal;

const ACTIVE_WALLET: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
const DORMANT_WALLET: &str = "0x000000000000000000000000000000000000dead";

/// Demo rows standing in for an extraction run over real chain data.
fn demo_registry() -> DatasetRegistry {
    DatasetRegistry::builder()
        .tokens(vec![
            TokenRow::new(ACTIVE_WALLET, "ETH", Decimal::new(1_250_000, 0)),
            TokenRow::new(ACTIVE_WALLET, "USDC", Decimal::new(400_000, 0)),
            TokenRow::new(ACTIVE_WALLET, "WBTC", Decimal::new(310_000, 0)),
            TokenRow::new(ACTIVE_WALLET, "LINK", Decimal::new(95_000, 0)),
            TokenRow::new(ACTIVE_WALLET, "UNI", Decimal::new(45_000, 0)),
        ])
        .defi(vec![
            DefiRow::new(ACTIVE_WALLET, "aave", Decimal::new(220_000, 0)),
            DefiRow::new(ACTIVE_WALLET, "lido", Decimal::new(180_000, 0)),
            DefiRow::new(ACTIVE_WALLET, "uniswap", Decimal::new(60_000, 0)),
        ])
        .nfts(vec![
            NftRow::new(ACTIVE_WALLET, "CryptoPunks"),
            NftRow::new(ACTIVE_WALLET, "Art Blocks"),
        ])
        .activity(vec![
            ActivityRow::new(ACTIVE_WALLET, "2024-01", 42),
            ActivityRow::new(ACTIVE_WALLET, "2024-02", 38),
            ActivityRow::new(ACTIVE_WALLET, "2024-03", 51),
            ActivityRow::new(ACTIVE_WALLET, "2024-04", 67),
            ActivityRow::new(DORMANT_WALLET, "2024-01", 0),
            ActivityRow::new(DORMANT_WALLET, "2024-02", 0),
        ])
        .profiles(vec![
            ProfileRow::new(ACTIVE_WALLET, Decimal::new(85_000, 0))
                .with_chain("eth")
                .with_social_handle("@vitalik"),
            ProfileRow::new(DORMANT_WALLET, Decimal::ZERO),
        ])
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== Wallet Persona Demo ===\n");

    // Step 1: Load configuration
    println!("1. Loading configuration...");
    let config = Config::from_env()?;
    if config.narrative.is_enabled() {
        println!("   ✓ Remote narrative endpoint configured");
    } else {
        println!("   ✓ No narrative endpoint set, using templates");
    }

    // Step 2: Build the dataset registry
    println!("\n2. Building dataset registry...");
    let registry = demo_registry();
    let counts = registry.row_counts();
    println!(
        "   ✓ {} rows indexed across {} wallets",
        counts.total(),
        registry.wallet_count()
    );

    // Step 3: Profile every demo wallet
    println!("\n3. Profiling wallets...");
    let service = ProfileService::new(registry);
    let mut records = Vec::new();

    for wallet in [ACTIVE_WALLET, DORMANT_WALLET] {
        match service.profile(wallet)? {
            Some(record) => {
                let tags: Vec<&str> = record
                    .classifications
                    .iter()
                    .map(|tag| tag.name())
                    .collect();
                println!(
                    "   ✓ {}  networth ${}  health {}  risk {}  activity {}  [{}]",
                    record.short_address(),
                    record.total_networth,
                    record.wallet_health_score,
                    record.risk_score,
                    record.activity_score,
                    tags.join(", "),
                );
                records.push(record);
            }
            None => println!("   ⚠ {} has no dataset rows", wallet),
        }
    }

    // Step 4: Show the full record for the first wallet
    let Some(record) = records.first() else {
        println!("\nNo wallets profiled, nothing more to show.");
        return Ok(());
    };
    println!("\n4. Feature record for {}:", record.short_address());
    println!("{}", record.to_json()?);

    // Step 5: Generate the narrative
    println!("\n5. Generating narrative...");
    let narrator = NarrativeService::from_config(&config.narrative);
    let narrative = narrator.generate(record, NarrativeMode::Detailed).await;
    println!("   ✓ Narrative produced ({:?})\n", narrative.source);
    println!("{}", narrative.text);

    Ok(())
}
