//! Benchmarks for the wallet profiling pipeline.
//!
//! Run with: `cargo bench --bench pipeline`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use rust_decimal::Decimal;

use narrative::{NarrativeMode, TemplateNarrativeGenerator};
use persona_core::address::WalletAddress;
use persona_core::datasets::{ActivityRow, DatasetRegistry, DefiRow, NftRow, TokenRow};
use persona_core::types::WalletFeatureRecord;
use persona_engine::{
    apply_scores, extract_features, position_totals, PersonaClassifier, ProfileService,
    RecommendationEngine,
};

const SYMBOL_POOL: [&str; 10] = [
    "ETH", "USDC", "WBTC", "ARB", "LINK", "UNI", "AAVE", "PEPE", "OP", "MKR",
];
const PROTOCOL_POOL: [&str; 5] = ["aave", "uniswap", "lido", "compound", "curve"];

/// Deterministic synthetic address for a wallet index.
fn wallet_address(index: usize) -> String {
    format!("0x{:040x}", index)
}

/// Generate a registry of `wallets` wallets holding `tokens_each` token
/// rows apiece, with DeFi and NFT rows on a subset and a six-period
/// activity timeline.
fn generate_registry(rng: &mut impl Rng, wallets: usize, tokens_each: usize) -> DatasetRegistry {
    let mut tokens = Vec::with_capacity(wallets * tokens_each);
    let mut defi = Vec::new();
    let mut nfts = Vec::new();
    let mut activity = Vec::with_capacity(wallets * 6);

    for index in 0..wallets {
        let wallet = wallet_address(index);

        for position in 0..tokens_each {
            tokens.push(TokenRow::new(
                &wallet,
                SYMBOL_POOL[position % SYMBOL_POOL.len()],
                Decimal::new(rng.gen_range(100..1_000_000), 0),
            ));
        }

        if index % 3 == 0 {
            for protocol in PROTOCOL_POOL.iter().take(1 + index % PROTOCOL_POOL.len()) {
                defi.push(DefiRow::new(
                    &wallet,
                    protocol,
                    Decimal::new(rng.gen_range(1_000..500_000), 0),
                ));
            }
        }

        if index % 4 == 0 {
            for collection in 0..index % 8 {
                nfts.push(NftRow::new(&wallet, &format!("collection-{}", collection)));
            }
        }

        for period in 0..6 {
            activity.push(ActivityRow::new(
                &wallet,
                &format!("2024-{:02}", period + 1),
                rng.gen_range(0..120),
            ));
        }
    }

    DatasetRegistry::builder()
        .tokens(tokens)
        .defi(defi)
        .nfts(nfts)
        .activity(activity)
        .build()
}

/// Benchmark address validation and normalization.
fn bench_address_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("address_parse");

    group.bench_function("lowercase", |b| {
        b.iter(|| {
            black_box(WalletAddress::parse(black_box(
                "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
            )))
        })
    });

    group.bench_function("checksummed", |b| {
        b.iter(|| {
            black_box(WalletAddress::parse(black_box(
                "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            )))
        })
    });

    group.finish();
}

/// Benchmark feature extraction at different token row depths.
fn bench_feature_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_extraction");
    let mut rng = rand::thread_rng();

    for depth in [5, 10, 50, 100].iter() {
        let registry = generate_registry(&mut rng, 1, *depth);
        let address = WalletAddress::parse(&wallet_address(0)).unwrap();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("extract", depth),
            &registry,
            |b, registry| b.iter(|| black_box(extract_features(black_box(&address), registry))),
        );
    }

    group.finish();
}

/// Benchmark score normalization and the persona rule passes.
fn bench_scoring_and_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let mut rng = rand::thread_rng();

    let registry = generate_registry(&mut rng, 1, 20);
    let address = WalletAddress::parse(&wallet_address(0)).unwrap();
    let record = extract_features(&address, &registry).unwrap();
    let totals = position_totals(&address, &registry);

    group.bench_function("apply_scores", |b| {
        b.iter(|| {
            let mut scored = record.clone();
            apply_scores(&mut scored, black_box(&totals));
            black_box(scored)
        })
    });

    let classifier = PersonaClassifier::new();
    let recommender = RecommendationEngine::new();
    let mut scored = record.clone();
    apply_scores(&mut scored, &totals);
    scored.classifications = classifier.classify(&scored);

    group.bench_function("classify", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&scored))))
    });

    group.bench_function("recommend", |b| {
        b.iter(|| black_box(recommender.recommend(black_box(&scored))))
    });

    group.finish();
}

/// Benchmark profiling a whole registry of wallets end to end.
fn bench_batch_profiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_profile");
    let mut rng = rand::thread_rng();

    let classifier = PersonaClassifier::new();
    let recommender = RecommendationEngine::new();

    for wallet_count in [10, 100, 1000].iter() {
        let registry = generate_registry(&mut rng, *wallet_count, 10);
        let addresses: Vec<WalletAddress> = (0..*wallet_count)
            .map(|index| WalletAddress::parse(&wallet_address(index)).unwrap())
            .collect();

        group.throughput(Throughput::Elements(*wallet_count as u64));
        group.bench_with_input(
            BenchmarkId::new("profile_all", wallet_count),
            &registry,
            |b, registry| {
                b.iter(|| {
                    let mut records = Vec::with_capacity(addresses.len());
                    for address in &addresses {
                        if let Some(mut record) = extract_features(address, registry) {
                            let totals = position_totals(address, registry);
                            apply_scores(&mut record, &totals);
                            record.classifications = classifier.classify(&record);
                            record.recommendations = recommender.recommend(&record);
                            records.push(record);
                        }
                    }
                    black_box(records)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark the service cache hit path.
fn bench_service_cache(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let registry = generate_registry(&mut rng, 100, 10);
    let service = ProfileService::new(registry);
    let wallet = wallet_address(42);

    // Prime the cache.
    service.profile(&wallet).unwrap();

    c.bench_function("cached_profile", |b| {
        b.iter(|| black_box(service.profile(black_box(&wallet))))
    });
}

/// Benchmark record serialization (JSON encode and decode).
fn bench_record_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_serialization");
    let mut rng = rand::thread_rng();

    let registry = generate_registry(&mut rng, 1, 10);
    let service = ProfileService::new(registry);
    let record = service.profile(&wallet_address(0)).unwrap().unwrap();

    group.throughput(Throughput::Elements(1));
    group.bench_function("record_to_json", |b| b.iter(|| black_box(record.to_json())));

    let json = record.to_json().unwrap();
    group.bench_function("json_to_record", |b| {
        b.iter(|| black_box(serde_json::from_str::<WalletFeatureRecord>(black_box(&json))))
    });

    group.finish();
}

/// Benchmark template narrative rendering and prompt assembly.
fn bench_narrative_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrative");
    let mut rng = rand::thread_rng();

    let registry = generate_registry(&mut rng, 1, 10);
    let service = ProfileService::new(registry);
    let record = service.profile(&wallet_address(0)).unwrap().unwrap();
    let template = TemplateNarrativeGenerator::new();

    group.bench_function("template_detailed", |b| {
        b.iter(|| black_box(template.render(black_box(&record), NarrativeMode::Detailed)))
    });

    group.bench_function("template_brief", |b| {
        b.iter(|| black_box(template.render(black_box(&record), NarrativeMode::Brief)))
    });

    group.bench_function("prompt_detailed", |b| {
        b.iter(|| {
            black_box(narrative::prompt::build_prompt(
                black_box(&record),
                NarrativeMode::Detailed,
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_address_parse,
    bench_feature_extraction,
    bench_scoring_and_rules,
    bench_batch_profiling,
    bench_service_cache,
    bench_record_serialization,
    bench_narrative_rendering,
);

criterion_main!(benches);
