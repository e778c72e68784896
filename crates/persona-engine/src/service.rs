//! Wallet profiling service.
//!
//! Runs the full pipeline per request: validate the address, extract
//! features, apply scores, classify, recommend. The dataset registry is
//! held as an immutable snapshot behind an atomic swap, so concurrent
//! profiling calls keep reading the snapshot they started with while a
//! refresh replaces it wholesale.

use crate::classifier::PersonaClassifier;
use crate::extractor;
use crate::recommendation::RecommendationEngine;
use crate::scoring;
use dashmap::DashMap;
use persona_core::address::WalletAddress;
use persona_core::datasets::DatasetRegistry;
use persona_core::types::WalletFeatureRecord;
use persona_core::Result;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Registry snapshot plus the generation that produced it.
///
/// The generation moves on every swap; cache inserts are accepted only
/// while the generation they were computed under is still current.
struct RegistrySlot {
    snapshot: Arc<DatasetRegistry>,
    generation: u64,
}

/// Wallet profiling service.
pub struct ProfileService {
    registry: RwLock<RegistrySlot>,
    classifier: PersonaClassifier,
    recommender: RecommendationEngine,
    /// Cache of profiles computed against the current snapshot. Never
    /// holds a record built against a swapped-out registry.
    cache: DashMap<String, WalletFeatureRecord>,
}

impl ProfileService {
    /// Create a new profiling service over a dataset snapshot.
    pub fn new(registry: DatasetRegistry) -> Self {
        Self {
            registry: RwLock::new(RegistrySlot {
                snapshot: Arc::new(registry),
                generation: 0,
            }),
            classifier: PersonaClassifier::new(),
            recommender: RecommendationEngine::new(),
            cache: DashMap::new(),
        }
    }

    /// Replace the default classifier.
    pub fn with_classifier(mut self, classifier: PersonaClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the default recommendation engine.
    pub fn with_recommender(mut self, recommender: RecommendationEngine) -> Self {
        self.recommender = recommender;
        self
    }

    /// The dataset snapshot current requests are reading.
    pub fn snapshot(&self) -> Arc<DatasetRegistry> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    fn snapshot_with_generation(&self) -> (Arc<DatasetRegistry>, u64) {
        let slot = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        (slot.snapshot.clone(), slot.generation)
    }

    /// Atomically swap in a freshly built registry.
    ///
    /// In-flight requests keep the snapshot they already hold; the profile
    /// cache is dropped because it was computed against the old data. The
    /// clear happens inside the write-lock scope, so a profile that raced
    /// the swap cannot re-populate the cache with pre-swap data.
    pub fn swap_registry(&self, registry: DatasetRegistry) {
        let next = Arc::new(registry);
        {
            let mut slot = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            slot.snapshot = next;
            slot.generation += 1;
            self.cache.clear();
        }

        info!(
            wallets = self.snapshot().wallet_count(),
            "Swapped dataset registry"
        );
    }

    /// Profile a wallet end to end.
    ///
    /// Returns `Ok(None)` when the address is valid but unknown to every
    /// table, and `Error::InvalidAddress` before any lookup when it is
    /// malformed.
    pub fn profile(&self, input: &str) -> Result<Option<WalletFeatureRecord>> {
        let address = WalletAddress::parse(input)?;

        if let Some(cached) = self.cache.get(address.as_str()) {
            debug!(wallet = %address, "Profile cache hit");
            return Ok(Some(cached.clone()));
        }

        let (snapshot, generation) = self.snapshot_with_generation();
        let Some(record) = self.build_record(&address, &snapshot) else {
            return Ok(None);
        };

        // Cache under the read lock, and only if no swap landed while the
        // record was being built. The swap clears under the write lock, so
        // the two cannot interleave between this check and the insert.
        {
            let slot = self
                .registry
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if slot.generation == generation {
                self.cache
                    .insert(address.as_str().to_string(), record.clone());
            }
        }

        info!(
            wallet = %record.short_address(),
            health = record.wallet_health_score,
            risk = record.risk_score,
            activity = record.activity_score,
            tags = record.classifications.len(),
            "Profiled wallet"
        );

        Ok(Some(record))
    }

    fn build_record(
        &self,
        address: &WalletAddress,
        registry: &DatasetRegistry,
    ) -> Option<WalletFeatureRecord> {
        let mut record = extractor::extract_features(address, registry)?;
        let totals = extractor::position_totals(address, registry);
        scoring::apply_scores(&mut record, &totals);
        record.classifications = self.classifier.classify(&record);
        record.recommendations = self.recommender.recommend(&record);
        Some(record)
    }
}
