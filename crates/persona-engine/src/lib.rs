//! Persona Engine
//!
//! Extract, score, classify, and advise on wallet behavior from loaded
//! dataset snapshots.

pub mod classifier;
pub mod extractor;
pub mod recommendation;
pub mod scoring;
pub mod service;

pub use classifier::{classify, ClassifierConfig, PersonaClassifier};
pub use extractor::{extract_features, extract_features_for, position_totals, PositionTotals};
pub use recommendation::{recommend, Concern, RecommendationEngine, RecommenderConfig};
pub use scoring::{apply_scores, ActivityWeights, HealthWeights, RiskWeights, ScoreComponents};
pub use service::ProfileService;
