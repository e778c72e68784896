//! Wallet Persona: Behavioral Profiling for Blockchain Wallets
//!
//! This is the root crate that provides benchmark and integration-test
//! access to the internal modules. For actual functionality, use the
//! individual crates directly:
//!
//! - `persona-core`: Address validation, dataset registry, shared types
//! - `persona-engine`: Feature extraction, scoring, classification, advice
//! - `narrative`: Remote and template prose generation for profiles

// Re-export for benchmarks and integration tests
pub use narrative as prose;
pub use persona_core as core;
pub use persona_engine as engine;
