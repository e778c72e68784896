//! Narrative
//!
//! Prose generation for profiled wallets: a remote model client with
//! retries, a deterministic template fallback, and a service that keeps
//! the slow path behind a deadline.

pub mod generator;
pub mod prompt;
pub mod remote;
pub mod service;
pub mod template;

pub use generator::{
    Narrative, NarrativeGenerator, NarrativeMode, NarrativeSource, StaticNarrativeGenerator,
};
pub use remote::RemoteNarrativeGenerator;
pub use service::NarrativeService;
pub use template::TemplateNarrativeGenerator;
