//! Persona Core Library
//!
//! Shared types, dataset registry, and configuration for the wallet
//! persona engine.

pub mod address;
pub mod config;
pub mod datasets;
pub mod error;
pub mod types;

pub use error::{Error, Result};
