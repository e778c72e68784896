//! Core domain types for the wallet persona engine.

pub mod profile;
pub mod tag;

pub use profile::*;
pub use tag::*;
