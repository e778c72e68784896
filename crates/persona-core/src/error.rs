//! Error types for the wallet persona engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid wallet address: {input}")]
    InvalidAddress { input: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Narrative service error: {message}")]
    Narrative {
        message: String,
        status: Option<u16>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
