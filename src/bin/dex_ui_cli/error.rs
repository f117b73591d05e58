//! Error types for the display CLI.

/// Main error type for the display CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Display layer error: {0}")]
    Dex(#[from] dex_ui::error::Error),

    #[error("Invalid hex value: {0}")]
    InvalidHex(#[from] alloy::primitives::hex::FromHexError),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Product {0} not listed on chain {1}")]
    UnknownProduct(String, u64),
}

pub type Result<T> = std::result::Result<T, Error>;
