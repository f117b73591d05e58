use alloy::sol_types;

use crate::registry::ChainId;

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by the display layer.
///
/// Malformed numeric input to the display rules never ends up here,
/// it renders as zero instead, and record normalization never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid decimal scale: {0}")]
    InvalidScale(i32),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0} does not fit the decimal width")]
    Overflow(String),

    #[error("no configuration for chain {0}")]
    ConfigNotFound(ChainId),

    #[error("no chain selected")]
    ChainNotSelected,

    #[error("event decode error: {0}")]
    Decode(#[from] sol_types::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
