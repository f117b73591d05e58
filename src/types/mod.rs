mod event;

pub use event::*;

/// ID of a tradeable product, `1..=12` on the known deployments.
pub type ProductId = u64;

/// ID of an open position.
pub type PositionId = u64;

/// ID of a vault stake.
pub type StakeId = u64;
