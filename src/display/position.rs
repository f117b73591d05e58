use alloy::primitives::U256;
use fastnum::UD128;

use crate::{
    abi::trading::Trading,
    num,
    types::{PositionId, ProductId},
};

/// Open position.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct PositionRecord {
    /// ID of the position, if it was supplied along with the tuple.
    pub position_id: Option<PositionId>,

    pub product_id: ProductId,

    /// Symbol of the product, `None` if not listed on the chain.
    pub product: Option<String>,

    /// Opening timestamp, seconds.
    pub timestamp: u64,

    pub is_long: bool,

    /// Position is waiting for its opening price to settle.
    pub is_settling: bool,

    #[debug("{margin}")]
    pub margin: UD128,

    #[debug("{leverage}")]
    pub leverage: UD128,

    /// Position size, margin times leverage.
    #[debug("{amount}")]
    pub amount: UD128,

    /// Entry price.
    #[debug("{price}")]
    pub price: UD128,
}

impl PositionRecord {
    pub(crate) fn new(
        position_id: Option<PositionId>,
        position: &Trading::Position,
        product: Option<String>,
        amount_converter: num::Converter,
        price_converter: num::Converter,
    ) -> Self {
        let margin = amount_converter.from_u128(position.margin);
        let leverage = amount_converter.from_u128(position.leverage);
        Self {
            position_id,
            product_id: position.productId,
            product,
            timestamp: U256::from(position.timestamp).saturating_to(),
            is_long: position.isLong,
            is_settling: position.isSettling,
            margin,
            leverage,
            amount: margin * leverage,
            price: price_converter.from_u128(position.price),
        }
    }
}
