use alloy::primitives::{TxHash, U256};
use fastnum::{D256, UD256};

use crate::{
    num,
    types::{PositionId, ProductId},
};

/// Closed trade as delivered by the trade history source.
///
/// Carries the arguments of a `ClosePosition` event, optionally with
/// the transaction it came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTrade {
    pub position_id: PositionId,
    pub product_id: ProductId,
    pub price: U256,
    /// Close price, takes precedence over `price` when present and non-zero.
    pub close_price: Option<U256>,
    pub entry_price: U256,
    pub margin: U256,
    pub leverage: U256,
    pub timestamp: Option<u64>,
    pub is_long: Option<bool>,
    pub pnl: U256,
    pub pnl_is_negative: bool,
    pub is_full_close: bool,
    pub was_liquidated: bool,
    pub tx_hash: Option<TxHash>,
    pub block_number: Option<u64>,
}

/// Closed (or partially closed) trade.
///
/// Amounts come from `uint256` event arguments and are kept at full width.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct TradeRecord {
    pub position_id: PositionId,

    pub product_id: ProductId,

    /// Symbol of the product, `None` if not listed on the chain.
    pub product: Option<String>,

    /// Close price.
    #[debug("{price}")]
    pub price: UD256,

    #[debug("{entry_price}")]
    pub entry_price: UD256,

    /// Margin closed.
    #[debug("{margin}")]
    pub margin: UD256,

    #[debug("{leverage}")]
    pub leverage: UD256,

    /// Size closed, margin times leverage.
    #[debug("{amount}")]
    pub amount: UD256,

    pub timestamp: Option<u64>,

    pub is_long: Option<bool>,

    /// Absolute PnL, see [`Self::pnl_is_negative`] for the sign.
    #[debug("{pnl}")]
    pub pnl: UD256,

    pub pnl_is_negative: bool,

    pub is_full_close: bool,

    pub was_liquidated: bool,

    pub tx_hash: Option<TxHash>,

    pub block_number: Option<u64>,
}

impl TradeRecord {
    pub(crate) fn new(
        trade: &RawTrade,
        product: Option<String>,
        block_number: Option<u64>,
        tx_hash: Option<TxHash>,
        amount_converter: num::Converter,
        price_converter: num::Converter,
    ) -> Self {
        let margin = amount_converter.from_u256(trade.margin);
        let leverage = amount_converter.from_u256(trade.leverage);
        let price = trade
            .close_price
            .filter(|p| !p.is_zero())
            .unwrap_or(trade.price);
        Self {
            position_id: trade.position_id,
            product_id: trade.product_id,
            product,
            price: price_converter.from_u256(price),
            entry_price: price_converter.from_u256(trade.entry_price),
            margin,
            leverage,
            amount: margin * leverage,
            timestamp: trade.timestamp,
            is_long: trade.is_long,
            pnl: amount_converter.from_u256(trade.pnl),
            pnl_is_negative: trade.pnl_is_negative,
            is_full_close: trade.is_full_close,
            was_liquidated: trade.was_liquidated,
            tx_hash: trade.tx_hash.or(tx_hash),
            block_number: trade.block_number.or(block_number),
        }
    }

    /// Signed PnL.
    pub fn signed_pnl(&self) -> D256 {
        let pnl = self.pnl.to_signed();
        if self.pnl_is_negative { pnl.neg() } else { pnl }
    }
}
