use alloy::primitives::{Address, TxHash, U256};
use fastnum::UD256;

use crate::{
    LEVERAGE_DECIMALS,
    abi::trading::Trading::TradingEvents,
    num,
    types::{self, PositionId, ProductId, StakeId},
};

/// Activity feed entry built from a Trading contract event.
///
/// Every contract event maps to exactly one variant, events without
/// a feed representation map to [`ActivityEvent::Unknown`]. Amounts are
/// `uint256` event arguments kept at full width.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub enum ActivityEvent {
    /// Position closed, fully or partially, or liquidated.
    ClosePosition(ClosePositionEvent),

    /// Position opened.
    NewPosition(NewPositionEvent),

    /// Liquidity staked in the vault.
    Staked(StakeEvent),

    /// Stake redeemed from the vault.
    Redeemed(RedeemEvent),

    /// Contract event with no activity entry.
    Unknown(UnknownEvent),
}

/// Position close details.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct ClosePositionEvent {
    pub position_id: PositionId,
    pub user: Address,
    pub product_id: ProductId,
    pub product: Option<String>,
    #[debug("{price}")]
    pub price: UD256,
    #[debug("{entry_price}")]
    pub entry_price: UD256,
    #[debug("{margin}")]
    pub margin: UD256,
    #[debug("{leverage}")]
    pub leverage: UD256,
    #[debug("{amount}")]
    pub amount: UD256,
    /// Absolute PnL, 18 decimals on-chain.
    #[debug("{pnl}")]
    pub pnl: UD256,
    pub pnl_is_negative: bool,
    pub is_full_close: bool,
    pub was_liquidated: bool,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Position open details.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct NewPositionEvent {
    pub position_id: PositionId,
    pub user: Address,
    pub product_id: ProductId,
    pub product: Option<String>,
    #[debug("{price}")]
    pub price: UD256,
    #[debug("{margin}")]
    pub margin: UD256,
    #[debug("{leverage}")]
    pub leverage: UD256,
    #[debug("{amount}")]
    pub amount: UD256,
    pub is_long: bool,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Stake details.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct StakeEvent {
    pub stake_id: StakeId,
    pub user: Address,
    #[debug("{amount}")]
    pub amount: UD256,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Redemption details.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct RedeemEvent {
    pub stake_id: StakeId,
    pub user: Address,
    #[debug("{amount}")]
    pub amount: UD256,
    pub is_full_redeem: bool,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Event without an activity entry.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownEvent {
    /// Contract event name.
    pub kind: &'static str,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

impl ActivityEvent {
    pub(crate) fn new(
        raw: &types::RawEvent,
        symbol: impl Fn(ProductId) -> Option<String>,
        amount_converter: num::Converter,
        price_converter: num::Converter,
    ) -> Self {
        let (tx_hash, block_number) = (raw.tx_hash(), raw.block_number());
        let amount = |v: U256| amount_converter.from_u256(v);
        let price = |v: U256| price_converter.from_u256(v);
        let pnl_converter = num::Converter::new(LEVERAGE_DECIMALS);
        let unknown = |kind| {
            Self::Unknown(UnknownEvent {
                kind,
                tx_hash,
                block_number,
            })
        };

        match raw.event() {
            TradingEvents::ClosePosition(e) => Self::ClosePosition(ClosePositionEvent {
                position_id: e.positionId.saturating_to(),
                user: e.user,
                product_id: e.productId,
                product: symbol(e.productId),
                price: price(e.price),
                entry_price: price(e.entryPrice),
                margin: amount(e.margin),
                leverage: amount(e.leverage),
                amount: amount(e.margin) * amount(e.leverage),
                pnl: pnl_converter.from_u256(e.pnl),
                pnl_is_negative: e.pnlIsNegative,
                is_full_close: e.isFullClose,
                was_liquidated: e.wasLiquidated,
                tx_hash,
                block_number,
            }),
            TradingEvents::NewPosition(e) => Self::NewPosition(NewPositionEvent {
                position_id: e.positionId.saturating_to(),
                user: e.user,
                product_id: e.productId,
                product: symbol(e.productId),
                price: price(e.price),
                margin: amount(e.margin),
                leverage: amount(e.leverage),
                amount: amount(e.margin) * amount(e.leverage),
                is_long: e.isLong,
                tx_hash,
                block_number,
            }),
            TradingEvents::Staked(e) => Self::Staked(StakeEvent {
                stake_id: e.stakeId.saturating_to(),
                user: e.user,
                amount: amount(e.amount),
                tx_hash,
                block_number,
            }),
            TradingEvents::Redeemed(e) => Self::Redeemed(RedeemEvent {
                stake_id: e.stakeId.saturating_to(),
                user: e.user,
                amount: amount(e.amount),
                is_full_redeem: e.isFullRedeem,
                tx_hash,
                block_number,
            }),
            TradingEvents::AddMargin(_) => unknown("AddMargin"),
            TradingEvents::NewPositionSettled(_) => unknown("NewPositionSettled"),
            TradingEvents::PositionLiquidated(_) => unknown("PositionLiquidated"),
        }
    }

    /// Name of the contract event the entry was built from.
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityEvent::ClosePosition(_) => "ClosePosition",
            ActivityEvent::NewPosition(_) => "NewPosition",
            ActivityEvent::Staked(_) => "Staked",
            ActivityEvent::Redeemed(_) => "Redeemed",
            ActivityEvent::Unknown(e) => e.kind,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ActivityEvent::Unknown(_))
    }

    pub fn tx_hash(&self) -> TxHash {
        match self {
            ActivityEvent::ClosePosition(e) => e.tx_hash,
            ActivityEvent::NewPosition(e) => e.tx_hash,
            ActivityEvent::Staked(e) => e.tx_hash,
            ActivityEvent::Redeemed(e) => e.tx_hash,
            ActivityEvent::Unknown(e) => e.tx_hash,
        }
    }

    pub fn block_number(&self) -> Option<u64> {
        match self {
            ActivityEvent::ClosePosition(e) => e.block_number,
            ActivityEvent::NewPosition(e) => e.block_number,
            ActivityEvent::Staked(e) => e.block_number,
            ActivityEvent::Redeemed(e) => e.block_number,
            ActivityEvent::Unknown(e) => e.block_number,
        }
    }

    /// Product the entry refers to, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            ActivityEvent::ClosePosition(e) => Some(e.product_id),
            ActivityEvent::NewPosition(e) => Some(e.product_id),
            _ => None,
        }
    }
}
