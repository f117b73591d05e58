use alloy::primitives::Address;
use fastnum::UD128;

use crate::{abi::trading::Trading, num};

/// Tradeable product parameters.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct ProductRecord {
    /// Symbol of the product, `None` if not listed on the chain.
    pub symbol: Option<String>,

    #[debug("{max_leverage}")]
    pub max_leverage: UD128,

    #[debug("{max_exposure}")]
    pub max_exposure: UD128,

    #[debug("{open_interest_long}")]
    pub open_interest_long: UD128,

    #[debug("{open_interest_short}")]
    pub open_interest_short: UD128,

    /// Trading fee, percent.
    #[debug("{fee}")]
    pub fee: UD128,

    /// Interest, percent per year.
    #[debug("{interest}")]
    pub interest: UD128,

    /// Price feed address.
    pub feed: Address,

    /// Opening price settlement delay, seconds.
    pub settlement_time: u32,

    /// Minimum time a position must be held, seconds.
    pub min_trade_duration: u16,

    /// Loss at which positions get liquidated, percent of margin.
    #[debug("{liquidation_threshold}")]
    pub liquidation_threshold: UD128,

    /// Liquidator reward, percent of margin.
    #[debug("{liquidation_bounty}")]
    pub liquidation_bounty: UD128,

    pub is_active: bool,
}

impl ProductRecord {
    pub(crate) fn new(
        product: &Trading::Product,
        symbol: Option<String>,
        amount_converter: num::Converter,
        percent_converter: num::Converter,
    ) -> Self {
        Self {
            symbol,
            max_leverage: amount_converter.from_u128(product.maxLeverage),
            max_exposure: amount_converter.from_u128(product.maxExposure),
            open_interest_long: amount_converter
                .from_u128(product.openInterestLong.to::<u128>()),
            open_interest_short: amount_converter
                .from_u128(product.openInterestShort.to::<u128>()),
            fee: percent_converter.from_u128(product.fee),
            interest: percent_converter.from_u128(product.interest),
            feed: product.feed,
            settlement_time: product.settlementTime,
            min_trade_duration: product.minTradeDuration,
            liquidation_threshold: percent_converter
                .from_u128(product.liquidationThreshold),
            liquidation_bounty: percent_converter
                .from_u128(product.liquidationBounty),
            is_active: product.isActive,
        }
    }
}
