use fastnum::UD128;

use crate::{BASE_SYMBOL, abi::trading::Trading, num};

/// Liquidity vault backing the traders' PnL.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct VaultRecord {
    /// Symbol of the asset the vault holds.
    pub symbol: &'static str,

    #[debug("{cap}")]
    pub cap: UD128,

    #[debug("{balance}")]
    pub balance: UD128,

    #[debug("{staked}")]
    pub staked: UD128,

    /// Minimum staking period, seconds.
    pub staking_period: u32,

    /// Redemption window, seconds.
    pub redemption_period: u32,

    /// Maximum daily drawdown, percent.
    #[debug("{max_daily_drawdown}")]
    pub max_daily_drawdown: UD128,
}

impl VaultRecord {
    pub(crate) fn new(
        vault: &Trading::Vault,
        amount_converter: num::Converter,
        percent_converter: num::Converter,
    ) -> Self {
        Self {
            symbol: BASE_SYMBOL,
            cap: amount_converter.from_u128(vault.cap.saturating_to::<u128>()),
            balance: amount_converter.from_u128(vault.balance.saturating_to::<u128>()),
            staked: amount_converter.from_u128(vault.staked),
            staking_period: vault.stakingPeriod,
            redemption_period: vault.redemptionPeriod,
            max_daily_drawdown: percent_converter.from_u128(vault.maxDailyDrawdown),
        }
    }
}
