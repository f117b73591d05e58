use fastnum::UD128;

use crate::{abi::trading::Trading, num, types::StakeId};

/// Vault stake.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct StakeRecord {
    /// ID of the stake, if it was supplied along with the tuple.
    pub stake_id: Option<StakeId>,

    #[debug("{amount}")]
    pub amount: UD128,

    /// Staking timestamp, seconds.
    pub timestamp: u32,
}

impl StakeRecord {
    pub(crate) fn new(
        stake_id: Option<StakeId>,
        stake: &Trading::Stake,
        amount_converter: num::Converter,
    ) -> Self {
        Self {
            stake_id,
            amount: amount_converter.from_u128(stake.amount),
            timestamp: stake.timestamp,
        }
    }
}
