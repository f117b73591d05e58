use alloy::{
    primitives::TxHash,
    rpc::types::Log,
    sol_types::SolEventInterface,
};

use crate::{abi::trading::Trading::TradingEvents, error::Result};

/// Raw Trading contract event along with transaction context.
pub type RawEvent = EventContext<TradingEvents>;

/// Event along with transaction context.
#[derive(Clone, Debug)]
pub struct EventContext<T> {
    pub(crate) tx_hash: TxHash,
    pub(crate) block_number: Option<u64>,
    pub(crate) log_index: u64,
    pub(crate) event: T,
}

impl<T> EventContext<T> {
    pub fn new(tx_hash: TxHash, block_number: Option<u64>, log_index: u64, event: T) -> Self {
        Self {
            tx_hash,
            block_number,
            log_index,
            event,
        }
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Block the event was emitted in, `None` for pending logs.
    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn log_index(&self) -> u64 {
        self.log_index
    }

    pub fn event(&self) -> &T {
        &self.event
    }
}

impl RawEvent {
    /// Decodes a Trading contract log as returned by the RPC node.
    pub fn from_log(log: &Log) -> Result<Self> {
        Ok(Self::new(
            log.transaction_hash.unwrap_or_default(),
            log.block_number,
            log.log_index.unwrap_or_default(),
            TradingEvents::decode_log(&log.inner)?.data,
        ))
    }
}
