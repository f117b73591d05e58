//! Display records.
//!
//! Raw tuples read from the Trading contract and decoded contract events
//! are converted into flat records with symbols resolved and fixed-point
//! amounts converted to decimals, see [`Normalizer`].
//!
//! Amounts are kept as decimals, [`crate::format`] renders them to text.

mod event;
mod position;
mod product;
mod stake;
mod trade;
mod vault;

use alloy::primitives::TxHash;
use tracing::debug;

use crate::{
    Chain, PRICE_DECIMALS,
    abi::trading::Trading,
    feed::PriceFeed,
    num,
    types::{self, PositionId, ProductId, StakeId},
};

// Public re-exports
pub use event::*;
pub use position::*;
pub use product::*;
pub use stake::*;
pub use trade::*;
pub use vault::*;

/// Decimals of percentage-like product and vault parameters.
const PERCENT_DECIMALS: u8 = 2;

/// Converts raw contract data into display records for the given chain.
///
/// The chain provides product symbols, the price feed gets notified about
/// every product with an open position.
#[derive(Clone, Debug)]
pub struct Normalizer<'a, F> {
    chain: &'a Chain,
    feed: F,
    amount_converter: num::Converter,
    price_converter: num::Converter,
    percent_converter: num::Converter,
}

impl<'a, F: PriceFeed> Normalizer<'a, F> {
    pub fn new(chain: &'a Chain, feed: F) -> Self {
        Self {
            chain,
            feed,
            amount_converter: num::Converter::new(PRICE_DECIMALS),
            price_converter: num::Converter::new(PRICE_DECIMALS),
            percent_converter: num::Converter::new(PERCENT_DECIMALS),
        }
    }

    pub fn chain(&self) -> &Chain {
        self.chain
    }

    fn symbol(&self, product_id: ProductId) -> Option<String> {
        self.chain.symbol(product_id).map(str::to_string)
    }

    /// Open positions, most recently opened first.
    ///
    /// `positions` are paired with `position_ids` by index. Empty slots
    /// (zero product ID) are skipped.
    pub fn positions(
        &self,
        positions: &[Trading::Position],
        position_ids: &[PositionId],
    ) -> Vec<PositionRecord> {
        let mut records = Vec::with_capacity(positions.len());
        for (i, position) in positions.iter().enumerate() {
            if position.productId == 0 {
                debug!(index = i, "skipping empty position slot");
                continue;
            }
            records.push(PositionRecord::new(
                position_ids.get(i).copied(),
                position,
                self.symbol(position.productId),
                self.amount_converter,
                self.price_converter,
            ));
            self.feed.notify_product_active(position.productId);
        }
        records.reverse();
        records
    }

    /// Closed trades, in the order given.
    ///
    /// Transaction hash and block default to the given ones for trades
    /// not carrying their own.
    pub fn trades(
        &self,
        trades: &[RawTrade],
        block_number: Option<u64>,
        tx_hash: Option<TxHash>,
    ) -> Vec<TradeRecord> {
        trades
            .iter()
            .map(|trade| {
                TradeRecord::new(
                    trade,
                    self.symbol(trade.product_id),
                    block_number,
                    tx_hash,
                    self.amount_converter,
                    self.price_converter,
                )
            })
            .collect()
    }

    /// Vault stakes, most recent first.
    ///
    /// `stakes` are paired with `stake_ids` by index. Empty slots
    /// (zero timestamp) are skipped.
    pub fn stakes(&self, stakes: &[Trading::Stake], stake_ids: &[StakeId]) -> Vec<StakeRecord> {
        let mut records = Vec::with_capacity(stakes.len());
        for (i, stake) in stakes.iter().enumerate() {
            if stake.timestamp == 0 {
                debug!(index = i, "skipping empty stake slot");
                continue;
            }
            records.push(StakeRecord::new(
                stake_ids.get(i).copied(),
                stake,
                self.amount_converter,
            ));
        }
        records.reverse();
        records
    }

    pub fn vault(&self, vault: &Trading::Vault) -> VaultRecord {
        VaultRecord::new(vault, self.amount_converter, self.percent_converter)
    }

    pub fn product(&self, product: &Trading::Product, product_id: ProductId) -> ProductRecord {
        ProductRecord::new(
            product,
            self.symbol(product_id),
            self.amount_converter,
            self.percent_converter,
        )
    }

    /// Activity feed entry for the contract event.
    pub fn event(&self, event: &types::RawEvent) -> ActivityEvent {
        let event = ActivityEvent::new(
            event,
            |product_id| self.symbol(product_id),
            self.amount_converter,
            self.price_converter,
        );
        if let ActivityEvent::Unknown(e) = &event {
            debug!(kind = e.kind, tx = %e.tx_hash, "event has no activity entry");
        }
        event
    }

    /// Activity feed entries for the contract events, skipping events
    /// with no activity entry.
    pub fn activity<'e>(
        &self,
        events: impl IntoIterator<Item = &'e types::RawEvent>,
    ) -> Vec<ActivityEvent> {
        events
            .into_iter()
            .map(|e| self.event(e))
            .filter(|e| !e.is_unknown())
            .collect()
    }
}
