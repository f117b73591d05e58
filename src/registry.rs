//! Per-network configuration lookup.

use std::collections::HashMap;

use alloy::primitives::{Address, TxHash};
use url::Url;

use crate::{
    Chain, DEFAULT_CHAIN_ID,
    error::{Error, Result},
};

/// EIP-155 chain ID.
pub type ChainId = u64;

/// Source of the network the wallet is currently connected to.
pub trait ChainState {
    /// `None` until a chain is selected.
    fn current_chain_id(&self) -> Option<ChainId>;
}

impl ChainState for Option<ChainId> {
    fn current_chain_id(&self) -> Option<ChainId> {
        *self
    }
}

impl ChainState for ChainId {
    fn current_chain_id(&self) -> Option<ChainId> {
        Some(*self)
    }
}

/// Known deployments by chain ID.
#[derive(Clone, Debug)]
pub struct Registry {
    chains: HashMap<ChainId, Chain>,
}

impl Registry {
    /// Registry without any chains.
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    /// Registry of the public deployments plus the local development node.
    pub fn builtin() -> Self {
        Self::new()
            .with_chain(Chain::localhost())
            .with_chain(Chain::rinkeby())
            .with_chain(Chain::arbitrum())
    }

    /// Adds or replaces the chain.
    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chains.insert(chain.chain_id(), chain);
        self
    }

    /// Configuration of the chain.
    ///
    /// Unknown chains are an error, there is no fallback network.
    pub fn get(&self, chain_id: ChainId) -> Result<&Chain> {
        self.chains
            .get(&chain_id)
            .ok_or(Error::ConfigNotFound(chain_id))
    }

    /// Configuration of the chain currently selected.
    pub fn current(&self, state: &impl ChainState) -> Result<&Chain> {
        self.get(state.current_chain_id().ok_or(Error::ChainNotSelected)?)
    }

    /// Configuration of the default chain.
    pub fn default_chain(&self) -> Result<&Chain> {
        self.get(DEFAULT_CHAIN_ID)
    }

    /// All chains ordered by ID.
    pub fn chains(&self) -> Vec<&Chain> {
        let mut chains: Vec<_> = self.chains.values().collect();
        chains.sort_by_key(|c| c.chain_id());
        chains
    }

    /// Explorer page of the transaction on the current chain.
    pub fn tx_link(&self, state: &impl ChainState, hash: &TxHash) -> Result<Url> {
        Ok(self.current(state)?.tx_link(hash))
    }

    /// Explorer page of the address on the current chain.
    pub fn address_link(&self, state: &impl ChainState, address: &Address) -> Result<Url> {
        Ok(self.current(state)?.address_link(address))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
