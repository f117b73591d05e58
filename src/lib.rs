//! Perpetual DEX front-end display layer.
//!
//! # Overview
//!
//! Turns raw on-chain reads and events of the Trading contract into records
//! ready to be rendered by a UI.
//!
//! Use [`registry::Registry`] to resolve the [`Chain`] the wallet is connected
//! to, then [`display::Normalizer`] to convert contract tuples and decoded
//! events into display records. Individual amounts are rendered with the rules
//! from [`format`].
//!
//! [`cache::LeverageCache`] keeps the last leverage picked per product, and
//! [`ui`] provides DOM-agnostic click and key handling helpers.
//!
//! # Limitations/follow-ups
//!
//! * Products have to be listed per chain, symbols are not read from the
//!   contract.
//!
//! * Display rules operate on decimals, values at exact rounding ties may
//!   differ from binary floating point renderings.

pub mod abi;
pub mod cache;
pub mod display;
pub mod error;
pub mod feed;
pub mod format;
pub mod num;
pub mod registry;
pub mod types;
pub mod ui;

use std::collections::BTreeMap;

use alloy::primitives::{Address, address};
use url::Url;

use crate::{registry::ChainId, types::ProductId};

/// Symbol of the collateral asset the vault is denominated in.
pub const BASE_SYMBOL: &str = "ETH";

/// Decimals of prices and of most amounts.
pub const PRICE_DECIMALS: u8 = 8;

/// Decimals of 18-digit fixed-point amounts, such as PnL reported by
/// position close events.
pub const LEVERAGE_DECIMALS: u8 = 18;

/// Chain selected until the wallet reports one.
pub const DEFAULT_CHAIN_ID: ChainId = 4;

/// Canonical product symbols by ID.
pub const PRODUCT_IDS: [(&str, ProductId); 12] = [
    ("ETH-USD", 1),
    ("BTC-USD", 2),
    ("LINK-USD", 3),
    ("XRP-USD", 4),
    ("Gold", 5),
    ("Silver", 6),
    ("Oil", 7),
    ("EUR-USD", 8),
    ("GBP-USD", 9),
    ("JPY-USD", 10),
    ("CHF-USD", 11),
    ("AUD-USD", 12),
];

#[derive(Clone, Debug)]
/// Chain the Trading contract is deployed on.
pub struct Chain {
    chain_id: ChainId,
    label: String,
    contract: Address,
    explorer: Url,
    rpc_url: Option<Url>,
    products: BTreeMap<ProductId, String>,
    testnet: bool,
    under_maintenance: bool,
}

impl Chain {
    /// Hardhat local node.
    pub fn localhost() -> Self {
        Self::builtin(
            31337,
            "Localhost",
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            "http://localhost:8545",
            &[(1, "ETH-USD"), (2, "BTC-USD"), (3, "Gold"), (4, "EUR-USD")],
        )
    }

    pub fn rinkeby() -> Self {
        let products: Vec<_> = PRODUCT_IDS.iter().map(|&(s, id)| (id, s)).collect();
        Self::builtin(
            4,
            "Rinkeby",
            address!("0x71e82EBe9B6F9A844E8003e56ff4e41636066bB6"),
            "https://rinkeby.etherscan.io",
            &products,
        )
        .with_testnet(true)
    }

    pub fn arbitrum() -> Self {
        Self::builtin(
            42161,
            "Arbitrum",
            address!("0x5F2fFc7883BD12604e0adf0403f9436D40386Ef4"),
            "https://arbiscan.io",
            &[(1, "ETH-USD"), (2, "BTC-USD"), (4, "EUR-USD")],
        )
        .with_rpc_url(Url::parse("https://arb1.arbitrum.io/rpc").expect("static rpc url"))
        .with_testnet(true)
        .with_maintenance(true)
    }

    pub fn custom(
        chain_id: ChainId,
        label: impl Into<String>,
        contract: Address,
        explorer: Url,
        products: BTreeMap<ProductId, String>,
    ) -> Self {
        Self {
            chain_id,
            label: label.into(),
            contract,
            explorer,
            rpc_url: None,
            products,
            testnet: false,
            under_maintenance: false,
        }
    }

    fn builtin(
        chain_id: ChainId,
        label: &str,
        contract: Address,
        explorer: &str,
        products: &[(ProductId, &str)],
    ) -> Self {
        Self::custom(
            chain_id,
            label,
            contract,
            Url::parse(explorer).expect("static explorer url"),
            products
                .iter()
                .map(|&(id, symbol)| (id, symbol.to_string()))
                .collect(),
        )
    }

    pub fn with_rpc_url(mut self, rpc_url: Url) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    pub fn with_testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    pub fn with_maintenance(mut self, under_maintenance: bool) -> Self {
        self.under_maintenance = under_maintenance;
        self
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Address of the Trading contract.
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Human-readable ABI of the Trading contract,
    /// see [`abi::trading::Trading`] for typed bindings.
    pub fn abi(&self) -> &'static [&'static str] {
        abi::TRADING_ABI
    }

    /// Block explorer base URL.
    pub fn explorer(&self) -> &Url {
        &self.explorer
    }

    pub fn rpc_url(&self) -> Option<&Url> {
        self.rpc_url.as_ref()
    }

    /// Product symbols by ID listed on this chain.
    pub fn products(&self) -> &BTreeMap<ProductId, String> {
        &self.products
    }

    pub fn symbol(&self, product_id: ProductId) -> Option<&str> {
        self.products.get(&product_id).map(String::as_str)
    }

    pub fn product_id(&self, symbol: &str) -> Option<ProductId> {
        self.products
            .iter()
            .find_map(|(id, s)| (s == symbol).then_some(*id))
    }

    pub fn is_testnet(&self) -> bool {
        self.testnet
    }

    pub fn is_under_maintenance(&self) -> bool {
        self.under_maintenance
    }

    /// Explorer page of the transaction.
    pub fn tx_link(&self, hash: &alloy::primitives::TxHash) -> Url {
        self.explorer_page("tx", &hash.to_string())
    }

    /// Explorer page of the address.
    pub fn address_link(&self, address: &Address) -> Url {
        self.explorer_page("address", &address.to_string())
    }

    fn explorer_page(&self, kind: &str, value: &str) -> Url {
        let mut url = self.explorer.clone();
        url.path_segments_mut()
            .expect("explorer url can be a base")
            .pop_if_empty()
            .extend([kind, value]);
        url
    }
}
