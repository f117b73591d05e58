//! Configuration for the display CLI.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): default chain, cache location
//! - CLI arguments: the command to run, optionally overriding the environment

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dex_ui::{DEFAULT_CHAIN_ID, PRICE_DECIMALS, registry::ChainId};

/// Cache file used when neither the environment nor the arguments name one.
pub const DEFAULT_LEVERAGE_CACHE: &str = "leverages.json";

/// Environment configuration.
#[derive(Debug, Default, serde::Deserialize)]
pub struct EnvConfig {
    /// Chain the commands run against (e.g., 42161 for Arbitrum)
    pub chain_id: Option<ChainId>,

    /// File the leverage preferences are persisted in
    pub leverage_cache: Option<PathBuf>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "dex-ui")]
#[command(about = "Display helpers for the perpetual DEX front end")]
pub struct CliConfig {
    /// Chain ID, overrides CHAIN_ID
    #[arg(long, global = true)]
    pub chain_id: Option<ChainId>,

    /// Leverage cache file, overrides LEVERAGE_CACHE
    #[arg(long, global = true)]
    pub leverage_cache: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List known chains
    Chains,

    /// Show configuration of the selected chain
    Chain,

    /// Convert a scaled on-chain integer to a decimal
    Units {
        raw: String,

        #[arg(long, default_value_t = PRICE_DECIMALS as i32)]
        decimals: i32,
    },

    /// Render an amount with magnitude-tiered precision
    Display {
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Maximum decimals for amounts below 100
        #[arg(long)]
        max_precision: Option<u8>,
    },

    /// Render a PnL value with an explicit sign
    Pnl {
        #[arg(allow_hyphen_values = true)]
        pnl: String,

        /// Sign flag as reported on-chain, defaults to the sign of the value
        #[arg(long)]
        negative: Option<bool>,

        /// Render as a percentage (2 decimals)
        #[arg(long)]
        percent: bool,
    },

    /// Convert a decimal amount to a scaled on-chain integer
    Parse {
        amount: String,

        #[arg(long, default_value_t = PRICE_DECIMALS)]
        decimals: u8,
    },

    /// Block explorer links
    Link {
        #[command(subcommand)]
        target: LinkTarget,
    },

    /// Cached leverage preferences
    Leverage {
        #[command(subcommand)]
        action: LeverageAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum LinkTarget {
    /// Transaction page
    Tx { hash: String },

    /// Address page
    Address { address: String },
}

#[derive(Debug, Subcommand)]
pub enum LeverageAction {
    /// Print the cached leverage of a product
    Get {
        /// Product symbol (e.g., ETH-USD) or ID
        product: String,
    },

    /// Cache the leverage of a product
    Set {
        /// Product symbol (e.g., ETH-USD) or ID
        product: String,

        leverage: f64,
    },
}

impl CliConfig {
    /// Chain selected by arguments, then environment, then the default.
    pub fn chain_id(&self, env: &EnvConfig) -> ChainId {
        self.chain_id.or(env.chain_id).unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Leverage cache file selected by arguments, then environment.
    pub fn leverage_cache(&self, env: &EnvConfig) -> PathBuf {
        self.leverage_cache
            .clone()
            .or_else(|| env.leverage_cache.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEVERAGE_CACHE))
    }
}
