//! Command line front to the display layer.
//!
//! Resolves chain configuration, renders amounts the way the trading UI does,
//! and manages the leverage preference cache stored in a file.

mod config;
mod error;

use std::process::exit;

use alloy::primitives::{Address, TxHash, U256};
use clap::Parser;
use dex_ui::{
    Chain,
    cache::{CachedLeverage, FileStore, LeverageCache},
    format, num,
    registry::Registry,
    types::ProductId,
};
use fastnum::{D128, UD256, decimal::Context};
use tracing::{debug, error, info, warn};

use config::{CliConfig, Command, EnvConfig, LeverageAction, LinkTarget};
use error::{Error, Result};

fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let cli_config = CliConfig::parse();

    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli_config, &env_config) {
        error!(%e, "Command failed");
        exit(1);
    }
}

fn run(cli: &CliConfig, env: &EnvConfig) -> Result<()> {
    let registry = Registry::builtin();
    let chain_id = cli.chain_id(env);
    debug!(chain_id, "Selected chain");

    match &cli.command {
        Command::Chains => {
            for chain in registry.chains() {
                println!("{}", describe(chain));
            }
        }
        Command::Chain => {
            let chain = registry.current(&chain_id)?;
            println!("{}", describe(chain));
            if let Some(rpc_url) = chain.rpc_url() {
                println!("rpc: {rpc_url}");
            }
            println!("explorer: {}", chain.explorer());
            for (id, symbol) in chain.products() {
                println!("{id:>4} {symbol}");
            }
        }
        Command::Units { raw, decimals } => {
            let raw: U256 = raw
                .parse()
                .map_err(|_| Error::InvalidNumber(raw.clone()))?;
            let value: UD256 = num::to_decimal(raw, *decimals)?;
            println!("{value}");
        }
        Command::Display {
            amount,
            max_precision,
        } => {
            println!("{}", format::format_str_to_display(amount, *max_precision));
        }
        Command::Pnl {
            pnl,
            negative,
            percent,
        } => {
            let value = D128::from_str(pnl.trim(), Context::default())
                .map_err(|_| Error::InvalidNumber(pnl.clone()))?;
            println!("{}", format::format_pnl(Some(value), *negative, *percent));
        }
        Command::Parse { amount, decimals } => {
            println!("{}", num::parse_units(amount, *decimals)?);
        }
        Command::Link { target } => {
            let url = match target {
                LinkTarget::Tx { hash } => {
                    registry.tx_link(&chain_id, &hash.parse::<TxHash>()?)?
                }
                LinkTarget::Address { address } => {
                    registry.address_link(&chain_id, &address.parse::<Address>()?)?
                }
            };
            println!("{url}");
        }
        Command::Leverage { action } => {
            let chain = registry.current(&chain_id)?;
            let path = cli.leverage_cache(env);
            let mut cache = LeverageCache::new(FileStore::open(&path)?);
            match action {
                LeverageAction::Get { product } => {
                    let product_id = resolve_product(chain, product)?;
                    match cache.get(product_id)? {
                        CachedLeverage::Hit(leverage) => println!("{leverage}"),
                        CachedLeverage::Unreadable => {
                            warn!(path = %path.display(), "Leverage cache is unreadable");
                            println!("none");
                        }
                        CachedLeverage::Absent | CachedLeverage::Miss => println!("none"),
                    }
                }
                LeverageAction::Set { product, leverage } => {
                    let product_id = resolve_product(chain, product)?;
                    cache.set(product_id, *leverage)?;
                    info!(product_id, leverage, path = %path.display(), "Cached leverage");
                }
            }
        }
    }
    Ok(())
}

/// One line summary of the chain.
fn describe(chain: &Chain) -> String {
    let mut line = format!(
        "{:>6} {:<10} {}",
        chain.chain_id(),
        chain.label(),
        format::short_address(&chain.contract())
    );
    if chain.is_testnet() {
        line.push_str(" testnet");
    }
    if chain.is_under_maintenance() {
        line.push_str(" maintenance");
    }
    line
}

/// Product ID by symbol listed on the chain, or by its numeric ID.
fn resolve_product(chain: &Chain, product: &str) -> Result<ProductId> {
    chain
        .product_id(product)
        .or_else(|| product.parse().ok())
        .ok_or_else(|| Error::UnknownProduct(product.to_string(), chain.chain_id()))
}
