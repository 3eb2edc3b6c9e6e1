//! Dexkit Quoter
//!
//! Prices swaps, deposits and withdrawals against a constant-product pool
//! from reserves given on the command line. Nothing is signed or submitted;
//! the output carries the router arguments a wallet would need.

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use dexkit_config::QuoteConfig;

mod commands;

use commands::{AddArgs, PriceArgs, QuoteContext, RemoveArgs, SwapArgs};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "dexkit-quoter")]
#[command(about = "Constant-product AMM swap and liquidity quotes")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to config/quoter.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Quote a swap (exact input by default)
    Swap(SwapArgs),
    /// Quote adding liquidity, or seeding a new pool
    Add(AddArgs),
    /// Quote burning LP tokens
    Remove(RemoveArgs),
    /// Starting price implied by two deposit amounts
    Price(PriceArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = QuoteConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        fee = %config.fee,
        slippage = %config.slippage,
        deadline_secs = config.deadline_secs,
        "Quoter configured"
    );

    let now = u64::try_from(chrono::Utc::now().timestamp()).context("System clock before 1970")?;
    let ctx = QuoteContext::from_config(&config, now)?;

    match &cli.command {
        Commands::Swap(args) => emit(&commands::swap(&ctx, args)?, cli.json),
        Commands::Add(args) => emit(&commands::add(&ctx, args)?, cli.json),
        Commands::Remove(args) => emit(&commands::remove(&ctx, args)?, cli.json),
        Commands::Price(args) => emit(&commands::price(args)?, cli.json),
    }
}

fn emit<T: Serialize + Display>(report: &T, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to encode report")?
        );
    } else {
        println!("{report}");
    }
    Ok(())
}
