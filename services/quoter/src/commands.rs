//! Quote commands
//!
//! Each command parses decimal-string arguments at the token's precision,
//! runs the engine, and returns a report that renders as text or JSON.

use std::fmt;

use anyhow::{bail, Context, Result};
use clap::Args;
use dexkit_amm::{
    AddLiquidityParams, Deadline, Decimal, Fraction, PoolReserves, QuoteEngine,
    RemoveLiquidityParams, SwapParams, TradeDirection, TradeIntent, V2Math, U256,
};
use dexkit_config::QuoteConfig;
use dexkit_types::{find_token, format_units_truncated, TokenInfo};
use serde::Serialize;
use tracing::{debug, warn};

/// LP tokens of V2 pairs carry 18 decimals
pub const LP_DECIMALS: u8 = 18;

/// Fractional digits shown in text output
const DISPLAY_PLACES: usize = 6;

/// Engine, tolerance and clock shared by every command
#[derive(Debug, Clone, Copy)]
pub struct QuoteContext {
    pub engine: QuoteEngine,
    pub slippage: Fraction,
    pub deadline_secs: u64,
    pub now: u64,
}

impl QuoteContext {
    pub fn from_config(config: &QuoteConfig, now: u64) -> Result<Self> {
        Ok(Self {
            engine: config.engine()?,
            slippage: config.slippage_fraction()?,
            deadline_secs: config.deadline_secs,
            now,
        })
    }

    /// Configured tolerance unless the command overrides it (in percent)
    fn slippage(&self, override_percent: Option<Decimal>) -> Result<Fraction> {
        match override_percent {
            Some(percent) => Fraction::from_percent(percent)
                .with_context(|| format!("Invalid slippage {percent}%")),
            None => Ok(self.slippage),
        }
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(self.now, self.deadline_secs)
    }
}

fn token(symbol: &str) -> Result<&'static TokenInfo> {
    find_token(symbol).with_context(|| format!("Unknown token {symbol}"))
}

/// Resolve both sides of a pair, which must be different tokens
fn token_pair(a: &str, b: &str) -> Result<(&'static TokenInfo, &'static TokenInfo)> {
    let token_a = token(a)?;
    let token_b = token(b)?;
    if token_a.symbol == token_b.symbol {
        bail!("Pair needs two different tokens, got {} twice", token_a.symbol);
    }
    Ok((token_a, token_b))
}

fn parse_amount(token: &TokenInfo, input: &str, what: &str) -> Result<U256> {
    let amount = token
        .parse_amount(input)
        .with_context(|| format!("Invalid {what} {input:?} for {}", token.symbol))?;
    Ok(amount.raw)
}

fn display(token: &TokenInfo, raw: U256) -> String {
    format_units_truncated(raw, token.decimals, DISPLAY_PLACES)
}

/// Price of one whole `token_a` in whole `token_b`, from smallest-unit amounts
///
/// Cross-multiplies by the other token's decimals so the ratio stays exact.
pub fn human_price(
    amount_a: U256,
    token_a: &TokenInfo,
    amount_b: U256,
    token_b: &TokenInfo,
) -> Result<Decimal> {
    let scaled_a = amount_a
        .checked_mul(U256::exp10(token_b.decimals as usize))
        .context("Amount too large to price")?;
    let scaled_b = amount_b
        .checked_mul(U256::exp10(token_a.decimals as usize))
        .context("Amount too large to price")?;
    Ok(V2Math::starting_price(scaled_a, scaled_b)?)
}

fn percent(fraction: Decimal) -> Decimal {
    (fraction * Decimal::ONE_HUNDRED).round_dp(4)
}

#[derive(Args, Debug)]
pub struct SwapArgs {
    /// Token sold
    #[arg(long)]
    pub from: String,
    /// Token bought
    #[arg(long)]
    pub to: String,
    /// Pool reserve of the sold token
    #[arg(long)]
    pub reserve_in: String,
    /// Pool reserve of the bought token
    #[arg(long)]
    pub reserve_out: String,
    /// Amount to sell, or to buy with --exact-out
    #[arg(long)]
    pub amount: String,
    /// Fix the output amount instead of the input
    #[arg(long)]
    pub exact_out: bool,
    /// Slippage tolerance in percent, overrides the config
    #[arg(long)]
    pub slippage: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct SwapReport {
    pub from: &'static str,
    pub to: &'static str,
    pub direction: TradeDirection,
    pub amount_in: String,
    pub amount_out: String,
    /// Minimum received (exact-in) or maximum sold (exact-out)
    pub bounded_amount: String,
    pub rate: Decimal,
    pub price_impact_percent: Decimal,
    pub fee: String,
    pub router_function: &'static str,
    pub deadline: u64,
}

pub fn swap(ctx: &QuoteContext, args: &SwapArgs) -> Result<SwapReport> {
    let (from, to) = token_pair(&args.from, &args.to)?;

    let reserves = PoolReserves::new(
        parse_amount(from, &args.reserve_in, "reserve")?,
        parse_amount(to, &args.reserve_out, "reserve")?,
    )
    .oriented(true);
    let slippage = ctx.slippage(args.slippage)?;

    let intent = if args.exact_out {
        TradeIntent::exact_out(parse_amount(to, &args.amount, "amount")?, slippage)?
    } else {
        TradeIntent::exact_in(parse_amount(from, &args.amount, "amount")?, slippage)?
    };
    debug!(from = from.symbol, to = to.symbol, direction = %intent.direction, "Quoting swap");

    let quote = ctx.engine.quote(reserves, intent).context("Swap quote failed")?;
    let params = SwapParams::from_quote(&quote, ctx.deadline());

    let bounded_token = match quote.direction {
        TradeDirection::ExactIn => to,
        TradeDirection::ExactOut => from,
    };

    Ok(SwapReport {
        from: from.symbol,
        to: to.symbol,
        direction: quote.direction,
        amount_in: display(from, quote.amount_in),
        amount_out: display(to, quote.amount_out),
        bounded_amount: display(bounded_token, quote.bounded_amount),
        rate: human_price(quote.amount_in, from, quote.amount_out, to)?,
        price_impact_percent: percent(quote.price_impact),
        fee: display(from, quote.fee_amount),
        router_function: params.router_function(),
        deadline: params.deadline.0,
    })
}

impl fmt::Display for SwapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Swap {} -> {} ({})", self.from, self.to, self.direction)?;
        writeln!(f, "  You pay:       {} {}", self.amount_in, self.from)?;
        writeln!(f, "  You receive:   {} {}", self.amount_out, self.to)?;
        match self.direction {
            TradeDirection::ExactIn => {
                writeln!(f, "  Min received:  {} {}", self.bounded_amount, self.to)?
            }
            TradeDirection::ExactOut => {
                writeln!(f, "  Max sold:      {} {}", self.bounded_amount, self.from)?
            }
        }
        writeln!(f, "  Rate:          1 {} = {} {}", self.from, self.rate, self.to)?;
        writeln!(f, "  Price impact:  {}%", self.price_impact_percent)?;
        writeln!(f, "  LP fee:        {} {}", self.fee, self.from)?;
        write!(
            f,
            "  Router call:   {} (deadline {})",
            self.router_function, self.deadline
        )
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub token_a: String,
    #[arg(long)]
    pub token_b: String,
    /// Current reserve of token A (0 for a new pool)
    #[arg(long, default_value = "0")]
    pub reserve_a: String,
    /// Current reserve of token B (0 for a new pool)
    #[arg(long, default_value = "0")]
    pub reserve_b: String,
    /// Total LP supply (0 for a new pool)
    #[arg(long, default_value = "0")]
    pub supply: String,
    /// Amount of token A to deposit
    #[arg(long)]
    pub amount_a: String,
    /// Amount of token B; only used when seeding a new pool
    #[arg(long)]
    pub amount_b: Option<String>,
    /// Slippage tolerance in percent, overrides the config
    #[arg(long)]
    pub slippage: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct AddReport {
    pub token_a: &'static str,
    pub token_b: &'static str,
    pub new_pool: bool,
    pub amount_a: String,
    pub amount_b: String,
    pub amount_a_min: String,
    pub amount_b_min: String,
    pub liquidity_minted: String,
    pub price: Decimal,
    pub pool_share_percent: Decimal,
    pub deadline: u64,
}

pub fn add(ctx: &QuoteContext, args: &AddArgs) -> Result<AddReport> {
    let (token_a, token_b) = token_pair(&args.token_a, &args.token_b)?;
    let reserves = PoolReserves::new(
        parse_amount(token_a, &args.reserve_a, "reserve")?,
        parse_amount(token_b, &args.reserve_b, "reserve")?,
    );
    let supply = parse_amount(&LP_TOKEN, &args.supply, "LP supply")?;
    let amount_a = parse_amount(token_a, &args.amount_a, "amount")?;
    let slippage = ctx.slippage(args.slippage)?;

    let new_pool = reserves.is_empty();
    if new_pool && !supply.is_zero() {
        bail!("Empty reserves with a non-zero LP supply; check --reserve-a, --reserve-b and --supply");
    }
    let (quote, price) = if new_pool {
        let Some(amount_b) = args.amount_b.as_deref() else {
            bail!("Seeding a new pool needs --amount-b to set the starting price");
        };
        let amount_b = parse_amount(token_b, amount_b, "amount")?;
        let quote = ctx
            .engine
            .seed(amount_a, amount_b, slippage)
            .context("Deposit quote failed")?;
        (quote, human_price(amount_a, token_a, amount_b, token_b)?)
    } else {
        if args.amount_b.is_some() {
            warn!("Ignoring --amount-b; the pool ratio sets it");
        }
        let quote = ctx
            .engine
            .deposit(amount_a, reserves, supply, slippage)
            .context("Deposit quote failed")?;
        (
            quote,
            human_price(reserves.reserve_a, token_a, reserves.reserve_b, token_b)?,
        )
    };
    let params = AddLiquidityParams::from_quote(&quote, ctx.deadline());

    Ok(AddReport {
        token_a: token_a.symbol,
        token_b: token_b.symbol,
        new_pool,
        amount_a: display(token_a, params.amount_a_desired),
        amount_b: display(token_b, params.amount_b_desired),
        amount_a_min: display(token_a, params.amount_a_min),
        amount_b_min: display(token_b, params.amount_b_min),
        liquidity_minted: display(&LP_TOKEN, quote.liquidity_minted),
        price,
        pool_share_percent: percent(quote.pool_share),
        deadline: params.deadline.0,
    })
}

impl fmt::Display for AddReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.new_pool { "new pool" } else { "existing pool" };
        writeln!(f, "Add liquidity {}/{} ({kind})", self.token_a, self.token_b)?;
        writeln!(
            f,
            "  Deposit:       {} {} + {} {}",
            self.amount_a, self.token_a, self.amount_b, self.token_b
        )?;
        writeln!(
            f,
            "  Minimums:      {} {} + {} {}",
            self.amount_a_min, self.token_a, self.amount_b_min, self.token_b
        )?;
        writeln!(f, "  LP minted:     {}", self.liquidity_minted)?;
        writeln!(f, "  Price:         1 {} = {} {}", self.token_a, self.price, self.token_b)?;
        writeln!(f, "  Pool share:    {}%", self.pool_share_percent)?;
        write!(f, "  Deadline:      {}", self.deadline)
    }
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    #[arg(long)]
    pub token_a: String,
    #[arg(long)]
    pub token_b: String,
    #[arg(long)]
    pub reserve_a: String,
    #[arg(long)]
    pub reserve_b: String,
    /// Total LP supply
    #[arg(long)]
    pub supply: String,
    /// LP tokens to burn
    #[arg(long)]
    pub lp: String,
    /// Slippage tolerance in percent, overrides the config
    #[arg(long)]
    pub slippage: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct RemoveReport {
    pub token_a: &'static str,
    pub token_b: &'static str,
    pub lp_burned: String,
    pub amount_a: String,
    pub amount_b: String,
    pub amount_a_min: String,
    pub amount_b_min: String,
    pub pool_share_percent: Decimal,
    pub deadline: u64,
}

pub fn remove(ctx: &QuoteContext, args: &RemoveArgs) -> Result<RemoveReport> {
    let (token_a, token_b) = token_pair(&args.token_a, &args.token_b)?;
    let reserves = PoolReserves::new(
        parse_amount(token_a, &args.reserve_a, "reserve")?,
        parse_amount(token_b, &args.reserve_b, "reserve")?,
    );
    let supply = parse_amount(&LP_TOKEN, &args.supply, "LP supply")?;
    let lp = parse_amount(&LP_TOKEN, &args.lp, "LP amount")?;
    let slippage = ctx.slippage(args.slippage)?;

    let quote = ctx
        .engine
        .withdrawal(lp, supply, reserves, slippage)
        .context("Withdrawal quote failed")?;
    let params = RemoveLiquidityParams::from_quote(&quote, ctx.deadline());

    Ok(RemoveReport {
        token_a: token_a.symbol,
        token_b: token_b.symbol,
        lp_burned: display(&LP_TOKEN, params.liquidity),
        amount_a: display(token_a, quote.amount_a),
        amount_b: display(token_b, quote.amount_b),
        amount_a_min: display(token_a, params.amount_a_min),
        amount_b_min: display(token_b, params.amount_b_min),
        pool_share_percent: percent(quote.pool_share),
        deadline: params.deadline.0,
    })
}

impl fmt::Display for RemoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Remove liquidity {}/{}", self.token_a, self.token_b)?;
        writeln!(
            f,
            "  Burn:          {} LP ({}% of pool)",
            self.lp_burned, self.pool_share_percent
        )?;
        writeln!(
            f,
            "  Receive:       {} {} + {} {}",
            self.amount_a, self.token_a, self.amount_b, self.token_b
        )?;
        writeln!(
            f,
            "  Minimums:      {} {} + {} {}",
            self.amount_a_min, self.token_a, self.amount_b_min, self.token_b
        )?;
        write!(f, "  Deadline:      {}", self.deadline)
    }
}

#[derive(Args, Debug)]
pub struct PriceArgs {
    #[arg(long)]
    pub token_a: String,
    #[arg(long)]
    pub token_b: String,
    #[arg(long)]
    pub amount_a: String,
    #[arg(long)]
    pub amount_b: String,
}

#[derive(Debug, Serialize)]
pub struct PriceReport {
    pub token_a: &'static str,
    pub token_b: &'static str,
    /// Whole B per whole A
    pub price: Decimal,
    /// Whole A per whole B; absent when B is zero
    pub inverse: Option<Decimal>,
}

pub fn price(args: &PriceArgs) -> Result<PriceReport> {
    let (token_a, token_b) = token_pair(&args.token_a, &args.token_b)?;
    let amount_a = parse_amount(token_a, &args.amount_a, "amount")?;
    let amount_b = parse_amount(token_b, &args.amount_b, "amount")?;

    let price = human_price(amount_a, token_a, amount_b, token_b)
        .context("Starting price undefined")?;
    let inverse = if amount_b.is_zero() {
        None
    } else {
        Some(human_price(amount_b, token_b, amount_a, token_a)?)
    };

    Ok(PriceReport {
        token_a: token_a.symbol,
        token_b: token_b.symbol,
        price,
        inverse,
    })
}

impl fmt::Display for PriceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.token_a, self.price, self.token_b)?;
        if let Some(inverse) = self.inverse {
            write!(f, "\n1 {} = {} {}", self.token_b, inverse, self.token_a)?;
        }
        Ok(())
    }
}

/// Pseudo-token describing pair LP shares
const LP_TOKEN: TokenInfo = TokenInfo {
    symbol: "LP",
    name: "Pair liquidity",
    address: "",
    decimals: LP_DECIMALS,
};
