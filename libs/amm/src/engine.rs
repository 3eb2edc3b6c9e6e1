//! Quote engine
//!
//! [`QuoteEngine`] is the entry point callers hold: it carries the pool fee and
//! composes the [`V2Math`] primitives into complete swap, deposit and
//! withdrawal quotes. It holds no state between calls, is `Copy`, and can be
//! shared freely across threads.

use ethers_core::types::U256;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::error::{QuoteError, Result};
use crate::fraction::Fraction;
use crate::math::{mul_div, ratio_u256, Rounding};
use crate::pool_state::{PoolReserves, Reserves, TradeDirection};
use crate::v2_math::V2Math;

/// Standard two-sided AMM fee (0.3%)
pub const DEFAULT_FEE: Decimal = dec!(0.003);

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradeIntent {
    pub direction: TradeDirection,
    /// Exact input (exact-in) or exact output (exact-out), smallest units
    pub amount: U256,
    pub slippage: Fraction,
}

impl TradeIntent {
    pub fn new(direction: TradeDirection, amount: U256, slippage: Fraction) -> Result<Self> {
        if amount.is_zero() {
            return Err(QuoteError::InvalidAmount("trade amount must be positive"));
        }
        Ok(Self {
            direction,
            amount,
            slippage,
        })
    }

    pub fn exact_in(amount: U256, slippage: Fraction) -> Result<Self> {
        Self::new(TradeDirection::ExactIn, amount, slippage)
    }

    pub fn exact_out(amount: U256, slippage: Fraction) -> Result<Self> {
        Self::new(TradeDirection::ExactOut, amount, slippage)
    }
}

/// Fully priced swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub direction: TradeDirection,
    pub amount_in: U256,
    pub amount_out: U256,
    /// Executed rate, output units per input unit
    pub exchange_rate: Decimal,
    /// Curve-only price movement, LP fee excluded
    pub price_impact: Decimal,
    /// Minimum output (exact-in) or maximum input (exact-out)
    pub bounded_amount: U256,
    /// LP fee charged on the input, smallest units of the input token
    pub fee_amount: U256,
}

impl Quote {
    /// The amount the engine computed (the side the user did not fix)
    pub fn counter_amount(&self) -> U256 {
        match self.direction {
            TradeDirection::ExactIn => self.amount_out,
            TradeDirection::ExactOut => self.amount_in,
        }
    }
}

/// Pro-rata withdrawal with slippage minimums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WithdrawalQuote {
    pub lp_amount: U256,
    pub amount_a: U256,
    pub amount_b: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub pool_share: Decimal,
}

/// Deposit amounts, minimums and the LP tokens they mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepositQuote {
    pub amount_a: U256,
    pub amount_b: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub liquidity_minted: U256,
    /// Price of A in B the deposit implies (or keeps)
    pub price: Decimal,
    /// Share of the pool after the deposit
    pub pool_share: Decimal,
}

/// Constant-product quote engine bound to one pool fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteEngine {
    fee: Fraction,
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self {
            fee: Fraction(DEFAULT_FEE),
        }
    }
}

impl QuoteEngine {
    pub fn new(fee: Fraction) -> Self {
        Self { fee }
    }

    pub fn fee(&self) -> Fraction {
        self.fee
    }

    pub fn quote_exact_in(&self, reserves: Reserves, amount_in: U256) -> Result<U256> {
        V2Math::quote_exact_in(reserves, amount_in, self.fee)
    }

    pub fn quote_exact_out(&self, reserves: Reserves, amount_out: U256) -> Result<U256> {
        V2Math::quote_exact_out(reserves, amount_out, self.fee)
    }

    /// Price a swap end to end
    pub fn quote(&self, reserves: Reserves, intent: TradeIntent) -> Result<Quote> {
        let (amount_in, amount_out) = match intent.direction {
            TradeDirection::ExactIn => (
                intent.amount,
                self.quote_exact_in(reserves, intent.amount)?,
            ),
            TradeDirection::ExactOut => (
                self.quote_exact_out(reserves, intent.amount)?,
                intent.amount,
            ),
        };

        // Fee-free curve impact, so the LP fee is not double counted
        let price_impact = V2Math::curve_impact(reserves, amount_in)?;

        let bounded_amount = match intent.direction {
            TradeDirection::ExactIn => {
                V2Math::apply_slippage(amount_out, intent.slippage, intent.direction)?
            }
            TradeDirection::ExactOut => {
                V2Math::apply_slippage(amount_in, intent.slippage, intent.direction)?
            }
        };

        let (fee_numerator, fee_denominator) = self.fee.ratio();
        let fee_amount = mul_div(amount_in, fee_numerator, fee_denominator, Rounding::Down)?;
        let exchange_rate = ratio_u256(amount_out, amount_in)?;

        debug!(
            direction = %intent.direction,
            %amount_in,
            %amount_out,
            %price_impact,
            %bounded_amount,
            "Quoted swap"
        );

        Ok(Quote {
            direction: intent.direction,
            amount_in,
            amount_out,
            exchange_rate,
            price_impact,
            bounded_amount,
            fee_amount,
        })
    }

    /// Price burning `lp_amount` LP tokens
    pub fn withdrawal(
        &self,
        lp_amount: U256,
        total_lp_supply: U256,
        reserves: PoolReserves,
        slippage: Fraction,
    ) -> Result<WithdrawalQuote> {
        let (amount_a, amount_b) =
            V2Math::proportional_withdrawal(lp_amount, total_lp_supply, reserves)?;
        let amount_a_min = V2Math::apply_slippage(amount_a, slippage, TradeDirection::ExactIn)?;
        let amount_b_min = V2Math::apply_slippage(amount_b, slippage, TradeDirection::ExactIn)?;
        let pool_share = V2Math::pool_share(lp_amount, total_lp_supply)?;

        debug!(%lp_amount, %amount_a, %amount_b, %pool_share, "Quoted withdrawal");

        Ok(WithdrawalQuote {
            lp_amount,
            amount_a,
            amount_b,
            amount_a_min,
            amount_b_min,
            pool_share,
        })
    }

    /// Price a deposit into a pool that already has reserves
    ///
    /// `amount_b` is derived from the pool ratio so the deposit does not move the price.
    pub fn deposit(
        &self,
        amount_a: U256,
        reserves: PoolReserves,
        total_lp_supply: U256,
        slippage: Fraction,
    ) -> Result<DepositQuote> {
        let amount_b = V2Math::quote_liquidity(amount_a, reserves)?;
        let liquidity_minted =
            V2Math::liquidity_minted(amount_a, amount_b, reserves, total_lp_supply)?;
        let price = V2Math::spot_price(reserves.oriented(true))?;
        let pool_share = Self::share_after_mint(liquidity_minted, total_lp_supply)?;

        self.finish_deposit(amount_a, amount_b, liquidity_minted, price, pool_share, slippage)
    }

    /// Price the first deposit into an empty pool; the amounts set the starting price
    pub fn seed(&self, amount_a: U256, amount_b: U256, slippage: Fraction) -> Result<DepositQuote> {
        let price = V2Math::starting_price(amount_a, amount_b)?;
        let liquidity_minted =
            V2Math::liquidity_minted(amount_a, amount_b, PoolReserves::default(), U256::zero())?;
        // The locked minimum belongs to nobody, so the seeder's share is below 1
        let total = liquidity_minted + U256::from(crate::v2_math::MINIMUM_LIQUIDITY);
        let pool_share = ratio_u256(liquidity_minted, total)?;

        self.finish_deposit(amount_a, amount_b, liquidity_minted, price, pool_share, slippage)
    }

    fn share_after_mint(minted: U256, total_lp_supply: U256) -> Result<Decimal> {
        let total = minted
            .checked_add(total_lp_supply)
            .ok_or(QuoteError::Overflow("LP supply after mint"))?;
        ratio_u256(minted, total)
    }

    fn finish_deposit(
        &self,
        amount_a: U256,
        amount_b: U256,
        liquidity_minted: U256,
        price: Decimal,
        pool_share: Decimal,
        slippage: Fraction,
    ) -> Result<DepositQuote> {
        let amount_a_min = V2Math::apply_slippage(amount_a, slippage, TradeDirection::ExactIn)?;
        let amount_b_min = V2Math::apply_slippage(amount_b, slippage, TradeDirection::ExactIn)?;

        debug!(%amount_a, %amount_b, %liquidity_minted, %price, "Quoted deposit");

        Ok(DepositQuote {
            amount_a,
            amount_b,
            amount_a_min,
            amount_b_min,
            liquidity_minted,
            price,
            pool_share,
        })
    }
}
