//! Router call parameters
//!
//! Turns quotes into the argument sets a V2 router expects
//! (`swapExactTokensForTokens`, `swapTokensForExactTokens`, `addLiquidity`,
//! `removeLiquidity`). Building them is pure; signing and submitting the
//! transaction is the wallet layer's job.

use ethers_core::types::U256;
use serde::Serialize;

use crate::engine::{DepositQuote, Quote, WithdrawalQuote};
use crate::pool_state::TradeDirection;

/// Default validity window for router calls (20 minutes)
pub const DEFAULT_DEADLINE_SECS: u64 = 20 * 60;

/// Unix timestamp after which the router rejects the call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Deadline(pub u64);

impl Deadline {
    /// `now + ttl`, saturating at `u64::MAX`
    pub fn after(now_unix_secs: u64, ttl_secs: u64) -> Self {
        Self(now_unix_secs.saturating_add(ttl_secs))
    }
}

/// Arguments for one of the two swap entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapParams {
    pub direction: TradeDirection,
    /// Exact input, or maximum input for exact-out swaps
    pub amount_in: U256,
    /// Minimum output for exact-in swaps, or exact output
    pub amount_out: U256,
    pub deadline: Deadline,
}

impl SwapParams {
    pub fn from_quote(quote: &Quote, deadline: Deadline) -> Self {
        let (amount_in, amount_out) = match quote.direction {
            TradeDirection::ExactIn => (quote.amount_in, quote.bounded_amount),
            TradeDirection::ExactOut => (quote.bounded_amount, quote.amount_out),
        };
        Self {
            direction: quote.direction,
            amount_in,
            amount_out,
            deadline,
        }
    }

    pub fn router_function(&self) -> &'static str {
        match self.direction {
            TradeDirection::ExactIn => "swapExactTokensForTokens",
            TradeDirection::ExactOut => "swapTokensForExactTokens",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddLiquidityParams {
    pub amount_a_desired: U256,
    pub amount_b_desired: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub deadline: Deadline,
}

impl AddLiquidityParams {
    pub fn from_quote(quote: &DepositQuote, deadline: Deadline) -> Self {
        Self {
            amount_a_desired: quote.amount_a,
            amount_b_desired: quote.amount_b,
            amount_a_min: quote.amount_a_min,
            amount_b_min: quote.amount_b_min,
            deadline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoveLiquidityParams {
    pub liquidity: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub deadline: Deadline,
}

impl RemoveLiquidityParams {
    pub fn from_quote(quote: &WithdrawalQuote, deadline: Deadline) -> Self {
        Self {
            liquidity: quote.lp_amount,
            amount_a_min: quote.amount_a_min,
            amount_b_min: quote.amount_b_min,
            deadline,
        }
    }
}
