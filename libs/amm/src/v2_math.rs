//! Uniswap V2 AMM math with exact calculations
//!
//! Constant-product (`x * y = k`) pricing on smallest-unit integers. Products
//! are formed in 512 bits and every division rounds in the pool's favor:
//! outputs and withdrawals floor, required inputs ceil.

use ethers_core::types::{U256, U512};
use rust_decimal::Decimal;

use crate::error::{QuoteError, Result};
use crate::fraction::Fraction;
use crate::math::{div_rounded, mul_div, ratio_to_decimal, ratio_u256, Rounding};
use crate::pool_state::{PoolReserves, Reserves, TradeDirection};

/// LP units locked forever when a pool is first seeded
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// V2 AMM math functions with zero precision loss
pub struct V2Math;

impl V2Math {
    /// Calculate exact output amount using the x*y=k formula
    ///
    /// # Arguments
    /// * `reserves` - Pool reserves oriented along the trade
    /// * `amount_in` - Input amount in smallest units
    /// * `fee` - Fee fraction deducted from the input (0.003 = 0.3%)
    ///
    /// # Returns
    /// Output amount, floored. Zero input yields zero output.
    pub fn quote_exact_in(reserves: Reserves, amount_in: U256, fee: Fraction) -> Result<U256> {
        if !reserves.is_liquid() {
            return Err(QuoteError::NoLiquidity);
        }
        if amount_in.is_zero() {
            return Ok(U256::zero());
        }

        // amount_in_after_fee = amount_in * keep / scale
        // amount_out = after_fee * reserve_out / (reserve_in + after_fee)
        // Both sides are multiplied through by `scale` to stay exact.
        let (keep, scale) = fee.complement_ratio();
        let after_fee_scaled = amount_in.full_mul(keep);
        let numerator = after_fee_scaled
            .checked_mul(U512::from(reserves.reserve_out))
            .ok_or(QuoteError::Overflow("exact-in numerator"))?;
        let denominator = reserves
            .reserve_in
            .full_mul(scale)
            .checked_add(after_fee_scaled)
            .ok_or(QuoteError::Overflow("exact-in denominator"))?;

        div_rounded(numerator, denominator, Rounding::Down)
    }

    /// Calculate required input amount for desired output (reverse calculation)
    ///
    /// Rounds up, so feeding the result back into [`V2Math::quote_exact_in`]
    /// yields at least `amount_out`.
    pub fn quote_exact_out(reserves: Reserves, amount_out: U256, fee: Fraction) -> Result<U256> {
        if !reserves.is_liquid() {
            return Err(QuoteError::NoLiquidity);
        }
        if amount_out.is_zero() {
            return Err(QuoteError::InvalidAmount("output amount must be positive"));
        }
        if amount_out >= reserves.reserve_out {
            return Err(QuoteError::InsufficientOutputReserve);
        }

        let (keep, scale) = fee.complement_ratio();
        if keep.is_zero() {
            return Err(QuoteError::DivisionByZero("fee consumes the entire input"));
        }

        // amount_in = reserve_in * amount_out * scale / ((reserve_out - amount_out) * keep)
        let numerator = reserves
            .reserve_in
            .full_mul(amount_out)
            .checked_mul(U512::from(scale))
            .ok_or(QuoteError::Overflow("exact-out numerator"))?;
        let denominator = (reserves.reserve_out - amount_out).full_mul(keep);

        div_rounded(numerator, denominator, Rounding::Up)
    }

    /// Price impact as a fraction of the spot-rate output
    ///
    /// `max(0, (expected - amount_out) / expected)` where
    /// `expected = amount_in * reserve_out / reserve_in`. Any zero input gives 0.
    pub fn price_impact(reserves: Reserves, amount_in: U256, amount_out: U256) -> Result<Decimal> {
        if !reserves.is_liquid() || amount_in.is_zero() {
            return Ok(Decimal::ZERO);
        }

        // Scaled through by reserve_in to stay in integers
        let expected = amount_in.full_mul(reserves.reserve_out);
        let actual = amount_out.full_mul(reserves.reserve_in);
        if actual >= expected {
            return Ok(Decimal::ZERO);
        }

        ratio_to_decimal(expected - actual, expected)
    }

    /// Fee-free price impact of selling `amount_in` along the curve
    ///
    /// For `x * y = k` the curve output is `amount_in * reserve_out / (reserve_in + amount_in)`,
    /// so the shortfall against the spot rate reduces to
    /// `amount_in / (reserve_in + amount_in)`. Evaluated exactly, so it stays
    /// near zero for tiny trades and rises monotonically with size.
    pub fn curve_impact(reserves: Reserves, amount_in: U256) -> Result<Decimal> {
        if !reserves.is_liquid() {
            return Err(QuoteError::NoLiquidity);
        }
        if amount_in.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let total = U512::from(reserves.reserve_in) + U512::from(amount_in);
        ratio_to_decimal(U512::from(amount_in), total)
    }

    /// Bound an amount by the slippage tolerance
    ///
    /// Exact-in quotes get a floored minimum output `amount * (1 - t)`;
    /// exact-out quotes get a ceiled maximum input `amount * (1 + t)`.
    pub fn apply_slippage(
        amount: U256,
        tolerance: Fraction,
        direction: TradeDirection,
    ) -> Result<U256> {
        let (numerator, denominator) = tolerance.ratio();
        match direction {
            TradeDirection::ExactIn => {
                mul_div(amount, denominator - numerator, denominator, Rounding::Down)
            }
            TradeDirection::ExactOut => mul_div(
                amount,
                denominator + numerator,
                denominator,
                Rounding::Up,
            ),
        }
    }

    /// Pro-rata share of both reserves for burning `lp_amount` LP tokens
    pub fn proportional_withdrawal(
        lp_amount: U256,
        total_lp_supply: U256,
        reserves: PoolReserves,
    ) -> Result<(U256, U256)> {
        Self::check_lp_amount(lp_amount, total_lp_supply)?;

        let amount_a = mul_div(
            reserves.reserve_a,
            lp_amount,
            total_lp_supply,
            Rounding::Down,
        )?;
        let amount_b = mul_div(
            reserves.reserve_b,
            lp_amount,
            total_lp_supply,
            Rounding::Down,
        )?;

        Ok((amount_a, amount_b))
    }

    /// Implied price `amount_b / amount_a` for seeding an empty pool
    pub fn starting_price(amount_a: U256, amount_b: U256) -> Result<Decimal> {
        if amount_a.is_zero() {
            return Err(QuoteError::DivisionByZero("starting price needs a non-zero base amount"));
        }
        ratio_u256(amount_b, amount_a)
    }

    /// Marginal rate `reserve_out / reserve_in`
    pub fn spot_price(reserves: Reserves) -> Result<Decimal> {
        if !reserves.is_liquid() {
            return Err(QuoteError::NoLiquidity);
        }
        ratio_u256(reserves.reserve_out, reserves.reserve_in)
    }

    /// Amount of token B matching `amount_a` at the current pool ratio
    pub fn quote_liquidity(amount_a: U256, reserves: PoolReserves) -> Result<U256> {
        if amount_a.is_zero() {
            return Err(QuoteError::InvalidAmount("deposit amount must be positive"));
        }
        if !reserves.is_liquid() {
            return Err(QuoteError::NoLiquidity);
        }
        mul_div(amount_a, reserves.reserve_b, reserves.reserve_a, Rounding::Down)
    }

    /// LP tokens minted for a deposit of `(amount_a, amount_b)`
    ///
    /// A fresh pool mints `sqrt(a * b) - MINIMUM_LIQUIDITY`; an existing pool
    /// mints the smaller of the two pro-rata claims on `total_lp_supply`.
    pub fn liquidity_minted(
        amount_a: U256,
        amount_b: U256,
        reserves: PoolReserves,
        total_lp_supply: U256,
    ) -> Result<U256> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(QuoteError::InvalidAmount("deposit amounts must be positive"));
        }

        let minted = if total_lp_supply.is_zero() {
            if !reserves.is_empty() {
                return Err(QuoteError::DivisionByZero(
                    "total LP supply is zero for a funded pool",
                ));
            }
            let product = amount_a
                .checked_mul(amount_b)
                .ok_or(QuoteError::Overflow("initial liquidity product"))?;
            product
                .integer_sqrt()
                .saturating_sub(U256::from(MINIMUM_LIQUIDITY))
        } else {
            if !reserves.is_liquid() {
                return Err(QuoteError::NoLiquidity);
            }
            let by_a = mul_div(amount_a, total_lp_supply, reserves.reserve_a, Rounding::Down)?;
            let by_b = mul_div(amount_b, total_lp_supply, reserves.reserve_b, Rounding::Down)?;
            by_a.min(by_b)
        };

        if minted.is_zero() {
            return Err(QuoteError::InvalidAmount("deposit too small to mint liquidity"));
        }
        Ok(minted)
    }

    /// Fraction of the pool represented by `lp_amount`
    pub fn pool_share(lp_amount: U256, total_lp_supply: U256) -> Result<Decimal> {
        Self::check_lp_amount(lp_amount, total_lp_supply)?;
        ratio_u256(lp_amount, total_lp_supply)
    }

    fn check_lp_amount(lp_amount: U256, total_lp_supply: U256) -> Result<()> {
        if total_lp_supply.is_zero() {
            return Err(QuoteError::DivisionByZero("total LP supply is zero"));
        }
        if lp_amount.is_zero() {
            return Err(QuoteError::InvalidAmount("LP amount must be positive"));
        }
        if lp_amount > total_lp_supply {
            return Err(QuoteError::InvalidAmount("LP amount exceeds total supply"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fee_30bp() -> Fraction {
        Fraction::new(dec!(0.003)).unwrap()
    }

    fn reserves(reserve_in: u64, reserve_out: u64) -> Reserves {
        Reserves::new(U256::from(reserve_in), U256::from(reserve_out))
    }

    fn wei(tokens: u64) -> U256 {
        U256::from(tokens) * U256::exp10(18)
    }

    #[test]
    fn test_v2_output_calculation() {
        // 100 tokens in, 1000:2000 reserves, 0.3% fee: 181.32.. floors to 181
        let output = V2Math::quote_exact_in(reserves(1000, 2000), U256::from(100), fee_30bp())
            .unwrap();
        assert_eq!(output, U256::from(181));
    }

    #[test]
    fn test_reference_scenario_at_unit_and_wei_scale() {
        // 2000 - 2_000_000 / 1009.97 = 19.743..
        let unit = V2Math::quote_exact_in(reserves(1000, 2000), U256::from(10), fee_30bp())
            .unwrap();
        assert_eq!(unit, U256::from(19));

        let scaled = V2Math::quote_exact_in(
            Reserves::new(wei(1000), wei(2000)),
            wei(10),
            fee_30bp(),
        )
        .unwrap();
        assert_eq!(
            scaled,
            U256::from_dec_str("19743160687941225977").unwrap()
        );
    }

    #[test]
    fn test_zero_input_yields_zero() {
        let output =
            V2Math::quote_exact_in(reserves(1000, 2000), U256::zero(), fee_30bp()).unwrap();
        assert!(output.is_zero());
    }

    #[test]
    fn test_no_liquidity() {
        for pool in [reserves(0, 2000), reserves(1000, 0), reserves(0, 0)] {
            assert_eq!(
                V2Math::quote_exact_in(pool, U256::from(10), fee_30bp()),
                Err(QuoteError::NoLiquidity)
            );
            assert_eq!(
                V2Math::quote_exact_out(pool, U256::from(10), fee_30bp()),
                Err(QuoteError::NoLiquidity)
            );
        }
    }

    #[test]
    fn test_output_never_drains_pool() {
        let output =
            V2Math::quote_exact_in(reserves(1000, 2000), U256::MAX, Fraction::ZERO).unwrap();
        assert!(output < U256::from(2000));
    }

    #[test]
    fn test_full_fee_yields_nothing() {
        let output =
            V2Math::quote_exact_in(reserves(1000, 2000), U256::from(500), Fraction::ONE).unwrap();
        assert!(output.is_zero());
        assert!(matches!(
            V2Math::quote_exact_out(reserves(1000, 2000), U256::from(5), Fraction::ONE),
            Err(QuoteError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_v2_input_calculation() {
        let input = V2Math::quote_exact_out(reserves(1000, 2000), U256::from(19), fee_30bp())
            .unwrap();
        assert_eq!(input, U256::from(10));

        let back = V2Math::quote_exact_in(reserves(1000, 2000), input, fee_30bp()).unwrap();
        assert!(back >= U256::from(19));
    }

    #[test]
    fn test_round_trip_at_wei_scale() {
        let pool = Reserves::new(wei(1000), wei(2000));
        let out = V2Math::quote_exact_in(pool, wei(10), fee_30bp()).unwrap();
        let input = V2Math::quote_exact_out(pool, out, fee_30bp()).unwrap();
        assert_eq!(input, wei(10));
    }

    #[test]
    fn test_exact_out_rejections() {
        let pool = reserves(1000, 2000);
        assert_eq!(
            V2Math::quote_exact_out(pool, U256::from(2000), fee_30bp()),
            Err(QuoteError::InsufficientOutputReserve)
        );
        assert_eq!(
            V2Math::quote_exact_out(pool, U256::from(5000), fee_30bp()),
            Err(QuoteError::InsufficientOutputReserve)
        );
        assert!(matches!(
            V2Math::quote_exact_out(pool, U256::zero(), fee_30bp()),
            Err(QuoteError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_price_impact() {
        let pool = reserves(1000, 2000);
        let output = V2Math::quote_exact_in(pool, U256::from(100), Fraction::ZERO).unwrap();
        let impact = V2Math::price_impact(pool, U256::from(100), output).unwrap();

        // 10% of reserves moves the price noticeably but not wildly
        assert!(impact > dec!(0.05));
        assert!(impact < dec!(0.2));
    }

    #[test]
    fn test_price_impact_negligible_trade() {
        let pool = Reserves::new(wei(1_000_000), wei(1_000_000));
        let output = V2Math::quote_exact_in(pool, wei(1), Fraction::ZERO).unwrap();
        let impact = V2Math::price_impact(pool, wei(1), output).unwrap();
        assert!(impact < dec!(0.000002));
    }

    #[test]
    fn test_curve_impact_at_unit_scale() {
        let pool = reserves(1_000_000, 1_000_000);
        // One unit against a million: the floored output is 0 but the curve barely moves
        let tiny = V2Math::curve_impact(pool, U256::one()).unwrap();
        assert!(tiny < dec!(0.000002));

        let mut previous = tiny;
        for amount in [2u64, 10, 100, 1_000, 100_000, 1_000_000] {
            let impact = V2Math::curve_impact(pool, U256::from(amount)).unwrap();
            assert!(impact > previous, "impact {} not above {}", impact, previous);
            previous = impact;
        }
        assert_eq!(previous, dec!(0.5));

        assert_eq!(V2Math::curve_impact(pool, U256::zero()).unwrap(), Decimal::ZERO);
        assert_eq!(
            V2Math::curve_impact(reserves(0, 10), U256::one()),
            Err(QuoteError::NoLiquidity)
        );
    }

    #[test]
    fn test_price_impact_degenerate_inputs() {
        assert_eq!(
            V2Math::price_impact(reserves(0, 0), U256::from(10), U256::from(1)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            V2Math::price_impact(reserves(1000, 2000), U256::zero(), U256::zero()).unwrap(),
            Decimal::ZERO
        );
        // Better than spot clamps to zero
        assert_eq!(
            V2Math::price_impact(reserves(1000, 2000), U256::from(10), U256::from(50)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_apply_slippage() {
        let tolerance = Fraction::new(dec!(0.05)).unwrap();
        assert_eq!(
            V2Math::apply_slippage(U256::from(100), tolerance, TradeDirection::ExactIn).unwrap(),
            U256::from(95)
        );
        assert_eq!(
            V2Math::apply_slippage(U256::from(100), tolerance, TradeDirection::ExactOut).unwrap(),
            U256::from(105)
        );
    }

    #[test]
    fn test_apply_slippage_rounds_conservatively() {
        let tolerance = Fraction::new(dec!(0.005)).unwrap();
        // 999 * 0.995 = 994.005 -> 994 ; 999 * 1.005 = 1003.995 -> 1004
        assert_eq!(
            V2Math::apply_slippage(U256::from(999), tolerance, TradeDirection::ExactIn).unwrap(),
            U256::from(994)
        );
        assert_eq!(
            V2Math::apply_slippage(U256::from(999), tolerance, TradeDirection::ExactOut).unwrap(),
            U256::from(1004)
        );
    }

    #[test]
    fn test_full_withdrawal_returns_full_reserves() {
        let pool = PoolReserves::new(U256::from(100), U256::from(200));
        let (a, b) =
            V2Math::proportional_withdrawal(U256::from(50), U256::from(50), pool).unwrap();
        assert_eq!((a, b), (U256::from(100), U256::from(200)));
    }

    #[test]
    fn test_partial_withdrawal_floors() {
        let pool = PoolReserves::new(U256::from(10), U256::from(21));
        let (a, b) = V2Math::proportional_withdrawal(U256::from(1), U256::from(4), pool).unwrap();
        assert_eq!((a, b), (U256::from(2), U256::from(5)));
    }

    #[test]
    fn test_withdrawal_rejections() {
        let pool = PoolReserves::new(U256::from(100), U256::from(200));
        assert!(matches!(
            V2Math::proportional_withdrawal(U256::from(1), U256::zero(), pool),
            Err(QuoteError::DivisionByZero(_))
        ));
        assert!(matches!(
            V2Math::proportional_withdrawal(U256::zero(), U256::from(10), pool),
            Err(QuoteError::InvalidAmount(_))
        ));
        assert!(matches!(
            V2Math::proportional_withdrawal(U256::from(11), U256::from(10), pool),
            Err(QuoteError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_starting_price() {
        assert_eq!(
            V2Math::starting_price(U256::from(4), U256::from(10)).unwrap(),
            dec!(2.5)
        );
        assert!(matches!(
            V2Math::starting_price(U256::zero(), U256::from(10)),
            Err(QuoteError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(V2Math::spot_price(reserves(1000, 2000)).unwrap(), dec!(2));
        assert_eq!(
            V2Math::spot_price(reserves(1000, 0)),
            Err(QuoteError::NoLiquidity)
        );
    }

    #[test]
    fn test_quote_liquidity_matches_ratio() {
        let pool = PoolReserves::new(U256::from(1000), U256::from(2000));
        assert_eq!(
            V2Math::quote_liquidity(U256::from(15), pool).unwrap(),
            U256::from(30)
        );
        assert_eq!(
            V2Math::quote_liquidity(U256::from(15), PoolReserves::default()),
            Err(QuoteError::NoLiquidity)
        );
    }

    #[test]
    fn test_liquidity_minted_fresh_pool() {
        // sqrt(4_000_000 * 1_000_000) = 2_000_000
        let minted = V2Math::liquidity_minted(
            U256::from(4_000_000),
            U256::from(1_000_000),
            PoolReserves::default(),
            U256::zero(),
        )
        .unwrap();
        assert_eq!(minted, U256::from(2_000_000 - MINIMUM_LIQUIDITY));

        // Below the locked minimum nothing is minted
        assert!(matches!(
            V2Math::liquidity_minted(
                U256::from(10),
                U256::from(10),
                PoolReserves::default(),
                U256::zero()
            ),
            Err(QuoteError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_liquidity_minted_rejects_zero_supply_on_funded_pool() {
        let pool = PoolReserves::new(U256::from(1_000_000), U256::from(2_000_000));
        assert!(matches!(
            V2Math::liquidity_minted(U256::from(100_000), U256::from(200_000), pool, U256::zero()),
            Err(QuoteError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_liquidity_minted_existing_pool_takes_smaller_claim() {
        let pool = PoolReserves::new(U256::from(1000), U256::from(2000));
        let minted =
            V2Math::liquidity_minted(U256::from(100), U256::from(100), pool, U256::from(500))
                .unwrap();
        // by_a = 50, by_b = 25
        assert_eq!(minted, U256::from(25));
    }

    #[test]
    fn test_pool_share() {
        assert_eq!(
            V2Math::pool_share(U256::from(25), U256::from(100)).unwrap(),
            dec!(0.25)
        );
        assert!(V2Math::pool_share(U256::from(101), U256::from(100)).is_err());
    }
}
