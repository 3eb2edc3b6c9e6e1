//! # Dexkit AMM Library - Constant-Product Quote Engine
//!
//! ## Purpose
//!
//! Pure, deterministic quoting for two-asset constant-product (`x * y = k`)
//! pools: swap output/input amounts, executed rate, price impact, slippage
//! bounds, pro-rata withdrawals, deposit sizing and starting prices. The front
//! end supplies reserves and user amounts; the engine returns amounts and typed
//! failure reasons it can render directly.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool reserves and LP supply from contract reads, user amounts
//!   parsed by `dexkit-types`, fee and slippage defaults from `dexkit-config`
//! - **Output Destinations**: Swap and pool screens, router parameter builders
//! - **Precision**: Smallest-unit `U256` integers, 512-bit intermediates, no floating point
//! - **Rounding**: Always in the pool's favor (outputs floor, required inputs ceil)
//! - **Failures**: [`QuoteError`] variants, never panics on domain conditions
//!
//! ## Architecture Role
//!
//! See [`architecture_diagram()`] for the data flow.
//!
//! ## Example
//!
//! ```rust
//! use dexkit_amm::{Fraction, QuoteEngine, Reserves, TradeIntent, U256};
//! use rust_decimal_macros::dec;
//!
//! let engine = QuoteEngine::default(); // 0.3% fee
//! let reserves = Reserves::new(U256::from(1_000), U256::from(2_000));
//! let slippage = Fraction::new(dec!(0.05)).unwrap();
//!
//! let quote = engine
//!     .quote(reserves, TradeIntent::exact_in(U256::from(10), slippage).unwrap())
//!     .unwrap();
//! assert_eq!(quote.amount_out, U256::from(19));
//! assert_eq!(quote.bounded_amount, U256::from(18));
//! ```

pub mod engine;
pub mod error;
pub mod fraction;
pub mod math;
pub mod pool_state;
pub mod router_params;
pub mod v2_math;

pub use engine::{DepositQuote, Quote, QuoteEngine, TradeIntent, WithdrawalQuote, DEFAULT_FEE};
pub use error::{QuoteError, Result};
pub use fraction::Fraction;
pub use math::Rounding;
pub use pool_state::{PoolReserves, Reserves, TradeDirection};
pub use router_params::{
    AddLiquidityParams, Deadline, RemoveLiquidityParams, SwapParams, DEFAULT_DEADLINE_SECS,
};
pub use v2_math::{V2Math, MINIMUM_LIQUIDITY};

/// Common types for AMM calculations
pub use ethers_core::types::U256;
pub use rust_decimal::Decimal;

/// Architecture diagram showing quote data flow
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph LR
///     subgraph Input["Caller Inputs"]
///         RV[Pool Reserves]
///         LP[LP Supply]
///         UA[User Amounts]
///         ST[Slippage Tolerance]
///     end
///
///     subgraph Math["V2Math"]
///         EI[Exact In / Exact Out]
///         PI[Price Impact]
///         SL[Slippage Bounds]
///         PR[Pro-rata Withdrawal]
///     end
///
///     subgraph Engine["QuoteEngine"]
///         Q[Swap Quote]
///         D[Deposit Quote]
///         W[Withdrawal Quote]
///     end
///
///     subgraph Output["Callers"]
///         UI[Swap / Pool Screens]
///         RP[Router Params]
///     end
///
///     RV --> EI
///     UA --> EI
///     EI --> PI
///     ST --> SL
///     LP --> PR
///
///     EI --> Q
///     PI --> Q
///     SL --> Q
///     SL --> D
///     PR --> W
///
///     Q --> UI
///     D --> UI
///     W --> UI
///     Q --> RP
///     D --> RP
///     W --> RP
///
///     style Input fill:#e1f5fe
///     style Math fill:#fff3e0
///     style Engine fill:#f3e5f5
///     style Output fill:#e8f5e9
/// ```
pub fn architecture_diagram() {
    // This function exists solely for documentation purposes
    // The diagram is rendered by aquamarine in rustdoc
}
