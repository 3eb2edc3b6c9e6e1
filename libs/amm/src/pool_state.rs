//! Pool reserve snapshots and trade direction

use std::fmt;

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// Which side of the trade the user fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    /// Input amount is exact; output is quoted and bounded below
    ExactIn,
    /// Output amount is exact; input is quoted and bounded above
    ExactOut,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn => write!(f, "exact-in"),
            Self::ExactOut => write!(f, "exact-out"),
        }
    }
}

/// Reserves oriented along a swap: the token going in, the token coming out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserves {
    pub reserve_in: U256,
    pub reserve_out: U256,
}

impl Reserves {
    pub fn new(reserve_in: U256, reserve_out: U256) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Both sides hold a positive balance
    pub fn is_liquid(&self) -> bool {
        !self.reserve_in.is_zero() && !self.reserve_out.is_zero()
    }
}

/// Reserves in pair order (token A, token B), as a pair contract reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolReserves {
    pub reserve_a: U256,
    pub reserve_b: U256,
}

impl PoolReserves {
    pub fn new(reserve_a: U256, reserve_b: U256) -> Self {
        Self {
            reserve_a,
            reserve_b,
        }
    }

    /// Fresh pool with nothing deposited yet
    pub fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }

    pub fn is_liquid(&self) -> bool {
        !self.reserve_a.is_zero() && !self.reserve_b.is_zero()
    }

    /// Orient for a swap; `a_to_b` sells token A for token B
    pub fn oriented(&self, a_to_b: bool) -> Reserves {
        if a_to_b {
            Reserves::new(self.reserve_a, self.reserve_b)
        } else {
            Reserves::new(self.reserve_b, self.reserve_a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        let pool = PoolReserves::new(U256::from(100), U256::from(200));
        assert_eq!(
            pool.oriented(true),
            Reserves::new(U256::from(100), U256::from(200))
        );
        assert_eq!(
            pool.oriented(false),
            Reserves::new(U256::from(200), U256::from(100))
        );
    }

    #[test]
    fn test_liquidity_flags() {
        assert!(PoolReserves::default().is_empty());
        assert!(!PoolReserves::default().is_liquid());

        let half = PoolReserves::new(U256::from(5), U256::zero());
        assert!(!half.is_empty());
        assert!(!half.is_liquid());
        assert!(!half.oriented(true).is_liquid());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(TradeDirection::ExactIn.to_string(), "exact-in");
        assert_eq!(TradeDirection::ExactOut.to_string(), "exact-out");
    }
}
