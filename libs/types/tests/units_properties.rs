//! Decimal-string conversion properties
//!
//! Parsing and formatting must agree exactly for every amount a token can
//! represent, and reject anything finer than the token's precision.

use dexkit_types::{format_units, parse_units, PrecisionError, U256};
use proptest::prelude::*;

prop_compose! {
    /// A decimal string with at most `decimals` fractional digits
    fn decimal_input()
        (decimals in 0u8..=18u8)
        (whole in 0u128..1_000_000_000_000_000_000_000u128,
         fraction in proptest::collection::vec(0u8..10u8, 0..=decimals as usize),
         decimals in Just(decimals)) -> (String, u8) {
        let fraction: String = fraction.iter().map(|d| char::from(b'0' + d)).collect();
        if fraction.is_empty() {
            (whole.to_string(), decimals)
        } else {
            (format!("{whole}.{fraction}"), decimals)
        }
    }
}

/// Canonical form of a decimal string: no trailing fractional zeros, no bare dot
fn normalized(input: &str) -> String {
    match input.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => input.to_string(),
    }
}

proptest! {
    /// Property: formatting a parsed amount gives back the normalized input
    #[test]
    fn parse_then_format_normalizes(
        (input, decimals) in decimal_input(),
    ) {
        let raw = parse_units(&input, decimals).unwrap();
        prop_assert_eq!(format_units(raw, decimals), normalized(&input));
    }

    /// Property: every raw amount survives formatting and re-parsing
    #[test]
    fn format_then_parse_is_identity(
        raw in any::<u128>(),
        decimals in 0u8..=30u8,
    ) {
        let raw = U256::from(raw);
        let text = format_units(raw, decimals);
        prop_assert_eq!(parse_units(&text, decimals).unwrap(), raw);
    }

    /// Property: a significant digit beyond the token's precision is rejected
    #[test]
    fn excess_precision_rejected(
        whole in 0u64..1_000_000u64,
        decimals in 0u8..=18u8,
        last in 1u8..10u8,
    ) {
        let input = format!("{whole}.{}{last}", "0".repeat(decimals as usize));
        let is_too_many_decimals = matches!(
            parse_units(&input, decimals),
            Err(PrecisionError::TooManyDecimals { .. })
        );
        prop_assert!(is_too_many_decimals);
    }

    /// Property: signed or exponent input never parses
    #[test]
    fn signs_and_exponents_rejected(
        value in 0u64..1_000_000u64,
        decimals in 0u8..=18u8,
    ) {
        for input in [format!("-{value}"), format!("+{value}"), format!("{value}e3")] {
            let is_invalid = matches!(
                parse_units(&input, decimals),
                Err(PrecisionError::InvalidNumber { .. })
            );
            prop_assert!(is_invalid, "{} parsed", input);
        }
    }
}
