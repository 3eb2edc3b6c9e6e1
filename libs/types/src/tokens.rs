//! Known token registry
//!
//! Mainnet tokens the swap and pool screens offer by default. Native ETH uses
//! the conventional `0xEeee…EEeE` placeholder address.

use ethers_core::types::U256;
use serde::Serialize;

use crate::precision::{format_units, Result, TokenAmount};

/// Placeholder address routers use for the native chain asset
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Static description of an ERC-20 token (or the native asset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn is_native(&self) -> bool {
        self.address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
    }

    /// Parse a user-entered amount at this token's precision
    pub fn parse_amount(&self, input: &str) -> Result<TokenAmount> {
        TokenAmount::parse(input, self.decimals)
    }

    pub fn format_amount(&self, raw: U256) -> String {
        format_units(raw, self.decimals)
    }
}

pub static TOKENS: [TokenInfo; 7] = [
    TokenInfo {
        symbol: "ETH",
        name: "Ethereum",
        address: NATIVE_TOKEN_ADDRESS,
        decimals: 18,
    },
    TokenInfo {
        symbol: "USDT",
        name: "Tether USD",
        address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
        decimals: 6,
    },
    TokenInfo {
        symbol: "USDC",
        name: "USD Coin",
        address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        decimals: 6,
    },
    TokenInfo {
        symbol: "DAI",
        name: "Dai Stablecoin",
        address: "0x6B175474E89094C44Da98b954EedeAC495271d0F",
        decimals: 18,
    },
    TokenInfo {
        symbol: "WBTC",
        name: "Wrapped Bitcoin",
        address: "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599",
        decimals: 8,
    },
    TokenInfo {
        symbol: "UNI",
        name: "Uniswap",
        address: "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
        decimals: 18,
    },
    TokenInfo {
        symbol: "LINK",
        name: "Chainlink",
        address: "0x514910771AF9Ca656af840dff83E8264EcF986CA",
        decimals: 18,
    },
];

/// Look up a token by symbol, ignoring case
pub fn find_token(symbol: &str) -> Option<&'static TokenInfo> {
    TOKENS
        .iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol.trim()))
}
