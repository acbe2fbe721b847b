//! Token amount conversion between the contract's smallest unit and
//! human-readable decimals.

use alloy::primitives::U256;
use std::fmt;

use crate::chain::types::{ChainError, ChainResult};

/// Decimal places used by the token.
pub const TOKEN_DECIMALS: u8 = 18;

/// A token quantity expressed in the smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// One whole token in the smallest unit (10^18).
    pub fn unit() -> U256 {
        U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
    }

    /// Wrap a raw on-chain value.
    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Scale a whole-token count into the smallest unit.
    pub fn from_whole_tokens(tokens: u64) -> ChainResult<Self> {
        U256::from(tokens)
            .checked_mul(Self::unit())
            .map(Self)
            .ok_or_else(|| ChainError::InvalidCall(format!("amount {} overflows uint256", tokens)))
    }

    /// Raw value in the smallest unit.
    pub fn raw(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for TokenAmount {
    /// Renders `<whole>.<fraction>` with trailing zeros trimmed, keeping at
    /// least one fractional digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = self.0.div_rem(Self::unit());
        let digits = format!("{:0>width$}", fraction.to_string(), width = TOKEN_DECIMALS as usize);
        let trimmed = digits.trim_end_matches('0');
        let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
        write!(f, "{}.{}", whole, trimmed)
    }
}

impl From<U256> for TokenAmount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}
