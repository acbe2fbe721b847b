//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

pub use crate::config::schema::ChainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur while talking to the network.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The contract rejected the call (revert, bad return data).
    #[error("Contract call failed: {0}")]
    Contract(String),

    /// Endpoint, credential or key could not be turned into a connection.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The call does not match the contract interface.
    #[error("Invalid contract call: {0}")]
    InvalidCall(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// A state-changing call awaiting signature and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    /// `mint(to, amount)` with `amount` already in the smallest unit.
    Mint { to: Address, amount: U256 },
    /// `delegate(delegatee)`.
    Delegate { delegatee: Address },
}

impl WriteCall {
    /// Name of the contract function this call invokes.
    pub fn function_name(&self) -> &'static str {
        match self {
            WriteCall::Mint { .. } => "mint",
            WriteCall::Delegate { .. } => "delegate",
        }
    }

    /// Number of arguments passed to the contract function.
    pub fn arity(&self) -> usize {
        match self {
            WriteCall::Mint { .. } => 2,
            WriteCall::Delegate { .. } => 1,
        }
    }
}

/// Confirmation record of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Whether on-chain execution succeeded.
    pub success: bool,
    /// Block the transaction was included in.
    pub block_number: u64,
}

impl ReceiptSummary {
    /// Execution status as reported to callers.
    pub fn status(&self) -> &'static str {
        if self.success {
            "success"
        } else {
            "reverted"
        }
    }
}
