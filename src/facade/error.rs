//! Facade error taxonomy.

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::chain::ChainError;

/// Every way a facade operation can fail.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// Missing or invalid credential, key or binding. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A read call failed (network, malformed input, contract rejection).
    #[error("Read failed: {0}")]
    Read(String),

    /// The write was never accepted by the network.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// The write was accepted but waiting for it to be mined failed.
    #[error("Confirmation failed for transaction {tx_hash}: {reason}")]
    Confirmation { tx_hash: TxHash, reason: String },

    /// Mined, but contract execution reverted.
    #[error("{action} failed. Transaction hash: {tx_hash}")]
    TransactionFailed { action: &'static str, tx_hash: TxHash },

    /// The network has no receipt for this identifier.
    #[error("Transaction receipt not found: {0}")]
    ReceiptNotFound(String),
}

impl FacadeError {
    /// Transaction identifier, when one was assigned.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            FacadeError::Confirmation { tx_hash, .. } | FacadeError::TransactionFailed { tx_hash, .. } => {
                Some(*tx_hash)
            }
            _ => None,
        }
    }
}

impl From<ChainError> for FacadeError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::Configuration(msg) => FacadeError::Configuration(msg),
            other => FacadeError::Read(other.to_string()),
        }
    }
}

/// Result type for facade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;
