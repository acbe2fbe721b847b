//! Write operations and the per-call transaction state machine.
//!
//! ```text
//! Building ──submit──▶ Submitted ──mined, status=1──▶ Confirmed
//!     │                    │     └─mined, status=0──▶ Reverted
//!     ▼                    ▼
//! SubmissionError    ConfirmationError
//! ```
//!
//! Nothing is retried: resubmitting a mint or delegate is not idempotent.

use alloy::primitives::TxHash;
use std::fmt;

use crate::chain::{TokenAmount, WriteCall};
use crate::facade::{observe, parse_address, FacadeError, FacadeResult, TokenFacade};
use crate::observability::metrics;

/// Lifecycle of one write invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    /// Arguments validated and encoded.
    Building,
    /// Accepted by the network, hash assigned.
    Submitted,
    /// Mined with a successful status.
    Confirmed,
    /// Mined, but execution reverted.
    Reverted,
}

impl WriteState {
    /// Whether the state ends the invocation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WriteState::Confirmed | WriteState::Reverted)
    }

    fn as_str(&self) -> &'static str {
        match self {
            WriteState::Building => "building",
            WriteState::Submitted => "submitted",
            WriteState::Confirmed => "confirmed",
            WriteState::Reverted => "reverted",
        }
    }
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TokenFacade {
    /// Mint `amount` whole tokens to `address` and wait for confirmation.
    pub async fn mint_tokens(&self, address: &str, amount: u64) -> FacadeResult<String> {
        observe("mint_tokens", self.run_mint(address, amount)).await
    }

    /// Delegate the server wallet's votes to `address` and wait for confirmation.
    pub async fn delegate(&self, address: &str) -> FacadeResult<String> {
        observe("delegate", self.run_delegate(address)).await
    }

    async fn run_mint(&self, address: &str, amount: u64) -> FacadeResult<String> {
        let to = parse_address(address, FacadeError::Submission)?;
        let amount =
            TokenAmount::from_whole_tokens(amount).map_err(|e| FacadeError::Submission(e.to_string()))?;

        let tx_hash = self
            .execute(WriteCall::Mint { to, amount: amount.raw() }, "Minting")
            .await?;
        Ok(format!("Tokens successfully minted. Transaction hash: {}", tx_hash))
    }

    async fn run_delegate(&self, address: &str) -> FacadeResult<String> {
        let delegatee = parse_address(address, FacadeError::Submission)?;
        let tx_hash = self
            .execute(WriteCall::Delegate { delegatee }, "Delegation")
            .await?;
        Ok(format!("Delegated successfully. Transaction hash: {}", tx_hash))
    }

    /// Drive one write through Building → Submitted → Confirmed | Reverted.
    async fn execute(&self, call: WriteCall, action: &'static str) -> FacadeResult<TxHash> {
        let function = call.function_name();
        tracing::debug!(function = function, state = %WriteState::Building, "Building transaction");

        let tx_hash = self.chain.submit(call).await.map_err(|e| {
            metrics::record_transaction(function, "submission_failed");
            FacadeError::Submission(e.to_string())
        })?;
        tracing::info!(
            function = function,
            tx_hash = %tx_hash,
            state = %WriteState::Submitted,
            "Transaction submitted"
        );

        let receipt = self.chain.wait_for_receipt(tx_hash).await.map_err(|e| {
            metrics::record_transaction(function, "confirmation_failed");
            FacadeError::Confirmation {
                tx_hash,
                reason: e.to_string(),
            }
        })?;

        let state = if receipt.success {
            WriteState::Confirmed
        } else {
            WriteState::Reverted
        };
        metrics::record_transaction(function, state.as_str());
        tracing::info!(
            function = function,
            tx_hash = %tx_hash,
            block_number = receipt.block_number,
            state = %state,
            "Transaction mined"
        );

        match state {
            WriteState::Confirmed => Ok(tx_hash),
            _ => Err(FacadeError::TransactionFailed { action, tx_hash }),
        }
    }
}
