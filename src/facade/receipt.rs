//! Transaction receipt lookup.
//!
//! A single attempt: an unmined or unknown transaction is reported as
//! [`FacadeError::ReceiptNotFound`]; polling is left to the caller.

use alloy::primitives::TxHash;
use std::str::FromStr;

use crate::facade::{observe, FacadeError, FacadeResult, TokenFacade};

impl TokenFacade {
    /// `"<status> at block <n>"` for a mined transaction.
    pub async fn transaction_receipt(&self, hash: &str) -> FacadeResult<String> {
        observe("transaction_receipt", self.lookup_receipt(hash)).await
    }

    async fn lookup_receipt(&self, hash: &str) -> FacadeResult<String> {
        let tx_hash = TxHash::from_str(hash.trim())
            .map_err(|_| FacadeError::ReceiptNotFound(format!("invalid transaction hash '{}'", hash)))?;

        let receipt = self
            .chain
            .transaction_receipt(tx_hash)
            .await?
            .ok_or_else(|| FacadeError::ReceiptNotFound(tx_hash.to_string()))?;

        Ok(format!("{} at block {}", receipt.status(), receipt.block_number))
    }
}
