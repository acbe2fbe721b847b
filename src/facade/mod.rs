//! Contract interaction facade.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → TokenFacade (parse input, pick operation)
//!     → read.rs    → TokenChain view calls  → formatted string
//!     → write.rs   → submit → wait_for_receipt → success message | error
//!     → receipt.rs → single receipt lookup  → "<status> at block <n>"
//! ```
//!
//! The facade is built once at startup and shared behind an `Arc`; it holds
//! no mutable state, so reads and writes may run concurrently. Writes are not
//! serialized here: nonce sequencing belongs to the signing connection.

pub mod error;
pub mod read;
pub mod receipt;
pub mod write;

use alloy::primitives::Address;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::chain::TokenChain;
use crate::observability::metrics;

pub use error::{FacadeError, FacadeResult};
pub use write::WriteState;

/// Application-level entry point to the token contract.
#[derive(Clone)]
pub struct TokenFacade {
    chain: Arc<dyn TokenChain>,
}

impl TokenFacade {
    /// Wrap a chain client.
    pub fn new(chain: Arc<dyn TokenChain>) -> Self {
        Self { chain }
    }

    /// Greeting served on `/`.
    pub fn hello(&self) -> &'static str {
        "Hello World!"
    }

    /// Address of the bound contract.
    pub fn contract_address(&self) -> Address {
        self.chain.binding().address()
    }

    /// Address of the signing identity.
    pub fn server_wallet_address(&self) -> Address {
        self.chain.signer_address()
    }
}

impl std::fmt::Debug for TokenFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenFacade")
            .field("contract", &self.contract_address())
            .field("signer", &self.server_wallet_address())
            .finish()
    }
}

/// Parse a user-supplied address, mapping failure through `err`.
fn parse_address(input: &str, err: fn(String) -> FacadeError) -> FacadeResult<Address> {
    Address::from_str(input.trim()).map_err(|e| err(format!("invalid address '{}': {}", input, e)))
}

/// Time an operation, count its outcome and log failures.
async fn observe<T, F>(operation: &'static str, fut: F) -> FacadeResult<T>
where
    F: Future<Output = FacadeResult<T>>,
{
    let start = Instant::now();
    let result = fut.await;
    metrics::record_contract_call(operation, result.is_ok(), start);
    if let Err(e) = &result {
        tracing::warn!(operation = operation, error = %e, "Facade operation failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = parse_address(" 0x93Bd787F60A9433f9f37B4a4CD6BD5f06A63eA60 ", FacadeError::Read).unwrap();
        assert_eq!(
            address.to_string().to_lowercase(),
            "0x93bd787f60a9433f9f37b4a4cd6bd5f06a63ea60"
        );

        let err = parse_address("0x1234", FacadeError::Submission).unwrap_err();
        assert!(matches!(err, FacadeError::Submission(_)));
        assert!(err.to_string().contains("0x1234"));
    }
}
