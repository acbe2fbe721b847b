//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (API key, private key)
//!     → provider.rs (read-only + signing connections)
//!     → binding.rs (fixed contract address, validated interface)
//!     → client.rs (view calls, submit, receipts)
//!     → units.rs (smallest unit ⇄ decimal display)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - Read calls have configurable timeouts; confirmation waits do not

pub mod binding;
pub mod client;
pub mod provider;
pub mod types;
pub mod units;

pub use alloy::json_abi::StateMutability;
pub use binding::{ContractBinding, FunctionSpec, TOKEN_CONTRACT_ADDRESS};
pub use client::{AlloyTokenChain, TokenChain};
pub use provider::{ChainConnections, ChainSecrets};
pub use types::{ChainError, ChainId, ChainResult, ReceiptSummary, WriteCall};
pub use units::TokenAmount;
