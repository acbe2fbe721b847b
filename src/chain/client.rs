//! Contract client: the seam between the facade and the network.
//!
//! # Responsibilities
//! - Issue view calls through the read-only connection, bounded by the RPC timeout
//! - Sign and broadcast write calls through the signing connection
//! - Wait for, or look up, transaction receipts
//!
//! Every call is checked against the [`ContractBinding`] before it leaves
//! the process.

use alloy::contract::Error as ContractError;
use alloy::json_abi::StateMutability;
use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider};
use alloy::rpc::types::TransactionReceipt;
use alloy::transports::RpcError;
use async_trait::async_trait;
use std::future::IntoFuture;

use crate::chain::binding::{ContractBinding, MyToken};
use crate::chain::provider::ChainConnections;
use crate::chain::types::{ChainError, ChainResult, ReceiptSummary, WriteCall};

/// Operations the facade needs from the token contract and its network.
#[async_trait]
pub trait TokenChain: Send + Sync {
    /// The bound contract.
    fn binding(&self) -> &ContractBinding;

    /// Address of the signing identity.
    fn signer_address(&self) -> Address;

    async fn name(&self) -> ChainResult<String>;
    async fn symbol(&self) -> ChainResult<String>;
    async fn total_supply(&self) -> ChainResult<U256>;
    async fn balance_of(&self, account: Address) -> ChainResult<U256>;
    async fn minter_role(&self) -> ChainResult<B256>;
    async fn has_role(&self, role: B256, account: Address) -> ChainResult<bool>;
    async fn get_votes(&self, account: Address) -> ChainResult<U256>;

    /// Sign and broadcast; returns once the network accepted the transaction.
    async fn submit(&self, call: WriteCall) -> ChainResult<TxHash>;

    /// Block until the transaction is mined. Imposes no timeout of its own.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<ReceiptSummary>;

    /// Single lookup; `None` if the network does not know the transaction.
    async fn transaction_receipt(&self, tx_hash: TxHash) -> ChainResult<Option<ReceiptSummary>>;
}

/// [`TokenChain`] backed by alloy providers.
#[derive(Debug, Clone)]
pub struct AlloyTokenChain {
    connections: ChainConnections,
    binding: ContractBinding,
}

impl AlloyTokenChain {
    /// Wrap existing connections around a binding.
    pub fn new(connections: ChainConnections, binding: ContractBinding) -> Self {
        Self {
            connections,
            binding,
        }
    }

    fn reader(&self) -> MyToken::MyTokenInstance<DynProvider> {
        MyToken::new(self.binding.address(), self.connections.read().clone())
    }

    fn writer(&self) -> MyToken::MyTokenInstance<DynProvider> {
        MyToken::new(self.binding.address(), self.connections.write().clone())
    }

    /// Classify a contract-layer failure. Only a failure to reach the
    /// endpoint is an RPC error; error responses and undecodable return data
    /// are the contract's.
    fn contract_error(&self, function: &str, error: ContractError) -> ChainError {
        let message = format!("{}: {}", function, self.connections.redact(&error));
        match error {
            ContractError::TransportError(RpcError::Transport(_)) => ChainError::Rpc(message),
            _ => ChainError::Contract(message),
        }
    }

    /// Run a view call after checking it against the binding.
    async fn view<T, F>(&self, function: &str, arity: usize, fut: F) -> ChainResult<T>
    where
        F: IntoFuture<Output = Result<T, ContractError>>,
    {
        self.binding.ensure(function, arity, StateMutability::View)?;
        match tokio::time::timeout(self.connections.timeout_duration(), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let err = self.contract_error(function, e);
                tracing::warn!(function = function, error = %err, "Contract call failed");
                Err(err)
            }
            Err(_) => {
                tracing::warn!(function = function, "Contract call timed out");
                Err(ChainError::Timeout(self.connections.config().rpc_timeout_secs))
            }
        }
    }
}

fn summarize(receipt: &TransactionReceipt) -> ReceiptSummary {
    ReceiptSummary {
        tx_hash: receipt.transaction_hash,
        success: receipt.status(),
        block_number: receipt.block_number.unwrap_or_default(),
    }
}

#[async_trait]
impl TokenChain for AlloyTokenChain {
    fn binding(&self) -> &ContractBinding {
        &self.binding
    }

    fn signer_address(&self) -> Address {
        self.connections.signer_address()
    }

    async fn name(&self) -> ChainResult<String> {
        let token = self.reader();
        self.view("name", 0, token.name().call()).await
    }

    async fn symbol(&self) -> ChainResult<String> {
        let token = self.reader();
        self.view("symbol", 0, token.symbol().call()).await
    }

    async fn total_supply(&self) -> ChainResult<U256> {
        let token = self.reader();
        self.view("totalSupply", 0, token.totalSupply().call()).await
    }

    async fn balance_of(&self, account: Address) -> ChainResult<U256> {
        let token = self.reader();
        self.view("balanceOf", 1, token.balanceOf(account).call()).await
    }

    async fn minter_role(&self) -> ChainResult<B256> {
        let token = self.reader();
        self.view("MINTER_ROLE", 0, token.MINTER_ROLE().call()).await
    }

    async fn has_role(&self, role: B256, account: Address) -> ChainResult<bool> {
        let token = self.reader();
        self.view("hasRole", 2, token.hasRole(role, account).call()).await
    }

    async fn get_votes(&self, account: Address) -> ChainResult<U256> {
        let token = self.reader();
        self.view("getVotes", 1, token.getVotes(account).call()).await
    }

    async fn submit(&self, call: WriteCall) -> ChainResult<TxHash> {
        let function = call.function_name();
        self.binding
            .ensure(function, call.arity(), StateMutability::NonPayable)?;

        let token = self.writer();
        let pending = match call {
            WriteCall::Mint { to, amount } => token.mint(to, amount).send().await,
            WriteCall::Delegate { delegatee } => token.delegate(delegatee).send().await,
        }
        .map_err(|e| self.contract_error(function, e))?;

        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<ReceiptSummary> {
        let receipt = PendingTransactionBuilder::new(self.connections.read().root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| ChainError::Rpc(self.connections.redact(e)))?;
        Ok(summarize(&receipt))
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> ChainResult<Option<ReceiptSummary>> {
        let fut = self.connections.read().get_transaction_receipt(tx_hash);
        match tokio::time::timeout(self.connections.timeout_duration(), fut).await {
            Ok(Ok(receipt)) => Ok(receipt.as_ref().map(summarize)),
            Ok(Err(e)) => Err(ChainError::Rpc(self.connections.redact(e))),
            Err(_) => Err(ChainError::Timeout(self.connections.config().rpc_timeout_secs)),
        }
    }
}
