//! Shared utilities for integration tests: an in-memory token ledger that
//! stands in for the network, and a helper that serves it over HTTP.
#![allow(dead_code)]

pub mod rpc;

use alloy::primitives::{address, keccak256, Address, TxHash, B256, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use token_facade::chain::{
    ChainError, ChainResult, ContractBinding, ReceiptSummary, TokenChain, WriteCall,
};
use token_facade::{FacadeConfig, HttpServer, Shutdown, TokenFacade};

pub const SIGNER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
/// Private key of [`SIGNER`] (Anvil's first account).
pub const SIGNER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const HOLDER: &str = "0x93Bd787F60A9433f9f37B4a4CD6BD5f06A63eA60";
pub const SYMBOL: &str = "MTK";
pub const NAME: &str = "MyToken";

#[derive(Default)]
struct Ledger {
    balances: HashMap<Address, U256>,
    delegates: HashMap<Address, Address>,
    minters: HashSet<Address>,
    receipts: HashMap<TxHash, ReceiptSummary>,
    block: u64,
    nonce: u64,
}

/// In-memory ERC20Votes-like token. Flags inject failures.
pub struct MockChain {
    binding: ContractBinding,
    ledger: Mutex<Ledger>,
    pub revert_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub fail_submission: AtomicBool,
    pub fail_confirmation: AtomicBool,
}

impl MockChain {
    pub fn new() -> Arc<Self> {
        let mut ledger = Ledger::default();
        ledger.minters.insert(SIGNER);
        Arc::new(Self {
            binding: ContractBinding::deployed().unwrap(),
            ledger: Mutex::new(ledger),
            revert_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            fail_submission: AtomicBool::new(false),
            fail_confirmation: AtomicBool::new(false),
        })
    }

    pub fn set(flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }

    pub fn raw_balance(&self, account: Address) -> U256 {
        self.ledger.lock().unwrap().balances.get(&account).copied().unwrap_or_default()
    }

    fn check_read(&self) -> ChainResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ChainError::Timeout(10));
        }
        Ok(())
    }

    fn role_id() -> B256 {
        keccak256("MINTER_ROLE")
    }
}

#[async_trait]
impl TokenChain for MockChain {
    fn binding(&self) -> &ContractBinding {
        &self.binding
    }

    fn signer_address(&self) -> Address {
        SIGNER
    }

    async fn name(&self) -> ChainResult<String> {
        self.check_read()?;
        Ok(NAME.to_string())
    }

    async fn symbol(&self) -> ChainResult<String> {
        self.check_read()?;
        Ok(SYMBOL.to_string())
    }

    async fn total_supply(&self) -> ChainResult<U256> {
        self.check_read()?;
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.balances.values().fold(U256::ZERO, |acc, b| acc + *b))
    }

    async fn balance_of(&self, account: Address) -> ChainResult<U256> {
        self.check_read()?;
        Ok(self.raw_balance(account))
    }

    async fn minter_role(&self) -> ChainResult<B256> {
        self.check_read()?;
        Ok(Self::role_id())
    }

    async fn has_role(&self, role: B256, account: Address) -> ChainResult<bool> {
        self.check_read()?;
        Ok(role == Self::role_id() && self.ledger.lock().unwrap().minters.contains(&account))
    }

    async fn get_votes(&self, account: Address) -> ChainResult<U256> {
        self.check_read()?;
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger
            .delegates
            .iter()
            .filter(|(_, delegatee)| **delegatee == account)
            .map(|(delegator, _)| ledger.balances.get(delegator).copied().unwrap_or_default())
            .fold(U256::ZERO, |acc, b| acc + b))
    }

    async fn submit(&self, call: WriteCall) -> ChainResult<TxHash> {
        if self.fail_submission.load(Ordering::SeqCst) {
            return Err(ChainError::Rpc("nonce too low".to_string()));
        }

        let mut ledger = self.ledger.lock().unwrap();
        ledger.nonce += 1;
        ledger.block += 1;
        let tx_hash = keccak256(ledger.nonce.to_be_bytes());
        let success = !self.revert_writes.load(Ordering::SeqCst);

        if success {
            match call {
                WriteCall::Mint { to, amount } => {
                    *ledger.balances.entry(to).or_default() += amount;
                }
                WriteCall::Delegate { delegatee } => {
                    ledger.delegates.insert(SIGNER, delegatee);
                }
            }
        }

        let block_number = ledger.block;
        ledger.receipts.insert(
            tx_hash,
            ReceiptSummary {
                tx_hash,
                success,
                block_number,
            },
        );
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<ReceiptSummary> {
        if self.fail_confirmation.load(Ordering::SeqCst) {
            return Err(ChainError::Rpc("connection reset".to_string()));
        }
        self.ledger
            .lock()
            .unwrap()
            .receipts
            .get(&tx_hash)
            .copied()
            .ok_or_else(|| ChainError::Rpc("transaction dropped".to_string()))
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> ChainResult<Option<ReceiptSummary>> {
        self.check_read()?;
        Ok(self.ledger.lock().unwrap().receipts.get(&tx_hash).copied())
    }
}

/// Serve a facade over `chain` on an ephemeral port.
///
/// Returns the base URL and the shutdown handle keeping the server alive.
pub async fn spawn_server(chain: Arc<MockChain>) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(FacadeConfig::default(), TokenFacade::new(chain));
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}

/// HTTP client that bypasses any system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
