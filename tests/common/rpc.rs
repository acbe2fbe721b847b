//! Canned JSON-RPC endpoint for driving the alloy-backed client without a
//! node. View calls answer from a selector table, raw transactions are
//! hashed and get a receipt in the next block.

use alloy::primitives::{keccak256, Bytes, TxHash, B256};
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use token_facade::chain::TOKEN_CONTRACT_ADDRESS;

use super::SIGNER;

/// Chain ID the stub reports (Anvil's default).
pub const STUB_CHAIN_ID: u64 = 31337;

/// Path segment the stub expects as the API key.
pub const STUB_API_KEY: &str = "test-key";

#[derive(Default)]
pub struct RpcStub {
    returns: Mutex<HashMap<[u8; 4], Vec<u8>>>,
    receipts: Mutex<HashMap<TxHash, Value>>,
    sent: Mutex<Vec<Bytes>>,
    block: AtomicU64,
    pub revert_sends: AtomicBool,
}

impl RpcStub {
    /// Answer `eth_call`s for `selector` with ABI-encoded `data`. Calls to
    /// other selectors revert.
    pub fn respond(&self, selector: [u8; 4], data: Vec<u8>) {
        self.returns.lock().unwrap().insert(selector, data);
    }

    /// Register a mined transaction.
    pub fn insert_receipt(&self, tx_hash: TxHash, success: bool, block: u64) {
        self.receipts
            .lock()
            .unwrap()
            .insert(tx_hash, receipt_json(tx_hash, success, block));
    }

    /// Raw signed transactions received so far.
    pub fn sent(&self) -> Vec<Bytes> {
        self.sent.lock().unwrap().clone()
    }

    fn eth_call(&self, request: &Value) -> Result<Value, (i64, String)> {
        let input = request.get("input").or_else(|| request.get("data")).cloned();
        let input: Bytes = input
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or((-32602, "missing call input".to_string()))?;
        let selector: [u8; 4] = input
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or((-32602, "short call input".to_string()))?;

        match self.returns.lock().unwrap().get(&selector) {
            Some(data) => Ok(json!(Bytes::from(data.clone()))),
            None => Err((3, "execution reverted".to_string())),
        }
    }

    fn send_raw(&self, raw: &Value) -> Result<Value, (i64, String)> {
        let raw: Bytes = serde_json::from_value(raw.clone()).map_err(|e| (-32602, e.to_string()))?;
        let tx_hash = keccak256(&raw);
        let block = self.block.fetch_add(1, Ordering::SeqCst) + 1;
        let success = !self.revert_sends.load(Ordering::SeqCst);

        self.sent.lock().unwrap().push(raw);
        self.insert_receipt(tx_hash, success, block);
        Ok(json!(tx_hash))
    }

    fn receipt(&self, tx_hash: &Value) -> Value {
        serde_json::from_value::<TxHash>(tx_hash.clone())
            .ok()
            .and_then(|hash| self.receipts.lock().unwrap().get(&hash).cloned())
            .unwrap_or(Value::Null)
    }
}

fn receipt_json(tx_hash: TxHash, success: bool, block: u64) -> Value {
    json!({
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x186a0",
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0x11),
        "blockNumber": format!("{:#x}", block),
        "gasUsed": "0x186a0",
        "effectiveGasPrice": "0x3b9aca00",
        "from": SIGNER,
        "to": TOKEN_CONTRACT_ADDRESS,
        "contractAddress": null,
    })
}

fn fee_history() -> Value {
    json!({
        "oldestBlock": "0x1",
        "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
        "gasUsedRatio": [0.5],
        "reward": [["0x3b9aca00"]],
    })
}

async fn handle(State(stub): State<Arc<RpcStub>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let params = &request["params"];

    let outcome = match request["method"].as_str().unwrap_or_default() {
        "eth_chainId" => Ok(json!(format!("{:#x}", STUB_CHAIN_ID))),
        "eth_blockNumber" => Ok(json!(format!("{:#x}", stub.block.load(Ordering::SeqCst)))),
        "eth_getTransactionCount" => Ok(json!(format!("{:#x}", stub.sent.lock().unwrap().len()))),
        "eth_estimateGas" => Ok(json!("0x186a0")),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => Ok(json!("0x3b9aca00")),
        "eth_feeHistory" => Ok(fee_history()),
        "eth_getBlockByNumber" => Ok(Value::Null),
        "eth_call" => stub.eth_call(&params[0]),
        "eth_sendRawTransaction" => stub.send_raw(&params[0]),
        "eth_getTransactionReceipt" => Ok(stub.receipt(&params[0])),
        other => Err((-32601, format!("method {} not supported", other))),
    };

    Json(match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message },
        }),
    })
}

/// Serve a stub on an ephemeral port; returns it with its base URL (without
/// the API key segment).
pub async fn spawn_rpc_stub() -> (Arc<RpcStub>, String) {
    let stub = Arc::new(RpcStub::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route(&format!("/{}", STUB_API_KEY), post(handle))
        .with_state(stub.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (stub, format!("http://{}", addr))
}
