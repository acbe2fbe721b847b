//! Read-only and signing connections to the configured endpoint.
//!
//! # Security
//! - Private key and API key are loaded ONLY from environment variables
//! - Neither is ever logged or serialized (`Debug` is redacted)
//! - The signer never leaves this module; callers only see its address
//! - Transport errors embed the endpoint URL, so every message derived from
//!   one goes through [`ChainConnections::redact`]

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainConfig, ChainError, ChainId, ChainResult};

/// Environment variable holding the endpoint API key.
pub const API_KEY_ENV_VAR: &str = "ALCHEMY_API_KEY";

/// Environment variable holding the signing key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Credentials required to open both connections.
#[derive(Clone)]
pub struct ChainSecrets {
    api_key: String,
    private_key: String,
}

impl ChainSecrets {
    /// Build from explicit values; both must be non-empty.
    pub fn new(api_key: impl Into<String>, private_key: impl Into<String>) -> ChainResult<Self> {
        let api_key = api_key.into();
        let private_key = private_key.into();
        if api_key.trim().is_empty() {
            return Err(ChainError::Configuration(format!("{} is empty", API_KEY_ENV_VAR)));
        }
        if private_key.trim().is_empty() {
            return Err(ChainError::Configuration(format!("{} is empty", PRIVATE_KEY_ENV_VAR)));
        }
        Ok(Self {
            api_key: api_key.trim().to_string(),
            private_key: private_key.trim().to_string(),
        })
    }

    /// Load from `ALCHEMY_API_KEY` and `PRIVATE_KEY`.
    pub fn from_env() -> ChainResult<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| ChainError::Configuration(format!("Environment variable {} not set", name)))
        };
        Self::new(read(API_KEY_ENV_VAR)?, read(PRIVATE_KEY_ENV_VAR)?)
    }

    /// Parse the private key into a signer.
    fn signer(&self) -> ChainResult<PrivateKeySigner> {
        let key_hex = self.private_key.strip_prefix("0x").unwrap_or(&self.private_key);
        key_hex
            .parse()
            .map_err(|e| ChainError::Configuration(format!("Invalid private key format: {}", e)))
    }
}

impl fmt::Debug for ChainSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainSecrets")
            .field("api_key", &"<redacted>")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The process-wide connection pair.
#[derive(Clone)]
pub struct ChainConnections {
    read: DynProvider,
    write: DynProvider,
    signer_address: Address,
    api_key: String,
    config: ChainConfig,
    timeout_duration: Duration,
}

impl ChainConnections {
    /// Build both connections. No network I/O happens here.
    pub fn new(config: &ChainConfig, secrets: &ChainSecrets) -> ChainResult<Self> {
        let endpoint = format!("{}/{}", config.rpc_base_url.trim_end_matches('/'), secrets.api_key);
        let url: url::Url = endpoint.parse().map_err(|e| {
            ChainError::Configuration(format!("Invalid RPC URL '{}': {}", config.rpc_base_url, e))
        })?;

        let signer = secrets.signer()?;
        let signer_address = signer.address();

        let read = ProviderBuilder::new().connect_http(url.clone()).erased();
        let write = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        tracing::info!(
            rpc_base_url = %config.rpc_base_url,
            chain_id = config.chain_id,
            signer = %signer_address,
            "Chain connections initialized"
        );

        Ok(Self {
            read,
            write,
            signer_address,
            api_key: secrets.api_key.clone(),
            config: config.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Query the endpoint's chain ID.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        match timeout(self.timeout_duration, self.read.get_chain_id()).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(ChainError::Rpc(self.redact(e))),
            Err(_) => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Render an error with the API key masked.
    pub fn redact(&self, error: impl fmt::Display) -> String {
        error.to_string().replace(&self.api_key, "<redacted>")
    }

    /// Read-only connection.
    pub fn read(&self) -> &DynProvider {
        &self.read
    }

    /// Signing connection.
    pub fn write(&self) -> &DynProvider {
        &self.write
    }

    /// Address derived from the private key.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Timeout applied to read calls.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout_duration
    }
}

impl fmt::Debug for ChainConnections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConnections")
            .field("rpc_base_url", &self.config.rpc_base_url)
            .field("chain_id", &self.config.chain_id)
            .field("signer", &self.signer_address)
            .finish()
    }
}
