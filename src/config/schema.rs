//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the facade.
//! All types derive Serde traits for deserialization from config files.
//! Secrets (API key, private key) are deliberately absent: they are read
//! from the environment by [`crate::chain::ChainSecrets`].

use serde::{Deserialize, Serialize};

/// Chain ID of the Sepolia test network.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Root configuration for the token facade.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FacadeConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Network endpoint settings.
    pub chain: ChainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
            max_body_size: 64 * 1024,
        }
    }
}

/// Network endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC base URL; the API key is appended as the last path segment.
    pub rpc_base_url: String,

    /// Expected chain ID of the endpoint.
    pub chain_id: u64,

    /// Timeout for read calls and receipt lookups, in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_base_url: "https://eth-sepolia.g.alchemy.com/v2".to_string(),
            chain_id: SEPOLIA_CHAIN_ID,
            rpc_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
