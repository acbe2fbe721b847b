//! Startup orchestration.
//!
//! Order: secrets → binding → connections → chain check → facade.
//! Any error before the chain check is fatal; an unreachable or mismatched
//! endpoint is only logged so the service can come up while the node is down.

use std::sync::Arc;

use crate::chain::{AlloyTokenChain, ChainConnections, ChainSecrets, ContractBinding};
use crate::config::FacadeConfig;
use crate::facade::{FacadeError, FacadeResult, TokenFacade};

/// Build the facade from configuration plus secrets from the environment.
pub async fn build_facade(config: &FacadeConfig) -> FacadeResult<TokenFacade> {
    let secrets = ChainSecrets::from_env()?;
    build_facade_with(config, &secrets).await
}

/// Build the facade from explicit secrets.
pub async fn build_facade_with(config: &FacadeConfig, secrets: &ChainSecrets) -> FacadeResult<TokenFacade> {
    let binding = ContractBinding::deployed().map_err(|e| FacadeError::Configuration(e.to_string()))?;
    let connections = ChainConnections::new(&config.chain, secrets)
        .map_err(|e| FacadeError::Configuration(e.to_string()))?;

    match connections.verify_chain_id().await {
        Ok(()) => tracing::info!(chain_id = config.chain.chain_id, "Chain ID verified"),
        Err(e) => tracing::warn!(
            error = %e,
            "Chain client initialized but chain verification failed"
        ),
    }

    tracing::info!(
        contract = %binding.address(),
        signer = %connections.signer_address(),
        "Token facade ready"
    );

    let chain = AlloyTokenChain::new(connections, binding);
    Ok(TokenFacade::new(Arc::new(chain)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn offline_config() -> FacadeConfig {
        let mut config = FacadeConfig::default();
        config.chain.rpc_base_url = "http://127.0.0.1:1".to_string();
        config.chain.rpc_timeout_secs = 1;
        config
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_does_not_abort_startup() {
        let secrets = ChainSecrets::new("key", TEST_PRIVATE_KEY).unwrap();
        let facade = build_facade_with(&offline_config(), &secrets).await.unwrap();
        assert_eq!(
            facade.server_wallet_address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(
            facade.contract_address().to_string().to_lowercase(),
            "0x42c75444c0b6a9cc21346feba1dd0bfdd009389b"
        );
    }

    #[tokio::test]
    async fn test_facade_errors_hide_api_key() {
        let secrets = ChainSecrets::new("SECRETAPIKEY123", TEST_PRIVATE_KEY).unwrap();
        let facade = build_facade_with(&offline_config(), &secrets).await.unwrap();

        let read = facade.token_name().await.unwrap_err();
        assert!(matches!(read, FacadeError::Read(_)));
        assert!(!read.to_string().contains("SECRETAPIKEY123"), "{}", read);

        let write = facade
            .mint_tokens("0x93Bd787F60A9433f9f37B4a4CD6BD5f06A63eA60", 1)
            .await
            .unwrap_err();
        assert!(matches!(write, FacadeError::Submission(_)));
        assert!(!write.to_string().contains("SECRETAPIKEY123"), "{}", write);
    }

    #[tokio::test]
    async fn test_bad_key_is_a_configuration_error() {
        let secrets = ChainSecrets::new("key", "not-a-key").unwrap();
        let err = build_facade_with(&offline_config(), &secrets).await.unwrap_err();
        assert!(matches!(err, FacadeError::Configuration(_)));
    }
}
