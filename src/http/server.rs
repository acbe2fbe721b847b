//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, body limits)
//! - Bind server to listener
//! - Stop accepting once shutdown fires and drain in-flight requests
//!
//! No request timeout layer is installed: write routes block until the
//! transaction is mined.

use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::FacadeConfig;
use crate::facade::TokenFacade;
use crate::http::handlers;
use crate::http::request::{request_id_header, UuidRequestId, X_REQUEST_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<TokenFacade>,
}

/// HTTP server exposing the facade.
pub struct HttpServer {
    router: Router,
    config: FacadeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FacadeConfig, facade: TokenFacade) -> Self {
        let state = AppState {
            facade: Arc::new(facade),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &FacadeConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(CorsLayer::permissive());

        Router::new()
            .route("/", get(handlers::hello))
            .route("/contract-address", get(handlers::contract_address))
            .route("/token-name", get(handlers::token_name))
            .route("/total-supply", get(handlers::total_supply))
            .route("/token-balance/{address}", get(handlers::token_balance))
            .route("/transaction-receipt/{hash}", get(handlers::transaction_receipt))
            .route("/server-wallet-address", get(handlers::server_wallet_address))
            .route("/minter-role/{address}", get(handlers::minter_role))
            .route("/votes/{address}", get(handlers::votes))
            .route("/mint-tokens", post(handlers::mint_tokens))
            .route("/delegate", post(handlers::delegate))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware)
    }

    /// The configured router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }
}
