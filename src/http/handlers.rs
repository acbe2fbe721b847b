//! Route handlers. Each one forwards to a single facade operation.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::facade::FacadeResult;
use crate::http::request::{DelegateRequest, MintTokenRequest};
use crate::http::response::{status_for, ApiError, ApiResult};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Wrap a facade result into a response and count it.
fn respond<T: serde::Serialize>(route: &'static str, result: FacadeResult<T>) -> Response {
    match result {
        Ok(value) => {
            metrics::record_request(route, StatusCode::OK.as_u16());
            Json(ApiResult::new(value)).into_response()
        }
        Err(e) => {
            metrics::record_request(route, status_for(&e).as_u16());
            e.into_response()
        }
    }
}

pub async fn hello(State(state): State<AppState>) -> &'static str {
    metrics::record_request("/", 200);
    state.facade.hello()
}

pub async fn contract_address(State(state): State<AppState>) -> Response {
    respond("/contract-address", Ok(state.facade.contract_address().to_string()))
}

pub async fn token_name(State(state): State<AppState>) -> Response {
    respond("/token-name", state.facade.token_name().await)
}

pub async fn total_supply(State(state): State<AppState>) -> Response {
    respond("/total-supply", state.facade.total_supply().await)
}

pub async fn token_balance(State(state): State<AppState>, Path(address): Path<String>) -> Response {
    respond("/token-balance", state.facade.token_balance(&address).await)
}

pub async fn transaction_receipt(State(state): State<AppState>, Path(hash): Path<String>) -> Response {
    respond("/transaction-receipt", state.facade.transaction_receipt(&hash).await)
}

pub async fn server_wallet_address(State(state): State<AppState>) -> Response {
    respond(
        "/server-wallet-address",
        Ok(state.facade.server_wallet_address().to_string()),
    )
}

pub async fn minter_role(State(state): State<AppState>, Path(address): Path<String>) -> Response {
    respond("/minter-role", state.facade.check_minter_role(&address).await)
}

pub async fn votes(State(state): State<AppState>, Path(address): Path<String>) -> Response {
    respond("/votes", state.facade.votes(&address).await)
}

pub async fn mint_tokens(State(state): State<AppState>, Json(body): Json<MintTokenRequest>) -> Response {
    tracing::info!(address = %body.address, amount = body.amount, "Mint requested");
    respond("/mint-tokens", state.facade.mint_tokens(&body.address, body.amount).await)
}

/// `address` may come from the query string or a JSON body; the query wins.
pub async fn delegate(
    State(state): State<AppState>,
    Query(query): Query<DelegateRequest>,
    body: Bytes,
) -> Response {
    let from_body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<DelegateRequest>(&body) {
            Ok(req) => req.address,
            Err(e) => {
                metrics::record_request("/delegate", StatusCode::BAD_REQUEST.as_u16());
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError {
                        error: format!("Invalid JSON body: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    };

    let address = match query.address.or(from_body) {
        Some(address) => address,
        None => {
            metrics::record_request("/delegate", StatusCode::BAD_REQUEST.as_u16());
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: "Missing delegate address".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!(address = %address, "Delegation requested");
    respond("/delegate", state.facade.delegate(&address).await)
}

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            error: "Not Found".to_string(),
        }),
    )
        .into_response()
}

