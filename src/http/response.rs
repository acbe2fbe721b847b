//! Response bodies and error-to-status mapping.
//!
//! # Design Decisions
//! - Success bodies are always `{ "result": ... }`
//! - Failures are `{ "error": "<message>" }`, message verbatim from the facade
//! - Unknown receipts are 404; configuration problems 503; everything else 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::facade::FacadeError;

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResult<T> {
    pub result: T,
}

impl<T> ApiResult<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
}

/// HTTP status for a facade failure.
pub fn status_for(err: &FacadeError) -> StatusCode {
    match err {
        FacadeError::ReceiptNotFound(_) => StatusCode::NOT_FOUND,
        FacadeError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        FacadeError::Read(_)
        | FacadeError::Submission(_)
        | FacadeError::Confirmation { .. }
        | FacadeError::TransactionFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for FacadeError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        (status, Json(ApiError { error: self.to_string() })).into_response()
    }
}
