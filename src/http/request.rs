//! Request identification and input DTOs.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An incoming `x-request-id` is kept; otherwise a UUID v4 is generated
//! - The ID is echoed back on the response

use axum::http::{HeaderName, Request};
use serde::{Deserialize, Serialize};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header name form of [`X_REQUEST_ID`].
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// Body of `POST /mint-tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintTokenRequest {
    /// Recipient address.
    pub address: String,
    /// Whole tokens to mint.
    pub amount: u64,
}

/// Query string or body of `POST /delegate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelegateRequest {
    pub address: Option<String>,
}
