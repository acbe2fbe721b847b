//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, input DTOs)
//!     → handlers.rs (one facade call per route)
//!     → response.rs ({ result } body or mapped error status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MintTokenRequest, X_REQUEST_ID};
pub use response::{ApiError, ApiResult};
pub use server::{AppState, HttpServer};
