//! Token facade library.
//!
//! Lets HTTP clients read from and transact with a single governance token
//! contract without holding keys or speaking JSON-RPC.

pub mod chain;
pub mod config;
pub mod facade;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::FacadeConfig;
pub use facade::{FacadeError, TokenFacade};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
