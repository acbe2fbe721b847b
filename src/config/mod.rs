//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FacadeConfig (validated, immutable)
//!
//! environment (ALCHEMY_API_KEY, PRIVATE_KEY)
//!     → chain::ChainSecrets (never written to disk or logs)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ChainConfig, FacadeConfig, ListenerConfig, ObservabilityConfig};
