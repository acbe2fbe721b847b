//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Secrets → Binding → Connections → Facade
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     watch flag → server stops accepting → in-flight requests drain → exit
//! ```
//!
//! A write that is waiting for confirmation when shutdown starts is allowed
//! to finish; one abandoned by a crash still executes on-chain.

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
