//! Token facade service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──HTTP──▶ ┌──────────┐    ┌──────────────┐    ┌───────────────┐
//!                    │   http   │───▶│    facade    │───▶│     chain     │
//!   Client ◀──JSON── │ handlers │◀───│ read / write │◀───│ read provider │──▶ RPC
//!                    └──────────┘    │   receipt    │    │ sign provider │    endpoint
//!                                    └──────────────┘    └───────────────┘
//!
//!   config (TOML + env secrets) · observability (tracing, metrics) · lifecycle
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use token_facade::config::{load_config, FacadeConfig};
use token_facade::lifecycle::{signals, startup, Shutdown};
use token_facade::observability::{logging, metrics};
use token_facade::HttpServer;

#[derive(Parser)]
#[command(name = "token-facade")]
#[command(about = "HTTP facade for a governance token contract", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FacadeConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("token-facade v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        chain_id = config.chain.chain_id,
        rpc_timeout_secs = config.chain.rpc_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Missing or invalid secrets abort here, before anything is served.
    let facade = startup::build_facade(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, facade);
    let server_task = tokio::spawn(server.run(listener, shutdown.signalled()));

    signals::wait_for_signal(&shutdown).await;
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
