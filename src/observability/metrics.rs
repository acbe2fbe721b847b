//! Metrics collection and exposition.
//!
//! # Metrics
//! - `facade_http_requests_total` (counter): requests by route, status
//! - `facade_contract_calls_total` (counter): facade operations by name, outcome
//! - `facade_contract_call_duration_seconds` (histogram): operation latency
//! - `facade_transactions_total` (counter): write outcomes by function, state
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a served HTTP request.
pub fn record_request(route: &'static str, status: u16) {
    counter!(
        "facade_http_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record one facade operation and its latency.
pub fn record_contract_call(operation: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    counter!(
        "facade_contract_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("facade_contract_call_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record the terminal state of a write.
pub fn record_transaction(function: &'static str, state: &'static str) {
    counter!(
        "facade_transactions_total",
        "function" => function,
        "state" => state
    )
    .increment(1);
}
