//! Metrics collection and exposition.
//!
//! # Metrics
//! - `splitter_poll_cycles_total` (counter): poll cycles by outcome
//! - `splitter_address_utxos` (gauge): UTXOs seen at the monitored address
//! - `splitter_split_attempts_total` (counter): split attempts by outcome
//! - `splitter_last_fee_lovelace` (gauge): fee of the last built transaction
//! - `splitter_api_requests_total` (counter): Blockfrost calls by endpoint, outcome
//! - `splitter_cli_invocations_total` (counter): `cardano-cli` runs by operation, outcome
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

fn outcome(ok: bool) -> &'static str {
    if ok {
        "success"
    } else {
        "failure"
    }
}

pub fn record_poll_cycle(result: &'static str) {
    ::metrics::counter!("splitter_poll_cycles_total", "outcome" => result).increment(1);
}

pub fn record_address_utxos(count: usize) {
    ::metrics::gauge!("splitter_address_utxos").set(count as f64);
}

pub fn record_split_attempt(ok: bool) {
    ::metrics::counter!("splitter_split_attempts_total", "outcome" => outcome(ok)).increment(1);
}

pub fn record_fee(fee: u64) {
    ::metrics::gauge!("splitter_last_fee_lovelace").set(fee as f64);
}

pub fn record_api_request(endpoint: &'static str, ok: bool) {
    ::metrics::counter!(
        "splitter_api_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome(ok)
    )
    .increment(1);
}

pub fn record_cli_invocation(operation: &'static str, ok: bool) {
    ::metrics::counter!(
        "splitter_cli_invocations_total",
        "operation" => operation,
        "outcome" => outcome(ok)
    )
    .increment(1);
}
