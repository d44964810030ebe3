//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_passes_total` (counter): passes by result (ok, failed)
//! - `monitor_pass_duration_seconds` (histogram)
//! - `monitor_pass_endpoints` (gauge): candidates in the last pass
//! - `monitor_probes_total` (counter): probes by class
//! - `monitor_probe_duration_seconds` (histogram)
//! - `monitor_transitions_total` (counter): committed transitions by kind
//! - `monitor_store_failures_total` (counter): ledger failures by operation
//! - `monitor_notify_failures_total` (counter): delivery failures by channel
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Duration;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_probe(class: &'static str, elapsed: Duration) {
    metrics::counter!("monitor_probes_total", "class" => class).increment(1);
    metrics::histogram!("monitor_probe_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_transition(kind: &'static str) {
    metrics::counter!("monitor_transitions_total", "kind" => kind).increment(1);
}

pub fn record_store_failure(operation: &'static str) {
    metrics::counter!("monitor_store_failures_total", "operation" => operation).increment(1);
}

pub fn record_notify_failure(channel: &'static str) {
    metrics::counter!("monitor_notify_failures_total", "channel" => channel).increment(1);
}

pub fn record_pass(result: &'static str, elapsed: Duration, endpoints: usize) {
    metrics::counter!("monitor_passes_total", "result" => result).increment(1);
    metrics::histogram!("monitor_pass_duration_seconds").record(elapsed.as_secs_f64());
    metrics::gauge!("monitor_pass_endpoints").set(endpoints as f64);
}
