//! Metrics collection and exposition.
//!
//! # Metrics
//! - `json_negotiation_responses_total` (counter): terminal responses by combinator, status
//! - `json_negotiation_faults_total` (counter): unrecovered faults by combinator

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a terminal response produced by a combinator.
pub fn record_response(combinator: &'static str, status: u16) {
    counter!(
        "json_negotiation_responses_total",
        "combinator" => combinator,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Count a fault handed back to the host pipeline.
pub fn record_fault(combinator: &'static str) {
    counter!("json_negotiation_faults_total", "combinator" => combinator).increment(1);
}
