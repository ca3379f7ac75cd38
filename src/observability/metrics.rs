//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hola_requests_total` (counter): requests by method, path, status
//! - `hola_request_duration_seconds` (histogram): request latency
//! - `hola_downstream_requests_total` (counter): downstream calls by
//!   outcome (`ok` / `fallback`)
//! - `hola_downstream_duration_seconds` (histogram): downstream call
//!   latency, fallback substitutions included

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged, never fatal: the service runs without
/// metrics rather than not at all.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(error = %error, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, path: &str, status: u16, started: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("hola_requests_total", &labels).increment(1);
    metrics::histogram!("hola_request_duration_seconds", &labels)
        .record(started.elapsed().as_secs_f64());
}

/// Record one downstream call outcome.
pub fn record_downstream(outcome: &'static str, started: Instant) {
    let labels = [("outcome", outcome.to_string())];
    metrics::counter!("hola_downstream_requests_total", &labels).increment(1);
    metrics::histogram!("hola_downstream_duration_seconds", &labels)
        .record(started.elapsed().as_secs_f64());
}
