//! Metrics collection.
//!
//! # Responsibilities
//! - Define client metrics (request counts, latency, errors)
//! - Record against the `metrics` facade; exposition belongs to the
//!   embedding application
//!
//! # Metrics
//! - `bridge_client_requests_total` (counter): requests by method, status
//! - `bridge_client_request_duration_seconds` (histogram): latency
//! - `bridge_client_errors_total` (counter): failures by error kind

use std::time::Instant;

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "bridge_client_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("bridge_client_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record one failed operation by taxonomy kind.
pub fn record_client_error(kind: &'static str) {
    metrics::counter!("bridge_client_errors_total", "kind" => kind).increment(1);
}
