//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): total requests by method, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_rate_limited_total` (counter): requests rejected by the limiter
//!
//! # Design Decisions
//! - Low-overhead updates (atomic increments under the hood)
//! - The Prometheus exporter is optional and bound from config

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// Middleware recording method, status, and latency for every request.
pub async fn track_requests(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();

    let response = next.run(req).await;

    record_request(&method, response.status().as_u16(), start);
    response
}

/// Start the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
    {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one rate-limited rejection.
pub fn record_rate_limited() {
    metrics::counter!("gateway_rate_limited_total").increment(1);
}
