//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define proxy metrics (request counts, latency, upstream failures)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by source, status
//! - `proxy_request_duration_seconds` (histogram): latency by source
//! - `proxy_upstream_failures_total` (counter): failed fetches by upstream
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - The exporter serves scrapes on its own listener, separate from the
//!   proxy port

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::upstream::Upstream;

/// Install the Prometheus exporter and register metric descriptions.
///
/// Failure to install is logged and otherwise ignored; the proxy keeps
/// serving without metrics.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    if let Err(error) = builder.install() {
        tracing::error!(error = %error, "Failed to install Prometheus exporter");
        return;
    }

    describe_counter!(
        "proxy_requests_total",
        "Total proxied requests by source and response status"
    );
    describe_histogram!(
        "proxy_request_duration_seconds",
        Unit::Seconds,
        "Proxy request latency by source"
    );
    describe_counter!(
        "proxy_upstream_failures_total",
        "Failed upstream fetches by upstream API"
    );

    tracing::info!(address = %addr, "Metrics endpoint ready");
}

/// Record one completed proxy request.
pub fn record_request(source: &'static str, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "source" => source,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("proxy_request_duration_seconds", "source" => source)
        .record(start.elapsed().as_secs_f64());
}

/// Record one failed upstream fetch.
pub fn record_upstream_failure(upstream: Upstream) {
    counter!("proxy_upstream_failures_total", "upstream" => upstream.label()).increment(1);
}
