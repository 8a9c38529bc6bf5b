//! Metrics collection and exposition.
//!
//! # Metrics
//! - `speedtest_requests_total` (counter): requests by route
//! - `speedtest_download_bytes_total` (counter): payload bytes handed to clients
//! - `speedtest_download_aborted_total` (counter): downloads cut short by the client

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one dispatched request.
pub fn record_route(route: &'static str) {
    metrics::counter!("speedtest_requests_total", "route" => route).increment(1);
}

/// Count the outcome of one download.
pub fn record_download(bytes: u64, completed: bool) {
    metrics::counter!("speedtest_download_bytes_total").increment(bytes);
    if !completed {
        metrics::counter!("speedtest_download_aborted_total").increment(1);
    }
}
