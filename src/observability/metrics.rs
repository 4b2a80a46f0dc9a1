//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bootgate_probes_total` (counter): probes by target, outcome
//! - `bootgate_retry_interval_seconds` (gauge): pending retry interval per target
//! - `bootgate_redirects_total` (counter): handoffs per target
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(target: &str, outcome: &'static str) {
    metrics::counter!(
        "bootgate_probes_total",
        "target" => target.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_retry(target: &str, interval: Duration) {
    metrics::gauge!("bootgate_retry_interval_seconds", "target" => target.to_string())
        .set(interval.as_secs_f64());
}

pub fn record_redirect(target: &str) {
    metrics::counter!("bootgate_redirects_total", "target" => target.to_string()).increment(1);
    metrics::gauge!("bootgate_retry_interval_seconds", "target" => target.to_string()).set(0.0);
}
