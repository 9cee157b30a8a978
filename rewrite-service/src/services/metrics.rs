//! Prometheus metrics for the rewrite service.
//!
//! HTTP request metrics come from `service_core::middleware::metrics`; this
//! module adds provider-level series and owns the exporter handle.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Must be called once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics recorder already initialized"))
}

/// Render all metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record the outcome of one rewrite request (`ok`, `empty`, `upstream`, ...).
pub fn record_rewrite(outcome: &'static str) {
    counter!("rewrite_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_provider_latency(model: &str, duration_secs: f64) {
    histogram!("rewrite_provider_latency_seconds", "model" => model.to_string())
        .record(duration_secs);
}
