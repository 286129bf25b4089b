//! # Metrics Collection Module
//!
//! Prometheus export of proxy and store activity.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `courier_proxy_requests_total{method, outcome}` - Proxy calls by outcome
//!   (`response` or `upstream_error`)
//! - `courier_history_write_failures_total` - History appends that failed
//!
//! **Histograms:**
//! - `courier_proxy_duration_seconds` - Outbound call duration

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use std::time::Instant;

pub const PROXY_REQUESTS_TOTAL: &str = "courier_proxy_requests_total";
pub const PROXY_DURATION_SECONDS: &str = "courier_proxy_duration_seconds";
pub const HISTORY_WRITE_FAILURES: &str = "courier_history_write_failures_total";

/// Owns the Prometheus handle and the server start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(
        start_time: Instant,
        prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Install the global recorder, or reuse a detached one if a recorder is
    /// already installed (e.g. several app instances in one test binary).
    pub fn install(start_time: Instant) -> Self {
        let handle = setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        });
        Self::new(start_time, handle)
    }

    /// Get uptime in seconds since server startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize the Prometheus exporter as the global recorder.
///
/// Duration buckets span fast local services up to the proxy timeout:
/// [0.01, 0.05, 0.1, 0.25, 0.5, 1, 2.5, 5, 10, 30] seconds.
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(PROXY_DURATION_SECONDS.to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}
