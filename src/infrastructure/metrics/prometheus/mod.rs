mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{
    increment_cart_item_added, increment_listing_created, increment_user_registered,
    track_http_request,
};
pub(crate) use recorder::{init_metrics, render_metrics};

/// Creates the Prometheus-backed metrics implementation, installing the
/// global recorder on first use. Rendered by the `/metrics` endpoint.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    init_metrics();

    Ok(Arc::new(PrometheusMetrics::new()))
}
