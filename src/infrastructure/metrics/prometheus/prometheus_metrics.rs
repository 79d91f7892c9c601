//! `Metrics` implementation backed by the `metrics` crate's global registry.
//! Counters and histograms live in `counters.rs`; the installed recorder
//! handle in `recorder.rs` renders the Prometheus text exposition.

use crate::domain::Metrics;
use std::time::Instant;

/// Stateless: every call goes through the global registry, so there is
/// nothing to hold per instance.
pub struct PrometheusMetrics;

impl PrometheusMetrics {
    pub fn new() -> Self {
        PrometheusMetrics
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        // Use the recorder utility to get actual metrics
        super::render_metrics()
    }

    fn record_user_registered(&self) {
        tracing::debug!("Recording user registered event");
        super::increment_user_registered();
    }

    fn record_listing_created(&self) {
        tracing::debug!("Recording listing created event");
        super::increment_listing_created();
    }

    fn record_cart_item_added(&self) {
        tracing::debug!("Recording cart item added event");
        super::increment_cart_item_added();
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
