//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the podsearch server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Show cache size (collected dynamically)
//!
//! Search and directory metrics live in `podsearch_core::metrics` and are
//! registered here as well.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "podsearch_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("podsearch_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "podsearch_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Show Cache Metrics
// =============================================================================

/// Number of shows in the cache.
pub static SHOWS_CACHED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("podsearch_shows_cached", "Number of shows in the cache").unwrap()
});

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Show cache
    registry.register(Box::new(SHOWS_CACHED.clone())).unwrap();

    // Core metrics (searches, directory, cache writes)
    for metric in podsearch_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Update gauges that are read from state rather than incremented inline.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    match state.store().count().await {
        Ok(count) => SHOWS_CACHED.set(count as i64),
        Err(e) => warn!("Failed to count cached shows: {}", e),
    }
}

/// Replace numeric path segments so per-show routes share one label.
pub fn normalize_path(path: &str) -> String {
    static NUMERIC: Lazy<regex_lite::Regex> =
        Lazy::new(|| regex_lite::Regex::new(r"/\d+(/|$)").unwrap());

    NUMERIC.replace_all(path, "/{id}$1").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_numeric() {
        let path = "/api/shows/1535809341";
        assert_eq!(normalize_path(path), "/api/shows/{id}");
    }

    #[test]
    fn test_normalize_path_numeric_middle() {
        let path = "/api/shows/12345/episodes/2";
        assert_eq!(normalize_path(path), "/api/shows/{id}/episodes/{id}");
    }

    #[test]
    fn test_normalize_path_no_ids() {
        assert_eq!(normalize_path("/api/health"), "/api/health");
        assert_eq!(normalize_path("/api/search"), "/api/search");
    }

    #[test]
    fn test_normalize_path_ignores_mixed_segments() {
        assert_eq!(normalize_path("/api/v2beta"), "/api/v2beta");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        // Access metrics to ensure they're initialized
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("podsearch_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        // Prometheus only outputs vector metrics that have been accessed
        podsearch_core::metrics::SEARCHES_TOTAL
            .with_label_values(&["success"])
            .inc_by(0);
        SHOWS_CACHED.set(0);

        let output = encode_metrics();
        assert!(output.contains("podsearch_searches_total"));
        assert!(output.contains("podsearch_shows_cached"));
        assert!(output.contains("podsearch_http_requests_in_flight"));
    }
}
