//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Searches (outcomes, duration, result sizes)
//! - Directory requests (per entity)
//! - Show cache writes

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by result.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("podsearch_searches_total", "Total searches"),
        &["result"], // "success", "validation_failed", "remote_unavailable", "persistence_failed"
    )
    .unwrap()
});

/// Search duration in seconds.
pub static SEARCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "podsearch_search_duration_seconds",
            "Duration of a full search including cache writes",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap()
});

/// Results returned per search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "podsearch_search_results",
            "Number of results returned per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0]),
        &["kind"], // "shows", "episodes"
    )
    .unwrap()
});

// =============================================================================
// Directory Metrics
// =============================================================================

/// Directory request duration.
pub static DIRECTORY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "podsearch_directory_duration_seconds",
            "Duration of podcast directory requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["entity"],
    )
    .unwrap()
});

/// Directory requests total.
pub static DIRECTORY_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "podsearch_directory_requests_total",
            "Total podcast directory requests",
        ),
        &["entity", "status"], // status: "success", "error"
    )
    .unwrap()
});

/// Episode searches that failed and were replaced by an empty list.
pub static EPISODE_SEARCH_DEGRADED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "podsearch_episode_search_degraded_total",
        "Episode searches answered with no episodes because the directory failed",
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Show upserts by result.
pub static SHOW_UPSERTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("podsearch_show_upserts_total", "Total show cache writes"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        // Directory
        Box::new(DIRECTORY_DURATION.clone()),
        Box::new(DIRECTORY_REQUESTS.clone()),
        Box::new(EPISODE_SEARCH_DEGRADED.clone()),
        // Cache
        Box::new(SHOW_UPSERTS.clone()),
    ]
}
