//! Prometheus metrics for a feed update run.
//!
//! The CLI can dump these as a text exposition file after each run, which
//! suits a node_exporter textfile collector.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

// =============================================================================
// Feed Metrics
// =============================================================================

/// Feed items fetched, by feed name.
pub static FEED_ITEMS_FETCHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("moviefeed_feed_items_fetched_total", "Total feed items fetched"),
        &["feed"],
    )
    .unwrap()
});

/// Feed fetch failures, by feed name.
pub static FEED_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "moviefeed_feed_failures_total",
            "Total feed fetches that failed and were skipped",
        ),
        &["feed"],
    )
    .unwrap()
});

/// Titles the parser could not turn into a release.
pub static TITLES_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "moviefeed_titles_rejected_total",
        "Total feed item titles that could not be parsed",
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Movies in the catalog built by the last run.
pub static CATALOG_MOVIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("moviefeed_catalog_movies", "Movies in the last built catalog").unwrap()
});

/// Releases in the catalog built by the last run.
pub static CATALOG_RELEASES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "moviefeed_catalog_releases",
        "Releases in the last built catalog",
    )
    .unwrap()
});

/// Metadata lookups by result.
pub static ENRICHMENT_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "moviefeed_enrichment_lookups_total",
            "Total metadata lookups",
        ),
        &["result"], // "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Registry
// =============================================================================

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in all_metrics() {
        registry.register(metric).unwrap();
    }
    registry
});

/// Get all metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(FEED_ITEMS_FETCHED.clone()),
        Box::new(FEED_FAILURES.clone()),
        Box::new(TITLES_REJECTED.clone()),
        Box::new(CATALOG_MOVIES.clone()),
        Box::new(CATALOG_RELEASES.clone()),
        Box::new(ENRICHMENT_LOOKUPS.clone()),
    ]
}

/// Encode all metrics in the Prometheus text format.
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
