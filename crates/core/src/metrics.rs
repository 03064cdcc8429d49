//! Prometheus metrics for pipeline runs.
//!
//! Metrics are lazily created statics; `register_all` hooks them into a
//! registry when an exporter is wired up.

use once_cell::sync::Lazy;
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
};

/// Completed runs by result: "done", "done_with_warning", "failed".
pub static RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("vacanza_runs_total", "Total pipeline runs"),
        &["result"],
    )
    .unwrap()
});

/// Per-item detail fetch failures across all runs.
pub static FETCH_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vacanza_fetch_failures_total",
        "Detail fetches that failed and were skipped",
    )
    .unwrap()
});

/// Duplicate summaries dropped before fetching.
pub static DUPLICATES_DROPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vacanza_duplicates_dropped_total",
        "Duplicate search results dropped before detail fetching",
    )
    .unwrap()
});

/// End-to-end run duration in seconds.
pub static RUN_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("vacanza_run_duration_seconds", "Duration of pipeline runs")
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
    )
    .unwrap()
});

/// Records handed to the persistence stage per run.
pub static RECORDS_PERSISTED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "vacanza_records_persisted",
            "Records persisted per pipeline run",
        )
        .buckets(vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]),
        &["format"],
    )
    .unwrap()
});

/// Register all pipeline metrics with a registry.
pub fn register_all(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(RUNS_TOTAL.clone()))?;
    registry.register(Box::new(FETCH_FAILURES.clone()))?;
    registry.register(Box::new(DUPLICATES_DROPPED.clone()))?;
    registry.register(Box::new(RUN_DURATION.clone()))?;
    registry.register(Box::new(RECORDS_PERSISTED.clone()))?;
    Ok(())
}
