//! Prometheus metrics for the leaderboard poster.
//!
//! Exposes:
//! - `leaderboard_poster_command_duration_seconds` (histogram)
//! - `leaderboard_poster_command_total` (counter with status)
//! - `leaderboard_poster_submissions_total` (counter)
//! - process metrics via `process` collector
//!
//! The tool is a one-shot process, so metrics are written once as a text
//! file for the node-exporter textfile collector instead of being served.

use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::process_collector::ProcessCollector;
use prometheus::{
    default_registry, register_histogram_vec, register_int_counter, register_int_counter_vec,
    Encoder, HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};
use tracing::{info, warn};

use crate::error::Result;

static PROCESS_COLLECTOR: Lazy<()> = Lazy::new(|| {
    if let Err(err) = default_registry().register(Box::new(ProcessCollector::for_self())) {
        warn!("Failed to register process collector: {}", err);
    }
});

static COMMAND_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    // Exponential buckets from 50ms up to ~7 minutes.
    let buckets =
        prometheus::exponential_buckets(0.05, 2.0, 14).expect("failed to create histogram buckets");
    register_histogram_vec!(
        "leaderboard_poster_command_duration_seconds",
        "CLI command duration in seconds",
        &["command"],
        buckets
    )
    .expect("failed to register command duration histogram")
});

static COMMAND_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "leaderboard_poster_command_total",
        "Total command executions by status",
        &["command", "status"]
    )
    .expect("failed to register command counter")
});

static SUBMISSIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "leaderboard_poster_submissions_total",
        "Posts created on Reddit"
    )
    .expect("failed to register submissions counter")
});

/// Ensure collectors are registered.
fn init_collectors() {
    Lazy::force(&PROCESS_COLLECTOR);
    Lazy::force(&COMMAND_DURATION);
    Lazy::force(&COMMAND_TOTAL);
    Lazy::force(&SUBMISSIONS_TOTAL);
}

/// Record command completion with duration and status.
pub fn record_command_result(command: &'static str, duration: Duration, success: bool) {
    init_collectors();
    COMMAND_DURATION
        .with_label_values(&[command])
        .observe(duration.as_secs_f64());
    COMMAND_TOTAL
        .with_label_values(&[command, if success { "ok" } else { "error" }])
        .inc();
}

pub fn record_submission() {
    init_collectors();
    SUBMISSIONS_TOTAL.inc();
}

/// Encode every registered metric in the Prometheus text format.
pub fn render() -> Result<String> {
    init_collectors();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write metrics atomically: to `<path>.tmp`, then rename.
pub fn write_textfile(path: &Path) -> Result<()> {
    let text = render()?;
    let tmp = path.with_extension("prom.tmp");
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)?;
    info!(path = %path.display(), "Metrics written");
    Ok(())
}
