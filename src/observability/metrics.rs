//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watcher_poll_ticks_total` (counter): streamer file checks
//! - `watcher_reconciliations_total` (counter): reloads by `outcome`
//! - `watcher_active_streamers` (gauge): length of the engine's active list
//! - `watcher_log_sweeps_total` (counter): sweeps by `deleted` (true/false)
//! - `watcher_log_bytes` (gauge): log size seen by the last sweep
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::retention::SweepReport;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_poll_tick() {
    counter!("watcher_poll_ticks_total").increment(1);
}

pub fn record_reconciliation(outcome: &'static str) {
    counter!("watcher_reconciliations_total", "outcome" => outcome).increment(1);
}

pub fn set_active_streamers(count: usize) {
    gauge!("watcher_active_streamers").set(count as f64);
}

pub fn record_sweep(report: &SweepReport) {
    let deleted = if report.deleted > 0 { "true" } else { "false" };
    counter!("watcher_log_sweeps_total", "deleted" => deleted).increment(1);
    gauge!("watcher_log_bytes").set(report.total_bytes as f64);
}
