//! Metrics collection.
//!
//! # Metrics
//! - `dataproxy_dispatch_total` (counter): dispatches by method, outcome
//! - `dataproxy_dispatch_duration_seconds` (histogram): dispatch latency by method
//! - `dataproxy_controller_runs_total` (counter): finished controller runs by flow, status
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op.

use std::time::Instant;

use metrics::{counter, histogram};

use crate::dispatch::error::ErrorKind;
use crate::lifecycle::LifecycleState;

/// Outcome label for a dispatch: `success` or the error kind.
pub fn outcome_label(error: Option<ErrorKind>) -> &'static str {
    match error {
        None => "success",
        Some(kind) => kind.as_str(),
    }
}

/// Record a completed dispatch.
pub fn record_dispatch(method: &'static str, error: Option<ErrorKind>, start_time: Instant) {
    let elapsed = start_time.elapsed().as_secs_f64();

    counter!(
        "dataproxy_dispatch_total",
        "method" => method,
        "outcome" => outcome_label(error)
    )
    .increment(1);
    histogram!("dataproxy_dispatch_duration_seconds", "method" => method).record(elapsed);
}

/// Record the terminal status of a controller run.
pub fn record_controller_run(flow: &'static str, status: LifecycleState) {
    counter!(
        "dataproxy_controller_runs_total",
        "flow" => flow,
        "status" => status.as_str()
    )
    .increment(1);
}
