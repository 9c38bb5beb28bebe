//! Request-level metrics emitted by the client.

use std::time::Duration;

use metrics::{counter, histogram};

/// Counter of completed requests, labeled by operation and HTTP status.
pub const REQUESTS_TOTAL: &str = "firestore_requests_total";

/// Per-operation latency histogram, in seconds.
pub const LATENCY_SECONDS: &str = "firestore_latency_seconds";

pub(crate) fn observe(operation: &str, status: u16, elapsed: Duration) {
    let op = operation.to_string();
    counter!(REQUESTS_TOTAL, "operation" => op.clone(), "status" => status.to_string())
        .increment(1);
    histogram!(LATENCY_SECONDS, "operation" => op).record(elapsed.as_secs_f64());
}
