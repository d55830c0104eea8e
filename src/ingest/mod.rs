//! Ingestion paths for the two input report formats
//!
//! Two independent paths share this module:
//! - `summary`: JSON job-execution summaries
//! - `logs`: CSV application log exports
//!
//! Both extract a correlation id, a UUID-shaped substring embedded in free
//! text (the job name or the log message), which is what joins `batch` and
//! `log` rows logically. The shape is five hyphen-separated segments of
//! lengths 8-4-4-4-12; segment contents are unconstrained beyond "no
//! hyphen", matching how upstream systems embed the id.

pub mod logs;
pub mod model;
pub mod summary;

pub use logs::ingest_logs;
pub use summary::ingest_summaries;

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Regex for UUID-shaped correlation ids embedded in free text
static CORRELATION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^-]{8}-[^-]{4}-[^-]{4}-[^-]{4}-[^-]{12}")
        .expect("Invalid correlation id regex")
});

/// Find the first correlation id embedded in `text`, if any
pub fn correlation_id(text: &str) -> Option<&str> {
    CORRELATION_ID.find(text).map(|m| m.as_str())
}

/// Best-effort string-to-integer conversion for optional numeric fields
///
/// Returns `None` on empty or unparseable input rather than erroring,
/// logging the failure. Not exercised by the current table schemas; kept as
/// a defensive helper for optional numeric columns.
pub fn parse_optional_int(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(value, "Failed to convert string to integer");
            None
        }
    }
}
