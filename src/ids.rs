//! Record identifiers.
//!
//! Ids are the creation time in milliseconds since the Unix epoch, rendered as
//! a decimal string. When two records are created within the same millisecond
//! the later one is bumped forward, so ids stay unique and strictly increasing
//! within a process.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generate an id for a record created at `created_at`.
pub fn next_id(created_at: DateTime<Utc>) -> String {
    let millis = created_at.timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = millis.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return candidate.to_string(),
            Err(current) => last = current,
        }
    }
}

/// Order ids numerically, falling back to string order for foreign ids.
pub fn compare_ids(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
