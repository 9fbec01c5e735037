use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

// High-water mark so timestamps never decrease within one process, even if
// the wall clock steps backwards between calls.
static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Seconds since the Unix epoch, non-decreasing across calls.
pub fn timestamp() -> i64 {
    let now = Utc::now().timestamp();
    let prev = LAST_TIMESTAMP.fetch_max(now, Ordering::Relaxed);
    now.max(prev)
}

/// Per-request nonce. Nothing is persisted or deduplicated across process
/// restarts; uniqueness rests on the randomness alone.
pub fn nonce() -> String {
    format!("{}", Uuid::new_v4())
}
