use chrono::{DateTime, Utc};

/// Largest id accepted from storage. Stored ids above it are re-issued on
/// load, which keeps `last + 1` far from overflowing. Every millisecond
/// timestamp chrono can represent is below it.
pub const MAX_ID: i64 = 9_007_199_254_740_991;

/// Allocate an id from the creation time in milliseconds.
///
/// Two records created within the same millisecond (or after the clock
/// stepped backwards) still get distinct, increasing ids.
pub fn next_id(last: i64, now: DateTime<Utc>) -> i64 {
    now.timestamp_millis().max(last + 1)
}

/// Whether a stored id can be kept as is
pub fn in_range(id: i64) -> bool {
    id <= MAX_ID
}
