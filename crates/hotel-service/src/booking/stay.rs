//! Stay length computation.

use chrono::{DateTime, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Number of billable nights between check-in and check-out.
///
/// Any started day counts as a full night (ceiling division), so an
/// 18-hour stay bills one night. Zero or negative spans yield 0.
pub fn count_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let span_ms = (check_out - check_in).num_milliseconds();
    if span_ms <= 0 {
        return 0;
    }
    (span_ms + DAY_MS - 1) / DAY_MS
}
