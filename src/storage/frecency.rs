//! Frecency score calculation for ranking visited locations.
//!
//! Implements a "frecency" (frequency + recency) ranking. The age of the last
//! visit selects a bucket with a fixed weight, and the weight is multiplied by
//! the visit count. The count saturates at a configurable cap, so a long-past
//! burst of visits cannot permanently bury a place that is being used now.
//!
//! | age of last visit | weight |
//! |-------------------|--------|
//! | up to 1 hour      | 100    |
//! | up to 1 day       | 70     |
//! | up to 1 week      | 50     |
//! | up to 30 days     | 30     |
//! | older             | 10     |

use crate::domain::Visit;
use std::cmp::Ordering;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Upper age bound (inclusive) and weight of each recency bucket, youngest first.
const RECENCY_BUCKETS: [(i64, u64); 4] = [
    (SECONDS_PER_HOUR, 100),
    (SECONDS_PER_DAY, 70),
    (7 * SECONDS_PER_DAY, 50),
    (30 * SECONDS_PER_DAY, 30),
];

/// Weight for anything older than the last bucket.
const STALE_WEIGHT: u64 = 10;

/// Default saturation point for the visit count.
pub const DEFAULT_VISIT_COUNT_CAP: u32 = 32;

/// Returns the recency weight for a visit made `age_seconds` ago.
///
/// Visits stamped in the future (clock skew) count as brand new.
#[must_use]
pub fn recency_weight(age_seconds: i64) -> u64 {
    let age = age_seconds.max(0);
    RECENCY_BUCKETS
        .iter()
        .find(|(bound, _)| age <= *bound)
        .map_or(STALE_WEIGHT, |(_, weight)| *weight)
}

/// Calculates the frecency score of a ledger entry.
///
/// ```text
/// score = recency_weight(now - last_visit) × min(visits_count, count_cap)
/// ```
///
/// # Examples
///
/// ```
/// use placemarks::storage::calculate_score;
///
/// let now = 1_700_000_000;
/// let busy_today = calculate_score(10, now - 60, now, 32);
/// let once_last_year = calculate_score(1, now - 365 * 86_400, now, 32);
/// assert!(busy_today > once_last_year);
/// ```
#[must_use]
pub fn calculate_score(visits_count: u32, last_visit: i64, now: i64, count_cap: u32) -> u64 {
    let count = u64::from(visits_count.min(count_cap.max(1)));
    recency_weight(now.saturating_sub(last_visit)) * count
}

/// Orders two entries by descending frecency.
///
/// Equal scores fall back to the more recent last visit, then the larger
/// visit count, then the footprint so that the order is total.
fn compare(a: &Visit, b: &Visit, now: i64, count_cap: u32) -> Ordering {
    let score_a = calculate_score(a.visits_count, a.last_visit, now, count_cap);
    let score_b = calculate_score(b.visits_count, b.last_visit, now, count_cap);
    score_b
        .cmp(&score_a)
        .then_with(|| b.last_visit.cmp(&a.last_visit))
        .then_with(|| b.visits_count.cmp(&a.visits_count))
        .then_with(|| a.location.footprint().cmp(&b.location.footprint()))
}

/// Sorts ledger entries by frecency, highest first.
pub fn sort_by_frecency(records: &mut [&Visit], now: i64, count_cap: u32) {
    records.sort_by(|a, b| compare(a, b, now, count_cap));
}
