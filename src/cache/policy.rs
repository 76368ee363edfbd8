use chrono::{DateTime, Duration, Utc};

const MAX_CACHE_AGE_DAYS: i64 = 7;

/// A cached feed is usable while strictly younger than seven days; a record
/// exactly seven days old is already stale.
pub(crate) fn is_fresh(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now < timestamp + Duration::days(MAX_CACHE_AGE_DAYS)
}
