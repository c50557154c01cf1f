//! Platform-independent conversions for Discord data.
//!
//! Discord ids are snowflakes: the top 42 bits hold milliseconds since the
//! Discord epoch, so ids order exactly like `(timestamp, id)` and a
//! timestamp can be turned into a synthetic id for `before` queries.

use chrono::{DateTime, Utc};
use foodbot_error::PlatformErrorKind;

/// First millisecond of 2015, the origin of Discord snowflake timestamps.
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Bits below the timestamp in a snowflake.
const TIMESTAMP_SHIFT: u32 = 22;

/// Retry delay reported when Discord rate limits a request without saying
/// for how long.
pub const RATE_LIMIT_FALLBACK_SECS: u64 = 5;

/// Creation time encoded in a snowflake.
///
/// # Examples
///
/// ```
/// use foodbot_social::timestamp_of;
///
/// let created = timestamp_of(175928847299117063);
/// assert_eq!(created.to_rfc3339(), "2016-04-30T11:18:25.796+00:00");
/// ```
pub fn timestamp_of(snowflake: u64) -> DateTime<Utc> {
    let millis = (snowflake >> TIMESTAMP_SHIFT) + DISCORD_EPOCH_MS;
    // 42 bits of milliseconds always fit chrono's range
    DateTime::from_timestamp_millis(millis as i64).unwrap_or_default()
}

/// Smallest snowflake created at `timestamp`.
///
/// Every id strictly below it belongs to an older message. Timestamps before
/// the Discord epoch give zero.
pub fn snowflake_before(timestamp: DateTime<Utc>) -> u64 {
    let millis = timestamp.timestamp_millis();
    if millis <= DISCORD_EPOCH_MS as i64 {
        return 0;
    }
    (millis as u64 - DISCORD_EPOCH_MS) << TIMESTAMP_SHIFT
}

/// Map an unsuccessful HTTP status to a platform error kind.
///
/// Only 403 means a single resource is off limits. A 401 means the token
/// itself was rejected, so it is an API failure that stops the action.
pub fn classify_status(status: u16, detail: impl Into<String>) -> PlatformErrorKind {
    let detail = detail.into();
    match status {
        403 => PlatformErrorKind::Forbidden(detail),
        404 => PlatformErrorKind::NotFound(detail),
        429 => PlatformErrorKind::RateLimited(RATE_LIMIT_FALLBACK_SECS),
        _ => PlatformErrorKind::Api(format!("HTTP {}: {}", status, detail)),
    }
}
