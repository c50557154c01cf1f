//! Time windows for history scans.

use chrono::{DateTime, Duration, Utc};
use derive_getters::Getters;

/// The backward time span a history scan covers.
///
/// Messages strictly newer than [`stop_time`](Self::stop_time) are inside
/// the window; a message exactly at the stop time is outside.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use foodbot_core::AggregationWindow;
///
/// let reference = Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap();
/// let window = AggregationWindow::new(reference, Duration::days(7));
///
/// assert_eq!(window.stop_time(), Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
/// assert!(!window.contains(window.stop_time()));
/// assert!(window.contains(window.stop_time() + Duration::seconds(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct AggregationWindow {
    /// Newest edge of the window, where scanning starts.
    reference_time: DateTime<Utc>,
    /// How far back the window reaches.
    horizon: Duration,
}

impl AggregationWindow {
    /// Create a window ending at `reference_time`.
    pub fn new(reference_time: DateTime<Utc>, horizon: Duration) -> Self {
        Self {
            reference_time,
            horizon,
        }
    }

    /// A window ending now and reaching back `days` days.
    pub fn last_days(days: u32) -> Self {
        Self::new(Utc::now(), Duration::days(i64::from(days)))
    }

    /// Oldest edge of the window (exclusive).
    pub fn stop_time(&self) -> DateTime<Utc> {
        self.reference_time - self.horizon
    }

    /// Whether a timestamp falls strictly after the stop time.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp > self.stop_time()
    }
}
