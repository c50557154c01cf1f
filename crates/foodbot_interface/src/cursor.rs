//! Backward pagination cursor.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use foodbot_core::{HistoryMessage, MessageId};

/// Position in a channel history; pages are fetched strictly before it.
///
/// History is ordered by `(timestamp, message id)`. The first page of a scan
/// starts from a bare timestamp; later pages start from the oldest message
/// already processed, whose id breaks ties between messages that share a
/// timestamp.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use foodbot_core::{HistoryMessageBuilder, MessageId};
/// use foodbot_interface::HistoryCursor;
///
/// let now = Utc::now();
/// let cursor = HistoryCursor::at(now);
///
/// let older = HistoryMessageBuilder::default()
///     .id(MessageId(1))
///     .timestamp(now - Duration::seconds(5))
///     .build()
///     .unwrap();
///
/// assert!(cursor.admits(&older));
/// assert!(!HistoryCursor::before_message(&older).admits(&older));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct HistoryCursor {
    /// Timestamp boundary.
    timestamp: DateTime<Utc>,
    /// Id of the boundary message, if the cursor sits on one.
    message_id: Option<MessageId>,
}

impl HistoryCursor {
    /// Cursor at a bare point in time.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            message_id: None,
        }
    }

    /// Cursor sitting on a message; the message itself is not admitted.
    pub fn before_message(message: &HistoryMessage) -> Self {
        Self {
            timestamp: message.timestamp,
            message_id: Some(message.id),
        }
    }

    /// Whether `message` lies strictly older than this cursor.
    pub fn admits(&self, message: &HistoryMessage) -> bool {
        match self.message_id {
            Some(id) => (message.timestamp, message.id) < (self.timestamp, id),
            None => message.timestamp < self.timestamp,
        }
    }
}
