//! Backward pagination over one channel's history.

use derive_getters::Getters;
use foodbot_core::{AggregationWindow, ChannelId, HistoryMessage, MessageId};
use foodbot_error::PlatformResult;
use foodbot_interface::{HistoryCursor, MessageHistory};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ScanExit {
    /// The platform had no further unseen history inside the window.
    #[display("exhausted")]
    Exhausted,
    /// A message at or before the stop time was reached.
    #[display("boundary reached")]
    BoundaryReached,
}

/// Summary of one channel scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ScanOutcome {
    /// How the scan ended.
    exit: ScanExit,
    /// Messages handed to the callback.
    processed: usize,
    /// Pages fetched, including the final one.
    pages: usize,
}

/// Walks a channel's history from the window's reference time back to its
/// stop time, handing each message to a callback exactly once.
///
/// The cursor moves to the oldest processed message after every page. A
/// seen-set drops messages a platform repeats across page boundaries, and a
/// page without unseen messages ends the scan.
#[derive(Debug)]
pub struct HistoryScanner<'a, H: ?Sized> {
    history: &'a H,
}

impl<'a, H> HistoryScanner<'a, H>
where
    H: MessageHistory + ?Sized,
{
    /// Scan through `history`.
    pub fn new(history: &'a H) -> Self {
        Self { history }
    }

    /// Scan one channel inside `window`.
    ///
    /// # Errors
    ///
    /// Returns the first page fetch error. Messages handed to the callback
    /// before the error stay counted by the caller.
    #[instrument(skip(self, window, on_message), fields(channel = %channel))]
    pub async fn scan<F>(
        &self,
        channel: ChannelId,
        window: &AggregationWindow,
        mut on_message: F,
    ) -> PlatformResult<ScanOutcome>
    where
        F: FnMut(&HistoryMessage) + Send,
    {
        let stop_time = window.stop_time();
        let mut cursor = HistoryCursor::at(*window.reference_time());
        let mut seen: HashSet<MessageId> = HashSet::new();
        let mut processed = 0;
        let mut pages = 0;

        loop {
            let page = self
                .history
                .history_page(channel, cursor, stop_time)
                .await?;
            pages += 1;

            if page.is_empty() {
                debug!(pages, processed, "History exhausted");
                return Ok(ScanOutcome {
                    exit: ScanExit::Exhausted,
                    processed,
                    pages,
                });
            }

            let mut oldest: Option<&HistoryMessage> = None;
            let mut boundary = false;

            for message in &page {
                if !window.contains(message.timestamp) {
                    boundary = true;
                    break;
                }

                if !seen.insert(message.id) {
                    continue;
                }

                on_message(message);
                processed += 1;

                let is_older = oldest.is_none_or(|current| {
                    (message.timestamp, message.id) < (current.timestamp, current.id)
                });
                if is_older {
                    oldest = Some(message);
                }
            }

            debug!(page = pages, size = page.len(), processed, "Page processed");

            if boundary {
                debug!(pages, processed, "Window boundary reached");
                return Ok(ScanOutcome {
                    exit: ScanExit::BoundaryReached,
                    processed,
                    pages,
                });
            }

            match oldest {
                Some(message) => cursor = HistoryCursor::before_message(message),
                None => {
                    debug!(pages, processed, "Page held no unseen messages");
                    return Ok(ScanOutcome {
                        exit: ScanExit::Exhausted,
                        processed,
                        pages,
                    });
                }
            }
        }
    }
}
