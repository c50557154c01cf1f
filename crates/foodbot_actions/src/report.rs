//! Size-bounded report output.

use async_trait::async_trait;
use foodbot_core::{ChannelId, EmojiKey, EmojiTally};
use foodbot_error::PlatformResult;
use foodbot_interface::ChatPlatform;
use foodbot_settings::{DEFAULT_TERMINAL_MARKER, GeneralSettings};
use tracing::{debug, instrument, warn};

/// Where report chunks go.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Deliver one chunk.
    async fn send(&self, chunk: &str) -> PlatformResult<()>;
}

/// Sends chunks as messages to a channel.
#[derive(Debug)]
pub struct ChannelSink<'a, P: ?Sized> {
    platform: &'a P,
    channel: ChannelId,
}

impl<'a, P: ChatPlatform + ?Sized> ChannelSink<'a, P> {
    /// Sink writing to `channel`.
    pub fn new(platform: &'a P, channel: ChannelId) -> Self {
        Self { platform, channel }
    }
}

#[async_trait]
impl<P: ChatPlatform + ?Sized> ReportSink for ChannelSink<'_, P> {
    async fn send(&self, chunk: &str) -> PlatformResult<()> {
        self.platform.send_message(self.channel, chunk).await?;
        Ok(())
    }
}

/// Accumulates lines into chunks no longer than the budget.
///
/// Lengths are counted in characters.
#[derive(Debug, Clone)]
struct ChunkBuffer<'a> {
    budget: usize,
    continuation_marker: Option<&'a str>,
    current: String,
    current_len: usize,
    chunks: Vec<String>,
}

impl<'a> ChunkBuffer<'a> {
    fn new(budget: usize, continuation_marker: Option<&'a str>) -> Self {
        Self {
            budget,
            continuation_marker,
            current: String::new(),
            current_len: 0,
            chunks: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        let line_len = line.chars().count();
        if line_len > self.budget {
            warn!(
                budget = self.budget,
                line_len, "Report line is longer than the characters limit"
            );
        }

        if self.current_len + line_len > self.budget && !self.current.is_empty() {
            self.flush_mid_report();
        }

        self.current.push_str(line);
        self.current_len += line_len;
    }

    fn flush_mid_report(&mut self) {
        if let Some(marker) = self.continuation_marker {
            if self.current_len + marker.chars().count() <= self.budget {
                self.current.push_str(marker);
            }
        }
        self.flush();
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
        }
        self.current_len = 0;
    }

    fn finish(mut self, terminal_marker: Option<&str>) -> Vec<String> {
        if self.current.is_empty() {
            return self.chunks;
        }

        if let Some(marker) = terminal_marker {
            let marker_len = marker.chars().count();
            // Keep every chunk inside the budget; the marker goes alone if needed
            if self.current_len + marker_len > self.budget {
                self.flush();
            }
            self.current.push_str(marker);
            self.current_len += marker_len;
        }

        self.flush();
        self.chunks
    }
}

/// Turns a tally into chunks bounded by a character budget.
///
/// Entries are emitted ascending by count; equal counts keep the tally's
/// seeding order. After the last line a terminal marker is appended, in its
/// own chunk if it would not fit.
///
/// # Examples
///
/// ```
/// use foodbot_actions::ReportChunker;
/// use foodbot_core::{EmojiId, EmojiTally, GuildEmoji};
///
/// let mut tally = EmojiTally::seeded([GuildEmoji::new(1, "a"), GuildEmoji::new(2, "b")]);
/// tally.increment(EmojiId(1), 2);
///
/// let chunks = ReportChunker::new(2000).chunks(&tally);
/// assert_eq!(
///     chunks,
///     vec!["Emoji <:b:2> was used 0 times.\nEmoji <:a:1> was used 2 times.\nThe end!".to_string()]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportChunker {
    budget: usize,
    terminal_marker: Option<String>,
    continuation_marker: Option<String>,
}

impl ReportChunker {
    /// Chunker with the default terminal marker and no continuation marker.
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            terminal_marker: Some(DEFAULT_TERMINAL_MARKER.to_string()),
            continuation_marker: None,
        }
    }

    /// Chunker configured from the `[general]` settings.
    pub fn from_settings(general: &GeneralSettings) -> Self {
        Self::new(*general.characters_limit())
            .with_terminal_marker(Some(general.terminal_marker().clone()))
            .with_continuation_marker(general.continuation_marker().map(str::to_string))
    }

    /// Replace the terminal marker; `None` or empty disables it.
    pub fn with_terminal_marker(mut self, marker: Option<String>) -> Self {
        self.terminal_marker = marker.filter(|marker| !marker.is_empty());
        self
    }

    /// Replace the continuation marker; `None` or empty disables it.
    pub fn with_continuation_marker(mut self, marker: Option<String>) -> Self {
        self.continuation_marker = marker.filter(|marker| !marker.is_empty());
        self
    }

    /// The character budget per chunk.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// One report line.
    pub fn format_line(key: &EmojiKey, count: u64) -> String {
        format!("Emoji {} was used {} times.\n", key, count)
    }

    /// Chunk arbitrary lines; the terminal marker follows the last line.
    pub fn chunk_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = ChunkBuffer::new(self.budget, self.continuation_marker.as_deref());
        for line in lines {
            buffer.push_line(line.as_ref());
        }
        buffer.finish(self.terminal_marker.as_deref())
    }

    /// Chunk a tally, ascending by count.
    pub fn chunks(&self, tally: &EmojiTally) -> Vec<String> {
        self.chunk_lines(
            tally
                .sorted_ascending()
                .into_iter()
                .map(|(key, count)| Self::format_line(key, count)),
        )
    }

    /// Send a tally's chunks to `sink` in order.
    ///
    /// # Errors
    ///
    /// Returns the first send error; later chunks are not sent.
    #[instrument(skip(self, tally, sink), fields(entries = tally.len(), budget = self.budget))]
    pub async fn emit<S>(&self, tally: &EmojiTally, sink: &S) -> PlatformResult<usize>
    where
        S: ReportSink + ?Sized,
    {
        self.send_all(self.chunks(tally), sink).await
    }

    /// Send already chunked text to `sink` in order.
    pub async fn send_all<S>(&self, chunks: Vec<String>, sink: &S) -> PlatformResult<usize>
    where
        S: ReportSink + ?Sized,
    {
        let total = chunks.len();
        for (index, chunk) in chunks.iter().enumerate() {
            sink.send(chunk).await?;
            debug!(chunk = index + 1, total, length = chunk.chars().count(), "Chunk sent");
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(label: char) -> String {
        // 19 characters plus newline
        format!("{}\n", label.to_string().repeat(19))
    }

    #[test]
    fn test_fifty_budget_splits_three_twenty_char_lines() {
        let chunker = ReportChunker::new(50);
        let chunks = chunker.chunk_lines([line('a'), line('b'), line('c')]);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}{}", line('a'), line('b')));
        assert_eq!(chunks[1], format!("{}The end!", line('c')));
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 50));
    }

    #[test]
    fn test_terminal_marker_goes_alone_when_it_does_not_fit() {
        let chunker = ReportChunker::new(45);
        let chunks = chunker.chunk_lines([line('a'), line('b')]);

        assert_eq!(chunks, vec![format!("{}{}", line('a'), line('b')), "The end!".to_string()]);
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let chunker = ReportChunker::new(50);
        assert!(chunker.chunk_lines(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_continuation_marker_only_when_it_fits() {
        let chunker = ReportChunker::new(45).with_continuation_marker(Some("..".to_string()));
        let chunks = chunker.chunk_lines([line('a'), line('b'), line('c')]);
        assert_eq!(chunks[0], format!("{}{}..", line('a'), line('b')));

        let tight = ReportChunker::new(40).with_continuation_marker(Some("..".to_string()));
        let chunks = tight.chunk_lines([line('a'), line('b'), line('c')]);
        assert_eq!(chunks[0], format!("{}{}", line('a'), line('b')));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let chunker = ReportChunker::new(4).with_terminal_marker(None);
        let chunks = chunker.chunk_lines(["éé", "éé", "é"]);

        assert_eq!(chunks, vec!["éééé".to_string(), "é".to_string()]);
    }
}
