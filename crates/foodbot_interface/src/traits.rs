//! Platform traits.

use crate::HistoryCursor;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use foodbot_core::{ChannelId, ChannelInfo, GuildEmoji, GuildId, HistoryMessage, MessageId};
use foodbot_error::PlatformResult;

/// Paged, backward read access to channel history.
///
/// Each call is a suspension point of a history scan.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// Fetch one page of messages strictly older than `before` and strictly
    /// newer than `after`, newest first.
    ///
    /// Page size is up to the implementation. An empty page means there is
    /// no more history inside the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformErrorKind::Forbidden`](foodbot_error::PlatformErrorKind::Forbidden)
    /// when the bot may not read the channel, other kinds for API failures.
    async fn history_page(
        &self,
        channel: ChannelId,
        before: HistoryCursor,
        after: DateTime<Utc>,
    ) -> PlatformResult<Vec<HistoryMessage>>;
}

/// Everything the actions need from a chat platform.
#[async_trait]
pub trait ChatPlatform: MessageHistory {
    /// Platform name (e.g., "discord").
    fn platform_name(&self) -> &str;

    /// Every custom emoji of the guild, animated ones included.
    async fn guild_emojis(&self, guild: GuildId) -> PlatformResult<Vec<GuildEmoji>>;

    /// Every channel of the guild, all kinds.
    async fn guild_channels(&self, guild: GuildId) -> PlatformResult<Vec<ChannelInfo>>;

    /// Post a text message and return its id.
    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId>;

    /// Replace the text of a message the bot posted earlier.
    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
    ) -> PlatformResult<()>;
}
