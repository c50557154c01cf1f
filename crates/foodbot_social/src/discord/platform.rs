//! Serenity-backed implementation of the platform traits.

use crate::{classify_status, snowflake_before, timestamp_of};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use foodbot_core::{
    ChannelId, ChannelInfo, ChannelKind, EmojiId, GuildEmoji, GuildId, HistoryMessage, MessageId,
    Reaction, ReactionEmoji, UserId,
};
use foodbot_error::{PlatformError, PlatformErrorKind, PlatformResult};
use foodbot_interface::{ChatPlatform, HistoryCursor, MessageHistory};
use serenity::all::{
    ChannelType, CreateMessage, EditMessage, GetMessages, GuildChannel, Message, MessageReaction,
    ReactionType,
};
use serenity::http::Http;
use serenity::model::id as discord_id;
use std::num::NonZeroU64;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Messages per history request; Discord's maximum.
pub const HISTORY_PAGE_LIMIT: u8 = 100;

/// Discord over its REST API.
///
/// Cheap to clone; all clones share one HTTP client and its rate limiter.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    /// Create a platform with its own HTTP client.
    pub fn new(token: &str) -> Self {
        Self::with_http_client(Arc::new(Http::new(token)))
    }

    /// Create a platform over an existing HTTP client.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// The HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

impl std::fmt::Debug for DiscordPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordPlatform").finish_non_exhaustive()
    }
}

/// Classify a serenity error.
#[track_caller]
pub fn platform_error(err: serenity::Error, context: &str) -> PlatformError {
    let detail = format!("{}: {}", context, err);
    let kind = match &err {
        serenity::Error::Http(http_err) => match http_err.status_code() {
            Some(status) => classify_status(status.as_u16(), detail),
            None => PlatformErrorKind::Api(detail),
        },
        _ => PlatformErrorKind::Api(detail),
    };
    PlatformError::new(kind)
}

/// Map a Discord channel type; news channels read like text channels.
pub fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text,
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        _ => ChannelKind::Other,
    }
}

#[track_caller]
fn nonzero(raw: u64, what: &str) -> PlatformResult<NonZeroU64> {
    NonZeroU64::new(raw)
        .ok_or_else(|| PlatformError::new(PlatformErrorKind::NotFound(format!("{} 0", what))))
}

fn reaction(reaction: &MessageReaction) -> Option<Reaction> {
    let emoji = match &reaction.reaction_type {
        ReactionType::Custom { animated, id, name } => ReactionEmoji::Custom {
            id: EmojiId(id.get()),
            name: name.clone(),
            animated: *animated,
        },
        ReactionType::Unicode(text) => ReactionEmoji::Unicode(text.clone()),
        _ => return None,
    };
    Some(Reaction {
        emoji,
        count: reaction.count,
    })
}

fn history_message(message: &Message) -> HistoryMessage {
    HistoryMessage {
        id: MessageId(message.id.get()),
        timestamp: timestamp_of(message.id.get()),
        author: UserId(message.author.id.get()),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
        reactions: message.reactions.iter().filter_map(reaction).collect(),
    }
}

fn channel_info(channel: &GuildChannel) -> ChannelInfo {
    ChannelInfo::new(channel.id.get(), channel.name.clone(), channel_kind(channel.kind))
}

#[async_trait]
impl MessageHistory for DiscordPlatform {
    /// Discord filters by id only, so `after` is not sent; the scanner stops
    /// at the window boundary itself.
    #[instrument(skip(self, _after), fields(channel = %channel))]
    async fn history_page(
        &self,
        channel: ChannelId,
        before: HistoryCursor,
        _after: DateTime<Utc>,
    ) -> PlatformResult<Vec<HistoryMessage>> {
        let before_id = match before.message_id() {
            Some(id) => id.get(),
            None => snowflake_before(*before.timestamp()),
        };
        let Some(before_id) = NonZeroU64::new(before_id) else {
            return Ok(Vec::new());
        };

        let channel_id = discord_id::ChannelId::new(nonzero(channel.get(), "channel")?.get());
        let request = GetMessages::new()
            .before(discord_id::MessageId::new(before_id.get()))
            .limit(HISTORY_PAGE_LIMIT);

        let messages = channel_id
            .messages(&self.http, request)
            .await
            .map_err(|e| platform_error(e, "Failed to read history"))?;

        debug!(count = messages.len(), "History page fetched");
        Ok(messages.iter().map(history_message).collect())
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    fn platform_name(&self) -> &str {
        "discord"
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn guild_emojis(&self, guild: GuildId) -> PlatformResult<Vec<GuildEmoji>> {
        let guild_id = discord_id::GuildId::new(nonzero(guild.get(), "guild")?.get());
        let emojis = self
            .http
            .get_emojis(guild_id)
            .await
            .map_err(|e| platform_error(e, "Failed to list emojis"))?;

        Ok(emojis
            .into_iter()
            .map(|emoji| GuildEmoji {
                id: EmojiId(emoji.id.get()),
                name: emoji.name,
                animated: emoji.animated,
            })
            .collect())
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn guild_channels(&self, guild: GuildId) -> PlatformResult<Vec<ChannelInfo>> {
        let guild_id = discord_id::GuildId::new(nonzero(guild.get(), "guild")?.get());
        let mut channels = self
            .http
            .get_channels(guild_id)
            .await
            .map_err(|e| platform_error(e, "Failed to list channels"))?;

        channels.sort_by_key(|channel| (channel.position, channel.id));
        Ok(channels.iter().map(channel_info).collect())
    }

    #[instrument(skip(self, content), fields(channel = %channel, length = content.chars().count()))]
    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId> {
        let channel_id = discord_id::ChannelId::new(nonzero(channel.get(), "channel")?.get());
        let message = channel_id
            .send_message(&self.http, CreateMessage::new().content(content))
            .await
            .map_err(|e| match platform_error(e, "Failed to send message") {
                err if err.is_forbidden() => err,
                err => PlatformError::new(PlatformErrorKind::Send(err.kind().to_string())),
            })?;

        Ok(MessageId(message.id.get()))
    }

    #[instrument(skip(self, content), fields(channel = %channel, message = %message))]
    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
    ) -> PlatformResult<()> {
        let channel_id = discord_id::ChannelId::new(nonzero(channel.get(), "channel")?.get());
        let message_id = discord_id::MessageId::new(nonzero(message.get(), "message")?.get());
        channel_id
            .edit_message(&self.http, message_id, EditMessage::new().content(content))
            .await
            .map_err(|e| platform_error(e, "Failed to edit message"))?;

        Ok(())
    }
}
