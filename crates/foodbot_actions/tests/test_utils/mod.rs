//! Scripted in-memory chat platform for tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use foodbot_core::{
    ActionDescriptor, Actor, ChannelId, ChannelInfo, ChannelKind, GuildEmoji, GuildId,
    HistoryMessage, HistoryMessageBuilder, InboundMessage, InboundMessageBuilder, MessageId,
    Reaction,
};
use foodbot_error::{PlatformError, PlatformErrorKind, PlatformResult};
use foodbot_interface::{ChatPlatform, HistoryCursor, MessageHistory};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

pub const GUILD: GuildId = GuildId(1);
pub const COMMAND_CHANNEL: ChannelId = ChannelId(100);

/// In-memory platform with configurable paging and failures.
#[derive(Debug)]
pub struct MockPlatform {
    page_size: usize,
    overlap: bool,
    emojis: Vec<GuildEmoji>,
    channels: Vec<ChannelInfo>,
    history: HashMap<ChannelId, Vec<HistoryMessage>>,
    forbidden: HashSet<ChannelId>,
    failing: HashSet<ChannelId>,
    edits_fail: bool,
    pub sent: Mutex<Vec<(ChannelId, String)>>,
    pub edits: Mutex<Vec<(ChannelId, MessageId, String)>>,
    pub requests: Mutex<Vec<(ChannelId, HistoryCursor)>>,
    next_id: AtomicU64,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            page_size: 100,
            overlap: false,
            emojis: Vec::new(),
            channels: Vec::new(),
            history: HashMap::new(),
            forbidden: HashSet::new(),
            failing: HashSet::new(),
            edits_fail: false,
            sent: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1_000_000),
        }
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Pages also include the message the cursor sits on.
    pub fn with_overlapping_pages(mut self) -> Self {
        self.overlap = true;
        self
    }

    pub fn with_emojis(mut self, emojis: Vec<GuildEmoji>) -> Self {
        self.emojis = emojis;
        self
    }

    pub fn with_channel(mut self, channel: ChannelInfo, messages: Vec<HistoryMessage>) -> Self {
        self.history.insert(channel.id, messages);
        self.channels.push(channel);
        self
    }

    pub fn with_forbidden_channel(mut self, channel: ChannelInfo) -> Self {
        self.forbidden.insert(channel.id);
        self.channels.push(channel);
        self
    }

    pub fn with_failing_channel(mut self, channel: ChannelInfo) -> Self {
        self.failing.insert(channel.id);
        self.channels.push(channel);
        self
    }

    /// Every edit fails as if the message had been deleted.
    pub fn with_failing_edits(mut self) -> Self {
        self.edits_fail = true;
        self
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(_, text)| text.clone()).collect()
    }

    pub fn requested_channels(&self) -> Vec<ChannelId> {
        self.requests.lock().iter().map(|(channel, _)| *channel).collect()
    }
}

#[async_trait]
impl MessageHistory for MockPlatform {
    async fn history_page(
        &self,
        channel: ChannelId,
        before: HistoryCursor,
        _after: DateTime<Utc>,
    ) -> PlatformResult<Vec<HistoryMessage>> {
        self.requests.lock().push((channel, before));

        if self.forbidden.contains(&channel) {
            return Err(PlatformError::new(PlatformErrorKind::Forbidden(format!(
                "channel {}",
                channel
            ))));
        }
        if self.failing.contains(&channel) {
            return Err(PlatformError::new(PlatformErrorKind::Api(
                "internal server error".to_string(),
            )));
        }

        let mut page: Vec<HistoryMessage> = self
            .history
            .get(&channel)
            .into_iter()
            .flatten()
            .filter(|message| {
                if self.overlap {
                    let key = (message.timestamp, message.id);
                    match before.message_id() {
                        Some(id) => key <= (*before.timestamp(), *id),
                        None => message.timestamp < *before.timestamp(),
                    }
                } else {
                    before.admits(message)
                }
            })
            .cloned()
            .collect();

        page.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        page.truncate(self.page_size);
        Ok(page)
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    fn platform_name(&self) -> &str {
        "mock"
    }

    async fn guild_emojis(&self, _guild: GuildId) -> PlatformResult<Vec<GuildEmoji>> {
        Ok(self.emojis.clone())
    }

    async fn guild_channels(&self, _guild: GuildId) -> PlatformResult<Vec<ChannelInfo>> {
        Ok(self.channels.clone())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId> {
        self.sent.lock().push((channel, content.to_string()));
        Ok(MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
    ) -> PlatformResult<()> {
        if self.edits_fail {
            return Err(PlatformError::new(PlatformErrorKind::NotFound(format!(
                "message {}",
                message
            ))));
        }
        self.edits.lock().push((channel, message, content.to_string()));
        Ok(())
    }
}

pub fn text_channel(id: u64, name: &str) -> ChannelInfo {
    ChannelInfo::new(ChannelId(id), name, ChannelKind::Text)
}

pub fn message_at(id: u64, timestamp: DateTime<Utc>, content: &str) -> HistoryMessage {
    HistoryMessageBuilder::default()
        .id(MessageId(id))
        .timestamp(timestamp)
        .content(content)
        .build()
        .unwrap()
}

pub fn message_minutes_ago(id: u64, minutes: i64, content: &str) -> HistoryMessage {
    message_at(id, Utc::now() - Duration::minutes(minutes), content)
}

pub fn with_reactions(mut message: HistoryMessage, reactions: Vec<Reaction>) -> HistoryMessage {
    message.reactions = reactions;
    message
}

pub fn from_bot(mut message: HistoryMessage) -> HistoryMessage {
    message.author_is_bot = true;
    message
}

pub fn command(author: Actor, content: &str) -> InboundMessage {
    InboundMessageBuilder::default()
        .author(author)
        .channel_id(COMMAND_CHANNEL)
        .guild_id(Some(GUILD))
        .content(content)
        .build()
        .unwrap()
}

pub fn direct_message(author: Actor, content: &str) -> InboundMessage {
    InboundMessageBuilder::default()
        .author(author)
        .channel_id(COMMAND_CHANNEL)
        .content(content)
        .build()
        .unwrap()
}

pub fn descriptors() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::new("count_emoji", ["countemoji", "emoji"])
            .with_setting("days_to_count", "7"),
        ActionDescriptor::new("help", ["help"]).with_blacklist(["muted"]),
        ActionDescriptor::new("reload", ["reload"]).with_active(false),
    ]
}
