//! Message, channel and reaction snapshots handed over by the platform.

use crate::{Actor, ChannelId, EmojiId, GuildId, MessageId, UserId};
use chrono::{DateTime, Utc};
use derive_builder::Builder;

/// The emoji attached to a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReactionEmoji {
    /// A guild custom emoji.
    Custom {
        /// Platform id
        id: EmojiId,
        /// Display name, when the platform still knows it
        name: Option<String>,
        /// Animated custom emoji
        animated: bool,
    },
    /// A standard unicode emoji.
    Unicode(String),
}

impl ReactionEmoji {
    /// The custom emoji id, if this is a custom emoji.
    pub fn custom_id(&self) -> Option<EmojiId> {
        match self {
            Self::Custom { id, .. } => Some(*id),
            Self::Unicode(_) => None,
        }
    }
}

/// A reaction with its aggregate count of distinct reacting users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    /// Which emoji
    pub emoji: ReactionEmoji,
    /// How many users reacted with it
    pub count: u64,
}

impl Reaction {
    /// Reaction with a custom emoji.
    pub fn custom(id: impl Into<EmojiId>, count: u64) -> Self {
        Self {
            emoji: ReactionEmoji::Custom {
                id: id.into(),
                name: None,
                animated: false,
            },
            count,
        }
    }

    /// Reaction with a unicode emoji.
    pub fn unicode(emoji: impl Into<String>, count: u64) -> Self {
        Self {
            emoji: ReactionEmoji::Unicode(emoji.into()),
            count,
        }
    }
}

/// One message read from channel history.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use foodbot_core::{HistoryMessageBuilder, MessageId};
///
/// let message = HistoryMessageBuilder::default()
///     .id(MessageId(7))
///     .timestamp(Utc::now())
///     .content("hello <:pog:1>")
///     .build()
///     .unwrap();
///
/// assert!(!message.author_is_bot);
/// assert!(message.reactions.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct HistoryMessage {
    /// Platform id, unique within the channel
    pub id: MessageId,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Author id
    #[builder(default)]
    pub author: UserId,
    /// Whether the author is a bot account
    #[builder(default)]
    pub author_is_bot: bool,
    /// Raw text
    #[builder(default)]
    pub content: String,
    /// Reactions with aggregate counts
    #[builder(default)]
    pub reactions: Vec<Reaction>,
}

/// Kind of a guild channel; only text channels carry scannable history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChannelKind {
    /// Regular text channel
    Text,
    /// Voice channel
    Voice,
    /// Category grouping other channels
    Category,
    /// Anything else (forums, stages, threads...)
    Other,
}

/// A guild channel as enumerated by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Platform id
    pub id: ChannelId,
    /// Channel name
    pub name: String,
    /// Channel kind
    pub kind: ChannelKind,
}

impl ChannelInfo {
    /// Create a channel snapshot.
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Whether the channel has a text history to scan.
    pub fn is_text(&self) -> bool {
        self.kind == ChannelKind::Text
    }
}

/// An inbound message event, reduced to what the router needs.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct InboundMessage {
    /// Who sent it
    pub author: Actor,
    /// Whether the author is a bot account
    #[builder(default)]
    pub author_is_bot: bool,
    /// Channel the message arrived in; replies go here
    pub channel_id: ChannelId,
    /// Enclosing guild, `None` for direct messages
    #[builder(default)]
    pub guild_id: Option<GuildId>,
    /// Raw text
    #[builder(default)]
    pub content: String,
}
