//! Core data types for FoodBot.
//!
//! This crate provides the data model shared by the command router, the
//! history scanner and the platform bindings. Nothing here talks to the
//! network; every type is a plain value.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod actor;
mod emoji;
mod ids;
mod message;
mod window;

pub use action::ActionDescriptor;
pub use actor::{Actor, Identity};
pub use emoji::{EmojiKey, EmojiTally, GuildEmoji};
pub use ids::{ChannelId, EmojiId, GuildId, MessageId, UserId};
pub use message::{
    ChannelInfo, ChannelKind, HistoryMessage, HistoryMessageBuilder, InboundMessage,
    InboundMessageBuilder, Reaction, ReactionEmoji,
};
pub use window::AggregationWindow;
