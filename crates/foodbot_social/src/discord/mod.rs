//! Discord integration for FoodBot.
//!
//! - **platform**: [`ChatPlatform`](foodbot_interface::ChatPlatform) over
//!   Discord's REST API
//! - **handler**: Serenity event handler turning messages into dispatches
//! - **client**: Serenity client setup and lifecycle management
//!
//! Available with the `discord` feature.

mod client;
mod handler;
mod platform;

pub use crate::{DiscordError, DiscordErrorKind};
pub use client::{FoodbotBot, ShutdownHandle};
pub use handler::FoodbotHandler;
pub use platform::{DiscordPlatform, HISTORY_PAGE_LIMIT, channel_kind, platform_error};
