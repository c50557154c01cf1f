//! Command layer for FoodBot.
//!
//! Two pieces live here:
//!
//! - **Action resolution**: [`CommandRouter`] turns a prefixed message into an
//!   action from the [`ActionRegistry`], under the
//!   [`PermissionResolver`](foodbot_security::PermissionResolver) policy.
//! - **Emoji reports**: [`HistoryScanner`] pages backward through a channel,
//!   [`EmojiAggregator`] tallies static custom emoji across a guild's text
//!   channels, and [`ReportChunker`] splits the result under the characters
//!   limit.
//!
//! [`Dispatcher`] ties them together for one inbound message at a time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actions;
mod aggregator;
mod context;
mod dispatch;
mod history;
mod kind;
mod registry;
mod report;
mod router;
mod snapshot;

pub use actions::{
    Action, COUNTING_MESSAGE, CountEmoji, FOUND_MESSAGE, Help, RELOAD_FAILED_MESSAGE,
    RELOADED_MESSAGE, Reload,
};
pub use aggregator::{EmojiAggregator, GuildReport};
pub use context::ActionContext;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use history::{HistoryScanner, ScanExit, ScanOutcome};
pub use kind::{ActionId, ActionKind, CountEmojiSettings, MAX_DAYS_TO_COUNT, parse_days};
pub use registry::{ActionRegistry, Lookup, RegisteredAction};
pub use report::{ChannelSink, ReportChunker, ReportSink};
pub use router::{CommandRouter, DIRECT_MESSAGE_APOLOGY, IgnoreReason, ResolvedCommand, RouteOutcome};
pub use snapshot::{Snapshot, SnapshotStore};
