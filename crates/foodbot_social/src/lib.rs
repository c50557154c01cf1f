//! Chat platform bindings for FoodBot.
//!
//! The command layer only knows the traits in `foodbot_interface`; this
//! crate implements them for real platforms. Discord support is behind the
//! `discord` feature. The snowflake and status helpers are always available.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use foodbot_social::{snowflake_before, timestamp_of};
//!
//! let cutoff = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! assert_eq!(timestamp_of(snowflake_before(cutoff)), cutoff);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod conversions;
mod error;

#[cfg(feature = "discord")]
pub mod discord;

pub use conversions::{
    DISCORD_EPOCH_MS, RATE_LIMIT_FALLBACK_SECS, classify_status, snowflake_before, timestamp_of,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};

#[cfg(feature = "discord")]
pub use discord::{DiscordPlatform, FoodbotBot, FoodbotHandler, ShutdownHandle};
