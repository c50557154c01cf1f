//! FoodBot - custom emoji usage reports for Discord servers.
//!
//! FoodBot listens for prefixed commands in guild channels. Its main
//! command scans the recent history of every text channel and reports how
//! often each of the server's static custom emoji was used, inline and as
//! reactions, least used first.
//!
//! This crate re-exports the workspace crates and hosts the `foodbot`
//! binary's CLI and logging setup.
//!
//! # Quick Start
//!
//! ```no_run
//! use foodbot::{SettingsPaths, SnapshotStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SnapshotStore::load_or_repair(SettingsPaths::discover())?;
//! println!("Prefix: {}", store.current().settings().system().command_prefix());
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` - Discord bot client (required by `foodbot run`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod observability;

pub use cli::{
    Cli, Commands, check_settings, repair_settings, repair_summary, run_bot, settings_summary,
};
pub use observability::{ObservabilityConfig, init_observability_with_config};

// Re-export foundation crates
pub use foodbot_core::*;
pub use foodbot_error::*;
pub use foodbot_interface::*;

// Re-export policy, settings and command layer
pub use foodbot_actions::*;
pub use foodbot_security::*;
pub use foodbot_settings::*;

// Re-export platform bindings
pub use foodbot_social::*;
