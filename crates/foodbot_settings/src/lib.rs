//! Settings provider for FoodBot.
//!
//! Settings are TOML files layered through the `config` crate:
//!
//! 1. the shared settings file (`foodbot.toml`)
//! 2. an optional per-instance secrets file (`foodbot.secrets.toml`) holding the bot token
//! 3. environment overrides (`FOODBOT__SECTION__KEY`, plus `DISCORD_TOKEN`)
//!
//! A missing or unparsable required field can be fixed by the repair pass,
//! which merges built-in defaults into the files without overwriting existing
//! values. [`SettingsStore`] holds the current immutable snapshot and swaps it
//! atomically on reload.
//!
//! # Example
//!
//! ```no_run
//! use foodbot_settings::{BotSettings, SettingsPaths, SettingsStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store: SettingsStore<BotSettings> = SettingsStore::load_or_repair(SettingsPaths::discover())?;
//! println!("Prefix: {}", store.current().system().command_prefix());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod loader;
mod model;
mod repair;
mod store;

pub use loader::{DEFAULT_SECRETS_FILE, DEFAULT_SETTINGS_FILE, ENV_PREFIX, SettingsPaths};
pub use model::{
    ActionSettings, BotSettings, DEFAULT_CHARACTERS_LIMIT, DEFAULT_COMMAND_PREFIX,
    DEFAULT_DAYS_TO_COUNT, DEFAULT_TERMINAL_MARKER, GeneralSettings, SystemSettings,
};
pub use repair::RepairReport;
pub use store::{FromSettings, SettingsStore};
