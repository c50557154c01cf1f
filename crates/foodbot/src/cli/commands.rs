//! CLI command definitions.

use clap::{Parser, Subcommand};
use foodbot_settings::{DEFAULT_SECRETS_FILE, SettingsPaths};
use std::path::PathBuf;

/// FoodBot - counts how often a Discord server's custom emoji are used
#[derive(Parser, Debug)]
#[command(name = "foodbot")]
#[command(about = "Counts how often a Discord server's custom emoji are used", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Shared settings file [default: ./foodbot.toml, else ~/.config/foodbot/foodbot.toml]
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Per-instance secrets file [default: foodbot.secrets.toml next to the settings file]
    #[arg(long, global = true)]
    pub secrets: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Load settings (repairing them if needed), connect and serve
    Run,

    /// Load and validate settings, print a summary and exit
    Check,

    /// Fill missing settings from defaults and write the files
    Repair,
}

impl Cli {
    /// Settings file locations from the flags.
    ///
    /// Without `--settings` the usual locations are searched. Without
    /// `--secrets` the secrets file sits next to the settings file.
    pub fn settings_paths(&self) -> SettingsPaths {
        let base = match &self.settings {
            Some(settings) => {
                let dir = settings.parent().map(PathBuf::from).unwrap_or_default();
                SettingsPaths::new(settings.clone(), dir.join(DEFAULT_SECRETS_FILE))
            }
            None => SettingsPaths::discover(),
        };

        match &self.secrets {
            Some(secrets) => SettingsPaths::new(base.settings().clone(), secrets.clone()),
            None => base,
        }
    }
}
