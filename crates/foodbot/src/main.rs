//! FoodBot CLI binary.
//!
//! - `run`: serve the Discord bot
//! - `check`: validate the settings files
//! - `repair`: fill missing settings from defaults

use clap::Parser;
use foodbot::{
    Cli, Commands, ObservabilityConfig, check_settings, init_observability_with_config,
    repair_settings, run_bot,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_observability_with_config(ObservabilityConfig::from_flags(cli.verbose, cli.json_logs))?;

    let paths = cli.settings_paths();

    match cli.command {
        Commands::Run => run_bot(paths).await?,
        Commands::Check => check_settings(paths)?,
        Commands::Repair => repair_settings(paths)?,
    }

    Ok(())
}
