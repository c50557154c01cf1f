//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the foodbot binary.

mod commands;
mod run;
mod settings;

pub use commands::{Cli, Commands};
pub use run::run_bot;
pub use settings::{check_settings, repair_settings, repair_summary, settings_summary};
