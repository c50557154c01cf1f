//! `check` and `repair` command handlers.

use foodbot_actions::{ActionKind, Snapshot, SnapshotStore};
use foodbot_error::FoodbotResult;
use foodbot_settings::{RepairReport, SettingsPaths};
use std::fmt::Write;
use tracing::{info, instrument};

/// Human-readable summary of a loaded snapshot.
pub fn settings_summary(paths: &SettingsPaths, snapshot: &Snapshot) -> String {
    let settings = snapshot.settings();
    let system = settings.system();
    let general = settings.general();

    let mut out = String::new();
    let _ = writeln!(out, "Settings file: {}", paths.settings().display());
    let _ = writeln!(out, "Secrets file: {}", paths.secrets().display());
    let _ = writeln!(out, "Command prefix: {}", system.command_prefix());
    let _ = writeln!(out, "Admins: {}", system.admins().len());
    let _ = writeln!(out, "Characters limit: {}", general.characters_limit());
    let _ = writeln!(
        out,
        "Bot token: {}",
        if system.bot_token().is_some() { "configured" } else { "missing" }
    );
    let _ = writeln!(out, "Actions:");

    for action in snapshot.router().registry().iter() {
        let descriptor = action.descriptor();
        let state = if *descriptor.is_active() { "active" } else { "inactive" };
        let extra = match action.kind() {
            ActionKind::CountEmoji(settings) => format!(", {} days", settings.days_to_count()),
            ActionKind::Help | ActionKind::Reload => String::new(),
        };
        let _ = writeln!(
            out,
            "  {} ({}{}): {}",
            descriptor.id(),
            state,
            extra,
            descriptor.keywords().join(", ")
        );
    }

    out
}

/// Load and validate settings without repairing them, then print a summary.
///
/// # Errors
///
/// Returns the load or validation error.
#[instrument(skip(paths), fields(settings = %paths.settings().display()))]
pub fn check_settings(paths: SettingsPaths) -> FoodbotResult<()> {
    let store = SnapshotStore::load(paths)?;
    let snapshot = store.current();
    info!("Settings are valid");
    print!("{}", settings_summary(store.paths(), &snapshot));
    Ok(())
}

/// Human-readable description of a repair pass.
pub fn repair_summary(report: &RepairReport) -> String {
    if report.is_noop() {
        return "Settings are complete, nothing to repair.\n".to_string();
    }

    let mut out = String::new();
    for backup in report.backups() {
        let _ = writeln!(out, "Unreadable file moved to {}", backup.display());
    }
    for key in report.added() {
        let _ = writeln!(out, "Added {}", key);
    }
    for file in report.written() {
        let _ = writeln!(out, "Wrote {}", file.display());
    }
    out
}

/// Run the repair pass and print what changed.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written.
#[instrument(skip(paths), fields(settings = %paths.settings().display()))]
pub fn repair_settings(paths: SettingsPaths) -> FoodbotResult<()> {
    let report = paths.repair()?;
    info!(added = report.added().len(), written = report.written().len(), "Repair finished");
    print!("{}", repair_summary(&report));
    Ok(())
}
