//! Repair pass: merge built-in defaults into the settings files.
//!
//! Existing values are never overwritten. Tables are merged recursively and
//! the `actions` array is merged per `id`, so a file that lost a key or a
//! whole action gets it back while every customisation survives.

use crate::BotSettings;
use crate::loader::{SettingsPaths, read_file, write_file};
use derive_getters::Getters;
use foodbot_error::{SettingsError, SettingsErrorKind, SettingsResult};
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::{info, instrument, warn};

/// What a repair pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct RepairReport {
    /// Dotted paths of every key that was filled from defaults.
    added: Vec<String>,
    /// Files that were written.
    written: Vec<PathBuf>,
    /// Where an unparsable file was moved before being rebuilt.
    backups: Vec<PathBuf>,
}

impl RepairReport {
    /// Whether the pass changed anything on disk.
    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
    }
}

impl SettingsPaths {
    /// Fill every missing key in both files from the built-in defaults and
    /// write the files back.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, backed up or written.
    #[instrument(skip(self), fields(settings = %self.settings().display()))]
    pub fn repair(&self) -> SettingsResult<RepairReport> {
        let mut report = RepairReport::default();

        let defaults = to_table(&BotSettings::default())?;
        repair_file(self.settings(), &defaults, &mut report)?;

        let mut system = Table::new();
        system.insert("bot_token".into(), Value::String(String::new()));
        let mut secret_defaults = Table::new();
        secret_defaults.insert("system".into(), Value::Table(system));
        repair_file(self.secrets(), &secret_defaults, &mut report)?;

        info!(
            added = report.added.len(),
            written = report.written.len(),
            "Repair pass finished"
        );
        Ok(report)
    }
}

fn repair_file(path: &Path, defaults: &Table, report: &mut RepairReport) -> SettingsResult<()> {
    let existing = read_file(path)?;
    let missing = existing.is_none();
    let mut rebuilt = false;

    let mut table = match existing {
        None => Table::new(),
        Some(contents) => match toml::from_str::<Table>(&contents) {
            Ok(table) => table,
            Err(e) => {
                let backup = backup_path(path);
                warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "Settings file is not valid TOML, rebuilding from defaults"
                );
                std::fs::rename(path, &backup).map_err(|e| {
                    SettingsError::new(SettingsErrorKind::Io {
                        path: backup.clone(),
                        message: e.to_string(),
                    })
                })?;
                report.backups.push(backup);
                rebuilt = true;
                Table::new()
            }
        },
    };

    let before = report.added.len();
    merge_missing(&mut table, defaults, "", &mut report.added);

    if missing || rebuilt || report.added.len() > before {
        let contents = toml::to_string_pretty(&table).map_err(|e| {
            SettingsError::new(SettingsErrorKind::Parse(format!(
                "Failed to serialize repaired settings: {}",
                e
            )))
        })?;
        write_file(path, &contents)?;
        report.written.push(path.to_path_buf());
    }

    Ok(())
}

fn merge_missing(target: &mut Table, defaults: &Table, prefix: &str, added: &mut Vec<String>) {
    for (key, default) in defaults {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        let Some(existing) = target.get_mut(key) else {
            target.insert(key.clone(), default.clone());
            added.push(path);
            continue;
        };

        match (existing, default) {
            (Value::Table(existing), Value::Table(default)) => {
                merge_missing(existing, default, &path, added);
            }
            (Value::Array(existing), Value::Array(default)) if path == "actions" => {
                merge_actions(existing, default, added);
            }
            _ => {}
        }
    }
}

fn merge_actions(existing: &mut Vec<Value>, defaults: &[Value], added: &mut Vec<String>) {
    for default in defaults {
        let Value::Table(default) = default else {
            continue;
        };
        let Some(id) = default.get("id").and_then(Value::as_str) else {
            continue;
        };
        let path = format!("actions[{}]", id);

        let entry = existing.iter_mut().find_map(|value| match value {
            Value::Table(table) if table.get("id").and_then(Value::as_str) == Some(id) => {
                Some(table)
            }
            _ => None,
        });

        match entry {
            Some(entry) => merge_missing(entry, default, &path, added),
            None => {
                existing.push(Value::Table(default.clone()));
                added.push(path);
            }
        }
    }
}

fn to_table(settings: &BotSettings) -> SettingsResult<Table> {
    match Value::try_from(settings) {
        Ok(Value::Table(table)) => Ok(table),
        Ok(_) => Err(SettingsError::new(SettingsErrorKind::Parse(
            "Default settings did not serialize to a table".to_string(),
        ))),
        Err(e) => Err(SettingsError::new(SettingsErrorKind::Parse(format!(
            "Failed to serialize default settings: {}",
            e
        )))),
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}
