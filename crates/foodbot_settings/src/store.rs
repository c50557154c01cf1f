//! Current settings snapshot with atomic reload.

use crate::{BotSettings, RepairReport, SettingsPaths};
use foodbot_error::SettingsResult;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Something that can be compiled from freshly loaded settings.
///
/// Implementations run their own validation; an error keeps the previous
/// snapshot in place on reload.
pub trait FromSettings: Sized + Send + Sync {
    /// Build the snapshot from loaded settings.
    fn from_settings(settings: BotSettings) -> SettingsResult<Self>;
}

impl FromSettings for BotSettings {
    fn from_settings(settings: BotSettings) -> SettingsResult<Self> {
        settings.validate()?;
        Ok(settings)
    }
}

/// Holds the current immutable snapshot.
///
/// Readers clone the `Arc` and keep a consistent view for as long as they
/// hold it; [`reload`](Self::reload) replaces the whole snapshot at once.
#[derive(Debug)]
pub struct SettingsStore<T> {
    paths: SettingsPaths,
    current: RwLock<Arc<T>>,
}

impl<T: FromSettings> SettingsStore<T> {
    /// Wrap an already built snapshot.
    pub fn new(paths: SettingsPaths, snapshot: T) -> Self {
        Self {
            paths,
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Load and compile settings without repairing.
    pub fn load(paths: SettingsPaths) -> SettingsResult<Self> {
        let snapshot = compile(&paths)?;
        Ok(Self::new(paths, snapshot))
    }

    /// Load settings; if a required field is missing or malformed, run the
    /// repair pass and load once more.
    ///
    /// # Errors
    ///
    /// Returns the second failure if loading still fails after repair, or
    /// the first failure if it is not something repair can fix.
    #[instrument(skip(paths), fields(settings = %paths.settings().display()))]
    pub fn load_or_repair(paths: SettingsPaths) -> SettingsResult<Self> {
        match compile(&paths) {
            Ok(snapshot) => Ok(Self::new(paths, snapshot)),
            Err(e) if e.is_repairable() => {
                warn!(error = %e, "Settings incomplete, running repair pass");
                let report = paths.repair()?;
                info!(added = ?report.added(), "Filled missing settings from defaults");

                let snapshot = compile(&paths).inspect_err(|e| {
                    error!(error = %e, "Settings still invalid after repair");
                })?;
                Ok(Self::new(paths, snapshot))
            }
            Err(e) => Err(e),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<T> {
        Arc::clone(&self.current.read())
    }

    /// Where the settings live.
    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    /// Re-read every layer and swap the snapshot in.
    ///
    /// A failed reload leaves the previous snapshot untouched.
    #[instrument(skip(self), fields(settings = %self.paths.settings().display()))]
    pub fn reload(&self) -> SettingsResult<Arc<T>> {
        let snapshot = Arc::new(compile(&self.paths).inspect_err(|e| {
            warn!(error = %e, "Settings reload failed, keeping previous snapshot");
        })?);

        *self.current.write() = Arc::clone(&snapshot);
        info!("Settings reloaded");
        Ok(snapshot)
    }

    /// Run the repair pass against this store's files.
    pub fn repair(&self) -> SettingsResult<RepairReport> {
        self.paths.repair()
    }

    /// Write `settings` to this store's files.
    pub fn write(&self, settings: &BotSettings) -> SettingsResult<()> {
        self.paths.write(settings)
    }
}

fn compile<T: FromSettings>(paths: &SettingsPaths) -> SettingsResult<T> {
    T::from_settings(paths.load()?)
}
