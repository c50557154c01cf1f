//! Layered loading and write-back of the settings files.

use crate::BotSettings;
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use foodbot_error::{SettingsError, SettingsErrorKind, SettingsResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default shared settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "foodbot.toml";

/// Default per-instance secrets file name.
pub const DEFAULT_SECRETS_FILE: &str = "foodbot.secrets.toml";

/// Prefix for environment overrides (`FOODBOT__GENERAL__CHARACTERS_LIMIT=1500`).
pub const ENV_PREFIX: &str = "FOODBOT";

const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

/// Locations of the two settings files.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SettingsPaths {
    /// Shared settings: prefix, admins, limits, actions.
    settings: PathBuf,
    /// Per-instance secrets: the bot token.
    secrets: PathBuf,
}

impl Default for SettingsPaths {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE, DEFAULT_SECRETS_FILE)
    }
}

impl SettingsPaths {
    /// Use explicit file locations.
    pub fn new(settings: impl Into<PathBuf>, secrets: impl Into<PathBuf>) -> Self {
        Self {
            settings: settings.into(),
            secrets: secrets.into(),
        }
    }

    /// Use the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_SETTINGS_FILE), dir.join(DEFAULT_SECRETS_FILE))
    }

    /// Prefer the current directory, falling back to `~/.config/foodbot/` when
    /// only that location has a settings file.
    pub fn discover() -> Self {
        let local = Self::default();
        if local.settings.exists() {
            return local;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = Self::in_dir(config_dir.join("foodbot"));
            if user.settings.exists() {
                debug!(path = %user.settings.display(), "Using user settings directory");
                return user;
            }
        }

        local
    }

    /// Read every layer and deserialize the result.
    ///
    /// Both files are optional at this stage; a missing file shows up as
    /// missing fields, which the repair pass can fix.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsErrorKind::Missing`] or [`SettingsErrorKind::Parse`]
    /// when a required field is absent or malformed.
    #[instrument(skip(self), fields(settings = %self.settings.display(), secrets = %self.secrets.display()))]
    pub fn load(&self) -> SettingsResult<BotSettings> {
        debug!("Loading settings layers");

        let token = std::env::var(TOKEN_ENV_VAR).ok();

        let settings: BotSettings = Config::builder()
            .add_source(
                File::from(self.settings.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                File::from(self.secrets.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("system.bot_token", token)
            .map_err(classify)?
            .build()
            .map_err(classify)?
            .try_deserialize()
            .map_err(classify)?;

        debug!(actions = settings.actions().len(), "Settings loaded");
        Ok(settings)
    }

    /// Serialize `settings` back to the files.
    ///
    /// The shared file receives everything but the token; the token, when
    /// present, is written to the secrets file only.
    #[instrument(skip(self, settings), fields(settings = %self.settings.display()))]
    pub fn write(&self, settings: &BotSettings) -> SettingsResult<()> {
        let contents = toml::to_string_pretty(settings).map_err(|e| {
            SettingsError::new(SettingsErrorKind::Parse(format!(
                "Failed to serialize settings: {}",
                e
            )))
        })?;
        write_file(&self.settings, &contents)?;

        if let Some(token) = settings.system().bot_token() {
            let mut system = toml::Table::new();
            system.insert("bot_token".into(), toml::Value::String(token.to_string()));
            let mut secrets = toml::Table::new();
            secrets.insert("system".into(), toml::Value::Table(system));
            write_file(&self.secrets, &secrets.to_string())?;
        }

        info!("Settings written");
        Ok(())
    }
}

pub(crate) fn read_file(path: &Path) -> SettingsResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, e)),
    }
}

pub(crate) fn write_file(path: &Path, contents: &str) -> SettingsResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| io_error(path, e))
}

#[track_caller]
fn io_error(path: &Path, err: std::io::Error) -> SettingsError {
    SettingsError::new(SettingsErrorKind::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[track_caller]
fn classify(err: config::ConfigError) -> SettingsError {
    let kind = match &err {
        config::ConfigError::NotFound(key) => SettingsErrorKind::Missing(key.clone()),
        other if other.to_string().contains("missing field") => {
            SettingsErrorKind::Missing(other.to_string())
        }
        other => SettingsErrorKind::Parse(other.to_string()),
    };
    SettingsError::new(kind)
}
