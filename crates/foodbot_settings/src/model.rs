//! Typed settings and their built-in defaults.

use derive_getters::Getters;
use foodbot_core::{ActionDescriptor, Identity};
use foodbot_error::{SettingsError, SettingsErrorKind, SettingsResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument, warn};

/// Default command prefix character.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Default output budget per message, in characters.
pub const DEFAULT_CHARACTERS_LIMIT: usize = 2000;

/// Default marker sent after the last report chunk.
pub const DEFAULT_TERMINAL_MARKER: &str = "The end!";

/// Default emoji counting horizon, in days.
pub const DEFAULT_DAYS_TO_COUNT: u32 = 7;

fn default_terminal_marker() -> String {
    DEFAULT_TERMINAL_MARKER.to_string()
}

fn default_active() -> bool {
    true
}

/// The `[system]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SystemSettings {
    /// Prefix every command must start with.
    command_prefix: String,
    /// Identities allowed to invoke every action.
    admins: Vec<Identity>,
    /// Extra author ids treated as bots and ignored by the router.
    #[serde(default)]
    bot_identities: Vec<Identity>,
    /// Platform token. Lives in the secrets file and is never written to the
    /// shared settings file.
    #[serde(default, skip_serializing)]
    #[getter(skip)]
    bot_token: Option<String>,
}

impl SystemSettings {
    /// Create system settings without a token.
    pub fn new<I, T>(command_prefix: impl Into<String>, admins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        Self {
            command_prefix: command_prefix.into(),
            admins: admins.into_iter().map(Into::into).collect(),
            bot_identities: Vec::new(),
            bot_token: None,
        }
    }

    /// The bot token, if one was configured and is non-empty.
    pub fn bot_token(&self) -> Option<&str> {
        self.bot_token.as_deref().filter(|token| !token.trim().is_empty())
    }

    /// Replace the token.
    pub fn with_bot_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_PREFIX, Vec::<Identity>::new())
    }
}

/// The `[general]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeneralSettings {
    /// Maximum characters per outbound message.
    characters_limit: usize,
    /// Sent after the last report chunk.
    #[serde(default = "default_terminal_marker")]
    terminal_marker: String,
    /// Appended to mid-report chunks when it still fits. Empty disables it.
    #[serde(default)]
    #[getter(skip)]
    continuation_marker: String,
}

impl GeneralSettings {
    /// Create general settings with the default markers.
    pub fn new(characters_limit: usize) -> Self {
        Self {
            characters_limit,
            terminal_marker: default_terminal_marker(),
            continuation_marker: String::new(),
        }
    }

    /// Replace the continuation marker.
    pub fn with_continuation_marker(mut self, marker: impl Into<String>) -> Self {
        self.continuation_marker = marker.into();
        self
    }

    /// The continuation marker, if enabled.
    pub fn continuation_marker(&self) -> Option<&str> {
        Some(self.continuation_marker.as_str()).filter(|marker| !marker.is_empty())
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTERS_LIMIT)
    }
}

/// One `[[actions]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ActionSettings {
    /// Action identifier, selects the action kind.
    id: String,
    /// Trigger keywords, matched case-insensitively.
    keywords: Vec<String>,
    /// Inactive actions are never resolved.
    #[serde(default = "default_active")]
    active: bool,
    /// If non-empty, only these identities may invoke the action.
    #[serde(default)]
    whitelist: Vec<Identity>,
    /// These identities may never invoke the action.
    #[serde(default)]
    blacklist: Vec<Identity>,
    /// Per-kind settings.
    #[serde(default)]
    settings: BTreeMap<String, String>,
}

impl ActionSettings {
    /// Create an active entry with empty access lists.
    pub fn new<I, K>(id: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            id: id.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            active: true,
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            settings: BTreeMap::new(),
        }
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Replace the whitelist.
    pub fn with_whitelist<I, T>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        self.whitelist = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the blacklist.
    pub fn with_blacklist<I, T>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        self.blacklist = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Add a per-kind setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Build the descriptor the registry works with.
    pub fn to_descriptor(&self) -> ActionDescriptor {
        ActionDescriptor::new(self.id.clone(), &self.keywords)
            .with_active(self.active)
            .with_whitelist(self.whitelist.iter().cloned())
            .with_blacklist(self.blacklist.iter().cloned())
            .with_settings(self.settings.clone())
    }
}

/// The complete settings document.
///
/// # Examples
///
/// ```
/// use foodbot_settings::BotSettings;
///
/// let settings = BotSettings::default();
/// assert_eq!(settings.system().command_prefix(), "!");
/// assert_eq!(*settings.general().characters_limit(), 2000);
/// assert!(settings.action("count_emoji").is_some());
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BotSettings {
    /// Prefix, admins and token.
    system: SystemSettings,
    /// Output limits and markers.
    general: GeneralSettings,
    /// Actions in registry order.
    actions: Vec<ActionSettings>,
}

impl BotSettings {
    /// Assemble settings from their parts.
    pub fn new(
        system: SystemSettings,
        general: GeneralSettings,
        actions: Vec<ActionSettings>,
    ) -> Self {
        Self {
            system,
            general,
            actions,
        }
    }

    /// Find an action entry by id.
    pub fn action(&self, id: &str) -> Option<&ActionSettings> {
        self.actions.iter().find(|action| action.id == id)
    }

    /// Descriptors for every action, in declaration order.
    pub fn descriptors(&self) -> Vec<ActionDescriptor> {
        self.actions.iter().map(ActionSettings::to_descriptor).collect()
    }

    /// Check the invariants that do not depend on action kinds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsErrorKind::Invalid`] for an empty prefix, a zero
    /// characters limit, an action without keywords, a duplicate action id or
    /// a keyword registered by more than one action.
    #[instrument(skip(self), fields(actions = self.actions.len()))]
    pub fn validate(&self) -> SettingsResult<()> {
        if self.system.command_prefix.is_empty() {
            return Err(invalid("system.command_prefix must not be empty"));
        }

        if self.general.characters_limit == 0 {
            return Err(invalid("general.characters_limit must be greater than zero"));
        }

        if self.system.admins.is_empty() {
            warn!("No global admins configured");
        }

        let mut ids = HashSet::new();
        let mut keywords = HashSet::new();
        for action in &self.actions {
            if !ids.insert(action.id.as_str()) {
                return Err(invalid(format!("Duplicate action id '{}'", action.id)));
            }

            let descriptor = action.to_descriptor();
            if descriptor.keywords().is_empty() {
                return Err(invalid(format!("Action '{}' has no keywords", action.id)));
            }

            for keyword in descriptor.keywords() {
                if !keywords.insert(keyword.clone()) {
                    return Err(invalid(format!(
                        "Keyword '{}' of action '{}' is already registered",
                        keyword, action.id
                    )));
                }
            }
        }

        let limit = self.general.characters_limit;
        if self.general.terminal_marker.chars().count() > limit {
            warn!(limit, "Terminal marker is longer than the characters limit");
        }

        debug!("Settings validated");
        Ok(())
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self::new(
            SystemSettings::default(),
            GeneralSettings::default(),
            vec![
                ActionSettings::new("count_emoji", ["countemoji"])
                    .with_setting("days_to_count", DEFAULT_DAYS_TO_COUNT.to_string()),
                ActionSettings::new("help", ["help"]),
                ActionSettings::new("reload", ["reload"]).with_active(false),
            ],
        )
    }
}

#[track_caller]
fn invalid(message: impl Into<String>) -> SettingsError {
    SettingsError::new(SettingsErrorKind::Invalid(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        BotSettings::default().validate().unwrap();
    }

    #[test]
    fn test_reload_ships_inactive() {
        let settings = BotSettings::default();
        assert!(!*settings.action("reload").unwrap().active());
        assert!(*settings.action("help").unwrap().active());
    }

    #[test]
    fn test_duplicate_keyword_across_actions_is_rejected() {
        let settings = BotSettings::new(
            SystemSettings::default(),
            GeneralSettings::default(),
            vec![
                ActionSettings::new("count_emoji", ["emoji"]),
                ActionSettings::new("help", ["EMOJI"]),
            ],
        );

        let err = settings.validate().unwrap_err();
        assert!(matches!(err.kind(), SettingsErrorKind::Invalid(_)));
    }

    #[test]
    fn test_duplicate_action_id_is_rejected() {
        let settings = BotSettings::new(
            SystemSettings::default(),
            GeneralSettings::default(),
            vec![
                ActionSettings::new("help", ["help"]),
                ActionSettings::new("help", ["commands"]),
            ],
        );
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_prefix_and_zero_limit_are_rejected() {
        let no_prefix = BotSettings::new(
            SystemSettings::new("", Vec::<Identity>::new()),
            GeneralSettings::default(),
            Vec::new(),
        );
        assert!(no_prefix.validate().is_err());

        let no_budget = BotSettings::new(
            SystemSettings::default(),
            GeneralSettings::new(0),
            Vec::new(),
        );
        assert!(no_budget.validate().is_err());
    }

    #[test]
    fn test_blank_keywords_do_not_count() {
        let settings = BotSettings::new(
            SystemSettings::default(),
            GeneralSettings::default(),
            vec![ActionSettings::new("help", ["  ", ""])],
        );
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_token_is_none() {
        let system = SystemSettings::default().with_bot_token("  ");
        assert_eq!(system.bot_token(), None);

        let system = SystemSettings::default().with_bot_token("abc");
        assert_eq!(system.bot_token(), Some("abc"));
    }

    #[test]
    fn test_continuation_marker_disabled_when_empty() {
        assert_eq!(GeneralSettings::default().continuation_marker(), None);
        assert_eq!(
            GeneralSettings::default()
                .with_continuation_marker("Whew...")
                .continuation_marker(),
            Some("Whew...")
        );
    }
}
