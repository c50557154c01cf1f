//! The closed set of action kinds and their settings payloads.

use crate::actions::{Action, CountEmoji, Help, Reload};
use derive_getters::Getters;
use foodbot_core::ActionDescriptor;
use foodbot_error::{ActionError, ActionResult, ConfigError, ConfigErrorKind};
use foodbot_settings::DEFAULT_DAYS_TO_COUNT;
use std::str::FromStr;

/// Largest accepted counting horizon, in days.
pub const MAX_DAYS_TO_COUNT: u32 = 365;

/// Identifiers of every action kind, as written in the settings file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ActionId {
    /// Count custom emoji usage across the guild
    CountEmoji,
    /// List available commands
    Help,
    /// Re-read the settings files
    Reload,
}

/// Settings of the emoji counting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct CountEmojiSettings {
    /// Default horizon when no argument is given.
    days_to_count: u32,
}

impl Default for CountEmojiSettings {
    fn default() -> Self {
        Self {
            days_to_count: DEFAULT_DAYS_TO_COUNT,
        }
    }
}

/// An action kind together with its parsed settings.
///
/// # Examples
///
/// ```
/// use foodbot_actions::{ActionKind, ActionId};
/// use foodbot_core::ActionDescriptor;
///
/// let descriptor = ActionDescriptor::new("count_emoji", ["countemoji"])
///     .with_setting("days_to_count", "30");
/// let kind = ActionKind::from_descriptor(&descriptor).unwrap();
///
/// assert_eq!(kind.id(), ActionId::CountEmoji);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Emoji usage report
    CountEmoji(CountEmojiSettings),
    /// Command listing
    Help,
    /// Settings reload
    Reload,
}

impl ActionKind {
    /// Select and configure the kind named by the descriptor id.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id or a malformed per-kind setting.
    pub fn from_descriptor(descriptor: &ActionDescriptor) -> Result<Self, ConfigError> {
        let id = ActionId::from_str(descriptor.id()).map_err(|_| {
            ConfigError::new(ConfigErrorKind::UnknownAction(descriptor.id().clone()))
        })?;

        match id {
            ActionId::CountEmoji => {
                let days_to_count = match descriptor.setting("days_to_count") {
                    None => DEFAULT_DAYS_TO_COUNT,
                    Some(raw) => parse_days(raw).ok_or_else(|| {
                        ConfigError::new(ConfigErrorKind::InvalidSetting {
                            action: descriptor.id().clone(),
                            key: "days_to_count".to_string(),
                            expected: format!("between 1 and {}", MAX_DAYS_TO_COUNT),
                            value: raw.to_string(),
                        })
                    })?,
                };
                Ok(Self::CountEmoji(CountEmojiSettings { days_to_count }))
            }
            ActionId::Help => Ok(Self::Help),
            ActionId::Reload => Ok(Self::Reload),
        }
    }

    /// The kind's identifier.
    pub fn id(&self) -> ActionId {
        match self {
            Self::CountEmoji(_) => ActionId::CountEmoji,
            Self::Help => ActionId::Help,
            Self::Reload => ActionId::Reload,
        }
    }

    /// Build a runnable action from the command arguments.
    ///
    /// # Errors
    ///
    /// Returns a usage error when an argument cannot be parsed.
    pub fn instantiate(&self, arguments: &[String]) -> ActionResult<Action> {
        match self {
            Self::CountEmoji(settings) => {
                let days = match arguments.first() {
                    None => settings.days_to_count,
                    Some(raw) => parse_days(raw).ok_or_else(|| {
                        ActionError::usage(format!("Can't parse `{}` as a number of days.", raw))
                    })?,
                };
                Ok(Action::CountEmoji(CountEmoji::new(days)))
            }
            Self::Help => Ok(Action::Help(Help)),
            Self::Reload => Ok(Action::Reload(Reload)),
        }
    }
}

/// Parse a positive day count no larger than [`MAX_DAYS_TO_COUNT`].
pub fn parse_days(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|days| (1..=MAX_DAYS_TO_COUNT).contains(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days_bounds() {
        assert_eq!(parse_days("7"), Some(7));
        assert_eq!(parse_days(" 365 "), Some(365));
        assert_eq!(parse_days("0"), None);
        assert_eq!(parse_days("366"), None);
        assert_eq!(parse_days("-3"), None);
        assert_eq!(parse_days("week"), None);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let descriptor = ActionDescriptor::new("time_zone", ["tz"]);
        let err = ActionKind::from_descriptor(&descriptor).unwrap_err();
        assert_eq!(err.kind(), &ConfigErrorKind::UnknownAction("time_zone".to_string()));
    }

    #[test]
    fn test_malformed_days_setting_is_rejected() {
        let descriptor =
            ActionDescriptor::new("count_emoji", ["countemoji"]).with_setting("days_to_count", "x");
        let err = ActionKind::from_descriptor(&descriptor).unwrap_err();
        assert_eq!(
            err.kind(),
            &ConfigErrorKind::InvalidSetting {
                action: "count_emoji".to_string(),
                key: "days_to_count".to_string(),
                expected: "between 1 and 365".to_string(),
                value: "x".to_string(),
            }
        );
        assert_eq!(
            err.kind().to_string(),
            "Action 'count_emoji': days_to_count must be between 1 and 365, got 'x'"
        );
    }

    #[test]
    fn test_missing_days_setting_uses_default() {
        let descriptor = ActionDescriptor::new("count_emoji", ["countemoji"]);
        assert_eq!(
            ActionKind::from_descriptor(&descriptor).unwrap(),
            ActionKind::CountEmoji(CountEmojiSettings::default())
        );
    }

    #[test]
    fn test_instantiate_rejects_bad_argument_with_user_message() {
        let kind = ActionKind::CountEmoji(CountEmojiSettings::default());
        let err = kind.instantiate(&["soon".to_string()]).unwrap_err();
        assert_eq!(
            err.user_message(),
            Some("Can't parse `soon` as a number of days.")
        );
    }

    #[test]
    fn test_instantiate_argument_overrides_default() {
        let kind = ActionKind::CountEmoji(CountEmojiSettings::default());
        match kind.instantiate(&["30".to_string()]).unwrap() {
            Action::CountEmoji(action) => assert_eq!(*action.days(), 30),
            other => panic!("Unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_ids_round_trip_through_strings() {
        assert_eq!(ActionId::CountEmoji.as_ref(), "count_emoji");
        assert_eq!(ActionId::from_str("reload").unwrap(), ActionId::Reload);
    }
}
