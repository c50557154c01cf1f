//! Action registry configuration errors.

/// Why a set of action descriptors could not be turned into a registry.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The descriptor names an action kind this build does not know.
    #[display("Unknown action id '{}'", _0)]
    UnknownAction(String),

    /// Two descriptors share an id.
    #[display("Action '{}' is registered twice", _0)]
    DuplicateAction(String),

    /// A keyword is already owned by another action.
    #[display("Keyword '{}' of action '{}' is already registered", keyword, action)]
    DuplicateKeyword {
        /// The contested keyword
        keyword: String,
        /// The action that tried to claim it
        action: String,
    },

    /// A per-action setting has a value the action cannot use.
    #[display("Action '{}': {} must be {}, got '{}'", action, key, expected, value)]
    InvalidSetting {
        /// Action owning the setting
        action: String,
        /// Setting name
        key: String,
        /// What a valid value looks like
        expected: String,
        /// The rejected raw value
        value: String,
    },
}

/// Registry configuration error with source location.
///
/// Raised for settings that parse cleanly but describe an action set that
/// cannot be built.
///
/// # Examples
///
/// ```
/// use foodbot_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::DuplicateKeyword {
///     keyword: "help".to_string(),
///     action: "reload".to_string(),
/// });
/// assert!(matches!(err.kind(), ConfigErrorKind::DuplicateKeyword { .. }));
/// assert!(err.to_string().contains("Keyword 'help' of action 'reload'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
