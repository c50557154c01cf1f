//! Discord binding errors.
//!
//! Failures of individual API calls surface as
//! [`PlatformError`](foodbot_error::PlatformError) through the platform
//! traits. This type covers the bot lifecycle: building the client and
//! keeping the gateway connection.

use derive_getters::Getters;
use foodbot_error::{
    FoodbotErrorKind, PlatformError, PlatformErrorKind, SettingsError, SettingsErrorKind,
};

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity reported an error.
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// No bot token was configured.
    #[display("No bot token configured")]
    MissingToken,
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use foodbot_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::MissingToken);
    /// assert_eq!(err.kind(), &DiscordErrorKind::MissingToken);
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<DiscordError> for FoodbotErrorKind {
    #[track_caller]
    fn from(err: DiscordError) -> Self {
        match err.kind() {
            DiscordErrorKind::MissingToken => {
                SettingsError::new(SettingsErrorKind::Missing("system.bot_token".to_string())).into()
            }
            DiscordErrorKind::SerenityError(detail) => {
                PlatformError::new(PlatformErrorKind::Connection(detail.clone())).into()
            }
        }
    }
}

#[cfg(feature = "discord")]
impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}
