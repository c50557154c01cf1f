//! Action execution errors.

use crate::{PlatformError, SettingsError};

/// Specific action error conditions.
#[derive(Debug, Clone, derive_more::Display)]
pub enum ActionErrorKind {
    /// The invoking user supplied an argument the action cannot use.
    ///
    /// The message is shown to the user verbatim.
    #[display("{}", _0)]
    Usage(String),

    /// The action needs guild context that the message does not have.
    #[display("Action '{}' requires a guild channel", _0)]
    MissingGuild(String),

    /// A platform call failed in a way the action cannot recover from.
    #[display("{}", _0)]
    Platform(PlatformError),

    /// Settings could not be reloaded.
    #[display("{}", _0)]
    Settings(SettingsError),

    /// Work handed to a background task never finished.
    #[display("Background task interrupted: {}", _0)]
    Interrupted(String),
}

/// Action error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Action Error: {} at line {} in {}", kind, line, file)]
pub struct ActionError {
    kind: ActionErrorKind,
    line: u32,
    file: &'static str,
}

impl ActionError {
    /// Create a new action error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ActionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a user-facing usage error.
    #[track_caller]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Usage(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ActionErrorKind {
        &self.kind
    }

    /// The text to show the invoking user, if this error is user-facing.
    pub fn user_message(&self) -> Option<&str> {
        match &self.kind {
            ActionErrorKind::Usage(message) => Some(message),
            _ => None,
        }
    }
}

impl From<PlatformError> for ActionError {
    #[track_caller]
    fn from(err: PlatformError) -> Self {
        Self::new(ActionErrorKind::Platform(err))
    }
}

impl From<SettingsError> for ActionError {
    #[track_caller]
    fn from(err: SettingsError) -> Self {
        Self::new(ActionErrorKind::Settings(err))
    }
}

/// Result type for action execution.
pub type ActionResult<T> = Result<T, ActionError>;
