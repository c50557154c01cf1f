//! Top-level error wrapper types.

use crate::{PlatformError, SettingsError};

/// Errors that end a CLI command.
///
/// Registry problems arrive as [`SettingsError`]s, since a snapshot that
/// cannot be built is invalid settings. Action failures stay inside the
/// message handler and never end the process.
///
/// # Examples
///
/// ```
/// use foodbot_error::{FoodbotError, FoodbotErrorKind, PlatformError, PlatformErrorKind};
///
/// let err: FoodbotError = PlatformError::new(PlatformErrorKind::Connection("closed".into())).into();
/// assert!(matches!(err.kind(), FoodbotErrorKind::Platform(_)));
/// assert!(format!("{}", err).contains("Connection failed: closed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FoodbotErrorKind {
    /// Settings could not be loaded, validated or repaired
    #[from(SettingsError)]
    Settings(SettingsError),
    /// The chat platform could not be reached
    #[from(PlatformError)]
    Platform(PlatformError),
}

/// FoodBot error with kind discrimination.
///
/// # Examples
///
/// ```
/// use foodbot_error::{FoodbotResult, SettingsError, SettingsErrorKind};
///
/// fn might_fail() -> FoodbotResult<()> {
///     Err(SettingsError::new(SettingsErrorKind::Missing("system.admins".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("FoodBot Error: {}", _0)]
pub struct FoodbotError(Box<FoodbotErrorKind>);

impl FoodbotError {
    /// Create a new error from a kind.
    pub fn new(kind: FoodbotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FoodbotErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FoodbotErrorKind
impl<T> From<T> for FoodbotError
where
    T: Into<FoodbotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for FoodBot operations.
pub type FoodbotResult<T> = std::result::Result<T, FoodbotError>;
