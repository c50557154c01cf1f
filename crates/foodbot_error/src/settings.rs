//! Settings loading and repair errors.

use std::path::PathBuf;

/// Specific settings error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SettingsErrorKind {
    /// A required field is missing from every settings source.
    #[display("Missing required setting: {}", _0)]
    Missing(String),

    /// A settings source could not be parsed.
    #[display("Failed to parse settings: {}", _0)]
    Parse(String),

    /// Settings parsed but failed validation.
    #[display("Invalid settings: {}", _0)]
    Invalid(String),

    /// A settings file could not be read or written.
    #[display("Settings file error at {}: {}", path.display(), message)]
    Io {
        /// File that caused the error
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
}

/// Settings error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Settings Error: {} at line {} in {}", kind, line, file)]
pub struct SettingsError {
    kind: SettingsErrorKind,
    line: u32,
    file: &'static str,
}

impl SettingsError {
    /// Create a new settings error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SettingsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SettingsErrorKind {
        &self.kind
    }

    /// Whether a repair pass could plausibly fix this error.
    ///
    /// Missing and unparsable fields can be filled from defaults; validation
    /// failures and I/O errors cannot.
    pub fn is_repairable(&self) -> bool {
        matches!(
            self.kind,
            SettingsErrorKind::Missing(_) | SettingsErrorKind::Parse(_)
        )
    }
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
