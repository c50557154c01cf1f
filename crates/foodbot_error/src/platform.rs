//! Chat platform errors.

/// Specific platform error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// The bot is not allowed to read or write the resource.
    #[display("Access forbidden: {}", _0)]
    Forbidden(String),

    /// The resource (guild, channel, message) does not exist.
    #[display("Resource not found: {}", _0)]
    NotFound(String),

    /// The platform asked us to slow down.
    #[display("Rate limited: retry after {} seconds", _0)]
    RateLimited(u64),

    /// Any other API failure.
    #[display("API call failed: {}", _0)]
    Api(String),

    /// No connection to the platform could be made or kept.
    #[display("Connection failed: {}", _0)]
    Connection(String),

    /// Outbound message could not be delivered.
    #[display("Message send failed: {}", _0)]
    Send(String),
}

/// Platform error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    kind: PlatformErrorKind,
    line: u32,
    file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PlatformErrorKind {
        &self.kind
    }

    /// True when the platform refused access to the resource.
    pub fn is_forbidden(&self) -> bool {
        matches!(self.kind, PlatformErrorKind::Forbidden(_))
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
