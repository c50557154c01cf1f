//! Error types for FoodBot.
//!
//! This crate provides the foundation error types used throughout the FoodBot workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use foodbot_error::{FoodbotResult, PlatformError, PlatformErrorKind};
//!
//! fn read_channel() -> FoodbotResult<Vec<String>> {
//!     Err(PlatformError::new(PlatformErrorKind::Forbidden("general".to_string())))?
//! }
//!
//! match read_channel() {
//!     Ok(lines) => println!("Got {} lines", lines.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod config;
mod error;
mod platform;
mod settings;

pub use action::{ActionError, ActionErrorKind, ActionResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{FoodbotError, FoodbotErrorKind, FoodbotResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use settings::{SettingsError, SettingsErrorKind, SettingsResult};
