//! Trait definitions for the chat platforms FoodBot runs on.
//!
//! The command layer never talks to a network client directly. It consumes
//! these traits, which the platform bindings implement and tests mock.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cursor;
mod traits;

pub use cursor::HistoryCursor;
pub use traits::{ChatPlatform, MessageHistory};
