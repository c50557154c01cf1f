//! Permission policy for FoodBot actions.
//!
//! Decides whether an actor may invoke an action. The decision order is:
//!
//! 1. **Platform admins** - guild administrators may always invoke
//! 2. **Global admins** - identities listed in the system settings
//! 3. **Whitelist** - when non-empty, the actor or one of its roles must be listed
//! 4. **Blacklist** - the actor and its roles must not be listed; overrides the whitelist
//!
//! Every decision is logged with its reason.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod permission;

pub use error::{SecurityError, SecurityErrorKind, SecurityResult};
pub use permission::{AccessGrant, PermissionResolver};
