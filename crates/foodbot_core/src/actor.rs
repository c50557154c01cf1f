//! Identities and the actor that triggered a command.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A user or role handle, compared as an opaque string.
///
/// # Examples
///
/// ```
/// use foodbot_core::Identity;
///
/// let user = Identity::from("123456789012345678");
/// assert_eq!(user.as_str(), "123456789012345678");
/// assert_eq!(format!("{}", user), "123456789012345678");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from anything printable (ids, names).
    pub fn of(handle: impl std::fmt::Display) -> Self {
        Self(handle.to_string())
    }

    /// The handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}

/// Whoever triggered a command.
///
/// Built per inbound message from platform data and never persisted.
///
/// # Examples
///
/// ```
/// use foodbot_core::{Actor, Identity};
///
/// let actor = Actor::new("42")
///     .with_roles(["moderators"])
///     .with_platform_admin(false);
///
/// let spaces: Vec<&Identity> = actor.userspaces().collect();
/// assert_eq!(spaces.len(), 2);
/// assert!(!*actor.is_platform_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Actor {
    /// The user's own identity.
    identity: Identity,
    /// Identities of every role the user holds in the guild.
    role_identities: HashSet<Identity>,
    /// Whether the platform reports the user as a guild administrator.
    is_platform_admin: bool,
}

impl Actor {
    /// Create an actor with no roles and no admin flag.
    pub fn new(identity: impl Into<Identity>) -> Self {
        Self {
            identity: identity.into(),
            role_identities: HashSet::new(),
            is_platform_admin: false,
        }
    }

    /// Replace the actor's role identities.
    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Identity>,
    {
        self.role_identities = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Set the platform administrator flag.
    pub fn with_platform_admin(mut self, is_admin: bool) -> Self {
        self.is_platform_admin = is_admin;
        self
    }

    /// The user identity followed by every role identity.
    pub fn userspaces(&self) -> impl Iterator<Item = &Identity> {
        std::iter::once(&self.identity).chain(self.role_identities.iter())
    }
}
