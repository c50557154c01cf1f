//! Permission model for action invocation.

use crate::{SecurityError, SecurityErrorKind, SecurityResult};
use foodbot_core::{ActionDescriptor, Actor, Identity};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Why an invocation was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AccessGrant {
    /// The platform reports the actor as an administrator.
    #[display("platform administrator")]
    PlatformAdmin,
    /// The actor is in the global admin list.
    #[display("global admin")]
    GlobalAdmin,
    /// The actor or one of its roles is whitelisted.
    #[display("whitelisted")]
    Whitelisted,
    /// The action has no whitelist and the actor is not blacklisted.
    #[display("open to everyone")]
    Open,
}

/// Decides whether actors may invoke actions.
///
/// # Examples
///
/// ```
/// use foodbot_core::{ActionDescriptor, Actor};
/// use foodbot_security::PermissionResolver;
///
/// let resolver = PermissionResolver::new(["owner"]);
/// let action = ActionDescriptor::new("count_emoji", ["countemoji"]).with_blacklist(["spammer"]);
///
/// assert!(resolver.is_allowed(&Actor::new("someone"), &action));
/// assert!(!resolver.is_allowed(&Actor::new("spammer"), &action));
/// assert!(resolver.is_allowed(&Actor::new("owner"), &action));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionResolver {
    global_admins: HashSet<Identity>,
}

impl PermissionResolver {
    /// Create a resolver with the system-wide admin list.
    pub fn new<I, T>(global_admins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        Self {
            global_admins: global_admins.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether `actor` may invoke `action`, returning the grant or the
    /// reason for denial.
    #[instrument(skip_all, fields(actor = %actor.identity(), action = %action.id()))]
    pub fn check(&self, actor: &Actor, action: &ActionDescriptor) -> SecurityResult<AccessGrant> {
        if *actor.is_platform_admin() {
            debug!("Allowed as platform administrator");
            return Ok(AccessGrant::PlatformAdmin);
        }

        if self.is_global_admin(actor.identity()) {
            debug!("Allowed as global admin");
            return Ok(AccessGrant::GlobalAdmin);
        }

        let whitelist = action.whitelist();
        let whitelisted = actor.userspaces().any(|space| whitelist.contains(space));
        if !whitelist.is_empty() && !whitelisted {
            debug!("Denied: not in whitelist");
            return Err(SecurityError::new(SecurityErrorKind::PermissionDenied {
                action: action.id().clone(),
                reason: "Actor and roles are not whitelisted".to_string(),
            }));
        }

        // Blacklist overrides a whitelist pass
        if let Some(space) = actor
            .userspaces()
            .find(|space| action.blacklist().contains(*space))
        {
            debug!(blacklisted = %space, "Denied: blacklisted");
            return Err(SecurityError::new(SecurityErrorKind::PermissionDenied {
                action: action.id().clone(),
                reason: format!("'{}' is blacklisted", space),
            }));
        }

        let grant = if whitelisted {
            AccessGrant::Whitelisted
        } else {
            AccessGrant::Open
        };
        debug!(%grant, "Action permitted");
        Ok(grant)
    }

    /// Whether `actor` may invoke `action`.
    pub fn is_allowed(&self, actor: &Actor, action: &ActionDescriptor) -> bool {
        self.check(actor, action).is_ok()
    }

    /// Whether the identity is in the global admin list.
    pub fn is_global_admin(&self, identity: &Identity) -> bool {
        self.global_admins.contains(identity)
    }

    /// Global admins, sorted.
    pub fn global_admins(&self) -> impl Iterator<Item = &Identity> {
        let mut admins: Vec<&Identity> = self.global_admins.iter().collect();
        admins.sort();
        admins.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PermissionResolver {
        PermissionResolver::new(["global-admin"])
    }

    #[test]
    fn test_platform_admin_ignores_lists() {
        let action = ActionDescriptor::new("a", ["a"])
            .with_whitelist(["someone-else"])
            .with_blacklist(["boss"]);
        let actor = Actor::new("boss").with_platform_admin(true);

        assert_eq!(
            resolver().check(&actor, &action).unwrap(),
            AccessGrant::PlatformAdmin
        );
    }

    #[test]
    fn test_global_admin_ignores_blacklist() {
        let action = ActionDescriptor::new("a", ["a"]).with_blacklist(["global-admin"]);
        let actor = Actor::new("global-admin");

        assert_eq!(
            resolver().check(&actor, &action).unwrap(),
            AccessGrant::GlobalAdmin
        );
    }

    #[test]
    fn test_global_admin_list_matches_identity_not_roles() {
        let action = ActionDescriptor::new("a", ["a"]).with_whitelist(["mods"]);
        let actor = Actor::new("user").with_roles(["global-admin"]);

        assert!(!resolver().is_allowed(&actor, &action));
    }

    #[test]
    fn test_empty_whitelist_is_open() {
        let action = ActionDescriptor::new("a", ["a"]);
        assert_eq!(
            resolver().check(&Actor::new("anyone"), &action).unwrap(),
            AccessGrant::Open
        );
    }

    #[test]
    fn test_whitelist_by_role() {
        let action = ActionDescriptor::new("a", ["a"]).with_whitelist(["mods"]);

        let member = Actor::new("user").with_roles(["mods"]);
        let outsider = Actor::new("user").with_roles(["guests"]);

        assert_eq!(
            resolver().check(&member, &action).unwrap(),
            AccessGrant::Whitelisted
        );
        assert!(!resolver().is_allowed(&outsider, &action));
    }

    #[test]
    fn test_blacklist_overrides_whitelist() {
        let action = ActionDescriptor::new("a", ["a"])
            .with_whitelist(["mods"])
            .with_blacklist(["muted"]);
        let actor = Actor::new("user").with_roles(["mods", "muted"]);

        let err = resolver().check(&actor, &action).unwrap_err();
        assert!(matches!(
            err.kind(),
            SecurityErrorKind::PermissionDenied { .. }
        ));
    }

    #[test]
    fn test_blacklisted_identity_with_empty_whitelist() {
        let action = ActionDescriptor::new("a", ["a"]).with_blacklist(["user"]);
        assert!(!resolver().is_allowed(&Actor::new("user"), &action));
    }

    #[test]
    fn test_global_admins_listed_in_order() {
        let resolver = PermissionResolver::new(["300", "100", "200"]);

        let admins: Vec<&str> = resolver.global_admins().map(Identity::as_str).collect();
        assert_eq!(admins, vec!["100", "200", "300"]);
        assert!(resolver.is_global_admin(&Identity::from("200")));
        assert!(!resolver.is_global_admin(&Identity::from("400")));
    }
}
