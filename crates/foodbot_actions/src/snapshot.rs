//! Immutable per-reload state: settings plus the router built from them.

use crate::{ActionRegistry, CommandRouter};
use derive_getters::Getters;
use foodbot_error::{SettingsError, SettingsErrorKind, SettingsResult};
use foodbot_security::PermissionResolver;
use foodbot_settings::{BotSettings, FromSettings, SettingsStore};
use tracing::debug;

/// Settings store holding [`Snapshot`]s.
pub type SnapshotStore = SettingsStore<Snapshot>;

/// Everything an inbound message is handled with.
///
/// Built once per load or reload and never mutated; a reload swaps in a
/// whole new snapshot.
#[derive(Debug, Getters)]
pub struct Snapshot {
    /// The settings this snapshot was built from.
    settings: BotSettings,
    /// Router over the configured actions.
    router: CommandRouter,
}

impl FromSettings for Snapshot {
    fn from_settings(settings: BotSettings) -> SettingsResult<Self> {
        settings.validate()?;

        let registry = ActionRegistry::from_descriptors(settings.descriptors())
            .map_err(|e| SettingsError::new(SettingsErrorKind::Invalid(e.kind().to_string())))?;
        let resolver = PermissionResolver::new(settings.system().admins().iter().cloned());
        let router = CommandRouter::new(settings.system().command_prefix().clone(), registry, resolver)
            .with_bot_identities(settings.system().bot_identities().iter().cloned());

        debug!(actions = router.registry().len(), "Snapshot built");
        Ok(Self { settings, router })
    }
}
