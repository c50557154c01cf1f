//! What a running action can see and touch.

use crate::{ReportChunker, Snapshot, SnapshotStore};
use derive_getters::Getters;
use foodbot_core::{GuildId, InboundMessage, MessageId};
use foodbot_error::{ActionError, ActionErrorKind, ActionResult};
use foodbot_interface::ChatPlatform;
use std::sync::Arc;

/// Execution context of one action invocation.
#[derive(Getters)]
pub struct ActionContext {
    /// Platform client.
    platform: Arc<dyn ChatPlatform>,
    /// Settings store, for actions that reload.
    store: Arc<SnapshotStore>,
    /// Snapshot the command was resolved against.
    snapshot: Arc<Snapshot>,
    /// The triggering message.
    message: InboundMessage,
}

impl ActionContext {
    /// Create a context.
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        store: Arc<SnapshotStore>,
        snapshot: Arc<Snapshot>,
        message: InboundMessage,
    ) -> Self {
        Self {
            platform,
            store,
            snapshot,
            message,
        }
    }

    /// The guild the command was sent in.
    pub fn guild(&self, action: &str) -> ActionResult<GuildId> {
        self.message
            .guild_id
            .ok_or_else(|| ActionError::new(ActionErrorKind::MissingGuild(action.to_string())))
    }

    /// Send a message to the channel the command came from.
    pub async fn reply(&self, content: &str) -> ActionResult<MessageId> {
        Ok(self
            .platform
            .send_message(self.message.channel_id, content)
            .await?)
    }

    /// Chunker configured from the snapshot's settings.
    pub fn chunker(&self) -> ReportChunker {
        ReportChunker::from_settings(self.snapshot.settings().general())
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("platform", &self.platform.platform_name())
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
