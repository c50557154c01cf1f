//! Inbound message handling from routing to reply.

use crate::{ActionContext, ActionId, RouteOutcome, SnapshotStore};
use foodbot_core::InboundMessage;
use foodbot_error::ActionResult;
use foodbot_interface::ChatPlatform;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// What happened to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command, or not one the author may run.
    Ignored,
    /// A command outside a guild; the apology was sent.
    Apologized,
    /// The action refused its arguments; the message was sent back.
    Rejected(String),
    /// The action ran to completion.
    Completed(ActionId),
}

/// Routes inbound messages and runs the resolved actions.
///
/// Holds no per-message state; every message is handled against the
/// snapshot current when it arrives.
#[derive(Clone)]
pub struct Dispatcher {
    platform: Arc<dyn ChatPlatform>,
    store: Arc<SnapshotStore>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(platform: Arc<dyn ChatPlatform>, store: Arc<SnapshotStore>) -> Self {
        Self { platform, store }
    }

    /// The settings store.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Handle one inbound message.
    ///
    /// # Errors
    ///
    /// Returns operational failures of the action or of sending a reply.
    /// Usage errors are answered in the channel and reported as
    /// [`DispatchOutcome::Rejected`].
    #[instrument(
        skip(self, message),
        fields(
            platform = self.platform.platform_name(),
            author = %message.author.identity(),
            channel = %message.channel_id
        )
    )]
    pub async fn handle(&self, message: InboundMessage) -> ActionResult<DispatchOutcome> {
        let snapshot = self.store.current();

        let (kind, arguments) = match snapshot.router().route(&message) {
            RouteOutcome::Ignored(_) => return Ok(DispatchOutcome::Ignored),
            RouteOutcome::DirectMessage(apology) => {
                self.platform
                    .send_message(message.channel_id, apology)
                    .await?;
                return Ok(DispatchOutcome::Apologized);
            }
            RouteOutcome::Resolved(command) => (
                command.action().kind().clone(),
                command.arguments().to_vec(),
            ),
        };

        let action = match kind.instantiate(&arguments) {
            Ok(action) => action,
            Err(e) => return self.reject(&message, e).await,
        };

        let id = action.id();
        info!(action = %id, arguments = arguments.len(), "Running action");

        let channel = message.channel_id;
        let ctx = ActionContext::new(
            Arc::clone(&self.platform),
            Arc::clone(&self.store),
            snapshot,
            message,
        );

        match action.execute(&ctx).await {
            Ok(()) => {
                info!(action = %id, "Action finished");
                Ok(DispatchOutcome::Completed(id))
            }
            Err(e) if e.user_message().is_some() => self.reject(ctx.message(), e).await,
            Err(e) => {
                error!(action = %id, %channel, error = %e, "Action failed");
                Err(e)
            }
        }
    }

    async fn reject(
        &self,
        message: &InboundMessage,
        err: foodbot_error::ActionError,
    ) -> ActionResult<DispatchOutcome> {
        let Some(reply) = err.user_message() else {
            return Err(err);
        };

        warn!(error = %err, "Action rejected its arguments");
        self.platform
            .send_message(message.channel_id, reply)
            .await?;
        Ok(DispatchOutcome::Rejected(reply.to_string()))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("platform", &self.platform.platform_name())
            .field("settings", self.store.paths())
            .finish()
    }
}
