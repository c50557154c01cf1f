//! Re-read the settings files from chat.

use crate::ActionContext;
use foodbot_error::{ActionError, ActionErrorKind, ActionResult};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Reply after a successful reload.
pub const RELOADED_MESSAGE: &str = "Settings reloaded.";

/// Reply after a failed reload; details go to the log only.
pub const RELOAD_FAILED_MESSAGE: &str = "Settings reload failed.";

/// Swap in freshly loaded settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reload;

impl Reload {
    /// Reload on the blocking pool, since the loader reads files with
    /// `std::fs`. A failed reload keeps the current snapshot, tells the
    /// channel, and returns the settings error.
    #[instrument(skip(self, ctx))]
    pub(crate) async fn execute(&self, ctx: &ActionContext) -> ActionResult<()> {
        let store = Arc::clone(ctx.store());
        let reloaded = tokio::task::spawn_blocking(move || store.reload())
            .await
            .map_err(|e| ActionError::new(ActionErrorKind::Interrupted(e.to_string())))?;

        match reloaded {
            Ok(snapshot) => {
                info!(
                    requested_by = %ctx.message().author.identity(),
                    actions = snapshot.router().registry().len(),
                    "Settings reloaded from chat"
                );
                ctx.reply(RELOADED_MESSAGE).await?;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Settings reload requested from chat failed");
                ctx.reply(RELOAD_FAILED_MESSAGE).await?;
                Err(e.into())
            }
        }
    }
}
