//! Runnable actions, one variant per [`ActionKind`](crate::ActionKind).

mod count_emoji;
mod help;
mod reload;

pub use count_emoji::{COUNTING_MESSAGE, CountEmoji, FOUND_MESSAGE};
pub use help::Help;
pub use reload::{RELOAD_FAILED_MESSAGE, RELOADED_MESSAGE, Reload};

use crate::{ActionContext, ActionId};
use foodbot_error::ActionResult;

/// An action instantiated with its arguments, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Emoji usage report
    CountEmoji(CountEmoji),
    /// Command listing
    Help(Help),
    /// Settings reload
    Reload(Reload),
}

impl Action {
    /// The kind this action was built from.
    pub fn id(&self) -> ActionId {
        match self {
            Self::CountEmoji(_) => ActionId::CountEmoji,
            Self::Help(_) => ActionId::Help,
            Self::Reload(_) => ActionId::Reload,
        }
    }

    /// Run the action.
    pub async fn execute(&self, ctx: &ActionContext) -> ActionResult<()> {
        match self {
            Self::CountEmoji(action) => action.execute(ctx).await,
            Self::Help(action) => action.execute(ctx).await,
            Self::Reload(action) => action.execute(ctx).await,
        }
    }
}
