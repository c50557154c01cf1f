//! Emoji usage report over the guild's recent history.

use crate::{ActionContext, ActionId, ChannelSink, EmojiAggregator};
use derive_getters::Getters;
use foodbot_core::AggregationWindow;
use foodbot_error::ActionResult;
use tracing::{info, instrument, warn};

/// Posted before scanning starts.
pub const COUNTING_MESSAGE: &str = "Counting emojis, do not disturb...";

/// The progress message is edited to this once scanning is done.
pub const FOUND_MESSAGE: &str = "We found the following emojis:";

/// Count static custom emoji used in the last `days` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct CountEmoji {
    /// Horizon of the scan.
    days: u32,
}

impl CountEmoji {
    /// Count over the last `days` days.
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    #[instrument(skip(self, ctx), fields(days = self.days))]
    pub(crate) async fn execute(&self, ctx: &ActionContext) -> ActionResult<()> {
        let guild = ctx.guild(ActionId::CountEmoji.as_ref())?;
        let channel = ctx.message().channel_id;
        let platform = ctx.platform().as_ref();

        let progress = ctx.reply(COUNTING_MESSAGE).await?;

        let window = AggregationWindow::last_days(self.days);
        let report = EmojiAggregator::aggregate_guild(platform, guild, &window).await?;

        info!(
            channels = report.scanned().len(),
            skipped = report.skipped().len(),
            messages = report.messages_processed(),
            emojis = report.tally().len(),
            total = report.tally().total(),
            "Emoji count finished"
        );

        // The progress message may be gone after a long scan; the report
        // still goes out.
        if let Err(e) = platform.edit_message(channel, progress, FOUND_MESSAGE).await {
            warn!(error = %e, %progress, "Could not update the progress message");
        }

        let sink = ChannelSink::new(platform, channel);
        ctx.chunker().emit(report.tally(), &sink).await?;
        Ok(())
    }
}
