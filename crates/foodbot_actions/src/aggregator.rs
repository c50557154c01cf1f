//! Static custom emoji usage across a guild's text channels.

use crate::{HistoryScanner, ScanOutcome};
use derive_getters::Getters;
use foodbot_core::{
    AggregationWindow, ChannelInfo, EmojiId, EmojiTally, GuildEmoji, GuildId, HistoryMessage,
};
use foodbot_error::{PlatformError, PlatformResult};
use foodbot_interface::ChatPlatform;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{error, info, instrument, warn};

/// Inline static custom emoji: `<:name:id>`. Animated emoji (`<a:name:id>`)
/// do not match.
static EMOJI_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<:([A-Za-z0-9_]+):([0-9]+)>").expect("Valid emoji token regex")
});

/// Tallies emoji usage for one scan.
///
/// # Examples
///
/// ```
/// use foodbot_actions::EmojiAggregator;
/// use foodbot_core::{EmojiId, GuildEmoji, HistoryMessageBuilder, MessageId, Reaction};
///
/// let mut aggregator = EmojiAggregator::new([GuildEmoji::new(10, "pog")]);
///
/// let message = HistoryMessageBuilder::default()
///     .id(MessageId(1))
///     .timestamp(chrono::Utc::now())
///     .content("<:pog:10> <:pog:10> <:other:99>")
///     .reactions(vec![Reaction::custom(10, 4)])
///     .build()
///     .unwrap();
/// aggregator.observe(&message);
///
/// assert_eq!(aggregator.tally().count(EmojiId(10)), Some(6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmojiAggregator {
    tally: EmojiTally,
}

impl EmojiAggregator {
    /// Seed the tally with every static emoji of the guild at zero.
    pub fn new<I>(emojis: I) -> Self
    where
        I: IntoIterator<Item = GuildEmoji>,
    {
        Self {
            tally: EmojiTally::seeded(emojis),
        }
    }

    /// Count one message: inline tokens add one each, reactions add their
    /// aggregate count. Bot-authored messages count for nothing.
    pub fn observe(&mut self, message: &HistoryMessage) {
        if message.author_is_bot {
            return;
        }

        for capture in EMOJI_TOKEN.captures_iter(&message.content) {
            if let Some(id) = capture.get(2).and_then(|id| id.as_str().parse::<u64>().ok()) {
                self.tally.increment(EmojiId(id), 1);
            }
        }

        for reaction in &message.reactions {
            if let Some(id) = reaction.emoji.custom_id() {
                self.tally.increment(id, reaction.count);
            }
        }
    }

    /// The tally so far.
    pub fn tally(&self) -> &EmojiTally {
        &self.tally
    }

    /// Consume the aggregator, keeping the tally.
    pub fn into_tally(self) -> EmojiTally {
        self.tally
    }

    /// Scan every text channel of `guild`, one at a time.
    ///
    /// A channel that cannot be read is skipped and recorded; the scan goes
    /// on with the remaining channels.
    ///
    /// # Errors
    ///
    /// Returns an error only if the guild's emoji or channels cannot be listed.
    #[instrument(skip(platform, window), fields(platform = platform.platform_name(), guild = %guild))]
    pub async fn aggregate_guild<P>(
        platform: &P,
        guild: GuildId,
        window: &AggregationWindow,
    ) -> PlatformResult<GuildReport>
    where
        P: ChatPlatform + ?Sized,
    {
        let mut aggregator = Self::new(platform.guild_emojis(guild).await?);
        let channels = platform.guild_channels(guild).await?;
        let scanner = HistoryScanner::new(platform);

        info!(
            emojis = aggregator.tally.len(),
            channels = channels.len(),
            stop_time = %window.stop_time(),
            "Counting emoji"
        );

        let mut scanned = Vec::new();
        let mut skipped = Vec::new();

        for channel in channels.into_iter().filter(ChannelInfo::is_text) {
            info!(channel = %channel.name, "Scanning channel");
            let result = scanner
                .scan(channel.id, window, |message| aggregator.observe(message))
                .await;

            match result {
                Ok(outcome) => {
                    info!(
                        channel = %channel.name,
                        processed = outcome.processed(),
                        pages = outcome.pages(),
                        exit = %outcome.exit(),
                        "Channel scanned"
                    );
                    scanned.push((channel, outcome));
                }
                Err(e) if e.is_forbidden() => {
                    warn!(channel = %channel.name, error = %e, "No access to channel, skipping");
                    skipped.push((channel, e));
                }
                Err(e) => {
                    error!(channel = %channel.name, error = %e, "Channel scan failed, skipping");
                    skipped.push((channel, e));
                }
            }
        }

        if !skipped.is_empty() {
            let names: Vec<&str> = skipped.iter().map(|(channel, _)| channel.name.as_str()).collect();
            warn!(skipped = ?names, "Some channels were not counted");
        }

        Ok(GuildReport {
            tally: aggregator.into_tally(),
            scanned,
            skipped,
        })
    }
}

/// Result of counting emoji across a guild.
#[derive(Debug, Clone, Getters)]
pub struct GuildReport {
    /// Usage counts.
    tally: EmojiTally,
    /// Channels that were scanned, with their outcome.
    scanned: Vec<(ChannelInfo, ScanOutcome)>,
    /// Channels that were skipped, with the error.
    skipped: Vec<(ChannelInfo, PlatformError)>,
}

impl GuildReport {
    /// Messages handed to the aggregator across all channels.
    pub fn messages_processed(&self) -> usize {
        self.scanned
            .iter()
            .map(|(_, outcome)| *outcome.processed())
            .sum()
    }
}
