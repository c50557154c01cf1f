//! Custom emoji and usage tallies.

use crate::EmojiId;
use std::collections::HashMap;

/// A custom emoji as enumerated from a guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuildEmoji {
    /// Platform id
    pub id: EmojiId,
    /// Display name without colons
    pub name: String,
    /// Animated emoji are never tallied
    pub animated: bool,
}

impl GuildEmoji {
    /// Create a static (non-animated) emoji.
    pub fn new(id: impl Into<EmojiId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            animated: false,
        }
    }

    /// Create an animated emoji.
    pub fn animated(id: impl Into<EmojiId>, name: impl Into<String>) -> Self {
        Self {
            animated: true,
            ..Self::new(id, name)
        }
    }
}

/// Key of a tally entry: the stable id plus the name used to render it.
///
/// Renders in the `<:name:id>` form chat clients display inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("<:{}:{}>", name, id)]
pub struct EmojiKey {
    /// Platform id
    pub id: EmojiId,
    /// Display name
    pub name: String,
}

/// Usage counts for the static custom emoji of one guild.
///
/// Entries keep the order in which they were seeded, which is also the
/// tie-break order when the report sorts by count.
///
/// # Examples
///
/// ```
/// use foodbot_core::{EmojiId, EmojiTally, GuildEmoji};
///
/// let mut tally = EmojiTally::seeded([
///     GuildEmoji::new(1, "pog"),
///     GuildEmoji::animated(2, "party"),
/// ]);
///
/// // Animated emoji are left out entirely.
/// assert_eq!(tally.len(), 1);
/// assert!(tally.increment(EmojiId(1), 3));
/// assert!(!tally.increment(EmojiId(2), 1));
/// assert_eq!(tally.count(EmojiId(1)), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiTally {
    entries: Vec<(EmojiKey, u64)>,
    index: HashMap<EmojiId, usize>,
}

impl EmojiTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tally with every static emoji initialised to zero.
    pub fn seeded<I>(emojis: I) -> Self
    where
        I: IntoIterator<Item = GuildEmoji>,
    {
        let mut tally = Self::new();
        for emoji in emojis {
            tally.seed(emoji);
        }
        tally
    }

    /// Add an emoji with a zero count.
    ///
    /// Returns `false` when the emoji is animated or already present.
    pub fn seed(&mut self, emoji: GuildEmoji) -> bool {
        if emoji.animated || self.index.contains_key(&emoji.id) {
            return false;
        }
        self.index.insert(emoji.id, self.entries.len());
        self.entries.push((
            EmojiKey {
                id: emoji.id,
                name: emoji.name,
            },
            0,
        ));
        true
    }

    /// Whether the id is a tallied (static, known) emoji.
    pub fn contains(&self, id: EmojiId) -> bool {
        self.index.contains_key(&id)
    }

    /// Add `by` to a known emoji. Unknown ids are ignored and return `false`.
    pub fn increment(&mut self, id: EmojiId, by: u64) -> bool {
        match self.index.get(&id) {
            Some(&position) => {
                let count = &mut self.entries[position].1;
                *count = count.saturating_add(by);
                true
            }
            None => false,
        }
    }

    /// Current count of a known emoji.
    pub fn count(&self, id: EmojiId) -> Option<u64> {
        self.index.get(&id).map(|&position| self.entries[position].1)
    }

    /// Number of tallied emoji.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the guild has no static custom emoji.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every count.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| *count).sum()
    }

    /// Entries in seeding order.
    pub fn iter(&self) -> impl Iterator<Item = (&EmojiKey, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Entries sorted by ascending count, ties in seeding order.
    pub fn sorted_ascending(&self) -> Vec<(&EmojiKey, u64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by_key(|(_, count)| *count);
        sorted
    }
}
