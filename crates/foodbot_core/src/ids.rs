//! Platform-stable identifiers.
//!
//! Discord uses 64-bit snowflakes for everything; each kind of id gets its
//! own newtype so a channel id cannot be passed where a guild id is expected.

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            derive_more::Display,
            derive_more::From,
        )]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }
    };
}

snowflake!(
    /// Identifier of a guild (server).
    GuildId
);
snowflake!(
    /// Identifier of a channel.
    ChannelId
);
snowflake!(
    /// Identifier of a message.
    MessageId
);
snowflake!(
    /// Identifier of a user.
    UserId
);
snowflake!(
    /// Identifier of a custom emoji.
    EmojiId
);
