//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, FoodbotHandler};
use foodbot_actions::SnapshotStore;
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord bot client for FoodBot.
///
/// # Example
/// ```no_run
/// use foodbot_actions::SnapshotStore;
/// use foodbot_settings::SettingsPaths;
/// use foodbot_social::FoodbotBot;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = Arc::new(SnapshotStore::load_or_repair(SettingsPaths::default())?);
///     let token = std::env::var("DISCORD_TOKEN")?;
///
///     let mut bot = FoodbotBot::new(&token, store).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct FoodbotBot {
    /// Serenity client instance
    client: Client,
}

impl FoodbotBot {
    /// Create a new bot.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank or the Serenity client fails
    /// to initialize.
    #[instrument(skip(token, store), fields(token_len = token.len()))]
    pub async fn new(token: &str, store: Arc<SnapshotStore>) -> Result<Self, DiscordError> {
        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::MissingToken));
        }

        info!("Initializing FoodBot Discord client");

        let handler = FoodbotHandler::new(store);
        let intents = FoodbotHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token, intents).event_handler(handler).await?;

        info!("Serenity client built successfully");

        Ok(Self { client })
    }

    /// Start the bot.
    ///
    /// Blocks until the gateway connection ends or [`FoodbotBot::shutdown_handle`]
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await?;
        Ok(())
    }

    /// Handle that stops every shard when [`ShutdownHandle::shutdown`] is
    /// awaited.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shard_manager: self.client.shard_manager.clone(),
        }
    }
}

/// Stops a running bot from another task.
#[derive(Clone)]
pub struct ShutdownHandle {
    shard_manager: Arc<serenity::gateway::ShardManager>,
}

impl ShutdownHandle {
    /// Close every shard; [`FoodbotBot::start`] then returns.
    pub async fn shutdown(&self) {
        info!("Shutting down Discord shards");
        self.shard_manager.shutdown_all().await;
    }
}
