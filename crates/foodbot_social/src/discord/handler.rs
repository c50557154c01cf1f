//! Serenity event handler for the FoodBot Discord bot.

use super::DiscordPlatform;
use foodbot_actions::{DispatchOutcome, Dispatcher, SnapshotStore};
use foodbot_core::{Actor, ChannelId, GuildId, InboundMessage};
use serenity::all::{Message, Ready};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use serenity::model::id as discord_id;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Event handler for the FoodBot Discord bot.
///
/// Each message is dispatched against the settings snapshot current when it
/// arrives. Serenity runs every event in its own task, so a long count does
/// not hold up other commands.
pub struct FoodbotHandler {
    store: Arc<SnapshotStore>,
}

impl FoodbotHandler {
    /// Create a handler reading settings from `store`.
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Whether the author owns the guild or holds a role with the
    /// administrator permission.
    async fn is_guild_admin(ctx: &Context, guild_id: discord_id::GuildId, msg: &Message) -> bool {
        let guild = match ctx.http.get_guild(guild_id).await {
            Ok(guild) => guild,
            Err(e) => {
                warn!(guild_id = %guild_id, error = %e, "Could not fetch guild, assuming no admin rights");
                return false;
            }
        };

        if guild.owner_id == msg.author.id {
            return true;
        }

        let Some(member) = msg.member.as_ref() else {
            return false;
        };
        member.roles.iter().any(|role_id| {
            guild
                .roles
                .get(role_id)
                .is_some_and(|role| role.permissions.administrator())
        })
    }

    /// Build the actor for a message.
    ///
    /// The admin flag costs a guild lookup, so it is only resolved for
    /// messages that look like commands.
    async fn actor(&self, ctx: &Context, msg: &Message) -> Actor {
        let roles: Vec<String> = msg
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|role| role.to_string()).collect())
            .unwrap_or_default();

        let snapshot = self.store.current();
        let prefix = snapshot.settings().system().command_prefix();
        let is_admin = match msg.guild_id {
            Some(guild_id) if msg.content.starts_with(prefix.as_str()) => {
                Self::is_guild_admin(ctx, guild_id, msg).await
            }
            _ => false,
        };

        Actor::new(msg.author.id.to_string())
            .with_roles(roles)
            .with_platform_admin(is_admin)
    }
}

#[async_trait]
impl EventHandler for FoodbotHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Connected to Discord"
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let inbound = InboundMessage {
            author: self.actor(&ctx, &msg).await,
            author_is_bot: msg.author.bot,
            channel_id: ChannelId(msg.channel_id.get()),
            guild_id: msg.guild_id.map(|id| GuildId(id.get())),
            content: msg.content.clone(),
        };

        let platform = Arc::new(DiscordPlatform::with_http_client(ctx.http.clone()));
        let dispatcher = Dispatcher::new(platform, self.store.clone());

        match dispatcher.handle(inbound).await {
            Ok(DispatchOutcome::Ignored) => {}
            Ok(outcome) => debug!(message_id = %msg.id, ?outcome, "Message handled"),
            Err(e) => error!(message_id = %msg.id, error = %e, "Command failed"),
        }
    }
}
