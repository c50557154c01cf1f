//! Turns raw message text into a resolved action.

use crate::{ActionRegistry, Lookup, RegisteredAction};
use derive_getters::Getters;
use foodbot_core::{Actor, Identity, InboundMessage};
use foodbot_security::PermissionResolver;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Reply sent when a command arrives outside a guild channel.
pub const DIRECT_MESSAGE_APOLOGY: &str = "Sorry, I only respond to commands in server channels.";

/// Why a message did not resolve to an action.
///
/// Only ever logged; the chat sees the same silence for every reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// Message has no text
    #[display("empty message")]
    Empty,
    /// Author is a bot
    #[display("bot author")]
    BotAuthor,
    /// Text does not start with the command prefix
    #[display("no command prefix")]
    NoPrefix,
    /// Prefix is not followed by a command word
    #[display("empty command")]
    EmptyCommand,
    /// No action owns the command
    #[display("unknown command")]
    NotFound,
    /// The owning action is inactive
    #[display("inactive action")]
    Inactive,
    /// The actor may not invoke the owning action
    #[display("permission denied")]
    Forbidden,
}

/// A command that resolved to an action the actor may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand<'a> {
    action: &'a RegisteredAction,
    arguments: Vec<String>,
}

impl<'a> ResolvedCommand<'a> {
    /// The action to run.
    pub fn action(&self) -> &'a RegisteredAction {
        self.action
    }

    /// Whitespace-separated tokens after the command word.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

/// What the router decided about one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<'a> {
    /// Not a command for us.
    Ignored(IgnoreReason),
    /// A command sent outside a guild; answer with the apology.
    DirectMessage(&'static str),
    /// Run this action.
    Resolved(ResolvedCommand<'a>),
}

/// Extracts commands and resolves them under the permission policy.
///
/// # Examples
///
/// ```
/// use foodbot_actions::{ActionRegistry, CommandRouter};
/// use foodbot_core::{ActionDescriptor, Actor};
/// use foodbot_security::PermissionResolver;
///
/// let registry = ActionRegistry::from_descriptors([
///     ActionDescriptor::new("count_emoji", ["countemoji"]),
/// ])
/// .unwrap();
/// let router = CommandRouter::new("!", registry, PermissionResolver::default());
///
/// let command = router.parse("!CountEmoji 30", &Actor::new("42")).unwrap();
/// assert_eq!(command.action().descriptor().id(), "count_emoji");
/// assert_eq!(command.arguments(), &vec!["30".to_string()]);
///
/// assert!(router.parse("!unknown", &Actor::new("42")).is_err());
/// ```
#[derive(Debug, Clone, Getters)]
pub struct CommandRouter {
    /// Prefix every command starts with.
    prefix: String,
    /// Known actions.
    registry: ActionRegistry,
    /// Permission policy.
    resolver: PermissionResolver,
    /// Authors whose messages are never treated as commands.
    bot_identities: HashSet<Identity>,
}

impl CommandRouter {
    /// Create a router with no extra bot identities.
    pub fn new(
        prefix: impl Into<String>,
        registry: ActionRegistry,
        resolver: PermissionResolver,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            registry,
            resolver,
            bot_identities: HashSet::new(),
        }
    }

    /// Treat these author identities as bots.
    pub fn with_bot_identities<I, T>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        self.bot_identities = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Route an inbound message.
    pub fn route(&self, message: &InboundMessage) -> RouteOutcome<'_> {
        let outcome = self.classify(message);
        match &outcome {
            RouteOutcome::Ignored(IgnoreReason::Inactive) => {
                warn!(author = %message.author.identity(), "Command for inactive action");
            }
            RouteOutcome::Ignored(reason) => {
                debug!(author = %message.author.identity(), %reason, "Message ignored");
            }
            RouteOutcome::DirectMessage(_) => {
                debug!(author = %message.author.identity(), "Command received in direct message");
            }
            RouteOutcome::Resolved(command) => {
                debug!(
                    author = %message.author.identity(),
                    action = %command.action.descriptor().id(),
                    arguments = command.arguments.len(),
                    "Command resolved"
                );
            }
        }
        outcome
    }

    fn classify(&self, message: &InboundMessage) -> RouteOutcome<'_> {
        if message.content.is_empty() {
            return RouteOutcome::Ignored(IgnoreReason::Empty);
        }

        if message.author_is_bot || self.bot_identities.contains(message.author.identity()) {
            return RouteOutcome::Ignored(IgnoreReason::BotAuthor);
        }

        if !message.content.starts_with(self.prefix.as_str()) {
            return RouteOutcome::Ignored(IgnoreReason::NoPrefix);
        }

        debug!(
            author = %message.author.identity(),
            length = message.content.chars().count(),
            "Candidate command"
        );

        if message.guild_id.is_none() {
            return RouteOutcome::DirectMessage(DIRECT_MESSAGE_APOLOGY);
        }

        match self.parse(&message.content, &message.author) {
            Ok(command) => RouteOutcome::Resolved(command),
            Err(reason) => RouteOutcome::Ignored(reason),
        }
    }

    /// Split prefixed text into a command and arguments and resolve it.
    ///
    /// # Errors
    ///
    /// Returns the reason the text did not resolve. Callers must not show
    /// the reason to the invoking user.
    pub fn parse(&self, raw_text: &str, actor: &Actor) -> Result<ResolvedCommand<'_>, IgnoreReason> {
        if raw_text.is_empty() {
            return Err(IgnoreReason::Empty);
        }

        let Some(body) = raw_text.strip_prefix(self.prefix.as_str()) else {
            return Err(IgnoreReason::NoPrefix);
        };

        // The prefix must be glued to the command word
        if body.starts_with(char::is_whitespace) {
            return Err(IgnoreReason::EmptyCommand);
        }

        let mut tokens = body.split_whitespace();
        let Some(command) = tokens.next() else {
            return Err(IgnoreReason::EmptyCommand);
        };

        let action = match self.registry.lookup(command) {
            Lookup::Found(action) => action,
            Lookup::Inactive(_) => return Err(IgnoreReason::Inactive),
            Lookup::NotFound => return Err(IgnoreReason::NotFound),
        };

        if !self.resolver.is_allowed(actor, action.descriptor()) {
            return Err(IgnoreReason::Forbidden);
        }

        Ok(ResolvedCommand {
            action,
            arguments: tokens.map(str::to_string).collect(),
        })
    }

    /// Active actions the actor may invoke, in registration order.
    ///
    /// The yielded actions borrow the router only, so they outlive `actor`.
    pub fn available_to<'a, 'b>(
        &'a self,
        actor: &'b Actor,
    ) -> impl Iterator<Item = &'a RegisteredAction> + 'b
    where
        'a: 'b,
    {
        self.registry.iter().filter(move |action| {
            *action.descriptor().is_active() && self.resolver.is_allowed(actor, action.descriptor())
        })
    }
}
