//! Keyword to action lookup.

use crate::ActionKind;
use derive_getters::Getters;
use foodbot_core::ActionDescriptor;
use foodbot_error::{ConfigError, ConfigErrorKind};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// A descriptor together with its parsed kind.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RegisteredAction {
    /// Keywords, access lists and raw settings.
    descriptor: ActionDescriptor,
    /// What the action does.
    kind: ActionKind,
}

/// Result of a keyword lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// An active action owns the keyword.
    Found(&'a RegisteredAction),
    /// The keyword belongs to an inactive action.
    Inactive(&'a RegisteredAction),
    /// No action owns the keyword.
    NotFound,
}

/// Actions in registration order, looked up by keyword.
///
/// Registration rejects duplicate ids and keywords, so at most one action
/// owns any keyword and lookup order never decides between two.
///
/// # Examples
///
/// ```
/// use foodbot_actions::{ActionRegistry, Lookup};
/// use foodbot_core::ActionDescriptor;
///
/// let registry = ActionRegistry::from_descriptors([
///     ActionDescriptor::new("help", ["help", "commands"]),
///     ActionDescriptor::new("reload", ["reload"]).with_active(false),
/// ])
/// .unwrap();
///
/// assert!(registry.resolve_by_keyword("HELP").is_some());
/// assert!(registry.resolve_by_keyword("reload").is_none());
/// assert!(matches!(registry.lookup("reload"), Lookup::Inactive(_)));
/// assert!(matches!(registry.lookup("nope"), Lookup::NotFound));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: Vec<RegisteredAction>,
    by_keyword: HashMap<String, usize>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every descriptor's kind and register them in order.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown action id, malformed per-kind settings,
    /// or a duplicate id or keyword.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ActionDescriptor>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            let kind = ActionKind::from_descriptor(&descriptor)?;
            registry.register(descriptor, kind)?;
        }
        Ok(registry)
    }

    /// Add an action after all existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the id, or any keyword, is already registered.
    #[instrument(skip(self, descriptor, kind), fields(id = %descriptor.id()))]
    pub fn register(
        &mut self,
        descriptor: ActionDescriptor,
        kind: ActionKind,
    ) -> Result<(), ConfigError> {
        if self.get(descriptor.id()).is_some() {
            return Err(ConfigError::new(ConfigErrorKind::DuplicateAction(
                descriptor.id().clone(),
            )));
        }

        if let Some(keyword) = descriptor
            .keywords()
            .iter()
            .find(|keyword| self.by_keyword.contains_key(*keyword))
        {
            return Err(ConfigError::new(ConfigErrorKind::DuplicateKeyword {
                keyword: keyword.clone(),
                action: descriptor.id().clone(),
            }));
        }

        let index = self.actions.len();
        for keyword in descriptor.keywords() {
            self.by_keyword.insert(keyword.clone(), index);
        }
        debug!(keywords = ?descriptor.keywords(), "Registered action");
        self.actions.push(RegisteredAction { descriptor, kind });
        Ok(())
    }

    /// Look up the action owning `command`, case-insensitively.
    pub fn lookup(&self, command: &str) -> Lookup<'_> {
        let command = command.to_lowercase();
        match self.by_keyword.get(&command).map(|index| &self.actions[*index]) {
            Some(action) if *action.descriptor.is_active() => Lookup::Found(action),
            Some(action) => Lookup::Inactive(action),
            None => Lookup::NotFound,
        }
    }

    /// The active action owning `command`, if any.
    pub fn resolve_by_keyword(&self, command: &str) -> Option<&RegisteredAction> {
        match self.lookup(command) {
            Lookup::Found(action) => Some(action),
            Lookup::Inactive(_) | Lookup::NotFound => None,
        }
    }

    /// Find an action by id.
    pub fn get(&self, id: &str) -> Option<&RegisteredAction> {
        self.actions
            .iter()
            .find(|action| action.descriptor.id() == id)
    }

    /// Every action in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAction> {
        self.actions.iter()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
