//! Action descriptors as loaded from settings.

use crate::Identity;
use derive_getters::Getters;
use std::collections::{BTreeMap, HashSet};

/// Everything the router needs to know about one action.
///
/// Keywords are stored lower-cased and de-duplicated in the order they were
/// given, so lookups can compare against a lower-cased command directly.
///
/// # Examples
///
/// ```
/// use foodbot_core::ActionDescriptor;
///
/// let descriptor = ActionDescriptor::new("count_emoji", ["CountEmoji", "emoji", "countemoji"])
///     .with_setting("days_to_count", "7");
///
/// assert_eq!(descriptor.keywords(), &vec!["countemoji".to_string(), "emoji".to_string()]);
/// assert!(descriptor.matches_keyword("emoji"));
/// assert!(*descriptor.is_active());
/// assert_eq!(descriptor.setting("days_to_count"), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ActionDescriptor {
    /// Stable action identifier (also selects the action kind).
    id: String,
    /// Lower-cased trigger keywords in declaration order.
    keywords: Vec<String>,
    /// Inactive actions are never resolved.
    is_active: bool,
    /// If non-empty, only these identities may invoke the action.
    whitelist: HashSet<Identity>,
    /// These identities may never invoke the action.
    blacklist: HashSet<Identity>,
    /// Free-form per-action settings.
    settings: BTreeMap<String, String>,
}

impl ActionDescriptor {
    /// Create an active descriptor with empty access lists and settings.
    pub fn new<I, K>(id: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            id: id.into(),
            keywords: normalized,
            is_active: true,
            whitelist: HashSet::new(),
            blacklist: HashSet::new(),
            settings: BTreeMap::new(),
        }
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Replace the whitelist.
    pub fn with_whitelist<I, T>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        self.whitelist = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the blacklist.
    pub fn with_blacklist<I, T>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        self.blacklist = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Add a single setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Replace all settings.
    pub fn with_settings(mut self, settings: BTreeMap<String, String>) -> Self {
        self.settings = settings;
        self
    }

    /// Look up a single setting.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Whether `command` (already lower-cased) triggers this action.
    pub fn matches_keyword(&self, command: &str) -> bool {
        self.keywords.iter().any(|keyword| keyword == command)
    }
}
