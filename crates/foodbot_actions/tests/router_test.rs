//! Tests for command resolution and the permission policy at the router.

mod test_utils;

use foodbot_actions::{
    ActionRegistry, CommandRouter, DIRECT_MESSAGE_APOLOGY, IgnoreReason, RouteOutcome,
};
use foodbot_core::{ActionDescriptor, Actor, InboundMessageBuilder};
use foodbot_error::ConfigErrorKind;
use foodbot_security::PermissionResolver;
use test_utils::{command, descriptors, direct_message};

fn router() -> CommandRouter {
    let registry = ActionRegistry::from_descriptors(descriptors()).unwrap();
    CommandRouter::new("!", registry, PermissionResolver::new(["owner"]))
        .with_bot_identities(["other-bot"])
}

#[test]
fn test_unknown_commands_never_resolve() {
    let router = router();
    let actor = Actor::new("user");

    for text in ["!dance", "!count", "!countemojis", "!helpme", "!reloadx"] {
        assert_eq!(
            router.parse(text, &actor).unwrap_err(),
            IgnoreReason::NotFound,
            "{} should not resolve",
            text
        );
    }
}

#[test]
fn test_keyword_match_is_case_insensitive_and_splits_arguments() {
    let router = router();
    let resolved = router.parse("!EMOJI 30  extra", &Actor::new("user")).unwrap();

    assert_eq!(resolved.action().descriptor().id(), "count_emoji");
    assert_eq!(resolved.arguments(), ["30".to_string(), "extra".to_string()]);
}

#[test]
fn test_prefix_must_lead_and_touch_the_command() {
    let router = router();
    let actor = Actor::new("user");

    assert_eq!(router.parse("", &actor).unwrap_err(), IgnoreReason::Empty);
    assert_eq!(router.parse("help", &actor).unwrap_err(), IgnoreReason::NoPrefix);
    assert_eq!(router.parse("say !help", &actor).unwrap_err(), IgnoreReason::NoPrefix);
    assert_eq!(router.parse("! help", &actor).unwrap_err(), IgnoreReason::EmptyCommand);
    assert_eq!(router.parse("!", &actor).unwrap_err(), IgnoreReason::EmptyCommand);
}

#[test]
fn test_inactive_and_forbidden_collapse_to_no_action() {
    let router = router();

    let inactive = router.route(&command(Actor::new("owner"), "!reload"));
    let forbidden = router.route(&command(Actor::new("user").with_roles(["muted"]), "!help"));
    let unknown = router.route(&command(Actor::new("user"), "!nothing"));

    assert_eq!(inactive, RouteOutcome::Ignored(IgnoreReason::Inactive));
    assert_eq!(forbidden, RouteOutcome::Ignored(IgnoreReason::Forbidden));
    assert_eq!(unknown, RouteOutcome::Ignored(IgnoreReason::NotFound));
}

#[test]
fn test_platform_admin_bypasses_blacklist() {
    let router = router();
    let admin = Actor::new("muted").with_platform_admin(true);

    assert!(matches!(
        router.route(&command(admin, "!help")),
        RouteOutcome::Resolved(_)
    ));
}

#[test]
fn test_bot_authors_are_ignored() {
    let router = router();

    let flagged = InboundMessageBuilder::default()
        .author(Actor::new("some-bot"))
        .author_is_bot(true)
        .channel_id(test_utils::COMMAND_CHANNEL)
        .guild_id(Some(test_utils::GUILD))
        .content("!help")
        .build()
        .unwrap();
    assert_eq!(router.route(&flagged), RouteOutcome::Ignored(IgnoreReason::BotAuthor));

    let listed = command(Actor::new("other-bot"), "!help");
    assert_eq!(router.route(&listed), RouteOutcome::Ignored(IgnoreReason::BotAuthor));
}

#[test]
fn test_direct_message_gets_apology_only_for_commands() {
    let router = router();

    assert_eq!(
        router.route(&direct_message(Actor::new("user"), "!countemoji")),
        RouteOutcome::DirectMessage(DIRECT_MESSAGE_APOLOGY)
    );
    assert_eq!(
        router.route(&direct_message(Actor::new("user"), "hello there")),
        RouteOutcome::Ignored(IgnoreReason::NoPrefix)
    );
}

#[test]
fn test_available_actions_are_filtered_by_policy() {
    let router = router();

    let user: Vec<&str> = router
        .available_to(&Actor::new("user"))
        .map(|action| action.descriptor().id().as_str())
        .collect();
    let muted: Vec<&str> = router
        .available_to(&Actor::new("user").with_roles(["muted"]))
        .map(|action| action.descriptor().id().as_str())
        .collect();

    assert_eq!(user, vec!["count_emoji", "help"]);
    assert_eq!(muted, vec!["count_emoji"]);
}

#[test]
fn test_available_actions_outlive_the_actor() {
    let router = router();

    let listed: Vec<&foodbot_actions::RegisteredAction> = {
        let actor = Actor::new("owner");
        router.available_to(&actor).collect()
    };

    let ids: Vec<&str> = listed
        .iter()
        .map(|action| action.descriptor().id().as_str())
        .collect();
    assert_eq!(ids, vec!["count_emoji", "help"]);
}

#[test]
fn test_duplicate_keywords_fail_registration() {
    let result = ActionRegistry::from_descriptors([
        ActionDescriptor::new("help", ["help"]),
        ActionDescriptor::new("count_emoji", ["Help"]),
    ]);
    assert_eq!(
        result.unwrap_err().kind(),
        &ConfigErrorKind::DuplicateKeyword {
            keyword: "help".to_string(),
            action: "count_emoji".to_string(),
        }
    );
}

#[test]
fn test_duplicate_ids_fail_registration() {
    let result = ActionRegistry::from_descriptors([
        ActionDescriptor::new("help", ["help"]),
        ActionDescriptor::new("help", ["commands"]),
    ]);
    assert_eq!(
        result.unwrap_err().kind(),
        &ConfigErrorKind::DuplicateAction("help".to_string())
    );
}
