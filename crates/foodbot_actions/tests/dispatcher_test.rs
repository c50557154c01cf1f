//! End-to-end tests from inbound message to chat output.

mod test_utils;

use foodbot_actions::{
    ActionId, COUNTING_MESSAGE, DIRECT_MESSAGE_APOLOGY, DispatchOutcome, Dispatcher, FOUND_MESSAGE,
    RELOAD_FAILED_MESSAGE, RELOADED_MESSAGE, Snapshot, SnapshotStore,
};
use foodbot_core::{Actor, GuildEmoji, Reaction};
use foodbot_error::{ActionErrorKind, SettingsErrorKind};
use foodbot_settings::{
    ActionSettings, BotSettings, FromSettings, GeneralSettings, SettingsPaths, SystemSettings,
};
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::{
    COMMAND_CHANNEL, MockPlatform, command, direct_message, message_minutes_ago, text_channel,
    with_reactions,
};

fn settings(reload_active: bool) -> BotSettings {
    BotSettings::new(
        SystemSettings::new("!", ["owner", "another-owner"]),
        GeneralSettings::new(2000),
        vec![
            ActionSettings::new("count_emoji", ["countemoji"]).with_setting("days_to_count", "7"),
            ActionSettings::new("help", ["help"]),
            ActionSettings::new("reload", ["reload"])
                .with_active(reload_active)
                .with_whitelist(["ops"]),
        ],
    )
}

fn dispatcher(platform: Arc<MockPlatform>, dir: &TempDir, settings: BotSettings) -> Dispatcher {
    let store = SnapshotStore::new(
        SettingsPaths::in_dir(dir.path()),
        Snapshot::from_settings(settings).unwrap(),
    );
    Dispatcher::new(platform, Arc::new(store))
}

fn emoji_platform() -> MockPlatform {
    MockPlatform::new()
        .with_emojis(vec![GuildEmoji::new(1, "pog"), GuildEmoji::new(2, "kek")])
        .with_channel(
            text_channel(11, "general"),
            vec![
                message_minutes_ago(3, 5, "<:pog:1> <:pog:1>"),
                with_reactions(message_minutes_ago(2, 60, "nice"), vec![Reaction::custom(1, 2)]),
                message_minutes_ago(1, 60 * 24 * 3, "<:kek:2>"),
            ],
        )
}

#[tokio::test]
async fn test_count_emoji_reports_progress_then_tally() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(emoji_platform());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(false));

    let outcome = dispatcher
        .handle(command(Actor::new("user"), "!countemoji"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Completed(ActionId::CountEmoji));
    assert_eq!(
        platform.sent_texts(),
        vec![
            COUNTING_MESSAGE.to_string(),
            "Emoji <:kek:2> was used 1 times.\nEmoji <:pog:1> was used 4 times.\nThe end!"
                .to_string(),
        ]
    );

    let edits = platform.edits.lock();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].0, COMMAND_CHANNEL);
    assert_eq!(edits[0].2, FOUND_MESSAGE);
}

#[tokio::test]
async fn test_count_emoji_report_survives_deleted_progress_message() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(emoji_platform().with_failing_edits());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(false));

    let outcome = dispatcher
        .handle(command(Actor::new("user"), "!countemoji"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Completed(ActionId::CountEmoji));
    assert!(platform.edits.lock().is_empty());
    assert_eq!(
        platform.sent_texts(),
        vec![
            COUNTING_MESSAGE.to_string(),
            "Emoji <:kek:2> was used 1 times.\nEmoji <:pog:1> was used 4 times.\nThe end!"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_count_emoji_days_argument_narrows_window() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(emoji_platform());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(false));

    dispatcher
        .handle(command(Actor::new("user"), "!countemoji 1"))
        .await
        .unwrap();

    assert_eq!(
        platform.sent_texts()[1],
        "Emoji <:kek:2> was used 0 times.\nEmoji <:pog:1> was used 4 times.\nThe end!"
    );
}

#[tokio::test]
async fn test_bad_days_argument_is_answered_not_run() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(emoji_platform());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(false));

    let outcome = dispatcher
        .handle(command(Actor::new("user"), "!countemoji forever"))
        .await
        .unwrap();

    let reply = "Can't parse `forever` as a number of days.".to_string();
    assert_eq!(outcome, DispatchOutcome::Rejected(reply.clone()));
    assert_eq!(platform.sent_texts(), vec![reply]);
    assert!(platform.requested_channels().is_empty());
}

#[tokio::test]
async fn test_direct_message_gets_apology() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(MockPlatform::new());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(false));

    let outcome = dispatcher
        .handle(direct_message(Actor::new("user"), "!help"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Apologized);
    assert_eq!(platform.sent_texts(), vec![DIRECT_MESSAGE_APOLOGY.to_string()]);
}

#[tokio::test]
async fn test_ignored_messages_send_nothing() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(MockPlatform::new());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(false));

    for text in ["hello", "!unknown", "!reload"] {
        let outcome = dispatcher
            .handle(command(Actor::new("owner"), text))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored);
    }
    assert!(platform.sent_texts().is_empty());
}

#[tokio::test]
async fn test_help_lists_only_permitted_commands() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(MockPlatform::new());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(true));

    dispatcher
        .handle(command(Actor::new("user"), "!help"))
        .await
        .unwrap();
    let user_help = platform.sent_texts().join("");
    assert!(user_help.contains("`!countemoji`"));
    assert!(user_help.contains("last 7 days"));
    assert!(user_help.contains("`!help`"));
    assert!(!user_help.contains("`!reload`"));
    assert!(user_help.contains("Admins: another-owner, owner"));
    assert!(!user_help.contains("The end!"));

    platform.sent.lock().clear();
    dispatcher
        .handle(command(Actor::new("user").with_roles(["ops"]), "!help"))
        .await
        .unwrap();
    assert!(platform.sent_texts().join("").contains("`!reload`"));
}

#[tokio::test]
async fn test_reload_swaps_settings_and_reports_failure() {
    let dir = TempDir::new().unwrap();
    let platform = Arc::new(MockPlatform::new());
    let dispatcher = dispatcher(Arc::clone(&platform), &dir, settings(true));
    let paths = SettingsPaths::in_dir(dir.path());
    let ops = || Actor::new("operator").with_roles(["ops"]);

    // Nothing on disk yet: reload fails and the old snapshot stays
    let err = dispatcher.handle(command(ops(), "!reload")).await.unwrap_err();
    match err.kind() {
        ActionErrorKind::Settings(settings) => {
            assert!(matches!(settings.kind(), SettingsErrorKind::Missing(_)));
        }
        other => panic!("Expected a settings error, got {:?}", other),
    }
    assert_eq!(platform.sent_texts(), vec![RELOAD_FAILED_MESSAGE.to_string()]);
    assert_eq!(dispatcher.store().current().router().prefix(), "!");

    let base = settings(true);
    let changed = BotSettings::new(
        SystemSettings::new("?", base.system().admins().clone()),
        base.general().clone(),
        base.actions().clone(),
    );
    paths.write(&changed).unwrap();

    platform.sent.lock().clear();
    dispatcher.handle(command(ops(), "!reload")).await.unwrap();
    assert_eq!(platform.sent_texts(), vec![RELOADED_MESSAGE.to_string()]);
    assert_eq!(dispatcher.store().current().router().prefix(), "?");

    let outcome = dispatcher.handle(command(ops(), "!help")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
}
