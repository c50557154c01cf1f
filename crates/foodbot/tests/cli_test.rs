//! Tests for argument parsing and the settings commands.

use clap::Parser;
use foodbot::{
    Cli, Commands, FoodbotErrorKind, SettingsErrorKind, SettingsPaths, SnapshotStore,
    check_settings, repair_settings, repair_summary, settings_summary,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SETTINGS: &str = r#"
[system]
command_prefix = "!"
admins = ["1001", "1002"]

[general]
characters_limit = 1500

[[actions]]
id = "count_emoji"
keywords = ["countemoji", "emoji"]
[actions.settings]
days_to_count = "30"

[[actions]]
id = "reload"
keywords = ["reload"]
active = false
"#;

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["foodbot", "run"]).unwrap();
    assert_eq!(cli.command, Commands::Run);
    assert!(!cli.verbose);
    assert!(!cli.json_logs);

    let cli = Cli::try_parse_from(["foodbot", "check", "--verbose", "--json-logs"]).unwrap();
    assert_eq!(cli.command, Commands::Check);
    assert!(cli.verbose);
    assert!(cli.json_logs);

    let cli = Cli::try_parse_from(["foodbot", "-v", "repair"]).unwrap();
    assert_eq!(cli.command, Commands::Repair);
    assert!(cli.verbose);
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["foodbot"]).is_err());
    assert!(Cli::try_parse_from(["foodbot", "serve"]).is_err());
}

#[test]
fn test_secrets_default_next_to_settings() {
    let cli = Cli::try_parse_from(["foodbot", "check", "--settings", "/etc/foodbot/bot.toml"]).unwrap();
    let paths = cli.settings_paths();

    assert_eq!(paths.settings(), &PathBuf::from("/etc/foodbot/bot.toml"));
    assert_eq!(paths.secrets(), &PathBuf::from("/etc/foodbot/foodbot.secrets.toml"));
}

#[test]
fn test_explicit_secrets_path() {
    let cli = Cli::try_parse_from([
        "foodbot",
        "run",
        "--settings",
        "bot.toml",
        "--secrets",
        "/run/secrets/foodbot.toml",
    ])
    .unwrap();
    let paths = cli.settings_paths();

    assert_eq!(paths.settings(), &PathBuf::from("bot.toml"));
    assert_eq!(paths.secrets(), &PathBuf::from("/run/secrets/foodbot.toml"));
}

#[test]
fn test_settings_summary_lists_actions() {
    let dir = TempDir::new().unwrap();
    let paths = SettingsPaths::in_dir(dir.path());
    fs::write(paths.settings(), SETTINGS).unwrap();

    let store = SnapshotStore::load(paths.clone()).unwrap();
    let summary = settings_summary(&paths, &store.current());

    assert!(summary.contains("Command prefix: !"));
    assert!(summary.contains("Admins: 2"));
    assert!(summary.contains("Characters limit: 1500"));
    assert!(summary.contains("  count_emoji (active, 30 days): countemoji, emoji"));
    assert!(summary.contains("  reload (inactive): reload"));
}

#[test]
fn test_check_rejects_invalid_settings() {
    let dir = TempDir::new().unwrap();
    let paths = SettingsPaths::in_dir(dir.path());
    fs::write(paths.settings(), SETTINGS.replace("\"count_emoji\"", "\"count_stickers\"")).unwrap();

    let err = check_settings(paths).unwrap_err();
    match err.kind() {
        FoodbotErrorKind::Settings(settings) => {
            assert!(matches!(settings.kind(), SettingsErrorKind::Invalid(_)));
            assert!(settings.to_string().contains("Unknown action id 'count_stickers'"));
        }
        other => panic!("Expected a settings error, got {:?}", other),
    }
}

#[cfg(not(feature = "discord"))]
#[tokio::test]
async fn test_run_without_platform_reports_connection_error() {
    use foodbot::{PlatformErrorKind, run_bot};

    let dir = TempDir::new().unwrap();
    let paths = SettingsPaths::in_dir(dir.path());
    fs::write(paths.settings(), SETTINGS).unwrap();

    let err = run_bot(paths).await.unwrap_err();
    match err.kind() {
        FoodbotErrorKind::Platform(platform) => {
            assert!(matches!(platform.kind(), PlatformErrorKind::Connection(_)));
        }
        other => panic!("Expected a platform error, got {:?}", other),
    }
}

#[test]
fn test_repair_creates_loadable_files() {
    let dir = TempDir::new().unwrap();
    let paths = SettingsPaths::in_dir(dir.path());

    repair_settings(paths.clone()).unwrap();

    assert!(paths.settings().exists());
    assert!(paths.secrets().exists());
    check_settings(paths.clone()).unwrap();

    let report = paths.repair().unwrap();
    assert!(report.is_noop());
    assert_eq!(repair_summary(&report), "Settings are complete, nothing to repair.\n");
}
