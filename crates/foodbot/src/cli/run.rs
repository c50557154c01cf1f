//! `run` command handler.

use foodbot_actions::SnapshotStore;
use foodbot_error::FoodbotResult;
use foodbot_settings::SettingsPaths;
use std::sync::Arc;
use tracing::{info, instrument};

/// Load settings (with the repair fallback), connect and serve until the
/// connection ends or Ctrl+C is pressed. SIGHUP reloads the settings.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded, no bot token is
/// configured, or the client fails.
#[instrument(skip(paths), fields(settings = %paths.settings().display()))]
pub async fn run_bot(paths: SettingsPaths) -> FoodbotResult<()> {
    let store = Arc::new(SnapshotStore::load_or_repair(paths)?);
    info!(
        actions = store.current().router().registry().len(),
        "Settings loaded"
    );

    serve(store).await
}

#[cfg(feature = "discord")]
async fn serve(store: Arc<SnapshotStore>) -> FoodbotResult<()> {
    use foodbot_social::{DiscordError, DiscordErrorKind, FoodbotBot};
    use tracing::warn;

    let token = store
        .current()
        .settings()
        .system()
        .bot_token()
        .map(str::to_string)
        .ok_or_else(|| DiscordError::new(DiscordErrorKind::MissingToken))?;

    let mut bot = FoodbotBot::new(&token, store.clone()).await?;

    tokio::spawn(reload_on_hangup(store));

    let shutdown = bot.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.shutdown().await,
            Err(e) => warn!(error = %e, "Could not listen for Ctrl+C"),
        }
    });

    bot.start().await?;
    info!("Bot stopped");
    Ok(())
}

#[cfg(not(feature = "discord"))]
async fn serve(_store: Arc<SnapshotStore>) -> FoodbotResult<()> {
    use foodbot_error::{PlatformError, PlatformErrorKind};

    Err(PlatformError::new(PlatformErrorKind::Connection(
        "foodbot was built without the `discord` feature; rebuild with --features discord"
            .to_string(),
    ))
    .into())
}

/// Reload settings every time the process receives SIGHUP.
#[cfg(all(unix, feature = "discord"))]
async fn reload_on_hangup(store: Arc<SnapshotStore>) {
    use tokio::signal::unix::{SignalKind, signal};
    use tracing::{error, warn};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            warn!(error = %e, "Could not listen for SIGHUP, reload is only available as a command");
            return;
        }
    };

    while hangup.recv().await.is_some() {
        info!("SIGHUP received, reloading settings");
        let store = store.clone();
        match tokio::task::spawn_blocking(move || store.reload()).await {
            Ok(Ok(snapshot)) => info!(
                actions = snapshot.router().registry().len(),
                "Settings reloaded"
            ),
            Ok(Err(e)) => error!(error = %e, "Settings reload failed, keeping the previous settings"),
            Err(e) => error!(error = %e, "Settings reload task did not finish"),
        }
    }
}

#[cfg(all(not(unix), feature = "discord"))]
async fn reload_on_hangup(_store: Arc<SnapshotStore>) {}
