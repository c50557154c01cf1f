//! Command listing filtered by what the caller may run.

use crate::{ActionContext, ActionKind, ChannelSink, RegisteredAction};
use foodbot_error::ActionResult;
use tracing::{debug, instrument};

/// List the commands the caller may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Help;

impl Help {
    #[instrument(skip(self, ctx))]
    pub(crate) async fn execute(&self, ctx: &ActionContext) -> ActionResult<()> {
        let snapshot = ctx.snapshot();
        let router = snapshot.router();
        let prefix = router.prefix();

        let mut lines = vec![format!("Commands start with `{}`:\n", prefix)];
        let mut listed = 0;
        for action in router.available_to(&ctx.message().author) {
            lines.push(command_line(prefix, action));
            listed += 1;
        }

        let admins: Vec<&str> = router
            .resolver()
            .global_admins()
            .map(|admin| admin.as_str())
            .collect();
        if admins.is_empty() {
            lines.push("Admins: none configured.\n".to_string());
        } else {
            lines.push(format!("Admins: {}\n", admins.join(", ")));
        }

        debug!(listed, "Sending command list");

        let chunks = ctx.chunker().with_terminal_marker(None).chunk_lines(lines);
        let sink = ChannelSink::new(ctx.platform().as_ref(), ctx.message().channel_id);
        ctx.chunker().send_all(chunks, &sink).await?;
        Ok(())
    }
}

fn command_line(prefix: &str, action: &RegisteredAction) -> String {
    let keywords: Vec<String> = action
        .descriptor()
        .keywords()
        .iter()
        .map(|keyword| format!("`{}{}`", prefix, keyword))
        .collect();

    let description = match action.kind() {
        ActionKind::CountEmoji(settings) => format!(
            "count custom emoji used in the last {} days; add a number to count a different span",
            settings.days_to_count()
        ),
        ActionKind::Help => "show this list".to_string(),
        ActionKind::Reload => "re-read the settings files".to_string(),
    };

    format!("{} - {}\n", keywords.join(", "), description)
}
