use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;

use kanal::AsyncReceiver;
use wref_types::{Action, DisplayItem};

use crate::state::AppState;

/// Plain-text listing: numbered titles, indented subtitle lines, action hints
pub fn render_text(items: &[DisplayItem]) -> String {
    let mut out = String::new();

    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item.title);
        for line in item.subtitle.lines() {
            let _ = writeln!(out, "   {line}");
        }

        let hints: Vec<String> = item
            .actions
            .iter()
            .map(|action| match action {
                Action::CopyToClipboard(_) => format!("!copy {}", i + 1),
                Action::OpenInBrowser(_) => format!("!open {}", i + 1),
            })
            .collect();
        if !hints.is_empty() {
            let _ = writeln!(out, "   [{}]", hints.join(", "));
        }
    }

    out
}

pub fn render(items: &[DisplayItem], json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(items)? + "\n")
    } else {
        Ok(render_text(items))
    }
}

/// Print every result list the controller emits and keep it for actions
pub async fn ui_loop(
    state: Arc<AppState>,
    results_rx: AsyncReceiver<Vec<DisplayItem>>,
    json: bool,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdout);

    while let Ok(items) = results_rx.recv().await {
        let rendered = render(&items, json)?;
        *state.results.write().await = items;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        if interactive && !json {
            stdout.write_all(b"> ")?;
        }
        stdout.flush()?;
    }

    tracing::debug!("results channel closed");
    Ok(())
}
