use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use wref_types::{ActionKind, AppEvent};

/// Turn one line of host input into an event.
///
/// `!copy N` and `!open N` run the action of the Nth shown item (1-based);
/// anything else is raw trigger input for the lookup pipeline.
pub fn parse_line(line: &str) -> AppEvent {
    let trimmed = line.trim();
    if let Some(command) = trimmed.strip_prefix('!') {
        let mut parts = command.split_whitespace();
        let kind = match parts.next() {
            Some("copy") => Some(ActionKind::Copy),
            Some("open") => Some(ActionKind::Open),
            _ => None,
        };
        let index = parts
            .next()
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0);

        if let (Some(kind), Some(n), None) = (kind, index, parts.next()) {
            return AppEvent::InvokeAction { item: n - 1, kind };
        }
    }

    AppEvent::TextInput(line.to_string())
}

/// Feed stdin lines into the app until EOF or cancellation
pub async fn watch_stdin(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("stdin watcher stopping");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => event_tx.send(parse_line(&line)).await?,
                    None => {
                        tracing::info!("stdin closed");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
