use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use wref_types::{ActionKind, AppEvent};

use crate::state::AppState;

/// App's main loop: routes host events to the query pipeline or the action runner
pub async fn event_loop(
    state: Arc<AppState>,
    events_rx: AsyncReceiver<AppEvent>,
    input_tx: AsyncSender<String>,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] waiting for input");

    while let Ok(event) = events_rx.recv().await {
        match event {
            AppEvent::TextInput(text) => {
                tracing::debug!("TextInput received: '{}' chars", text.len());
                input_tx.send(text).await?;
            }
            AppEvent::InvokeAction { item, kind } => {
                handle_action(&state, item, kind).await;
            }
        }
    }

    tracing::info!("[EVENT_LOOP] event channel closed");
    Ok(())
}

async fn handle_action(state: &AppState, item: usize, kind: ActionKind) {
    let action = {
        let results = state.results.read().await;
        results.get(item).and_then(|i| i.action(kind)).cloned()
    };

    let Some(action) = action else {
        tracing::warn!("no {kind:?} action on item {}", item + 1);
        return;
    };

    if let Err(e) = wref_io::perform(&action).await {
        tracing::error!("action {kind:?} on item {} failed: {e:#}", item + 1);
    }
}
