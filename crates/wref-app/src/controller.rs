use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use wref_core::{QueryController, ResultFormatter};
use wref_fetcher::TranslationFetcher;
use wref_types::{AppEvent, DisplayItem};

use crate::events::event_loop;
use crate::io::watch_stdin;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
///
/// Each end is moved into exactly one task, so closing the event side
/// cascades: event loop -> query controller -> output.
pub struct ChannelSet {
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub input: (AsyncSender<String>, AsyncReceiver<String>),
    pub results: (AsyncSender<Vec<DisplayItem>>, AsyncReceiver<Vec<DisplayItem>>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: kanal::bounded_async(capacity),
            input: kanal::bounded_async(capacity),
            results: kanal::bounded_async(capacity),
        }
    }
}

/// Handles to a running pipeline
pub struct AppTasks {
    /// Host event entry point; dropping every clone lets the pipeline drain and finish
    pub events: AsyncSender<AppEvent>,
    /// Event routing, query controller and any input watchers
    pub workers: JoinSet<anyhow::Result<()>>,
    /// Result printer; finishes once the last result list has been shown
    pub output: JoinHandle<anyhow::Result<()>>,
}

impl AppTasks {
    /// Abort whatever is still running
    pub async fn shutdown(mut self) {
        self.workers.shutdown().await;
        self.output.abort();
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    capacity: usize,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            state,
            capacity,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the query pipeline, event routing and result printing
    pub fn spawn_tasks(&self, fetcher: Arc<dyn TranslationFetcher>, json: bool) -> AppTasks {
        let ChannelSet {
            events: (events_tx, events_rx),
            input: (input_tx, input_rx),
            results: (results_tx, results_rx),
        } = ChannelSet::new(self.capacity);

        let formatter = ResultFormatter::new(&self.state.config.display);
        let mut workers = JoinSet::new();

        // Query controller
        let query_controller = QueryController::new(fetcher, formatter);
        workers.spawn(query_controller.run(
            input_rx,
            results_tx,
            self.cancel_token.child_token(),
        ));

        // Event loop
        workers.spawn(event_loop(self.state.clone(), events_rx, input_tx));

        // Output
        let output = tokio::spawn(ui_loop(self.state.clone(), results_rx, json));

        AppTasks {
            events: events_tx,
            workers,
            output,
        }
    }

    /// Read host input from stdin; EOF drops the watcher's event sender
    pub fn spawn_stdin(&self, tasks: &mut AppTasks) {
        tasks.workers.spawn(watch_stdin(
            self.cancel_token.child_token(),
            tasks.events.clone(),
        ));
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
