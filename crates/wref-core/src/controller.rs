use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use wref_fetcher::{FetchError, FetchOutcome, TranslationFetcher};
use wref_types::{DisplayItem, Query};

use crate::formatter::ResultFormatter;
use crate::parser::parse;

/// A finished fetch, tagged with the generation of the input that issued it
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub query: Query,
    pub outcome: FetchOutcome,
}

#[derive(Debug)]
enum ControllerState {
    Idle,
    Fetching {
        generation: u64,
        query: Query,
        cancel: CancellationToken,
    },
}

/// Drives parse -> fetch -> format for a stream of raw inputs.
///
/// Every input bumps the generation counter. Completions travel back over a
/// channel and are rendered only when their generation is still the active
/// one, so a superseded fetch can never overwrite newer results even when
/// its cancellation was ignored.
pub struct QueryController {
    fetcher: Arc<dyn TranslationFetcher>,
    formatter: ResultFormatter,
    state: ControllerState,
    generation: u64,
    completion_tx: AsyncSender<FetchCompletion>,
    completion_rx: AsyncReceiver<FetchCompletion>,
}

impl QueryController {
    pub fn new(fetcher: Arc<dyn TranslationFetcher>, formatter: ResultFormatter) -> Self {
        let (completion_tx, completion_rx) = kanal::unbounded_async();

        Self {
            fetcher,
            formatter,
            state: ControllerState::Idle,
            generation: 0,
            completion_tx,
            completion_rx,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ControllerState::Idle)
    }

    pub fn active_query(&self) -> Option<&Query> {
        match &self.state {
            ControllerState::Idle => None,
            ControllerState::Fetching { query, .. } => Some(query),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Receiving end for fetch completions, to be fed into [`Self::handle_completion`]
    pub fn completions(&self) -> AsyncReceiver<FetchCompletion> {
        self.completion_rx.clone()
    }

    /// Process a new raw input, superseding any fetch in flight.
    ///
    /// Returns items to show right away (parse errors); successful parses
    /// start a fetch whose result arrives later as a [`FetchCompletion`].
    /// Must be called from within a tokio runtime.
    pub fn handle_input(&mut self, raw: &str) -> Option<Vec<DisplayItem>> {
        self.supersede();
        self.generation += 1;

        match parse(raw) {
            Ok(query) => {
                self.start_fetch(query);
                None
            }
            Err(err) => {
                tracing::debug!("parse failed for {raw:?}: {err}");
                Some(vec![self.formatter.format_parse_error(&err)])
            }
        }
    }

    /// Render a completion if it belongs to the active fetch; stale ones are dropped
    pub fn handle_completion(&mut self, completion: FetchCompletion) -> Option<Vec<DisplayItem>> {
        let active = match &self.state {
            ControllerState::Fetching { generation, .. } => *generation == completion.generation,
            ControllerState::Idle => false,
        };
        if !active {
            tracing::debug!(
                "dropping superseded result for '{}' (generation {}, current {})",
                completion.query.word,
                completion.generation,
                self.generation
            );
            return None;
        }

        self.state = ControllerState::Idle;

        match &completion.outcome {
            Err(FetchError::Cancelled) => return None,
            Err(FetchError::ServiceFormatError(detail)) => {
                tracing::error!(
                    pair = %completion.query.pair,
                    word = %completion.query.word,
                    "dictionary service response could not be interpreted: {detail}"
                );
            }
            Err(err) => tracing::warn!("lookup for '{}' failed: {err}", completion.query.word),
            Ok(entries) => tracing::debug!(
                "lookup for '{}' returned {} entries",
                completion.query.word,
                entries.len()
            ),
        }

        Some(self.formatter.format(&completion.query, &completion.outcome))
    }

    /// Cancel whatever is in flight and go idle
    pub fn cancel(&mut self) {
        self.supersede();
    }

    /// Event loop: raw inputs in, display lists out.
    ///
    /// Runs until shutdown, or until the input closes and the last issued
    /// lookup has been rendered. Dropping `output_tx` on return tells the
    /// consumer that no more results will come.
    pub async fn run(
        mut self,
        input_rx: AsyncReceiver<String>,
        output_tx: AsyncSender<Vec<DisplayItem>>,
        shutdown: CancellationToken,
    ) -> anyhow::Result<()> {
        let completions = self.completions();
        let mut accepting = true;

        loop {
            if !accepting && self.is_idle() {
                break;
            }

            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("query controller stopping");
                    break;
                }
                input = input_rx.recv(), if accepting => {
                    match input {
                        Ok(raw) => {
                            if let Some(items) = self.handle_input(&raw) {
                                output_tx.send(items).await?;
                            }
                        }
                        Err(_) => {
                            tracing::info!("input channel closed, finishing pending lookup");
                            accepting = false;
                        }
                    }
                }
                completion = completions.recv() => {
                    let completion = completion?;
                    if let Some(items) = self.handle_completion(completion) {
                        output_tx.send(items).await?;
                    }
                }
            }
        }

        self.cancel();
        Ok(())
    }

    fn supersede(&mut self) {
        if let ControllerState::Fetching {
            generation, cancel, ..
        } = std::mem::replace(&mut self.state, ControllerState::Idle)
        {
            tracing::debug!("cancelling fetch generation {generation}");
            cancel.cancel();
        }
    }

    fn start_fetch(&mut self, query: Query) {
        let generation = self.generation;
        let cancel = CancellationToken::new();
        tracing::debug!(
            "fetching '{}' ({}) generation {generation}",
            query.word,
            query.pair
        );

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        let task_cancel = cancel.clone();
        let task_query = query.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = task_cancel.cancelled() => Err(FetchError::Cancelled),
                outcome = fetcher.fetch(&task_query, &task_cancel) => outcome,
            };
            let completion = FetchCompletion {
                generation,
                query: task_query,
                outcome,
            };
            if tx.send(completion).await.is_err() {
                tracing::debug!("controller gone, discarding generation {generation}");
            }
        });

        self.state = ControllerState::Fetching {
            generation,
            query,
            cancel,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::oneshot;
    use tokio::time::timeout;
    use wref_config::display::DisplayConfig;
    use wref_fetcher::ProviderMetadata;
    use wref_types::{Translation, TranslationEntry};

    use super::*;

    /// Fetcher whose lookups block until the test releases them.
    /// It ignores cancellation on purpose, like an unabortable network call.
    #[derive(Default)]
    struct GatedFetcher {
        gates: Mutex<HashMap<String, oneshot::Receiver<FetchOutcome>>>,
        calls: Mutex<Vec<String>>,
    }

    impl GatedFetcher {
        fn gate(&self, word: &str) -> oneshot::Sender<FetchOutcome> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(word.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranslationFetcher for GatedFetcher {
        async fn fetch(&self, query: &Query, _cancel: &CancellationToken) -> FetchOutcome {
            self.calls.lock().unwrap().push(query.word.clone());
            let gate = self.gates.lock().unwrap().remove(&query.word);
            match gate {
                Some(rx) => rx.await.unwrap_or(Err(FetchError::Cancelled)),
                None => Err(FetchError::NotFound),
            }
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "gated".to_string(),
                endpoint: String::new(),
            }
        }
    }

    fn controller(fetcher: Arc<GatedFetcher>) -> QueryController {
        QueryController::new(fetcher, ResultFormatter::new(&DisplayConfig::default()))
    }

    fn entry(headword: &str, translation: &str) -> TranslationEntry {
        TranslationEntry {
            headword: headword.to_string(),
            part_of_speech: "interjection".to_string(),
            translations: vec![Translation::new(translation)],
            examples: vec![],
        }
    }

    async fn next(rx: &AsyncReceiver<FetchCompletion>) -> FetchCompletion {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("completion never arrived")
            .expect("completion channel closed")
    }

    #[tokio::test]
    async fn end_to_end_single_lookup() {
        let fetcher = Arc::new(GatedFetcher::default());
        let release = fetcher.gate("hello");
        let mut controller = controller(fetcher.clone());
        let completions = controller.completions();

        assert!(controller.handle_input("enfr hello").is_none());
        assert_eq!(controller.active_query().unwrap().word, "hello");

        release.send(Ok(vec![entry("hello", "bonjour")])).unwrap();
        let items = controller
            .handle_completion(next(&completions).await)
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "hello (interjection)");
        assert_eq!(items[0].subtitle, "bonjour");
        assert_eq!(items[0].copy_text(), Some("bonjour"));
        assert!(controller.is_idle());
    }

    #[tokio::test]
    async fn superseded_fetch_is_never_rendered() {
        let fetcher = Arc::new(GatedFetcher::default());
        let release_a = fetcher.gate("apple");
        let release_b = fetcher.gate("banana");
        let mut controller = controller(fetcher.clone());
        let completions = controller.completions();

        controller.handle_input("enfr apple");
        controller.handle_input("enfr banana");

        // A resolves late; the controller already cancelled it
        let _ = release_a.send(Ok(vec![entry("apple", "pomme")]));
        let stale = next(&completions).await;
        assert_eq!(stale.query.word, "apple");
        assert!(controller.handle_completion(stale).is_none());
        assert_eq!(controller.active_query().unwrap().word, "banana");

        release_b.send(Ok(vec![entry("banana", "banane")])).unwrap();
        let items = controller
            .handle_completion(next(&completions).await)
            .unwrap();
        assert_eq!(items[0].subtitle, "banane");
    }

    #[tokio::test]
    async fn stale_generation_with_results_is_dropped() {
        let fetcher = Arc::new(GatedFetcher::default());
        let _release = fetcher.gate("banana");
        let mut controller = controller(fetcher);

        controller.handle_input("enfr apple");
        let stale_generation = controller.generation();
        controller.handle_input("enfr banana");

        let stale = FetchCompletion {
            generation: stale_generation,
            query: parse("enfr apple").unwrap(),
            outcome: Ok(vec![entry("apple", "pomme")]),
        };
        assert!(controller.handle_completion(stale).is_none());
        assert!(!controller.is_idle());
    }

    #[tokio::test]
    async fn unsupported_pair_emits_error_without_fetching() {
        let fetcher = Arc::new(GatedFetcher::default());
        let mut controller = controller(fetcher.clone());

        let items = controller.handle_input("xxen car").unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Invalid language pair: xxen");
        assert!(controller.is_idle());
        tokio::task::yield_now().await;
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_error_supersedes_pending_fetch() {
        let fetcher = Arc::new(GatedFetcher::default());
        let release = fetcher.gate("hello");
        let mut controller = controller(fetcher.clone());
        let completions = controller.completions();

        controller.handle_input("enfr hello");
        let items = controller.handle_input("enfr").unwrap();
        assert_eq!(items[0].title, "Type a word to translate");
        assert!(controller.is_idle());

        let _ = release.send(Ok(vec![entry("hello", "bonjour")]));
        assert!(controller.handle_completion(next(&completions).await).is_none());
    }

    #[tokio::test]
    async fn network_error_renders_and_returns_to_idle() {
        let fetcher = Arc::new(GatedFetcher::default());
        let release = fetcher.gate("hello");
        let mut controller = controller(fetcher.clone());
        let completions = controller.completions();

        controller.handle_input("enfr hello");
        release
            .send(Err(FetchError::NetworkError("connection failed".to_string())))
            .unwrap();
        let items = controller
            .handle_completion(next(&completions).await)
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Network error");
        assert!(items[0].actions.is_empty());
        assert!(controller.is_idle());
    }

    #[tokio::test]
    async fn run_loop_emits_only_latest_results() {
        let fetcher = Arc::new(GatedFetcher::default());
        let release_a = fetcher.gate("apple");
        let release_b = fetcher.gate("banana");
        let controller = controller(fetcher.clone());

        let (input_tx, input_rx) = kanal::unbounded_async::<String>();
        let (output_tx, output_rx) = kanal::unbounded_async::<Vec<DisplayItem>>();
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(controller.run(input_rx, output_tx, shutdown.clone()));

        input_tx.send("enfr apple".to_string()).await.unwrap();
        input_tx.send("enfr banana".to_string()).await.unwrap();

        // The apple fetch may be cancelled before it ever reaches the fetcher
        timeout(Duration::from_secs(2), async {
            while !fetcher.calls().contains(&"banana".to_string()) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        let _ = release_a.send(Ok(vec![entry("apple", "pomme")]));
        release_b.send(Ok(vec![entry("banana", "banane")])).unwrap();

        let items = timeout(Duration::from_secs(2), output_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(items[0].subtitle, "banane");

        shutdown.cancel();
        timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(output_rx.is_empty());
    }

    #[tokio::test]
    async fn closed_input_still_delivers_pending_lookup() {
        let fetcher = Arc::new(GatedFetcher::default());
        let release = fetcher.gate("hello");
        let controller = controller(fetcher.clone());

        let (input_tx, input_rx) = kanal::unbounded_async::<String>();
        let (output_tx, output_rx) = kanal::unbounded_async::<Vec<DisplayItem>>();
        let task = tokio::spawn(controller.run(input_rx, output_tx, CancellationToken::new()));

        input_tx.send("enfr hello".to_string()).await.unwrap();
        timeout(Duration::from_secs(2), async {
            while fetcher.calls().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        drop(input_tx);
        release
            .send(Ok(vec![entry("hello", "bonjour")]))
            .unwrap();

        let items = timeout(Duration::from_secs(2), output_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(items[0].subtitle, "bonjour");

        // Run returns on its own and the output channel closes behind it
        timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(output_rx.recv().await.is_err());
    }

    #[tokio::test]
    async fn closed_input_while_idle_stops_the_loop() {
        let fetcher = Arc::new(GatedFetcher::default());
        let controller = controller(fetcher);

        let (input_tx, input_rx) = kanal::unbounded_async::<String>();
        let (output_tx, output_rx) = kanal::unbounded_async::<Vec<DisplayItem>>();
        let task = tokio::spawn(controller.run(input_rx, output_tx, CancellationToken::new()));

        input_tx.send("xxen car".to_string()).await.unwrap();
        let items = timeout(Duration::from_secs(2), output_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(items[0].title, "Invalid language pair: xxen");

        drop(input_tx);
        timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }
}
