use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use wref_config::Config;
use wref_core::{QueryController, ResultFormatter};
use wref_fetcher::{HttpFetcher, TranslationFetcher};

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;


use self::controller::{AppController, AppTasks};
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "wref", about = "Translate words with WordReference", version)]
struct Cli {
    /// JSON config file; environment variables are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Look up a single input such as "enfr hello", print the results and exit
    #[arg(long, value_name = "INPUT")]
    once: Option<String>,

    /// Emit JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };

    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let metadata = fetcher.metadata();
    tracing::info!("using {} at {}", metadata.name, metadata.endpoint);
    let fetcher: Arc<dyn TranslationFetcher> = Arc::new(fetcher);

    if let Some(input) = cli.once {
        return lookup_once(&config, fetcher, &input, cli.json).await;
    }

    let capacity = config.channel_capacity.max(1);
    let state = Arc::new(AppState::new(config));
    let app = AppController::new(state, capacity);
    let mut tasks = app.spawn_tasks(fetcher, cli.json);
    app.spawn_stdin(&mut tasks);

    // Only the stdin watcher feeds events from here on, so EOF drains the pipeline
    let AppTasks {
        events,
        mut workers,
        mut output,
    } = tasks;
    drop(events);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
            result = &mut output => {
                match result {
                    Ok(Ok(())) => tracing::info!("output finished"),
                    Ok(Err(e)) => tracing::error!("output failed: {e:#}"),
                    Err(e) => tracing::error!("output panicked: {e}"),
                }
                break;
            }
            Some(result) = workers.join_next() => {
                match result {
                    Ok(Ok(())) => tracing::debug!("task finished"),
                    Ok(Err(e)) => {
                        tracing::error!("task failed: {e:#}");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("task panicked: {e}");
                        break;
                    }
                }
            }
        }
    }

    app.shutdown();
    workers.shutdown().await;
    output.abort();
    Ok(())
}

/// One-shot lookup without the interactive task set
async fn lookup_once(
    config: &Config,
    fetcher: Arc<dyn TranslationFetcher>,
    input: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = QueryController::new(fetcher, ResultFormatter::new(&config.display));
    let completions = controller.completions();

    let items = match controller.handle_input(input) {
        Some(items) => items,
        None => {
            // The fetcher enforces its own timeout; this only guards against a stuck task
            let deadline = config.fetcher.timeout() + Duration::from_secs(1);
            loop {
                let completion = tokio::time::timeout(deadline, completions.recv()).await??;
                if let Some(items) = controller.handle_completion(completion) {
                    break items;
                }
            }
        }
    };

    print!("{}", ui::render(&items, json)?);
    Ok(())
}
