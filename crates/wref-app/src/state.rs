use tokio::sync::RwLock;
use wref_config::Config;
use wref_types::DisplayItem;

pub struct AppState {
    pub config: Config,
    /// Items currently on screen; `!copy N` / `!open N` index into these
    pub results: RwLock<Vec<DisplayItem>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            results: RwLock::new(Vec::new()),
        }
    }
}
