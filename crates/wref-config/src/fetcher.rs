use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "http://127.0.0.1:8787/translate".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    concat!("wref/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Dictionary service connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FetcherConfig {
    /// Endpoint of the dictionary lookup service; `/{pair}/{word}` is appended
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound on a single lookup, including connect time
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    pub fn new() -> Self {
        let api_url = env::var("WREF_API_URL").unwrap_or_else(|_| default_api_url());

        let timeout_ms = env::var("WREF_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_ms);

        Self {
            api_url,
            timeout_ms,
            user_agent: default_user_agent(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}
