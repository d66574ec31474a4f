use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::display::DisplayConfig;
use self::fetcher::FetcherConfig;

pub mod display;
pub mod fetcher;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub display: DisplayConfig,

    /// Capacity of the input and output channels between host and controller
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let channel_capacity = env::var("WREF_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_channel_capacity);

        Config {
            fetcher: FetcherConfig::new(),
            display: DisplayConfig::new(),
            channel_capacity,
        }
    }

    /// Load a config file; missing fields fall back to their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            display: DisplayConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
