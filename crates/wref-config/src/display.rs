use std::env;

use serde::{Deserialize, Serialize};

fn default_lookup_base_url() -> String {
    "https://www.wordreference.com".to_string()
}

fn default_separator() -> String {
    "; ".to_string()
}

fn default_full_page_item() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    /// Site the "open in browser" actions point at
    #[serde(default = "default_lookup_base_url")]
    pub lookup_base_url: String,
    /// Joins the translations of one entry in the subtitle
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Append a trailing "open full page" item after the entries
    #[serde(default = "default_full_page_item")]
    pub full_page_item: bool,
}

impl DisplayConfig {
    pub fn new() -> Self {
        let lookup_base_url =
            env::var("WREF_LOOKUP_URL").unwrap_or_else(|_| default_lookup_base_url());

        Self {
            lookup_base_url,
            ..Self::default()
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            lookup_base_url: default_lookup_base_url(),
            separator: default_separator(),
            full_page_item: default_full_page_item(),
        }
    }
}
