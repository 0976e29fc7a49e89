use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from ticklist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Insert sample todos when storage comes back empty
    #[serde(default = "default_true")]
    pub seed_samples: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig { seed_samples: true }
    }
}

/// Where todos are kept between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `todos.json` in the data directory
    #[default]
    File,
    /// Nothing is written; saves are only logged
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Override for the todo file name, relative to the data directory
    #[serde(default)]
    pub file: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Hex colors for category badges, keyed by category name
    #[serde(default)]
    pub category_colors: HashMap<String, String>,
    /// Sort applied when the TUI starts, e.g. `"priority-desc"`
    #[serde(default)]
    pub default_sort: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            category_colors: HashMap::new(),
            default_sort: None,
        }
    }
}
