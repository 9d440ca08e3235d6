//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use campus_browse::BrowseConfig;
use campus_data::StoreConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["campus.toml", ".campus.toml", "campus.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusConfig {
    /// Search results page settings.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Data store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CampusConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default campus.toml config file.
pub fn generate_default_config() -> String {
    r#"# Campus marketplace configuration

[browse]
page_size = 24
pagination = "paged"
debounce_ms = 300
candidate_limit = 200
price_ceiling = 50000
visible_page_delta = 2

[store]
catalog = "data/catalog.json"
timeout_ms = 5000
max_retries = 2
"#
    .to_string()
}
