//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use campus_data::{DataStore, InMemoryStore, PolicyStore};
use tracing::debug;

use crate::config::{CampusConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CampusConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CampusConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CampusConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve the catalog file. Relative paths in the config file are
    /// relative to the file's directory.
    pub fn catalog_path(&self, explicit: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }

        let Some(catalog) = &self.config.store.catalog else {
            bail!("No catalog configured. Pass --catalog or set store.catalog in campus.toml.");
        };
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| self.cwd.join(dir))
            .unwrap_or_else(|| self.cwd.clone());
        Ok(base.join(catalog))
    }

    /// Open the catalog behind the configured timeout and retry policy.
    pub async fn open_store(&self, explicit: Option<&str>) -> Result<Arc<dyn DataStore>> {
        let path = self.catalog_path(explicit)?;
        debug!(catalog = %path.display(), "opening catalog");

        let store = InMemoryStore::from_json_file(&path)
            .await
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        let policy = self.config.store.fetch_policy();
        Ok(Arc::new(PolicyStore::new(store, policy)))
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<(PathBuf, CampusConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CampusConfig::load(&config_path) {
                    return Some((config_path, config));
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
