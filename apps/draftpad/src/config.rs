//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use draftpad_infra::{AutosaveConfig, InMemoryStoreConfig};

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Directory for the file store. `None` keeps posts in memory only.
    pub data_dir: Option<PathBuf>,
    pub autosave: AutosaveConfig,
    pub memory_store: InMemoryStoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DRAFTPAD_DATA_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            autosave: AutosaveConfig::from_env(),
            memory_store: InMemoryStoreConfig::from_env(),
        }
    }
}
