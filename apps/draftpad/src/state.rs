//! Application state - the store and repository shared by every session.

use std::sync::Arc;

use draftpad_core::ports::{KeyValueStore, PostRepository};
use draftpad_infra::{CollectionPostRepository, InMemoryStore, SystemClock};

#[cfg(feature = "file-store")]
use draftpad_infra::FileStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with the configured store.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "file-store")]
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir).await?),
            None => {
                tracing::warn!("DRAFTPAD_DATA_DIR not set. Posts are kept in memory only.");
                Arc::new(InMemoryStore::new(config.memory_store.clone()))
            }
        };

        #[cfg(not(feature = "file-store"))]
        let store: Arc<dyn KeyValueStore> = {
            if config.data_dir.is_some() {
                tracing::warn!("Built without file-store feature - ignoring DRAFTPAD_DATA_DIR");
            }
            Arc::new(InMemoryStore::new(config.memory_store.clone()))
        };

        Ok(Self::with_store(store))
    }

    /// State over an explicit store.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = Arc::new(CollectionPostRepository::new(store, Arc::new(SystemClock)));
        tracing::info!("Application state initialized");
        Self { repo }
    }
}
