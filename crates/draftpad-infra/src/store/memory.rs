//! In-memory key-value store - the default when no data directory is configured.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use draftpad_core::error::StoreError;
use draftpad_core::ports::KeyValueStore;

/// In-memory store configuration.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreConfig {
    /// Artificial delay applied to every read and write.
    pub latency: Duration,
}

impl InMemoryStoreConfig {
    pub fn from_env() -> Self {
        Self {
            latency: std::env::var("STORE_LATENCY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or_default(),
        }
    }
}

/// In-memory store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    config: InMemoryStoreConfig,
    available: AtomicBool,
}

impl InMemoryStore {
    pub fn new(config: InMemoryStoreConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            available: AtomicBool::new(true),
        }
    }

    /// Toggle availability. While unavailable every call fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    async fn simulate(&self, op: &'static str, key: &str) -> Result<(), StoreError> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
        if !self.available.load(Ordering::SeqCst) {
            tracing::warn!(key = %key, op, "In-memory store is unavailable");
            return Err(StoreError::Unavailable(format!("{op} {key}")));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(InMemoryStoreConfig::default())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.simulate("read", key).await?;
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.simulate("write", key).await?;
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        tracing::debug!(key = %key, bytes = value.len(), "Value written");
        Ok(())
    }
}
