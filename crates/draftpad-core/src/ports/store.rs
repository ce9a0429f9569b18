use async_trait::async_trait;

use crate::error::StoreError;

/// Key under which the post collection is stored.
pub const POSTS_COLLECTION_KEY: &str = "blogs";

/// Key-value store trait - abstraction over where serialized collections live
/// (in-memory map, files on disk).
///
/// Values are whole serialized collections; writes replace the previous value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
