//! File-backed key-value store - one JSON file per key in a data directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use draftpad_core::error::StoreError;
use draftpad_core::ports::KeyValueStore;

/// Store that keeps each value in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash never leaves a half-written collection behind.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", dir.display())))?;
        tracing::info!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Io(format!("invalid store key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {e}", path.display()))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))?;

        tracing::debug!(key = %key, bytes = value.len(), "Value written to disk");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store.write("blogs", "[]").await.unwrap();
        assert_eq!(store.read("blogs").await.unwrap(), Some("[]".to_string()));
        assert!(dir.path().join("blogs.json").exists());
        assert!(!dir.path().join("blogs.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_absent_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).await.unwrap();
        assert_eq!(store.read("blogs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.write("../escape", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.write("blogs", "[1]").await.unwrap();
        }
        let store = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(store.read("blogs").await.unwrap(), Some("[1]".to_string()));
    }

    #[tokio::test]
    async fn test_posts_survive_reopen() {
        use std::sync::Arc;

        use draftpad_core::domain::Post;
        use draftpad_core::ports::PostRepository;

        use crate::clock::SystemClock;
        use crate::repository::CollectionPostRepository;

        let dir = tempfile::tempdir().unwrap();
        let saved = {
            let store = Arc::new(FileStore::open(dir.path()).await.unwrap());
            let repo = CollectionPostRepository::new(store, Arc::new(SystemClock));
            repo.save(Post::new("Persisted", "on disk")).await.unwrap()
        };

        let store = Arc::new(FileStore::open(dir.path()).await.unwrap());
        let repo = CollectionPostRepository::new(store, Arc::new(SystemClock));
        assert_eq!(repo.get(&saved.id).await.unwrap(), Some(saved));
    }
}
