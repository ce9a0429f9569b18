//! Post repository over a single serialized collection in a key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use draftpad_core::domain::Post;
use draftpad_core::error::RepoError;
use draftpad_core::ports::{Clock, KeyValueStore, POSTS_COLLECTION_KEY, PostRepository};

/// Repository that keeps every post in one JSON array under one store key.
///
/// Each mutation is a read-modify-write of the whole collection. It is not
/// transactional: two concurrent writers sharing a store can lose updates.
#[derive(Clone)]
pub struct CollectionPostRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    key: String,
}

impl CollectionPostRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            key: POSTS_COLLECTION_KEY.to_string(),
        }
    }

    async fn load(&self) -> Result<Vec<Post>, RepoError> {
        match self.store.read(&self.key).await? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn store_all(&self, posts: &[Post]) -> Result<(), RepoError> {
        let raw = serde_json::to_string(posts)?;
        self.store.write(&self.key, &raw).await?;
        Ok(())
    }

    fn fresh_id(posts: &[Post]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !posts.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl PostRepository for CollectionPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        match self.load().await {
            Ok(posts) => Ok(posts),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Collection unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, "Finding post by id");
        let posts = self.list().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        // A failed read must not be turned into an empty collection here, or
        // the write below would wipe every stored post.
        let mut posts = self.load().await?;
        let now = self.clock.now();

        let existing = if post.is_persisted() {
            posts.iter().position(|p| p.id == post.id)
        } else {
            None
        };

        match existing {
            Some(index) => {
                let created_at = posts[index].created_at.or(post.created_at).unwrap_or(now);
                post.created_at = Some(created_at);
                post.updated_at = Some(now.max(created_at));
                posts[index] = post.clone();
                tracing::debug!(post_id = %post.id, "Post updated");
            }
            None => {
                post.id = Self::fresh_id(&posts);
                post.created_at = Some(now);
                post.updated_at = Some(now);
                posts.push(post.clone());
                tracing::debug!(post_id = %post.id, "Post created");
            }
        }

        self.store_all(&posts).await?;
        Ok(post)
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let mut posts = self.load().await?;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            tracing::debug!(post_id = %id, "Delete of absent post ignored");
            return Ok(());
        }

        self.store_all(&posts).await?;
        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::InMemoryStore;
    use chrono::{Duration, Utc};
    use draftpad_core::domain::{PostFilter, PostStatus};

    fn setup() -> (Arc<InMemoryStore>, Arc<ManualClock>, CollectionPostRepository) {
        let store = Arc::new(InMemoryStore::default());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let repo = CollectionPostRepository::new(store.clone(), clock.clone());
        (store, clock, repo)
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let (_, _, repo) = setup();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_new_assigns_id_and_timestamps() {
        let (_, _, repo) = setup();

        let a = repo.save(Post::new("First", "one")).await.unwrap();
        let b = repo.save(Post::new("Second", "two")).await.unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());
        assert_eq!(a.created_at, a.updated_at);

        let titles: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_save_existing_preserves_created_at() {
        let (_, clock, repo) = setup();

        let mut post = repo.save(Post::new("Draft", "")).await.unwrap();
        let created = post.created_at;
        let id = post.id.clone();

        clock.advance(Duration::seconds(30));
        post.title = "Edited".into();
        post.created_at = None;
        let saved = repo.save(post).await.unwrap();

        assert_eq!(saved.id, id);
        assert_eq!(saved.created_at, created);
        assert!(saved.updated_at > created);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Edited");
    }

    #[tokio::test]
    async fn test_clock_behind_created_at_keeps_timestamps_ordered() {
        let (_, clock, repo) = setup();
        let post = repo.save(Post::new("Draft", "")).await.unwrap();
        let created = post.created_at.unwrap();

        clock.set(created - Duration::minutes(5));
        let saved = repo.save(post).await.unwrap();

        assert_eq!(saved.created_at, Some(created));
        assert_eq!(saved.updated_at, Some(created));
    }

    #[tokio::test]
    async fn test_save_unknown_id_appends_with_new_id() {
        let (_, _, repo) = setup();
        let mut post = Post::new("Orphan", "");
        post.id = "gone".into();

        let saved = repo.save(post).await.unwrap();
        assert_ne!(saved.id, "gone");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_finds_by_id() {
        let (_, _, repo) = setup();
        let saved = repo.save(Post::new("Find me", "")).await.unwrap();

        let found = repo.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (_, _, repo) = setup();
        repo.save(Post::new("A", "")).await.unwrap();
        repo.save(Post::new("B", "")).await.unwrap();

        repo.delete("missing-id").await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let (_, _, repo) = setup();
        let a = repo.save(Post::new("A", "")).await.unwrap();
        let b = repo.save(Post::new("B", "")).await.unwrap();

        repo.delete(&a.id).await.unwrap();
        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining, vec![b]);
    }

    #[tokio::test]
    async fn test_unavailable_store_lists_empty_but_save_fails() {
        let (store, _, repo) = setup();
        repo.save(Post::new("Kept", "")).await.unwrap();

        store.set_available(false);
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.save(Post::new("Lost", "")).await,
            Err(RepoError::Persistence(_))
        ));

        store.set_available(true);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_not_overwritten() {
        let (store, _, repo) = setup();
        store.write(POSTS_COLLECTION_KEY, "{not json").await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.save(Post::new("x", "")).await,
            Err(RepoError::Serialization(_))
        ));
        assert_eq!(
            store.read(POSTS_COLLECTION_KEY).await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let (_, _, repo) = setup();
        repo.save(Post::new("Draft", "")).await.unwrap();
        let mut published = Post::new("Live", "");
        published.status = PostStatus::Published;
        repo.save(published).await.unwrap();

        let drafts = repo.list_by_status(PostFilter::Drafts).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Draft");
        assert_eq!(repo.list_by_status(PostFilter::All).await.unwrap().len(), 2);
    }
}
