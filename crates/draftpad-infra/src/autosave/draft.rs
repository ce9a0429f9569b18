use std::sync::Arc;

use tokio::sync::RwLock;

use draftpad_core::domain::Post;

/// Shared, live reference to the post being edited.
///
/// The presentation mutates the draft through this handle and the autosave
/// scheduler reads it when a save actually runs, never a stale copy.
#[derive(Debug, Clone, Default)]
pub struct DraftHandle {
    post: Arc<RwLock<Post>>,
}

impl DraftHandle {
    pub fn new(post: Post) -> Self {
        Self {
            post: Arc::new(RwLock::new(post)),
        }
    }

    /// Copy of the current draft.
    pub async fn snapshot(&self) -> Post {
        self.post.read().await.clone()
    }

    /// Mutate the draft in place.
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Post) -> R,
    {
        let mut post = self.post.write().await;
        f(&mut post)
    }

    pub async fn id(&self) -> String {
        self.post.read().await.id.clone()
    }

    /// Copy what the repository decided (identity, timestamps, status) into
    /// the draft without touching content edited while the save was running.
    pub(crate) async fn apply_saved(&self, saved: &Post) {
        let mut post = self.post.write().await;
        post.id.clone_from(&saved.id);
        post.status = saved.status;
        post.created_at = saved.created_at;
        post.updated_at = saved.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftpad_core::domain::PostStatus;

    #[tokio::test]
    async fn test_apply_saved_keeps_newer_content() {
        let draft = DraftHandle::new(Post::new("old", "body"));

        let mut saved = draft.snapshot().await;
        saved.id = "abc".into();
        saved.status = PostStatus::Published;

        draft.update(|p| p.title = "newer".into()).await;
        draft.apply_saved(&saved).await;

        let post = draft.snapshot().await;
        assert_eq!(post.id, "abc");
        assert_eq!(post.title, "newer");
        assert!(post.is_published());
    }
}
