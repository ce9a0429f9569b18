use async_trait::async_trait;

use crate::domain::{Post, PostFilter};
use crate::error::RepoError;

/// Post repository over the stored collection.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in storage order. An empty or absent collection is empty.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its identifier.
    async fn get(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Save a post (create or update) and return the canonical record.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by its identifier. Deleting an absent ID is a no-op.
    async fn delete(&self, id: &str) -> Result<(), RepoError>;

    /// Posts matching a list filter, in storage order.
    async fn list_by_status(&self, filter: PostFilter) -> Result<Vec<Post>, RepoError> {
        let posts = self.list().await?;
        Ok(posts.into_iter().filter(|p| filter.matches(p)).collect())
    }
}
