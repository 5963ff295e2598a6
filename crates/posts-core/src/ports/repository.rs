use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId};
use crate::error::RepoError;

/// Generic repository trait for keyed lookups and removal.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, ordered by ascending id.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post. The store assigns the id and both timestamps.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Replace the title of an existing post and refresh `updated_at`.
    /// Fails with `RepoError::NotFound` when the id is unknown.
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError>;
}
