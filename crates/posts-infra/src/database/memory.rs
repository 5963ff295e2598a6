//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use posts_core::domain::{Post, PostDraft, PostId};
use posts_core::error::RepoError;
use posts_core::ports::{BaseRepository, PostRepository};

/// In-memory post store backed by a `BTreeMap` behind an async `RwLock`.
///
/// Ids start at 1 and are never reused, even after deletion.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    rows: RwLock<BTreeMap<PostId, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.values().cloned().collect())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;

        let now = Utc::now();
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: draft.into_title(),
            created_at: now,
            updated_at: now,
        };
        rows.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, "Inserted post in memory");
        Ok(post)
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let post = rows.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.title = draft.into_title();
        post.updated_at = Utc::now();

        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use posts_core::domain::TitleInput;

    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft::validate(TitleInput::Text(title.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();

        let first = repo.insert(draft("first")).await.unwrap();
        let second = repo.insert(draft("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();

        let first = repo.insert(draft("first")).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.insert(draft("second")).await.unwrap();

        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryPostRepository::new();
        for title in ["a", "b", "c"] {
            repo.insert(draft(title)).await.unwrap();
        }

        let titles: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(draft("old")).await.unwrap();

        let updated = repo.update(post.id, draft("nuevo")).await.unwrap();

        assert_eq!(updated.title, "nuevo");
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_missing_rows_report_not_found() {
        let repo = InMemoryPostRepository::new();

        assert!(matches!(
            repo.update(9, draft("x")).await.unwrap_err(),
            RepoError::NotFound
        ));
        assert!(matches!(
            repo.delete(9).await.unwrap_err(),
            RepoError::NotFound
        ));
    }
}
