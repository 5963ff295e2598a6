//! Post service - the five resource operations over a `PostRepository`.

use std::sync::Arc;

use crate::domain::{Post, PostDraft, PostId, TitleInput};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Validates input and drives the repository for every post operation.
///
/// Callers are expected to have authenticated the principal already; the
/// service never sees unauthenticated traffic.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn create(&self, title: TitleInput) -> Result<Post, DomainError> {
        let draft = PostDraft::validate(title).map_err(DomainError::Validation)?;
        let post = self.repo.insert(draft).await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    pub async fn show(&self, id: PostId) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: Post::ENTITY,
                id,
            })
    }

    /// The row is looked up before the title is validated, so a missing id
    /// wins over a bad title.
    pub async fn update(&self, id: PostId, title: TitleInput) -> Result<Post, DomainError> {
        self.show(id).await?;

        let draft = PostDraft::validate(title).map_err(DomainError::Validation)?;
        let post = self.repo.update(id, draft).await.map_err(missing(id))?;

        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(missing(id))?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn missing(id: PostId) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: Post::ENTITY,
            id,
        },
        other => DomainError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::ports::BaseRepository;

    /// Vec-backed repository that counts every call it receives.
    #[derive(Default)]
    struct RecordingRepository {
        rows: Mutex<Vec<Post>>,
        calls: AtomicUsize,
    }

    impl RecordingRepository {
        fn touch(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BaseRepository<Post, PostId> for RecordingRepository {
        async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
            self.touch();
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|p| p.id == id).cloned())
        }

        async fn delete(&self, id: PostId) -> Result<(), RepoError> {
            self.touch();
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|p| p.id != id);
            if rows.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepository {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            self.touch();
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
            self.touch();
            let mut rows = self.rows.lock().unwrap();
            let now = Utc::now();
            let post = Post {
                id: rows.len() as PostId + 1,
                title: draft.into_title(),
                created_at: now,
                updated_at: now,
            };
            rows.push(post.clone());
            Ok(post)
        }

        async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
            self.touch();
            let mut rows = self.rows.lock().unwrap();
            let post = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            post.title = draft.into_title();
            post.updated_at = Utc::now();
            Ok(post.clone())
        }
    }

    fn service() -> (PostService, Arc<RecordingRepository>) {
        let repo = Arc::new(RecordingRepository::default());
        (PostService::new(repo.clone()), repo)
    }

    fn title(s: &str) -> TitleInput {
        TitleInput::Text(s.to_string())
    }

    #[tokio::test]
    async fn test_create_then_show() {
        let (service, _) = service();

        let created = service.create(title("El post de prueba")).await.unwrap();
        assert_eq!(created.title, "El post de prueba");
        assert_eq!(created.created_at, created.updated_at);

        let shown = service.show(created.id).await.unwrap();
        assert_eq!(shown, created);
    }

    #[tokio::test]
    async fn test_invalid_title_never_reaches_repository() {
        let (service, repo) = service();

        let err = service.create(title("")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref e) if !e.messages("title").is_empty()));

        assert_eq!(repo.calls(), 0);

        let post = service.create(title("keep me")).await.unwrap();
        let before = repo.calls();

        let err = service.update(post.id, TitleInput::Missing).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Only the existence lookup ran; nothing was written.
        assert_eq!(repo.calls(), before + 1);
        assert_eq!(service.show(post.id).await.unwrap().title, "keep me");
    }

    #[tokio::test]
    async fn test_update_unknown_id_with_bad_title_is_not_found() {
        let (service, _) = service();

        let err = service.update(1000, title("")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 1000, .. }));
    }

    #[tokio::test]
    async fn test_show_unknown_id_is_not_found() {
        let (service, _) = service();
        service.create(title("one")).await.unwrap();

        let err = service.show(1000).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 1000, .. }));
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let (service, _) = service();
        let post = service.create(title("old")).await.unwrap();

        let first = service.update(post.id, title("nuevo")).await.unwrap();
        let second = service.update(post.id, title("nuevo")).await.unwrap();

        assert_eq!(first.title, "nuevo");
        assert_eq!(second.title, "nuevo");
        assert_eq!(second.created_at, post.created_at);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_are_not_found() {
        let (service, _) = service();

        let err = service.update(7, title("nuevo")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 7, .. }));

        let err = service.delete(7).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn test_delete_then_show_is_not_found() {
        let (service, _) = service();
        let post = service.create(title("short lived")).await.unwrap();

        service.delete(post.id).await.unwrap();

        assert!(matches!(
            service.show(post.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
