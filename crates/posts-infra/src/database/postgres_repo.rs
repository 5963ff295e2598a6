//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};

use posts_core::domain::{Post, PostDraft, PostId};
use posts_core::error::RepoError;
use posts_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, read_error, write_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(read_error)?;

        tracing::debug!(count = rows.len(), "Listed posts");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();

        // id is left unset so the sequence assigns it
        let model = post::ActiveModel {
            title: Set(draft.into_title()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(write_error)?;

        tracing::debug!(post_id = model.id, "Inserted post row");
        Ok(model.into())
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        active.title = Set(draft.into_title());
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(write_error)?;

        tracing::debug!(post_id = model.id, "Updated post row");
        Ok(model.into())
    }
}
