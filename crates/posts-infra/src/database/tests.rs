use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use posts_core::domain::{Post, PostDraft, TitleInput};
use posts_core::error::RepoError;
use posts_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn row(id: i64, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn draft(title: &str) -> PostDraft {
    PostDraft::validate(TitleInput::Text(title.to_owned())).unwrap()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(1, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 1);
}

#[tokio::test]
async fn test_find_missing_post_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1000).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_all_maps_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(1, "a"), row(2, "b")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_all().await.unwrap();
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[tokio::test]
async fn test_insert_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(7, "El post de prueba")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.insert(draft("El post de prueba")).await.unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.title, "El post de prueba");
}

#[tokio::test]
async fn test_update_rewrites_title() {
    let original = row(3, "old");
    let mut updated = original.clone();
    updated.title = "nuevo".to_owned();
    updated.updated_at = (Utc::now() + TimeDelta::seconds(5)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![original.clone()], vec![updated]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.update(3, draft("nuevo")).await.unwrap();
    assert_eq!(post.title, "nuevo");
    assert_eq!(post.created_at, Post::from(original).created_at);
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let err = repo.update(1000, draft("nuevo")).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_reports_missing_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    BaseRepository::<Post, i64>::delete(&repo, 1).await.unwrap();
    let err = BaseRepository::<Post, i64>::delete(&repo, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}
