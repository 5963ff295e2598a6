//! Post resource handlers.
//!
//! Every handler takes [`Identity`] first, so authentication is settled
//! before the path or body is parsed and before storage is touched.

use actix_web::{HttpResponse, http::header, web};

use posts_core::domain::{Post, PostId, TitleInput};
use posts_shared::DataEnvelope;
use posts_shared::dto::{PostRequest, PostResponse, TitleField};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn index(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    tracing::debug!(subject = %identity.subject, "Listing posts");

    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(DataEnvelope::new(body)))
}

/// POST /api/posts
pub async fn store(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(title_input(body.into_inner())).await?;
    tracing::debug!(subject = %identity.subject, post_id = post.id, "Stored post");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/posts/{}", post.id)))
        .json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn show(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.show(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(path.into_inner(), title_input(body.into_inner()))
        .await?;
    tracing::debug!(subject = %identity.subject, post_id = post.id, "Updated post");

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::debug!(subject = %identity.subject, post_id = id, "Deleted post");

    Ok(HttpResponse::NoContent().finish())
}

fn title_input(req: PostRequest) -> TitleInput {
    match req.title {
        None => TitleInput::Missing,
        Some(TitleField::Text(text)) => TitleInput::Text(text),
        Some(TitleField::Other(_)) => TitleInput::NotText,
    }
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
