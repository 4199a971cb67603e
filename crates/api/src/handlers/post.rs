//! Handlers for single posts.

use agora_core::error::CoreError;
use agora_core::related::RelatedFlags;
use agora_core::types::DbId;
use agora_db::models::post::{Post, PostDetails, UpdatePost};
use agora_db::repositories::{ForumRepo, PostRepo, ThreadRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::query::RelatedParams;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_post_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Post> {
    PostRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Post", id)))
}

// ---------------------------------------------------------------------------
// GET /post/{id}/details
// ---------------------------------------------------------------------------

/// Fetch a post, optionally with its author, thread and forum.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RelatedParams>,
) -> AppResult<impl IntoResponse> {
    let related = RelatedFlags::parse(params.related.as_deref())?;
    let post = ensure_post_exists(&state.pool, id).await?;

    let author = if related.user {
        UserRepo::find_by_nickname(&state.pool, &post.author).await?
    } else {
        None
    };
    let thread = if related.thread {
        ThreadRepo::find_by_id(&state.pool, post.thread).await?
    } else {
        None
    };
    let forum = if related.forum {
        ForumRepo::find_by_slug(&state.pool, &post.forum).await?
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: PostDetails {
            post,
            author,
            thread,
            forum,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /post/{id}/details
// ---------------------------------------------------------------------------

/// Edit a post's message. An empty payload returns the post unchanged.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    let Some(message) = body.message.filter(|m| !m.is_empty()) else {
        let post = ensure_post_exists(&state.pool, id).await?;
        return Ok(Json(DataResponse { data: post }));
    };

    let post = PostRepo::update_message(&state.pool, id, &message)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Post", id)))?;

    tracing::info!(post_id = id, is_edited = post.is_edited, "Post updated");

    Ok(Json(DataResponse { data: post }))
}
