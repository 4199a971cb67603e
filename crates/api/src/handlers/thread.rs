//! Handlers for threads: details, edits, post batches, listings and votes.
//!
//! Every route addresses the thread by `{slug_or_id}`, resolved first as a
//! numeric id and then as a case-sensitive slug.

use agora_core::error::CoreError;
use agora_core::pagination::{PostCursor, PostPage, SortMode};
use agora_core::thread_ref::ThreadRef;
use agora_core::vote::VoteValue;
use agora_db::models::post::{BatchInsert, NewPost, Post};
use agora_db::models::thread::{Thread, UpdateThread};
use agora_db::models::vote::CastVote;
use agora_db::repositories::{PostRepo, ThreadRepo, UserRepo, VoteRepo};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::user::ensure_user_exists;
use crate::query::PostListParams;
use crate::response::{created, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve `{slug_or_id}` to a thread or fail with 404.
async fn resolve_thread(pool: &sqlx::PgPool, raw: &str) -> AppResult<Thread> {
    let thread_ref = ThreadRef::parse(raw);
    ThreadRepo::resolve(pool, &thread_ref)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Thread", &thread_ref)))
}

// ---------------------------------------------------------------------------
// GET /thread/{slug_or_id}/details
// ---------------------------------------------------------------------------

/// Fetch a thread.
pub async fn get_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let thread = resolve_thread(&state.pool, &slug_or_id).await?;
    Ok(Json(DataResponse { data: thread }))
}

// ---------------------------------------------------------------------------
// POST /thread/{slug_or_id}/details
// ---------------------------------------------------------------------------

/// Edit a thread's title and/or message. An empty payload returns the
/// thread unchanged.
pub async fn update_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(body): Json<UpdateThread>,
) -> AppResult<impl IntoResponse> {
    let thread = resolve_thread(&state.pool, &slug_or_id).await?;
    if body.is_empty() {
        return Ok(Json(DataResponse { data: thread }));
    }

    let thread = ThreadRepo::update(
        &state.pool,
        thread.id,
        body.title.as_deref(),
        body.message.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Thread", thread.id)))?;

    tracing::info!(thread_id = thread.id, "Thread updated");

    Ok(Json(DataResponse { data: thread }))
}

// ---------------------------------------------------------------------------
// POST /thread/{slug_or_id}/create
// ---------------------------------------------------------------------------

/// Create a batch of posts in a thread, all or nothing.
///
/// Authors are checked before anything is written. A parent that is
/// missing or lives in another thread rejects the whole batch with 409.
pub async fn create_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(mut posts): Json<Vec<NewPost>>,
) -> AppResult<impl IntoResponse> {
    let thread = resolve_thread(&state.pool, &slug_or_id).await?;
    if posts.is_empty() {
        return Ok(created(Vec::<Post>::new()));
    }

    let authors: Vec<String> = posts.iter().map(|p| p.author.clone()).collect();
    let canonical = UserRepo::canonical_nicknames(&state.pool, &authors).await?;
    for post in &mut posts {
        let nickname = canonical
            .get(&post.author.to_ascii_lowercase())
            .ok_or_else(|| AppError::Core(CoreError::not_found("User", &post.author)))?;
        post.author = nickname.clone();
    }

    match PostRepo::create_batch(&state.pool, &thread, &posts).await? {
        BatchInsert::Inserted(inserted) => {
            tracing::info!(thread_id = thread.id, count = inserted.len(), "Posts created");
            Ok(created(inserted))
        }
        BatchInsert::OrphanParent { parent } => {
            tracing::debug!(thread_id = thread.id, parent, "Post batch rejected");
            Err(AppError::Core(CoreError::Conflict(format!(
                "Parent post {parent} was created in another thread"
            ))))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /thread/{slug_or_id}/posts
// ---------------------------------------------------------------------------

/// List one page of a thread's posts.
///
/// `since` is the id of the last post already seen. In the tree modes it is
/// resolved to that post's path, which must belong to this thread.
pub async fn list_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Query(params): Query<PostListParams>,
) -> AppResult<impl IntoResponse> {
    let thread = resolve_thread(&state.pool, &slug_or_id).await?;
    let mode = SortMode::parse(params.sort.as_deref())?;
    let mut page = PostPage::new(mode, params.desc, params.limit)?;

    if let Some(since) = params.since {
        let cursor = if mode.uses_path_cursor() {
            let path = PostRepo::find_path(&state.pool, thread.id, since)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!(
                        "since post {since} does not belong to thread {}",
                        thread.id
                    )))
                })?;
            PostCursor::Path(path)
        } else {
            PostCursor::Id(since)
        };
        page = page.with_cursor(cursor)?;
    }

    let posts = PostRepo::list_by_thread(&state.pool, thread.id, &page).await?;

    tracing::debug!(
        thread_id = thread.id,
        sort = mode.as_str(),
        count = posts.len(),
        "Listed thread posts"
    );

    Ok(Json(DataResponse { data: posts }))
}

// ---------------------------------------------------------------------------
// POST /thread/{slug_or_id}/vote
// ---------------------------------------------------------------------------

/// Cast or change a vote and return the rescored thread.
pub async fn vote(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(body): Json<CastVote>,
) -> AppResult<impl IntoResponse> {
    let value = VoteValue::try_from(body.voice)?;
    let thread = resolve_thread(&state.pool, &slug_or_id).await?;
    let voter = ensure_user_exists(&state.pool, &body.nickname).await?;

    let thread = VoteRepo::cast(&state.pool, thread.id, &voter.nickname, value)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Thread", thread.id)))?;

    tracing::info!(
        thread_id = thread.id,
        voter = %voter.nickname,
        voice = value.as_i16(),
        votes = thread.votes,
        "Vote recorded"
    );

    Ok(Json(DataResponse { data: thread }))
}
