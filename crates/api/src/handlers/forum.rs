//! Handlers for forums, their threads and their members.

use agora_core::creation::CreateOutcome;
use agora_core::error::CoreError;
use agora_core::pagination::normalize_limit;
use agora_core::types::Timestamp;
use agora_core::validation;
use agora_db::models::forum::{CreateForum, Forum};
use agora_db::models::thread::CreateThread;
use agora_db::repositories::{ForumRepo, ThreadRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::user::ensure_user_exists;
use crate::query::ListParams;
use crate::response::{created, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a forum by slug or fail with 404.
async fn ensure_forum_exists(pool: &sqlx::PgPool, slug: &str) -> AppResult<Forum> {
    ForumRepo::find_by_slug(pool, slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Forum", slug)))
}

/// Parse an RFC 3339 `since` value for thread listings.
fn parse_since(raw: Option<&str>) -> AppResult<Option<Timestamp>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&chrono::Utc))
                .map_err(|e| {
                    AppError::Core(CoreError::Validation(format!(
                        "since must be an RFC 3339 timestamp: {e}"
                    )))
                })
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// POST /forum/create
// ---------------------------------------------------------------------------

/// Create a forum owned by an existing user.
pub async fn create_forum(
    State(state): State<AppState>,
    Json(mut body): Json<CreateForum>,
) -> AppResult<impl IntoResponse> {
    validation::validate_slug(&body.slug)?;
    validation::validate_required("title", &body.title)?;

    let owner = ensure_user_exists(&state.pool, &body.owner).await?;
    body.owner = owner.nickname;

    match ForumRepo::create(&state.pool, &body).await? {
        CreateOutcome::Created(forum) => {
            tracing::info!(slug = %forum.slug, owner = %forum.owner, "Forum created");
            Ok(created(forum))
        }
        CreateOutcome::AlreadyExists(forum) => Err(AppError::already_exists("Forum", &forum)),
    }
}

// ---------------------------------------------------------------------------
// GET /forum/{slug}/details
// ---------------------------------------------------------------------------

/// Fetch a forum with its post and thread counters.
pub async fn get_forum(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let forum = ensure_forum_exists(&state.pool, &slug).await?;
    Ok(Json(DataResponse { data: forum }))
}

// ---------------------------------------------------------------------------
// POST /forum/{slug}/create
// ---------------------------------------------------------------------------

/// Open a thread in a forum.
pub async fn create_thread(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(mut body): Json<CreateThread>,
) -> AppResult<impl IntoResponse> {
    body.slug = body.slug.filter(|s| !s.is_empty());
    if let Some(thread_slug) = &body.slug {
        validation::validate_slug(thread_slug)?;
    }
    validation::validate_required("title", &body.title)?;
    validation::validate_required("message", &body.message)?;

    let forum = ensure_forum_exists(&state.pool, &slug).await?;
    let author = ensure_user_exists(&state.pool, &body.author).await?;
    body.author = author.nickname;

    match ThreadRepo::create(&state.pool, &forum.slug, &body).await? {
        CreateOutcome::Created(thread) => {
            tracing::info!(thread_id = thread.id, forum = %thread.forum, "Thread created");
            Ok(created(thread))
        }
        CreateOutcome::AlreadyExists(thread) => Err(AppError::already_exists("Thread", &thread)),
    }
}

// ---------------------------------------------------------------------------
// GET /forum/{slug}/users
// ---------------------------------------------------------------------------

/// List users who opened a thread or posted in the forum, by nickname.
pub async fn list_users(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let forum = ensure_forum_exists(&state.pool, &slug).await?;
    let limit = normalize_limit(params.limit)?;
    let since = params.since.as_deref().filter(|s| !s.is_empty());

    let users =
        UserRepo::list_forum_members(&state.pool, &forum.slug, since, params.desc, limit).await?;

    tracing::debug!(forum = %forum.slug, count = users.len(), "Listed forum users");

    Ok(Json(DataResponse { data: users }))
}

// ---------------------------------------------------------------------------
// GET /forum/{slug}/threads
// ---------------------------------------------------------------------------

/// List a forum's threads by creation time.
pub async fn list_threads(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let forum = ensure_forum_exists(&state.pool, &slug).await?;
    let limit = normalize_limit(params.limit)?;
    let since = parse_since(params.since.as_deref())?;

    let threads =
        ThreadRepo::list_by_forum(&state.pool, &forum.slug, since, params.desc, limit).await?;

    tracing::debug!(forum = %forum.slug, count = threads.len(), "Listed forum threads");

    Ok(Json(DataResponse { data: threads }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_accepts_rfc3339() {
        let parsed = parse_since(Some("2024-01-02T03:04:05+01:00")).unwrap().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-02T02:04:05+00:00");
        assert!(parse_since(None).unwrap().is_none());
        assert!(parse_since(Some("")).unwrap().is_none());
    }

    #[test]
    fn since_rejects_garbage() {
        assert!(parse_since(Some("yesterday")).is_err());
    }
}
