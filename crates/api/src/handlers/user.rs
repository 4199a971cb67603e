//! Handlers for user registration and profiles.

use agora_core::creation::CreateOutcome;
use agora_core::error::CoreError;
use agora_core::validation;
use agora_db::models::user::{CreateUser, UpdateUser, User};
use agora_db::repositories::UserRepo;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// Fetch a user by nickname or fail with 404.
pub(crate) async fn ensure_user_exists(pool: &sqlx::PgPool, nickname: &str) -> AppResult<User> {
    UserRepo::find_by_nickname(pool, nickname)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", nickname)))
}

// ---------------------------------------------------------------------------
// POST /user/{nickname}/create
// ---------------------------------------------------------------------------

/// Register a user.
///
/// When the nickname or email is taken, responds 409 with every user
/// holding either of them.
pub async fn create_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Json(body): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    validation::validate_nickname(&nickname)?;
    validation::validate_email(&body.email)?;

    match UserRepo::create(&state.pool, &nickname, &body).await? {
        CreateOutcome::Created(user) => {
            tracing::info!(nickname = %user.nickname, "User created");
            Ok(created(user))
        }
        CreateOutcome::AlreadyExists(users) => {
            tracing::debug!(%nickname, count = users.len(), "User registration collided");
            Err(AppError::already_exists("User", &users))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /user/{nickname}/profile
// ---------------------------------------------------------------------------

/// Fetch a user profile.
pub async fn get_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user_exists(&state.pool, &nickname).await?;
    Ok(Json(DataResponse { data: user }))
}

// ---------------------------------------------------------------------------
// POST /user/{nickname}/profile
// ---------------------------------------------------------------------------

/// Update a user profile. An empty payload returns the current profile.
pub async fn update_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Json(body): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let current = ensure_user_exists(&state.pool, &nickname).await?;
    let update = body.normalized();
    if update.is_empty() {
        return Ok(Json(DataResponse { data: current }));
    }

    if let Some(email) = &update.email {
        validation::validate_email(email)?;
        if let Some(holder) = UserRepo::find_by_email(&state.pool, email).await? {
            if !holder.nickname.eq_ignore_ascii_case(&current.nickname) {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "This email is already registered by user: {}",
                    holder.nickname
                ))));
            }
        }
    }

    let user = UserRepo::update(&state.pool, &current.nickname, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", &nickname)))?;

    tracing::info!(nickname = %user.nickname, "User profile updated");

    Ok(Json(DataResponse { data: user }))
}
