//! Route definitions for users, mounted at `/user`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// POST   /{nickname}/create     -> create_user
/// GET    /{nickname}/profile    -> get_user
/// POST   /{nickname}/profile    -> update_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{nickname}/create", post(user::create_user))
        .route(
            "/{nickname}/profile",
            get(user::get_user).post(user::update_user),
        )
}
