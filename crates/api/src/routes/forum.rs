//! Route definitions for forums, mounted at `/forum`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forum;
use crate::state::AppState;

/// ```text
/// POST   /create              -> create_forum
/// GET    /{slug}/details      -> get_forum
/// POST   /{slug}/create       -> create_thread
/// GET    /{slug}/users        -> list_users
/// GET    /{slug}/threads      -> list_threads
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(forum::create_forum))
        .route("/{slug}/details", get(forum::get_forum))
        .route("/{slug}/create", post(forum::create_thread))
        .route("/{slug}/users", get(forum::list_users))
        .route("/{slug}/threads", get(forum::list_threads))
}
