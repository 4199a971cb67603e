//! Route definitions for threads, mounted at `/thread`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::thread;
use crate::state::AppState;

/// ```text
/// GET    /{slug_or_id}/details   -> get_thread
/// POST   /{slug_or_id}/details   -> update_thread
/// POST   /{slug_or_id}/create    -> create_posts
/// GET    /{slug_or_id}/posts     -> list_posts
/// POST   /{slug_or_id}/vote      -> vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{slug_or_id}/details",
            get(thread::get_thread).post(thread::update_thread),
        )
        .route("/{slug_or_id}/create", post(thread::create_posts))
        .route("/{slug_or_id}/posts", get(thread::list_posts))
        .route("/{slug_or_id}/vote", post(thread::vote))
}
