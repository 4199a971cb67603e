//! Route definitions for posts, mounted at `/post`.

use axum::routing::get;
use axum::Router;

use crate::handlers::post;
use crate::state::AppState;

/// ```text
/// GET    /{id}/details   -> get_post
/// POST   /{id}/details   -> update_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/details", get(post::get_post).post(post::update_post))
}
