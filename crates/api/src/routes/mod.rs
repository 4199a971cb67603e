pub mod forum;
pub mod health;
pub mod post;
pub mod service;
pub mod thread;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/{nickname}/create              register (POST)
/// /user/{nickname}/profile             get, update (GET, POST)
///
/// /forum/create                        create forum (POST)
/// /forum/{slug}/details                get forum
/// /forum/{slug}/create                 open thread (POST)
/// /forum/{slug}/users                  list members
/// /forum/{slug}/threads                list threads
///
/// /thread/{slug_or_id}/details         get, update (GET, POST)
/// /thread/{slug_or_id}/create          create post batch (POST)
/// /thread/{slug_or_id}/posts           list posts
/// /thread/{slug_or_id}/vote            vote (POST)
///
/// /post/{id}/details                   get, update (GET, POST)
///
/// /service/status                      row counts
/// /service/clear                       drop all data (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/forum", forum::router())
        .nest("/thread", thread::router())
        .nest("/post", post::router())
        .nest("/service", service::router())
}
