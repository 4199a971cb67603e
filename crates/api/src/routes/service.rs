//! Route definitions for maintenance, mounted at `/service`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// ```text
/// GET    /status   -> status
/// POST   /clear    -> clear
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(service::status))
        .route("/clear", post(service::clear))
}
