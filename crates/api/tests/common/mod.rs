#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use agora_api::config::ServerConfig;
use agora_api::router::build_app_router;
use agora_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        slow_request_threshold_ms: 30,
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Goes through the same builder as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a GET request to the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body to the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user whose email is `{nickname}@example.org`.
pub async fn create_user(pool: &PgPool, nickname: &str) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/user/{nickname}/create"),
        serde_json::json!({
            "fullname": format!("{nickname} Doe"),
            "email": format!("{nickname}@example.org"),
            "about": "",
        }),
    )
    .await;
    body_json(response).await
}

/// Create a forum owned by `owner`.
pub async fn create_forum(pool: &PgPool, slug: &str, owner: &str) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/forum/create",
        serde_json::json!({ "slug": slug, "title": "Test forum", "user": owner }),
    )
    .await;
    body_json(response).await
}

/// Open a thread in `forum` and return its id.
pub async fn create_thread(pool: &PgPool, forum: &str, slug: &str, author: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/forum/{forum}/create"),
        serde_json::json!({
            "slug": slug,
            "title": "Thread title",
            "author": author,
            "message": "Opening message",
        }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Seed user `alice`, forum `rust` and thread `intro`. Returns the thread id.
pub async fn seed_thread(pool: &PgPool) -> i64 {
    create_user(pool, "alice").await;
    create_forum(pool, "rust", "alice").await;
    create_thread(pool, "rust", "intro", "alice").await
}
