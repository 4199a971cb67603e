//! HTTP-level integration tests for post details and edits.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

/// Seed a thread with one post and return the post id.
async fn seed_post(pool: &PgPool) -> i64 {
    common::seed_thread(pool).await;
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/thread/intro/create",
        serde_json::json!([{ "author": "alice", "message": "hello" }]),
    )
    .await;
    body_json(response).await["data"][0]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_post_details_without_related(pool: PgPool) {
    let id = seed_post(&pool).await;

    let response = get(common::build_test_app(pool), &format!("/api/post/{id}/details")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["post"]["id"], id);
    assert_eq!(json["data"]["post"]["isEdited"], false);
    assert!(json["data"]["post"].get("path").is_none());
    assert!(json["data"].get("author").is_none());
    assert!(json["data"].get("thread").is_none());
    assert!(json["data"].get("forum").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_post_details_with_related(pool: PgPool) {
    let id = seed_post(&pool).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/post/{id}/details?related=user,thread,forum"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["author"]["nickname"], "alice");
    assert_eq!(json["data"]["thread"]["slug"], "intro");
    assert_eq!(json["data"]["forum"]["slug"], "rust");
    assert_eq!(json["data"]["forum"]["posts"], 1);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/post/{id}/details?related=votes"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_post_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/post/424242/details").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_post_sets_is_edited_on_change(pool: PgPool) {
    let id = seed_post(&pool).await;
    let uri = format!("/api/post/{id}/details");

    let response = post_json(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "message": "hello" }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["isEdited"], false);

    let response = post_json(common::build_test_app(pool.clone()), &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["message"], "hello");

    let response = post_json(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({ "message": "edited" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["message"], "edited");
    assert_eq!(json["data"]["isEdited"], true);
}
