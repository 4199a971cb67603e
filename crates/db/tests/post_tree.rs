//! Integration tests for post batches and thread listings.
//!
//! Exercises the repository layer against a real database:
//! - atomic batch insert with path computation
//! - rejection of parents from another thread
//! - flat, tree and parent_tree ordering with cursors and limits
//! - message edits and the is_edited flag

use agora_core::pagination::{PostCursor, PostPage, SortMode};
use agora_core::post_tree::PostPath;
use agora_core::types::DbId;
use agora_db::models::forum::CreateForum;
use agora_db::models::post::{BatchInsert, NewPost, Post};
use agora_db::models::thread::{CreateThread, Thread};
use agora_db::models::user::CreateUser;
use agora_db::repositories::{ForumRepo, PostRepo, ServiceRepo, ThreadRepo, UserRepo};
use assert_matches::assert_matches;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a user, a forum and two threads. Returns the threads.
async fn seed(pool: &PgPool) -> (Thread, Thread) {
    let user = CreateUser {
        fullname: "Alice".to_string(),
        email: "alice@example.org".to_string(),
        about: String::new(),
    };
    UserRepo::create(pool, "alice", &user).await.unwrap();

    let forum = CreateForum {
        slug: "rust".to_string(),
        title: "Rust".to_string(),
        owner: "alice".to_string(),
    };
    ForumRepo::create(pool, &forum).await.unwrap();

    let mut threads = Vec::new();
    for slug in ["first", "second"] {
        let input = CreateThread {
            slug: Some(slug.to_string()),
            title: slug.to_string(),
            author: "alice".to_string(),
            message: "Opening post".to_string(),
            created: None,
        };
        let thread = ThreadRepo::create(pool, "rust", &input)
            .await
            .unwrap()
            .into_inner();
        threads.push(thread);
    }
    let second = threads.pop().unwrap();
    let first = threads.pop().unwrap();
    (first, second)
}

fn reply(parent: DbId, message: &str) -> NewPost {
    NewPost {
        parent,
        author: "alice".to_string(),
        message: message.to_string(),
    }
}

/// Insert one post and return its id.
async fn post(pool: &PgPool, thread: &Thread, parent: DbId) -> DbId {
    let batch = PostRepo::create_batch(pool, thread, &[reply(parent, "text")])
        .await
        .unwrap();
    let posts = assert_matches!(batch, BatchInsert::Inserted(posts) => posts);
    posts[0].id
}

async fn list(pool: &PgPool, thread: &Thread, page: &PostPage) -> Vec<DbId> {
    PostRepo::list_by_thread(pool, thread.id, page)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect()
}

fn page(mode: SortMode, desc: bool, limit: Option<i64>) -> PostPage {
    PostPage::new(mode, desc, limit).unwrap()
}

/// Build a small forest in `thread`:
///
/// ```text
/// r1
/// ├── a
/// │   └── c
/// └── b
/// r2
/// └── d
/// r3
/// ```
///
/// Ids are assigned in the order r1, r2, a, d, b, r3, c.
async fn seed_forest(pool: &PgPool, thread: &Thread) -> [DbId; 7] {
    let r1 = post(pool, thread, 0).await;
    let r2 = post(pool, thread, 0).await;
    let a = post(pool, thread, r1).await;
    let d = post(pool, thread, r2).await;
    let b = post(pool, thread, r1).await;
    let r3 = post(pool, thread, 0).await;
    let c = post(pool, thread, a).await;
    [r1, r2, a, d, b, r3, c]
}

// ---------------------------------------------------------------------------
// Test: Batch insert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_batch_assigns_paths_and_counters(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let root = post(&pool, &thread, 0).await;

    let batch = PostRepo::create_batch(&pool, &thread, &[reply(root, "one"), reply(0, "two")])
        .await
        .unwrap();
    let posts: Vec<Post> = assert_matches!(batch, BatchInsert::Inserted(posts) => posts);

    assert_eq!(posts.len(), 2);
    assert!(posts[0].id < posts[1].id, "ids follow request order");
    assert_eq!(posts[0].path, vec![root, posts[0].id]);
    assert_eq!(posts[1].path, vec![posts[1].id]);
    assert_eq!(posts[0].created, posts[1].created);
    assert!(posts.iter().all(|p| p.thread == thread.id && p.forum == "rust"));

    let forum = ForumRepo::find_by_slug(&pool, "rust").await.unwrap().unwrap();
    assert_eq!(forum.posts, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_batch_is_a_no_op(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let batch = PostRepo::create_batch(&pool, &thread, &[]).await.unwrap();
    assert_matches!(batch, BatchInsert::Inserted(posts) if posts.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_parent_from_other_thread_rejects_whole_batch(pool: PgPool) {
    let (first, second) = seed(&pool).await;
    let foreign = post(&pool, &second, 0).await;

    let batch = PostRepo::create_batch(
        &pool,
        &first,
        &[reply(0, "fine on its own"), reply(foreign, "wrong thread")],
    )
    .await
    .unwrap();
    assert_matches!(batch, BatchInsert::OrphanParent { parent } if parent == foreign);

    let listed = list(&pool, &first, &page(SortMode::Flat, false, None)).await;
    assert!(listed.is_empty(), "no post of a rejected batch may persist");

    let status = ServiceRepo::status(&pool).await.unwrap();
    assert_eq!(status.post, 1);
    let forum = ForumRepo::find_by_slug(&pool, "rust").await.unwrap().unwrap();
    assert_eq!(forum.posts, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_parent_rejects_batch(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let batch = PostRepo::create_batch(&pool, &thread, &[reply(9999, "orphan")])
        .await
        .unwrap();
    assert_matches!(batch, BatchInsert::OrphanParent { parent: 9999 });
}

// ---------------------------------------------------------------------------
// Test: Orderings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_worked_example_orders(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let p1 = post(&pool, &thread, 0).await;
    let p2 = post(&pool, &thread, p1).await;
    let p3 = post(&pool, &thread, 0).await;

    assert_eq!(list(&pool, &thread, &page(SortMode::Flat, false, None)).await, vec![p1, p2, p3]);
    assert_eq!(list(&pool, &thread, &page(SortMode::Tree, false, None)).await, vec![p1, p2, p3]);

    let p4 = post(&pool, &thread, p3).await;
    assert_eq!(
        list(&pool, &thread, &page(SortMode::Tree, false, None)).await,
        vec![p1, p2, p3, p4]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tree_is_pre_order(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let [r1, r2, a, d, b, r3, c] = seed_forest(&pool, &thread).await;

    assert_eq!(
        list(&pool, &thread, &page(SortMode::Tree, false, None)).await,
        vec![r1, a, c, b, r2, d, r3]
    );
    assert_eq!(
        list(&pool, &thread, &page(SortMode::Tree, true, None)).await,
        vec![r3, d, r2, b, c, a, r1]
    );
    assert_eq!(
        list(&pool, &thread, &page(SortMode::Flat, true, Some(2))).await,
        vec![c, r3]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tree_pages_concatenate_to_full_listing(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    seed_forest(&pool, &thread).await;

    for desc in [false, true] {
        let full = list(&pool, &thread, &page(SortMode::Tree, desc, None)).await;
        for limit in 1..=4 {
            let mut collected = Vec::new();
            let mut cursor: Option<PostPath> = None;
            loop {
                let mut request = page(SortMode::Tree, desc, Some(limit));
                if let Some(path) = cursor.take() {
                    request = request.with_cursor(PostCursor::Path(path)).unwrap();
                }
                let posts = PostRepo::list_by_thread(&pool, thread.id, &request)
                    .await
                    .unwrap();
                let Some(last) = posts.last() else { break };
                cursor = Some(PostPath::from(last.path.clone()));
                collected.extend(posts.iter().map(|p| p.id));
            }
            assert_eq!(collected, full, "limit={limit} desc={desc}");
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_parent_tree_keeps_subtrees_whole(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let [r1, r2, a, d, b, r3, c] = seed_forest(&pool, &thread).await;

    let first = list(&pool, &thread, &page(SortMode::ParentTree, false, Some(1))).await;
    assert_eq!(first, vec![r1, a, c, b]);

    let cursor = PostRepo::find_path(&pool, thread.id, b).await.unwrap().unwrap();
    let next = page(SortMode::ParentTree, false, Some(1))
        .with_cursor(PostCursor::Path(cursor))
        .unwrap();
    assert_eq!(list(&pool, &thread, &next).await, vec![r2, d]);

    // Descending reverses root order; each subtree stays in pre-order.
    assert_eq!(
        list(&pool, &thread, &page(SortMode::ParentTree, true, Some(2))).await,
        vec![r3, r2, d]
    );
    assert_eq!(
        list(&pool, &thread, &page(SortMode::ParentTree, true, None)).await,
        vec![r3, r2, d, r1, a, c, b]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_flat_cursor_is_exclusive(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let [r1, r2, a, _, _, _, _] = seed_forest(&pool, &thread).await;

    let request = page(SortMode::Flat, false, Some(2))
        .with_cursor(PostCursor::Id(r1))
        .unwrap();
    assert_eq!(list(&pool, &thread, &request).await, vec![r2, a]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_path_is_scoped_to_thread(pool: PgPool) {
    let (first, second) = seed(&pool).await;
    let id = post(&pool, &first, 0).await;

    assert!(PostRepo::find_path(&pool, first.id, id).await.unwrap().is_some());
    assert!(PostRepo::find_path(&pool, second.id, id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_is_edited_only_on_real_change(pool: PgPool) {
    let (thread, _) = seed(&pool).await;
    let id = post(&pool, &thread, 0).await;

    let same = PostRepo::update_message(&pool, id, "text").await.unwrap().unwrap();
    assert!(!same.is_edited);

    let changed = PostRepo::update_message(&pool, id, "new text").await.unwrap().unwrap();
    assert!(changed.is_edited);
    assert_eq!(changed.message, "new text");

    let back = PostRepo::update_message(&pool, id, "new text").await.unwrap().unwrap();
    assert!(back.is_edited, "is_edited is never cleared");

    assert!(PostRepo::update_message(&pool, id + 100, "x").await.unwrap().is_none());
}
