//! Repository for the `posts` table: batch creation and thread listings.

use std::collections::HashMap;

use agora_core::pagination::{PostCursor, PostPage, SortMode};
use agora_core::post_tree::{index_batch, referenced_parents, ParentNode, PostPath};
use agora_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{BatchInsert, NewPost, Post};
use crate::models::thread::Thread;
use crate::repositories::ForumRepo;

/// Column list for posts queries.
const COLUMNS: &str = "id, parent, path, thread, forum::text AS forum, \
    author::text AS author, message, is_edited, created";

/// Provides batch creation, lookup, editing and ordered listings of posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a batch of posts into `thread` atomically.
    ///
    /// Every `author` must already be a stored nickname. All posts share one
    /// creation timestamp and receive increasing ids in request order. If any
    /// parent is missing or belongs to another thread, nothing is written.
    pub async fn create_batch(
        pool: &PgPool,
        thread: &Thread,
        posts: &[NewPost],
    ) -> Result<BatchInsert, sqlx::Error> {
        if posts.is_empty() {
            return Ok(BatchInsert::Inserted(vec![]));
        }

        let mut tx = pool.begin().await?;

        let parents: Vec<DbId> = posts.iter().map(|p| p.parent).collect();
        let wanted = referenced_parents(&parents);
        let rows: Vec<(DbId, DbId, Vec<DbId>)> =
            sqlx::query_as("SELECT id, thread, path FROM posts WHERE id = ANY($1)")
                .bind(&wanted)
                .fetch_all(&mut *tx)
                .await?;
        let known: HashMap<DbId, ParentNode> = rows
            .into_iter()
            .map(|(id, thread_id, path)| {
                let node = ParentNode {
                    thread_id,
                    path: PostPath::from(path),
                };
                (id, node)
            })
            .collect();

        let ids: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM (
                SELECT nextval(pg_get_serial_sequence('posts', 'id')) AS id
                FROM generate_series(1, $1)
             ) reserved
             ORDER BY id",
        )
        .bind(posts.len() as i64)
        .fetch_all(&mut *tx)
        .await?;
        let ids: Vec<DbId> = ids.into_iter().map(|(id,)| id).collect();

        let paths = match index_batch(thread.id, &parents, &ids, &known) {
            Ok(paths) => paths,
            Err(mismatch) => {
                tracing::debug!(
                    thread_id = thread.id,
                    index = mismatch.index,
                    parent = mismatch.parent,
                    "Rejecting post batch with foreign parent"
                );
                tx.rollback().await?;
                return Ok(BatchInsert::OrphanParent {
                    parent: mismatch.parent,
                });
            }
        };

        let path_literals: Vec<String> =
            paths.iter().map(|p| array_literal(p.as_slice())).collect();
        let authors: Vec<String> = posts.iter().map(|p| p.author.clone()).collect();
        let messages: Vec<String> = posts.iter().map(|p| p.message.clone()).collect();

        let query = format!(
            "INSERT INTO posts (id, parent, path, thread, forum, author, message, created)
             SELECT b.id, b.parent, b.path::bigint[], $4, $5, b.author, b.message, NOW()
             FROM UNNEST($1::bigint[], $2::bigint[], $3::text[], $6::text[], $7::text[])
                 AS b(id, parent, path, author, message)
             RETURNING {COLUMNS}"
        );
        let mut inserted = sqlx::query_as::<_, Post>(&query)
            .bind(&ids)
            .bind(&parents)
            .bind(&path_literals)
            .bind(thread.id)
            .bind(&thread.forum)
            .bind(&authors)
            .bind(&messages)
            .fetch_all(&mut *tx)
            .await?;
        inserted.sort_by_key(|p| p.id);

        sqlx::query("UPDATE forums SET posts = posts + $2 WHERE slug = $1::citext")
            .bind(&thread.forum)
            .bind(inserted.len() as i64)
            .execute(&mut *tx)
            .await?;
        ForumRepo::register_members(&mut *tx, &thread.forum, &authors).await?;

        tx.commit().await?;
        Ok(BatchInsert::Inserted(inserted))
    }

    /// Find a post by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a post's message.
    ///
    /// `is_edited` is raised only when the new text differs from the stored
    /// one, and is never cleared.
    pub async fn update_message(
        pool: &PgPool,
        id: DbId,
        message: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                message = $2,
                is_edited = is_edited OR message <> $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(message)
            .fetch_optional(pool)
            .await
    }

    /// Path of post `id` if it belongs to `thread_id`.
    ///
    /// Tree listings use it to turn a last-seen post id into a cursor.
    pub async fn find_path(
        pool: &PgPool,
        thread_id: DbId,
        id: DbId,
    ) -> Result<Option<PostPath>, sqlx::Error> {
        let row: Option<(Vec<DbId>,)> =
            sqlx::query_as("SELECT path FROM posts WHERE id = $1 AND thread = $2")
                .bind(id)
                .bind(thread_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(path,)| PostPath::from(path)))
    }

    /// One page of a thread's posts in the requested order.
    pub async fn list_by_thread(
        pool: &PgPool,
        thread_id: DbId,
        page: &PostPage,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = thread_page_query(page);
        let mut q = sqlx::query_as::<_, Post>(&query).bind(thread_id);
        match (&page.cursor, page.mode) {
            (Some(PostCursor::Id(id)), _) => q = q.bind(*id),
            (Some(PostCursor::Path(path)), SortMode::ParentTree) => {
                q = q.bind(path.root_id().unwrap_or_default())
            }
            (Some(PostCursor::Path(path)), _) => q = q.bind(path.as_slice().to_vec()),
            (None, _) => {}
        }
        if let Some(limit) = page.limit {
            q = q.bind(limit);
        }
        q.fetch_all(pool).await
    }
}

/// SQL for one page of posts. `$1` is the thread id, followed by the cursor
/// and the limit when present.
fn thread_page_query(page: &PostPage) -> String {
    let direction = page.direction();
    let op = page.after_operator();
    let mut param_idx = 2;

    let (key, filter) = match page.mode {
        SortMode::Flat => ("id", "thread = $1"),
        SortMode::Tree => ("path", "thread = $1"),
        SortMode::ParentTree => ("id", "thread = $1 AND parent = 0"),
    };

    let mut query = match page.mode {
        SortMode::ParentTree => format!("SELECT id FROM posts WHERE {filter}"),
        _ => format!("SELECT {COLUMNS} FROM posts WHERE {filter}"),
    };
    if page.cursor.is_some() {
        query.push_str(&format!(" AND {key} {op} ${param_idx}"));
        param_idx += 1;
    }
    query.push_str(&format!(" ORDER BY {key} {direction}"));
    if page.limit.is_some() {
        query.push_str(&format!(" LIMIT ${param_idx}"));
    }

    match page.mode {
        // Whole subtrees of the selected roots, roots in page order and each
        // subtree in ascending pre-order.
        SortMode::ParentTree => format!(
            "SELECT {COLUMNS} FROM posts
             WHERE thread = $1 AND path[1] IN ({query})
             ORDER BY path[1] {direction}, path ASC"
        ),
        _ => query,
    }
}

/// Postgres array literal for a path, e.g. `{1,4,9}`.
fn array_literal(ids: &[DbId]) -> String {
    let inner: Vec<String> = ids.iter().map(DbId::to_string).collect();
    format!("{{{}}}", inner.join(","))
}
