//! Repository for the `threads` table.

use agora_core::creation::CreateOutcome;
use agora_core::thread_ref::ThreadRef;
use agora_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::thread::{CreateThread, Thread};
use crate::repositories::ForumRepo;

/// Column list for threads queries.
pub(crate) const COLUMNS: &str = "id, slug, forum::text AS forum, author::text AS author, \
    title, message, votes, created";

/// Provides creation, lookup, editing and forum listings for threads.
pub struct ThreadRepo;

impl ThreadRepo {
    /// Open a thread in `forum`, or return the thread already holding the slug.
    ///
    /// `forum` and `input.author` must already be canonical. On success the
    /// forum's thread counter and participant index are updated in the same
    /// transaction.
    pub async fn create(
        pool: &PgPool,
        forum: &str,
        input: &CreateThread,
    ) -> Result<CreateOutcome<Thread>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO threads (slug, forum, author, title, message, created)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             ON CONFLICT DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Thread>(&query)
            .bind(&input.slug)
            .bind(forum)
            .bind(&input.author)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.created)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(thread) = inserted else {
            tx.rollback().await?;
            let slug = input.slug.as_deref().unwrap_or_default();
            return Self::find_by_slug(pool, slug)
                .await?
                .map(CreateOutcome::AlreadyExists)
                .ok_or(sqlx::Error::RowNotFound);
        };

        sqlx::query("UPDATE forums SET threads = threads + 1 WHERE slug = $1::citext")
            .bind(forum)
            .execute(&mut *tx)
            .await?;
        ForumRepo::register_members(&mut *tx, forum, std::slice::from_ref(&input.author)).await?;

        tx.commit().await?;
        Ok(CreateOutcome::Created(thread))
    }

    /// Find a thread by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threads WHERE id = $1");
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a thread by its slug. Thread slugs are case-sensitive.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threads WHERE slug = $1");
        sqlx::query_as::<_, Thread>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a path reference: by id when it is numeric, then by slug.
    pub async fn resolve(
        pool: &PgPool,
        thread_ref: &ThreadRef,
    ) -> Result<Option<Thread>, sqlx::Error> {
        if let Some(id) = thread_ref.id() {
            if let Some(thread) = Self::find_by_id(pool, id).await? {
                return Ok(Some(thread));
            }
        }
        Self::find_by_slug(pool, thread_ref.slug()).await
    }

    /// Edit title and/or message. Empty or omitted values keep the old text.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
        message: Option<&str>,
    ) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!(
            "UPDATE threads SET
                title = COALESCE(NULLIF($2, ''), title),
                message = COALESCE(NULLIF($3, ''), message)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .bind(title)
            .bind(message)
            .fetch_optional(pool)
            .await
    }

    /// Threads of a forum ordered by creation time, id as tie-break.
    ///
    /// `since` is inclusive: `created >= since` ascending, `<=` descending.
    pub async fn list_by_forum(
        pool: &PgPool,
        forum: &str,
        since: Option<Timestamp>,
        desc: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Thread>, sqlx::Error> {
        let (direction, op) = if desc { ("DESC", "<=") } else { ("ASC", ">=") };
        let mut query = format!("SELECT {COLUMNS} FROM threads WHERE forum = $1::citext");
        let mut param_idx = 2;
        if since.is_some() {
            query.push_str(&format!(" AND created {op} ${param_idx}"));
            param_idx += 1;
        }
        query.push_str(&format!(" ORDER BY created {direction}, id {direction}"));
        if limit.is_some() {
            query.push_str(&format!(" LIMIT ${param_idx}"));
        }

        let mut q = sqlx::query_as::<_, Thread>(&query).bind(forum);
        if let Some(since) = since {
            q = q.bind(since);
        }
        if let Some(limit) = limit {
            q = q.bind(limit);
        }
        q.fetch_all(pool).await
    }
}
