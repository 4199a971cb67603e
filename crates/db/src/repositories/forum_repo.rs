//! Repository for the `forums` table and its `forum_users` index.

use agora_core::creation::CreateOutcome;
use sqlx::{PgConnection, PgPool};

use crate::models::forum::{CreateForum, Forum};

/// Column list for forums queries.
const COLUMNS: &str = "slug::text AS slug, title, owner::text AS owner, posts, threads";

/// Provides creation and lookup for forums.
pub struct ForumRepo;

impl ForumRepo {
    /// Create a forum, or return the one already holding the slug.
    ///
    /// `input.owner` must already be the owner's stored nickname.
    pub async fn create(
        pool: &PgPool,
        input: &CreateForum,
    ) -> Result<CreateOutcome<Forum>, sqlx::Error> {
        let query = format!(
            "INSERT INTO forums (slug, title, owner)
             VALUES ($1, $2, $3)
             ON CONFLICT DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Forum>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.owner)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(forum) => Ok(CreateOutcome::Created(forum)),
            None => Self::find_by_slug(pool, &input.slug)
                .await?
                .map(CreateOutcome::AlreadyExists)
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Find a forum by slug, case-insensitively.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Forum>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forums WHERE slug = $1::citext");
        sqlx::query_as::<_, Forum>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Record that each nickname participates in the forum.
    ///
    /// Runs on the caller's transaction. Nicknames are inserted in sorted
    /// order so concurrent batches lock `forum_users` rows consistently.
    pub async fn register_members(
        conn: &mut PgConnection,
        forum: &str,
        nicknames: &[String],
    ) -> Result<(), sqlx::Error> {
        let mut sorted: Vec<String> = nicknames.to_vec();
        sorted.sort_by_key(|n| n.to_ascii_lowercase());
        sorted.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        sqlx::query(
            "INSERT INTO forum_users (forum, nickname)
             SELECT $1, n FROM UNNEST($2::text[]) AS n
             ON CONFLICT DO NOTHING",
        )
        .bind(forum)
        .bind(&sorted)
        .execute(conn)
        .await?;
        Ok(())
    }
}
