//! Whole-store maintenance queries.

use sqlx::PgPool;

use crate::models::status::ServiceStatus;

/// Provides row counts and a full reset.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Count users, forums, threads and posts.
    pub async fn status(pool: &PgPool) -> Result<ServiceStatus, sqlx::Error> {
        sqlx::query_as::<_, ServiceStatus>(
            r#"SELECT
                (SELECT COUNT(*) FROM users) AS "user",
                (SELECT COUNT(*) FROM forums) AS forum,
                (SELECT COUNT(*) FROM threads) AS thread,
                (SELECT COUNT(*) FROM posts) AS post"#,
        )
        .fetch_one(pool)
        .await
    }

    /// Remove every row from every table and restart id sequences.
    pub async fn clear(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "TRUNCATE TABLE forum_users, votes, posts, threads, forums, users
             RESTART IDENTITY CASCADE",
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}
