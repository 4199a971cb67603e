//! Repository for the `votes` table.

use agora_core::types::DbId;
use agora_core::vote::{score_delta, VoteValue};
use sqlx::PgPool;

use crate::models::thread::Thread;
use crate::repositories::thread_repo::COLUMNS as THREAD_COLUMNS;

/// Provides vote casting.
pub struct VoteRepo;

impl VoteRepo {
    /// Record `nickname`'s vote on a thread and return the rescored thread.
    ///
    /// The thread row is locked for the whole transaction, so concurrent
    /// votes on one thread apply one at a time and the stored score always
    /// equals the sum of stored votes. Returns `None` if the thread is gone.
    pub async fn cast(
        pool: &PgPool,
        thread_id: DbId,
        nickname: &str,
        value: VoteValue,
    ) -> Result<Option<Thread>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM threads WHERE id = $1 FOR UPDATE")
                .bind(thread_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let previous: Option<(i16,)> =
            sqlx::query_as("SELECT voice FROM votes WHERE thread = $1 AND nickname = $2::citext")
                .bind(thread_id)
                .bind(nickname)
                .fetch_optional(&mut *tx)
                .await?;
        let previous = previous.and_then(|(voice,)| VoteValue::try_from(i32::from(voice)).ok());

        sqlx::query(
            "INSERT INTO votes (thread, nickname, voice)
             VALUES ($1, $2, $3)
             ON CONFLICT (thread, nickname) DO UPDATE SET voice = EXCLUDED.voice",
        )
        .bind(thread_id)
        .bind(nickname)
        .bind(value.as_i16())
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE threads SET votes = votes + $2 WHERE id = $1 RETURNING {THREAD_COLUMNS}"
        );
        let thread = sqlx::query_as::<_, Thread>(&query)
            .bind(thread_id)
            .bind(score_delta(previous, value))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(thread))
    }
}
