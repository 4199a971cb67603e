//! Repository for the `users` table.

use std::collections::HashMap;

use agora_core::creation::CreateOutcome;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list for users queries. CITEXT columns are cast back to text.
const COLUMNS: &str = "nickname::text AS nickname, fullname, email::text AS email, about";

/// Provides registration, lookup and profile updates for users.
pub struct UserRepo;

impl UserRepo {
    /// Register a user.
    ///
    /// When the nickname or the email is already taken, nothing is inserted
    /// and every user holding either key is returned instead.
    pub async fn create(
        pool: &PgPool,
        nickname: &str,
        input: &CreateUser,
    ) -> Result<CreateOutcome<User, Vec<User>>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (nickname, fullname, email, about)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .bind(&input.fullname)
            .bind(&input.email)
            .bind(&input.about)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(user) => Ok(CreateOutcome::Created(user)),
            None => {
                let existing = Self::find_conflicting(pool, nickname, &input.email).await?;
                Ok(CreateOutcome::AlreadyExists(existing))
            }
        }
    }

    /// Find a user by nickname, case-insensitively.
    pub async fn find_by_nickname(
        pool: &PgPool,
        nickname: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE nickname = $1::citext");
        sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1::citext");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// All users whose nickname or email matches, ordered by nickname.
    pub async fn find_conflicting(
        pool: &PgPool,
        nickname: &str,
        email: &str,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE nickname = $1::citext OR email = $2::citext
             ORDER BY nickname"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Map each known nickname (ASCII-lowercased) to its stored casing.
    ///
    /// Nicknames with no matching user are simply absent from the result.
    pub async fn canonical_nicknames(
        pool: &PgPool,
        nicknames: &[String],
    ) -> Result<HashMap<String, String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT nickname::text FROM users WHERE nickname = ANY($1::citext[])")
                .bind(nicknames)
                .fetch_all(pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(nickname,)| (nickname.to_ascii_lowercase(), nickname))
            .collect())
    }

    /// Apply a profile update. Omitted fields keep their value.
    ///
    /// Returns `None` when no such user exists.
    pub async fn update(
        pool: &PgPool,
        nickname: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                fullname = COALESCE($2, fullname),
                email = COALESCE($3, email),
                about = COALESCE($4, about)
             WHERE nickname = $1::citext
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .bind(&input.fullname)
            .bind(&input.email)
            .bind(&input.about)
            .fetch_optional(pool)
            .await
    }

    /// Users who opened a thread or posted in a forum, ordered by nickname.
    ///
    /// `since` is exclusive. `limit` of `None` returns everyone.
    pub async fn list_forum_members(
        pool: &PgPool,
        forum: &str,
        since: Option<&str>,
        desc: bool,
        limit: Option<i64>,
    ) -> Result<Vec<User>, sqlx::Error> {
        let (direction, op) = if desc { ("DESC", "<") } else { ("ASC", ">") };
        let mut query = format!(
            "SELECT u.nickname::text AS nickname, u.fullname, u.email::text AS email, u.about
             FROM forum_users fu
             JOIN users u ON u.nickname = fu.nickname
             WHERE fu.forum = $1::citext"
        );
        let mut param_idx = 2;
        if since.is_some() {
            query.push_str(&format!(" AND fu.nickname {op} ${param_idx}::citext"));
            param_idx += 1;
        }
        query.push_str(&format!(" ORDER BY fu.nickname {direction}"));
        if limit.is_some() {
            query.push_str(&format!(" LIMIT ${param_idx}"));
        }

        let mut q = sqlx::query_as::<_, User>(&query).bind(forum);
        if let Some(since) = since {
            q = q.bind(since);
        }
        if let Some(limit) = limit {
            q = q.bind(limit);
        }
        q.fetch_all(pool).await
    }
}
