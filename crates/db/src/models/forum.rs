//! Forum models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A forum row from the `forums` table.
///
/// `posts` and `threads` are counters maintained by the post and thread
/// repositories in the same transaction as the inserts they count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Forum {
    pub slug: String,
    pub title: String,
    #[serde(rename = "user")]
    pub owner: String,
    pub posts: i64,
    pub threads: i32,
}

/// Input for creating a forum.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateForum {
    pub slug: String,
    pub title: String,
    #[serde(alias = "user")]
    pub owner: String,
}
