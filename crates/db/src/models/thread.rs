//! Thread models and DTOs.

use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A thread row from the `threads` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Thread {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub forum: String,
    pub author: String,
    pub title: String,
    pub message: String,
    pub votes: i32,
    pub created: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for opening a thread. The forum comes from the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThread {
    pub slug: Option<String>,
    pub title: String,
    pub author: String,
    pub message: String,
    pub created: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for editing a thread. Omitted or empty fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateThread {
    pub title: Option<String>,
    pub message: Option<String>,
}

impl UpdateThread {
    /// `true` when nothing would change.
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
        blank(&self.title) && blank(&self.message)
    }
}
