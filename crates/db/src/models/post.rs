//! Post models and DTOs.

use agora_core::post_tree::ROOT_PARENT;
use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::forum::Forum;
use super::thread::Thread;
use super::user::User;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A post row from the `posts` table.
///
/// `path` is the materialized ancestry (root id first, own id last). It is
/// an ordering key and never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Post {
    pub id: DbId,
    pub parent: DbId,
    #[serde(skip_serializing)]
    pub path: Vec<DbId>,
    pub thread: DbId,
    pub forum: String,
    pub author: String,
    pub message: String,
    #[serde(rename = "isEdited")]
    pub is_edited: bool,
    pub created: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// One entry of a post batch.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub parent: DbId,
    pub author: String,
    pub message: String,
}

impl NewPost {
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }
}

/// Outcome of a batch insert.
#[derive(Debug)]
pub enum BatchInsert {
    /// Every post was stored, in request order.
    Inserted(Vec<Post>),
    /// A parent was missing or belonged to another thread; nothing was stored.
    OrphanParent { parent: DbId },
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for editing a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A post with the related entities requested through `?related=`.
#[derive(Debug, Serialize)]
pub struct PostDetails {
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<Forum>,
}
