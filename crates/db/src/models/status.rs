//! Service status model.

use serde::Serialize;
use sqlx::FromRow;

/// Row counts across the forum tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct ServiceStatus {
    pub user: i64,
    pub forum: i64,
    pub thread: i64,
    pub post: i64,
}
