//! Post listing modes and cursor pagination rules.
//!
//! Three orderings are supported for the posts of a thread:
//!
//! - `flat`: creation order, i.e. ascending post id.
//! - `tree`: ascending path, a depth-first pre-order walk of the thread.
//! - `parent_tree`: pages are made of whole root subtrees. `limit` counts
//!   root posts, and every descendant of a selected root comes with it.
//!
//! The cursor (`since`) is the last item of the previous page: a post id in
//! `flat` mode, that post's path in the tree modes. A page holds only items
//! strictly after the cursor under the active comparator, which makes
//! consecutive pages disjoint and gap-free while no writes happen in between.

use serde::Serialize;

use crate::error::CoreError;
use crate::post_tree::PostPath;
use crate::types::DbId;

/// Ordering used when listing the posts of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Flat,
    Tree,
    ParentTree,
}

impl SortMode {
    /// Parse the `sort` query value. Absent or empty means `flat`.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") | Some("flat") => Ok(Self::Flat),
            Some("tree") => Ok(Self::Tree),
            Some("parent_tree") => Ok(Self::ParentTree),
            Some(other) => Err(CoreError::Validation(format!(
                "Unknown sort mode '{other}'. Expected 'flat', 'tree' or 'parent_tree'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tree => "tree",
            Self::ParentTree => "parent_tree",
        }
    }

    /// Whether the cursor for this mode is a path rather than a bare id.
    pub fn uses_path_cursor(&self) -> bool {
        !matches!(self, Self::Flat)
    }
}

/// Position of the last item of the previous page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostCursor {
    Id(DbId),
    Path(PostPath),
}

/// Fully validated request for one page of a thread's posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub mode: SortMode,
    pub desc: bool,
    /// `None` means unbounded. In `parent_tree` mode this counts root posts.
    pub limit: Option<i64>,
    pub cursor: Option<PostCursor>,
}

impl PostPage {
    pub fn new(mode: SortMode, desc: bool, limit: Option<i64>) -> Result<Self, CoreError> {
        Ok(Self {
            mode,
            desc,
            limit: normalize_limit(limit)?,
            cursor: None,
        })
    }

    /// Attach a cursor, checking that its kind matches the mode.
    pub fn with_cursor(mut self, cursor: PostCursor) -> Result<Self, CoreError> {
        match (&cursor, self.mode.uses_path_cursor()) {
            (PostCursor::Id(_), false) => {}
            (PostCursor::Path(path), true) if path.root_id().is_some() => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Cursor does not match sort mode '{}'",
                    self.mode.as_str()
                )))
            }
        }
        self.cursor = Some(cursor);
        Ok(self)
    }

    /// SQL keyword for the primary sort direction.
    pub fn direction(&self) -> &'static str {
        if self.desc {
            "DESC"
        } else {
            "ASC"
        }
    }

    /// Comparison operator selecting items strictly after the cursor.
    pub fn after_operator(&self) -> &'static str {
        if self.desc {
            "<"
        } else {
            ">"
        }
    }
}

/// Normalise a caller-supplied limit: absent or zero means unbounded,
/// negative values are rejected.
pub fn normalize_limit(limit: Option<i64>) -> Result<Option<i64>, CoreError> {
    match limit {
        None | Some(0) => Ok(None),
        Some(n) if n < 0 => Err(CoreError::Validation(format!(
            "limit must not be negative, got {n}"
        ))),
        Some(n) => Ok(Some(n)),
    }
}
