//! Materialized post paths and the rules for assigning them.
//!
//! Every post stores the ids of its ancestors followed by its own id. Two
//! paths compare element by element, and a path sorts before any of its
//! extensions, so ordering posts by path yields a depth-first pre-order walk
//! of the thread with siblings in ascending id order. Ids are handed out in
//! creation order, which keeps that walk stable as new replies arrive.

use std::collections::HashMap;

use crate::types::DbId;

/// `parent` value that marks a root post.
pub const ROOT_PARENT: DbId = 0;

/// Ancestor-plus-self id sequence of a post.
///
/// The derived `Ord` on the inner `Vec` is the lexicographic, prefix-first
/// ordering the tree listings rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostPath(Vec<DbId>);

impl PostPath {
    /// Path of a root post.
    pub fn root(id: DbId) -> Self {
        Self(vec![id])
    }

    /// Path of a reply with id `id` under the post at `self`.
    pub fn child(&self, id: DbId) -> Self {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        ids.extend_from_slice(&self.0);
        ids.push(id);
        Self(ids)
    }

    /// Id of the root post this path descends from.
    pub fn root_id(&self) -> Option<DbId> {
        self.0.first().copied()
    }

    /// Id of the post the path belongs to.
    pub fn leaf_id(&self) -> Option<DbId> {
        self.0.last().copied()
    }

    /// Zero for root posts.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn as_slice(&self) -> &[DbId] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<DbId> {
        self.0
    }
}

impl From<Vec<DbId>> for PostPath {
    fn from(ids: Vec<DbId>) -> Self {
        Self(ids)
    }
}

/// What the indexer needs to know about an existing parent post.
#[derive(Debug, Clone)]
pub struct ParentNode {
    pub thread_id: DbId,
    pub path: PostPath,
}

/// A post in a batch names a parent that is missing or lives in another
/// thread. The whole batch must be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Parent post {parent} of batch entry {index} was created in another thread")]
pub struct ParentMismatch {
    pub index: usize,
    pub parent: DbId,
}

/// Distinct non-root parent ids referenced by a batch, in first-seen order.
pub fn referenced_parents(parents: &[DbId]) -> Vec<DbId> {
    let mut seen = Vec::new();
    for &parent in parents {
        if parent != ROOT_PARENT && !seen.contains(&parent) {
            seen.push(parent);
        }
    }
    seen
}

/// Compute paths for a batch of new posts.
///
/// `parents[i]` is the declared parent of entry `i` ([`ROOT_PARENT`] for a
/// root post) and `new_ids[i]` the id reserved for it. `known` holds every
/// existing post the batch references. Fails on the first entry whose parent
/// is unknown or belongs to a thread other than `thread_id`; nothing from the
/// batch may be persisted in that case.
pub fn index_batch(
    thread_id: DbId,
    parents: &[DbId],
    new_ids: &[DbId],
    known: &HashMap<DbId, ParentNode>,
) -> Result<Vec<PostPath>, ParentMismatch> {
    debug_assert_eq!(parents.len(), new_ids.len());

    parents
        .iter()
        .zip(new_ids)
        .enumerate()
        .map(|(index, (&parent, &id))| {
            if parent == ROOT_PARENT {
                return Ok(PostPath::root(id));
            }
            match known.get(&parent) {
                Some(node) if node.thread_id == thread_id => Ok(node.path.child(id)),
                _ => Err(ParentMismatch { index, parent }),
            }
        })
        .collect()
}
