//! Domain logic for the agora forum back-end.
//!
//! Nothing in this crate performs I/O. The repository layer (`agora-db`) and
//! the HTTP layer (`agora-api`) both build on these types.

pub mod creation;
pub mod error;
pub mod pagination;
pub mod post_tree;
pub mod related;
pub mod thread_ref;
pub mod types;
pub mod validation;
pub mod vote;
