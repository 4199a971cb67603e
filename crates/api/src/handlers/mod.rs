//! Request handlers for the forum API.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input with `agora_core`, delegate to the repositories
//! in `agora_db` and map errors via [`crate::error::AppError`].

pub mod forum;
pub mod post;
pub mod service;
pub mod thread;
pub mod user;
