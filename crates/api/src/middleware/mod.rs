//! Request middleware.
//!
//! - [`slow_request::log_slow_requests`] -- warns about requests slower than
//!   the configured threshold.

pub mod slow_request;
