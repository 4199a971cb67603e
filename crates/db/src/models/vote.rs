//! Vote DTOs.

use serde::Deserialize;

/// Body of a vote request. `voice` is validated into a
/// [`agora_core::vote::VoteValue`] by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVote {
    pub nickname: String,
    pub voice: i32,
}
