//! Thread vote values.
//!
//! A user holds at most one vote per thread. Re-voting replaces the earlier
//! value, so a thread's score is always the plain sum of its stored votes.

use crate::error::CoreError;

/// A single up or down vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Signed contribution to the thread score.
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl TryFrom<i32> for VoteValue {
    type Error = CoreError;

    fn try_from(voice: i32) -> Result<Self, Self::Error> {
        match voice {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(CoreError::Validation(format!(
                "Vote must be 1 or -1, got {other}"
            ))),
        }
    }
}

/// Net score change when a voter moves from `previous` to `next`.
pub fn score_delta(previous: Option<VoteValue>, next: VoteValue) -> i32 {
    i32::from(next.as_i16()) - previous.map_or(0, |v| i32::from(v.as_i16()))
}
