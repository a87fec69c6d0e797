//! Match clock — owns the minute loop and timestamp arithmetic.

use crate::types::{Minute, TimestampSeconds};
use serde::{Deserialize, Serialize};

pub const FIRST_MINUTE: Minute = 0;
pub const FINAL_MINUTE: Minute = 90;
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Number of minute-steps in a match (0..=90 inclusive).
pub const MINUTE_STEPS: u32 = FINAL_MINUTE - FIRST_MINUTE + 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchClock {
    /// The last minute handed out, `None` before kick-off.
    pub current_minute: Option<Minute>,
}

impl MatchClock {
    pub fn new() -> Self {
        Self { current_minute: None }
    }

    /// Hand out the next minute, or `None` once minute 90 has been played.
    pub fn advance(&mut self) -> Option<Minute> {
        let next = match self.current_minute {
            None => FIRST_MINUTE,
            Some(FINAL_MINUTE) => return None,
            Some(m) => m + 1,
        };
        self.current_minute = Some(next);
        Some(next)
    }

    pub fn is_full_time(&self) -> bool {
        self.current_minute == Some(FINAL_MINUTE)
    }

    pub fn timestamp(minute: Minute, second_offset: u32) -> TimestampSeconds {
        minute * SECONDS_PER_MINUTE + second_offset
    }
}

impl Default for MatchClock {
    fn default() -> Self { Self::new() }
}
