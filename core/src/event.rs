//! The match event log.
//!
//! RULE: Events are appended in strict minute-then-sequence order.
//! The log is never reordered, filtered, or deduplicated.

use crate::{
    team::Side,
    types::{Minute, PlayerIndex, TimestampSeconds},
};
use serde::{Deserialize, Serialize};

/// Every kind of micro-event the engine can generate.
/// Declaration order matches the probability table — never reorder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Possession,
    Shot,
    Pass,
    Tackle,
    Foul,
    Corner,
    YellowCard,
    RedCard,
    Goal,
}

impl EventType {
    /// Stable wire name, identical to the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Possession => "possession",
            Self::Shot       => "shot",
            Self::Pass       => "pass",
            Self::Tackle     => "tackle",
            Self::Foul       => "foul",
            Self::Corner     => "corner",
            Self::YellowCard => "yellowCard",
            Self::RedCard    => "redCard",
            Self::Goal       => "goal",
        }
    }
}

/// One atomic in-match occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicroEvent {
    pub fixture_id:   String,
    pub timestamp:    TimestampSeconds,
    /// Position within this minute's batch.
    pub seed_index:   u32,
    pub event_type:   EventType,
    pub team:         Side,
    pub player_index: PlayerIndex,
    pub x:            f64,
    pub y:            f64,
}

impl MicroEvent {
    /// The minute this event belongs to, recovered from its timestamp.
    pub fn minute(&self) -> Minute {
        self.timestamp / crate::clock::SECONDS_PER_MINUTE
    }

    pub fn player_label(&self) -> String {
        format!("Player {}", self.player_index)
    }
}
