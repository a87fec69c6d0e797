//! Shared primitive types used across the entire simulator.

/// A match minute. Regulation runs from minute 0 to minute 90 inclusive.
pub type Minute = u32;

/// Seconds since kick-off.
pub type TimestampSeconds = u32;

/// Squad slot of the acting player, 0..=22.
pub type PlayerIndex = u32;

/// The caller-supplied fixture identifier.
pub type FixtureId = String;
