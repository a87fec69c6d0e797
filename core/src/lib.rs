//! ProLeague deterministic match simulator.
//!
//! Given a fixture id, two team descriptors and a 64-bit seed, the engine
//! produces an event log and match report that are a pure function of those
//! inputs. See `engine` for the fixed draw order.

pub mod batch;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod event_table;
pub mod replay;
pub mod report;
pub mod rng;
pub mod seed;
pub mod team;
pub mod types;

pub use engine::{simulate_match, MatchEngine, MatchOutcome};
pub use error::{SimError, SimResult};
pub use seed::Seed;
