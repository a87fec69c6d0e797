//! Batch simulation of many fixtures.
//!
//! Each fixture owns its own generator, so fixtures are independent and may
//! run on any thread. Results come back in input order.

use crate::{
    config::FixtureConfig,
    engine::{MatchEngine, MatchOutcome},
    error::SimResult,
};
use rayon::prelude::*;

/// Below this many fixtures the thread-pool overhead is not worth it.
pub const PARALLEL_THRESHOLD: usize = 8;

pub fn simulate_batch(fixtures: &[FixtureConfig]) -> SimResult<Vec<MatchOutcome>> {
    let engines = fixtures
        .iter()
        .map(MatchEngine::build)
        .collect::<SimResult<Vec<_>>>()?;

    log::debug!("simulating batch of {} fixtures", engines.len());

    let outcomes: Vec<MatchOutcome> = if engines.len() > PARALLEL_THRESHOLD {
        engines.into_par_iter().map(MatchEngine::run).collect()
    } else {
        engines.into_iter().map(MatchEngine::run).collect()
    };
    Ok(outcomes)
}
