//! The match engine — the heart of the simulator.
//!
//! DRAW ORDER (fixed, documented, never reordered):
//!   Per minute:
//!     1. event count           next_below(5) + 1
//!   Per micro-event, in sequence:
//!     2. strength roll         (event_table)
//!     3. selection roll        (event_table)
//!     4. side                  next_f64() > 0.5 → Home
//!     5. player index          next_below(23)
//!     6. x, then y             next_f64()
//!     7. second offset         next_below(60)
//!
//! RULES:
//!   - One MatchRng per simulation; it is the only randomness.
//!   - Minutes run 0..=90 inclusive, in order.
//!   - Every event is appended to the log and folded into the report
//!     in generation order.

use crate::{
    clock::MatchClock,
    config::FixtureConfig,
    error::SimResult,
    event::MicroEvent,
    event_table::draw_event_type,
    report::{MatchReport, ReportBuilder},
    rng::MatchRng,
    seed::Seed,
    team::{home_strength_share, validate_pairing, Side, TeamDescriptor},
    types::{FixtureId, Minute},
};
use serde::{Deserialize, Serialize};

pub const MAX_EVENTS_PER_MINUTE: u32 = 5;
pub const SQUAD_SIZE: u32 = 23;
pub const HOME_SIDE_THRESHOLD: f64 = 0.5;

/// Fixture id stamped on every MicroEvent. The caller's id only appears on
/// the report; recorded event logs carry this value.
pub const EVENT_STAMP_FIXTURE_ID: &str = "fixture-1";

/// Everything a simulation hands back to its caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub event_log:    Vec<MicroEvent>,
    pub match_report: MatchReport,
}

pub struct MatchEngine {
    pub fixture_id: FixtureId,
    pub clock:      MatchClock,
    seed:           Seed,
    rng:            MatchRng,
    home:           TeamDescriptor,
    away:           TeamDescriptor,
    home_share:     f64,
    event_log:      Vec<MicroEvent>,
    report:         ReportBuilder,
}

impl MatchEngine {
    pub fn new(
        fixture_id: impl Into<FixtureId>,
        home: TeamDescriptor,
        away: TeamDescriptor,
        seed: Seed,
    ) -> Self {
        let fixture_id = fixture_id.into();
        Self {
            clock:      MatchClock::new(),
            seed,
            rng:        MatchRng::new(seed.value()),
            home_share: home_strength_share(&home, &away),
            home,
            away,
            event_log:  Vec::new(),
            report:     ReportBuilder::new(fixture_id.clone()),
            fixture_id,
        }
    }

    /// Validate the fixture's descriptors, then build an engine for it.
    pub fn build(fixture: &FixtureConfig) -> SimResult<Self> {
        validate_pairing(&fixture.home, &fixture.away)?;
        Ok(Self::new(
            fixture.fixture_id.clone(),
            fixture.home.clone(),
            fixture.away.clone(),
            fixture.seed,
        ))
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn teams(&self) -> (&TeamDescriptor, &TeamDescriptor) {
        (&self.home, &self.away)
    }

    /// Play the next minute. Returns `None` once full time has been reached.
    pub fn step(&mut self) -> Option<(Minute, &[MicroEvent])> {
        let minute = self.clock.advance()?;
        let batch = self.generate_minute(minute);

        for event in &batch {
            self.report.record(minute, event);
        }

        log::trace!("fixture={} minute={minute} events={}", self.fixture_id, batch.len());

        let start = self.event_log.len();
        self.event_log.extend(batch);
        Some((minute, &self.event_log[start..]))
    }

    /// Play every remaining minute and finalize the report.
    pub fn run(mut self) -> MatchOutcome {
        while self.step().is_some() {}

        let match_report = self.report.finish();
        log::debug!(
            "fixture={} seed={} full time {}-{} events={} possession={}/{}",
            self.fixture_id,
            self.seed,
            match_report.home_score,
            match_report.away_score,
            self.event_log.len(),
            match_report.possession.home,
            match_report.possession.away,
        );

        MatchOutcome {
            event_log: self.event_log,
            match_report,
        }
    }

    fn generate_minute(&mut self, minute: Minute) -> Vec<MicroEvent> {
        let rng = &mut self.rng;
        let event_count = rng.next_below(MAX_EVENTS_PER_MINUTE) + 1;

        (0..event_count)
            .map(|seed_index| {
                let event_type = draw_event_type(rng, self.home_share);
                let team = if rng.next_f64() > HOME_SIDE_THRESHOLD {
                    Side::Home
                } else {
                    Side::Away
                };
                let player_index = rng.next_below(SQUAD_SIZE);
                let x = rng.next_f64();
                let y = rng.next_f64();
                let second = rng.next_below(crate::clock::SECONDS_PER_MINUTE);

                MicroEvent {
                    fixture_id: EVENT_STAMP_FIXTURE_ID.to_string(),
                    timestamp: MatchClock::timestamp(minute, second),
                    seed_index,
                    event_type,
                    team,
                    player_index,
                    x,
                    y,
                }
            })
            .collect()
    }
}

/// Simulate one fixture end to end.
pub fn simulate_match(
    fixture_id: &str,
    home: &TeamDescriptor,
    away: &TeamDescriptor,
    seed: Seed,
) -> MatchOutcome {
    MatchEngine::new(fixture_id, home.clone(), away.clone(), seed).run()
}
