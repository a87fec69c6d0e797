//! Match report — the human-facing summary folded from the event log.
//!
//! RULE: Every MicroEvent is folded exactly once, in log order.
//! Possession is kept as raw ticks until `ReportBuilder::finish`,
//! which is the only place percentages are computed.

use crate::{
    event::{EventType, MicroEvent},
    team::Side,
    types::{FixtureId, Minute},
};
use serde::{Deserialize, Serialize};

/// A per-side counter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideTally {
    pub home: u32,
    pub away: u32,
}

impl SideTally {
    pub fn bump(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

/// One rendered event summary line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub minute:     Minute,
    pub team:       Side,
    pub event_type: EventType,
    pub player:     String,
    pub x:          f64,
    pub y:          f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub fixture_id:   FixtureId,
    pub home_score:   u32,
    pub away_score:   u32,
    pub events:       Vec<ReportLine>,
    /// Percentages once finished; each side rounded on its own.
    pub possession:   SideTally,
    pub shots:        SideTally,
    pub corners:      SideTally,
    pub fouls:        SideTally,
    pub yellow_cards: SideTally,
    pub red_cards:    SideTally,
}

impl MatchReport {
    pub fn total_goals(&self) -> u32 {
        self.home_score + self.away_score
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }
}

/// Folds micro-events into a report while the match is in progress.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    report: MatchReport,
}

impl ReportBuilder {
    pub fn new(fixture_id: impl Into<FixtureId>) -> Self {
        Self {
            report: MatchReport {
                fixture_id:   fixture_id.into(),
                home_score:   0,
                away_score:   0,
                events:       Vec::new(),
                possession:   SideTally::default(),
                shots:        SideTally::default(),
                corners:      SideTally::default(),
                fouls:        SideTally::default(),
                yellow_cards: SideTally::default(),
                red_cards:    SideTally::default(),
            },
        }
    }

    pub fn record(&mut self, minute: Minute, event: &MicroEvent) {
        let report = &mut self.report;
        let side = event.team;

        match event.event_type {
            EventType::Goal => match side {
                Side::Home => report.home_score += 1,
                Side::Away => report.away_score += 1,
            },
            EventType::Possession => report.possession.bump(side),
            EventType::Shot       => report.shots.bump(side),
            EventType::Corner     => report.corners.bump(side),
            EventType::Foul       => report.fouls.bump(side),
            EventType::YellowCard => report.yellow_cards.bump(side),
            EventType::RedCard    => report.red_cards.bump(side),
            EventType::Pass | EventType::Tackle => {}
        }

        report.events.push(ReportLine {
            minute,
            team: side,
            event_type: event.event_type,
            player: event.player_label(),
            x: event.x,
            y: event.y,
        });
    }

    /// Possession ticks recorded so far.
    pub fn possession_ticks(&self) -> SideTally {
        self.report.possession
    }

    /// Convert possession ticks to percentages and hand back the report.
    pub fn finish(mut self) -> MatchReport {
        self.report.possession = possession_percentages(self.report.possession);
        self.report
    }
}

/// Each side is rounded independently, so the pair may sum to 99 or 101.
/// A match with no possession ticks reports 0 for both.
pub fn possession_percentages(ticks: SideTally) -> SideTally {
    let total = ticks.total();
    if total == 0 {
        return SideTally::default();
    }
    let pct = |n: u32| (f64::from(n) / f64::from(total) * 100.0).round() as u32;
    SideTally {
        home: pct(ticks.home),
        away: pct(ticks.away),
    }
}
