//! Replay verification.
//!
//! A recorded outcome is trusted only if re-simulating its fixture
//! reproduces it exactly. Digests give storage and transport layers a
//! compact fingerprint to compare without shipping the whole log.
//!
//! Recorded outcomes are read in the shapes the runner writes them: a bare
//! `MatchOutcome`, an envelope carrying `seed` and `outcome`, or one
//! envelope per line for batch output.

use crate::{
    config::FixtureConfig,
    engine::{MatchEngine, MatchOutcome},
    error::{SimError, SimResult},
    seed::Seed,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// A stored outcome plus the seed it was recorded with, when known.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOutcome {
    pub seed:    Option<Seed>,
    pub outcome: MatchOutcome,
}

#[derive(Deserialize)]
struct RecordedEnvelope {
    #[serde(default)]
    seed:    Option<Seed>,
    outcome: MatchOutcome,
}

impl RecordedOutcome {
    /// Parse one JSON document, enveloped or bare.
    pub fn from_json_str(content: &str) -> SimResult<Self> {
        match serde_json::from_str::<RecordedEnvelope>(content) {
            Ok(envelope) => Ok(Self {
                seed:    envelope.seed,
                outcome: envelope.outcome,
            }),
            Err(_) => Ok(Self {
                seed:    None,
                outcome: serde_json::from_str(content)?,
            }),
        }
    }

    /// Parse a whole file: a single document, or one document per line.
    pub fn parse_all(content: &str) -> SimResult<Vec<Self>> {
        if let Ok(single) = Self::from_json_str(content) {
            return Ok(vec![single]);
        }
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::from_json_str)
            .collect()
    }

    pub fn load(path: &str) -> SimResult<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_all(&content)
    }

    /// The fixture to replay. Explicit arguments win over what was recorded;
    /// the fixture id falls back to the report's.
    pub fn fixture(&self, fixture_id: Option<&str>, seed: Option<Seed>) -> SimResult<FixtureConfig> {
        let recorded_id = &self.outcome.match_report.fixture_id;
        let seed = seed.or(self.seed).ok_or_else(|| {
            SimError::InvalidInput(format!("no seed given or recorded for fixture '{recorded_id}'"))
        })?;
        let fixture_id = fixture_id.unwrap_or(recorded_id.as_str());
        Ok(FixtureConfig::reference(fixture_id, seed))
    }
}

/// Lower-case hex SHA-256 of the outcome's JSON serialization.
pub fn outcome_digest(outcome: &MatchOutcome) -> SimResult<String> {
    let json = serde_json::to_vec(outcome)?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Re-simulate `fixture` and compare it against `recorded`.
///
/// Fails with `DeterminismViolation` at the first event that differs. If the
/// logs agree but the reports do not, the violation points one past the last
/// event.
pub fn verify_outcome(fixture: &FixtureConfig, recorded: &MatchOutcome) -> SimResult<()> {
    let replayed = MatchEngine::build(fixture)?.run();

    if let Some(index) = first_divergence(&replayed, recorded) {
        let minute = replayed
            .event_log
            .get(index)
            .or_else(|| recorded.event_log.get(index))
            .or_else(|| replayed.event_log.last())
            .map(|e| e.minute())
            .unwrap_or(0);
        log::warn!(
            "fixture={} seed={} replay diverged at event {index}",
            fixture.fixture_id,
            fixture.seed
        );
        return Err(SimError::DeterminismViolation { index, minute });
    }

    log::debug!(
        "fixture={} seed={} replay verified ({} events)",
        fixture.fixture_id,
        fixture.seed,
        replayed.event_log.len()
    );
    Ok(())
}

fn first_divergence(replayed: &MatchOutcome, recorded: &MatchOutcome) -> Option<usize> {
    let mismatch = replayed
        .event_log
        .iter()
        .zip(&recorded.event_log)
        .position(|(a, b)| a != b);
    if mismatch.is_some() {
        return mismatch;
    }

    let common = replayed.event_log.len().min(recorded.event_log.len());
    if replayed.event_log.len() != recorded.event_log.len()
        || replayed.match_report != recorded.match_report
    {
        return Some(common);
    }
    None
}
