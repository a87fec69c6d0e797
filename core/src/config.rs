//! Fixture configuration: what to simulate.
//!
//! A fixture file is a JSON object with a `fixtures` array; each entry needs
//! `fixtureId` and `seed`, and `home` / `away` default to the reference teams.

use crate::{
    error::SimResult,
    seed::Seed,
    team::{validate_pairing, TeamDescriptor},
    types::FixtureId,
};
use serde::{Deserialize, Serialize};

/// One fixture to simulate: id, seed, and both sides' descriptors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FixtureConfig {
    pub fixture_id: FixtureId,
    pub seed:       Seed,
    #[serde(default = "TeamDescriptor::reference_home")]
    pub home:       TeamDescriptor,
    #[serde(default = "TeamDescriptor::reference_away")]
    pub away:       TeamDescriptor,
}

impl FixtureConfig {
    /// A fixture using the reference home and away descriptors.
    pub fn reference(fixture_id: impl Into<FixtureId>, seed: impl Into<Seed>) -> Self {
        Self {
            fixture_id: fixture_id.into(),
            seed:       seed.into(),
            home:       TeamDescriptor::reference_home(),
            away:       TeamDescriptor::reference_away(),
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_pairing(&self.home, &self.away)
    }
}

/// The fixture file format: `{ "fixtures": [ ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixtureSet {
    pub fixtures: Vec<FixtureConfig>,
}

impl FixtureSet {
    /// Load and validate a fixture file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json_str(&content).map_err(|e| anyhow::anyhow!("Invalid fixture file {path}: {e}"))
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let set: FixtureSet = serde_json::from_str(content)?;
        for fixture in &set.fixtures {
            fixture.validate()?;
        }
        Ok(set)
    }
}
