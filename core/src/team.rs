//! Team strength descriptors — the only team data the engine consumes.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

pub const MAX_RATING: u32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamDescriptor {
    pub name:     String,
    pub attack:   u32,
    pub midfield: u32,
    pub defense:  u32,
    pub overall:  u32,
}

impl TeamDescriptor {
    pub fn new(name: impl Into<String>, attack: u32, midfield: u32, defense: u32, overall: u32) -> Self {
        Self {
            name: name.into(),
            attack,
            midfield,
            defense,
            overall,
        }
    }

    /// Derive `overall` as the rounded mean of the three sub-ratings.
    pub fn from_ratings(name: impl Into<String>, attack: u32, midfield: u32, defense: u32) -> Self {
        let sum = u64::from(attack) + u64::from(midfield) + u64::from(defense);
        let overall = (sum as f64 / 3.0).round() as u32;
        Self::new(name, attack, midfield, defense, overall)
    }

    pub fn reference_home() -> Self {
        Self::new("Home Team", 85, 82, 80, 83)
    }

    pub fn reference_away() -> Self {
        Self::new("Away Team", 84, 83, 81, 83)
    }

    pub fn validate(&self) -> SimResult<()> {
        let ratings = [
            ("attack", self.attack),
            ("midfield", self.midfield),
            ("defense", self.defense),
            ("overall", self.overall),
        ];
        for (field, value) in ratings {
            if value > MAX_RATING {
                return Err(SimError::InvalidInput(format!(
                    "team '{}' has {field} rating {value}, max is {MAX_RATING}",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Share of combined strength held by the home side.
pub fn home_strength_share(home: &TeamDescriptor, away: &TeamDescriptor) -> f64 {
    let home_strength = f64::from(home.overall);
    let total = home_strength + f64::from(away.overall);
    home_strength / total
}

/// Validate a pairing: each side on its own, plus a positive combined strength.
pub fn validate_pairing(home: &TeamDescriptor, away: &TeamDescriptor) -> SimResult<()> {
    home.validate()?;
    away.validate()?;
    if home.overall + away.overall == 0 {
        return Err(SimError::InvalidInput(format!(
            "'{}' vs '{}' has zero combined overall rating",
            home.name, away.name
        )));
    }
    Ok(())
}
