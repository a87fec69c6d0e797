//! Fixture seeds and their textual forms.
//!
//! A seed arrives either as a JSON number or as a string: plain decimal,
//! or hex with a `0x` prefix. Anything else is rejected here, before a
//! generator is ever constructed.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64);

impl Seed {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn parse(text: &str) -> SimResult<Self> {
        let trimmed = text.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) if is_hex_digits(hex) => u64::from_str_radix(hex, 16),
            Some(_) => {
                return Err(SimError::InvalidInput(format!(
                    "seed '{text}' must have 1 to 16 hex digits"
                )))
            }
            None => trimmed.parse::<u64>(),
        };
        parsed
            .map(Seed)
            .map_err(|e| SimError::InvalidInput(format!("seed '{text}' is not a valid u64: {e}")))
    }
}

fn is_hex_digits(text: &str) -> bool {
    (1..=16).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_hexdigit())
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed(value)
    }
}

impl FromStr for Seed {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Seed::parse(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SeedRepr::deserialize(deserializer)? {
            SeedRepr::Number(n) => Ok(Seed(n)),
            SeedRepr::Text(s) => Seed::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}
