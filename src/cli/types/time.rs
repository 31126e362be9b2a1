//! Season type for IPL competitions.

use crate::error::{IplError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First season of the competition.
pub const FIRST_SEASON: u16 = 2008;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The `n` seasons immediately before this one, oldest first.
    pub fn preceding(&self, n: u16) -> Vec<Season> {
        (1..=n)
            .rev()
            .filter_map(|back| self.0.checked_sub(back))
            .map(Season)
            .collect()
    }

    /// Every season from the first edition up to and including this one.
    pub fn all_through(&self) -> impl Iterator<Item = Season> {
        (FIRST_SEASON..=self.0).map(Season)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = IplError;

    fn from_str(s: &str) -> Result<Self> {
        let year: u16 = s.trim().parse()?;
        if year < FIRST_SEASON {
            return Err(IplError::InvalidArgument {
                message: format!("season {} predates the first edition ({})", year, FIRST_SEASON),
            });
        }
        Ok(Self(year))
    }
}
