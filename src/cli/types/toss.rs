//! Toss decision type.

use crate::error::IplError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the toss winner chose to do first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}

impl TossDecision {
    /// Lenient parse used for CSV cells; blanks and unknown words are `None`.
    pub fn parse_cell(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for TossDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TossDecision::Bat => "bat",
            TossDecision::Field => "field",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TossDecision {
    type Err = IplError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bat" | "batting" => Ok(TossDecision::Bat),
            "field" | "fielding" | "bowl" | "bowling" => Ok(TossDecision::Field),
            other => Err(IplError::InvalidArgument {
                message: format!("unknown toss decision '{}'", other),
            }),
        }
    }
}
