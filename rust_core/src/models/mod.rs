// Shared models for the parlay engine
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParlayError;

pub mod injury;
pub mod matchup;
pub mod parlay;
pub mod team;
pub mod weather;

pub use injury::{Injury, InjuryReport, InjuryStatus};
pub use matchup::{HeadToHead, Matchup, Odds};
pub use parlay::{BetType, LegReport, Parlay, ParlayLeg, ParlayReport, PickConfidence};
pub use team::{Team, TeamStats};
pub use weather::Weather;

// ============================================================================
// Sport Enum
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    NFL,
    NBA,
    MLB,
    NHL,
    NCAAF,
    NCAAB,
    MLS,
    #[serde(rename = "SOCCER")]
    Soccer,
}

impl Sport {
    pub const ALL: [Sport; 8] = [
        Sport::NFL,
        Sport::NBA,
        Sport::MLB,
        Sport::NHL,
        Sport::NCAAF,
        Sport::NCAAB,
        Sport::MLS,
        Sport::Soccer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::NFL => "NFL",
            Sport::NBA => "NBA",
            Sport::MLB => "MLB",
            Sport::NHL => "NHL",
            Sport::NCAAF => "NCAAF",
            Sport::NCAAB => "NCAAB",
            Sport::MLS => "MLS",
            Sport::Soccer => "SOCCER",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = ParlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Sport::ALL
            .iter()
            .copied()
            .find(|sport| sport.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParlayError::UnknownSport(s.to_string()))
    }
}
