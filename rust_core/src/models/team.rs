use serde::{Deserialize, Serialize};

use super::Sport;

/// Season statistics for a team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Season total points scored
    pub points_for: u32,
    /// Season total points allowed
    pub points_against: u32,
    pub home_record: String,
    pub away_record: String,
    /// Current streak (positive = wins, negative = losses)
    pub streak: i32,
    pub last_10: String,
}

impl TeamStats {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Wins over games played, 0.0 before the first game.
    pub fn win_percentage(&self) -> f64 {
        let total = self.games_played();
        if total == 0 {
            return 0.0;
        }
        self.wins as f64 / total as f64
    }

    pub fn point_differential(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    /// Points scored per decided game (ties excluded, floor of one game).
    pub fn points_per_game(&self) -> f64 {
        let decided = (self.wins + self.losses).max(1);
        self.points_for as f64 / decided as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub city: String,
    pub sport: Sport,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub stats: TeamStats,
}

impl Team {
    pub fn new(id: &str, name: &str, abbreviation: &str, city: &str, sport: Sport) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            city: city.to_string(),
            sport,
            conference: None,
            division: None,
            stats: TeamStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: TeamStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.name)
    }

    /// "W-L", or "W-L-T" once the team has a tie.
    pub fn record(&self) -> String {
        if self.stats.ties > 0 {
            format!("{}-{}-{}", self.stats.wins, self.stats.losses, self.stats.ties)
        } else {
            format!("{}-{}", self.stats.wins, self.stats.losses)
        }
    }
}
