use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InjuryReport, Sport, Team, Weather};
use crate::utils::odds::implied_probability;

/// Market lines for a matchup, all prices in American odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Odds {
    /// Home point spread (negative = home favored)
    pub spread: f64,
    pub spread_odds: i32,
    pub moneyline_home: i32,
    pub moneyline_away: i32,
    pub over_under: f64,
    pub over_odds: i32,
    pub under_odds: i32,
}

impl Default for Odds {
    fn default() -> Self {
        Self {
            spread: 0.0,
            spread_odds: -110,
            moneyline_home: -110,
            moneyline_away: -110,
            over_under: 0.0,
            over_odds: -110,
            under_odds: -110,
        }
    }
}

impl Odds {
    pub fn home_win_probability(&self) -> f64 {
        implied_probability(self.moneyline_home)
    }

    pub fn away_win_probability(&self) -> f64 {
        implied_probability(self.moneyline_away)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadToHead {
    pub home_wins: u32,
    pub away_wins: u32,
    pub ties: u32,
    pub avg_total_points: f64,
    pub last_winner: Option<String>,
}

impl HeadToHead {
    pub fn total_games(&self) -> u32 {
        self.home_wins + self.away_wins + self.ties
    }
}

/// A scheduled game with everything the engine reads about it.
///
/// Supplied fully populated by the data layer; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: String,
    pub sport: Sport,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub game_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_neutral_site: bool,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub odds: Odds,
    #[serde(default)]
    pub home_injuries: Option<InjuryReport>,
    #[serde(default)]
    pub away_injuries: Option<InjuryReport>,
    #[serde(default)]
    pub head_to_head: HeadToHead,
}

impl Matchup {
    pub fn new(id: &str, sport: Sport, home_team: Team, away_team: Team) -> Self {
        Self {
            id: id.to_string(),
            sport,
            home_team,
            away_team,
            venue: String::new(),
            game_time: None,
            is_neutral_site: false,
            weather: None,
            odds: Odds::default(),
            home_injuries: None,
            away_injuries: None,
            head_to_head: HeadToHead::default(),
        }
    }

    pub fn home_injury_impact(&self) -> f64 {
        self.home_injuries
            .as_ref()
            .map(InjuryReport::total_impact)
            .unwrap_or(0.0)
    }

    pub fn away_injury_impact(&self) -> f64 {
        self.away_injuries
            .as_ref()
            .map(InjuryReport::total_impact)
            .unwrap_or(0.0)
    }

    /// Positive favors home (away side is more hurt).
    pub fn injury_differential(&self) -> f64 {
        self.away_injury_impact() - self.home_injury_impact()
    }

    /// Outdoor weather that materially changes how the game is played.
    pub fn has_disruptive_weather(&self) -> bool {
        self.weather
            .as_ref()
            .map(|w| !w.is_dome && w.affects_gameplay())
            .unwrap_or(false)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} @ {}",
            self.away_team.full_name(),
            self.home_team.full_name()
        );
        if let Some(time) = self.game_time {
            summary.push_str(&format!(" - {}", time.format("%Y-%m-%d %H:%M")));
        }
        if !self.venue.is_empty() {
            summary.push_str(&format!(" at {}", self.venue));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Injury, InjuryStatus};

    fn matchup() -> Matchup {
        let home = Team::new("kc", "Chiefs", "KC", "Kansas City", Sport::NFL);
        let away = Team::new("buf", "Bills", "BUF", "Buffalo", Sport::NFL);
        Matchup::new("g1", Sport::NFL, home, away)
    }

    #[test]
    fn test_default_odds_are_standard_juice() {
        let odds = Odds::default();
        assert_eq!(odds.spread_odds, -110);
        assert!((odds.home_win_probability() - 110.0 / 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_injury_differential_favors_healthier_home() {
        let mut m = matchup();
        m.away_injuries = Some(InjuryReport::new(
            "buf",
            "Bills",
            vec![Injury::new("QB", "buf", InjuryStatus::Out, 0.6)],
        ));
        assert!((m.injury_differential() - 0.6).abs() < 1e-9);
        assert_eq!(m.home_injury_impact(), 0.0);
    }

    #[test]
    fn test_head_to_head_counts_ties() {
        let h2h = HeadToHead {
            home_wins: 3,
            away_wins: 1,
            ties: 1,
            ..Default::default()
        };
        assert_eq!(h2h.total_games(), 5);
    }

    #[test]
    fn test_summary() {
        let mut m = matchup();
        m.venue = "Arrowhead Stadium".to_string();
        assert_eq!(
            m.summary(),
            "Buffalo Bills @ Kansas City Chiefs at Arrowhead Stadium"
        );
    }

    #[test]
    fn test_deserialize_minimal_matchup() {
        let json = r#"{
            "id": "g9",
            "sport": "NBA",
            "home_team": {
                "id": "bos", "name": "Celtics", "abbreviation": "BOS",
                "city": "Boston", "sport": "NBA"
            },
            "away_team": {
                "id": "mia", "name": "Heat", "abbreviation": "MIA",
                "city": "Miami", "sport": "NBA"
            },
            "odds": {"spread": -4.5}
        }"#;
        let m: Matchup = serde_json::from_str(json).unwrap();
        assert_eq!(m.sport, Sport::NBA);
        assert_eq!(m.odds.spread, -4.5);
        assert_eq!(m.odds.moneyline_away, -110);
        assert!(m.weather.is_none());
        assert_eq!(m.head_to_head.total_games(), 0);
    }
}
