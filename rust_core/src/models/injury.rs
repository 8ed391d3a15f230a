use serde::{Deserialize, Serialize};

/// Multiplier applied to players whose availability is uncertain.
const UNCERTAIN_IMPACT_SHARE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryStatus {
    Out,
    Doubtful,
    Questionable,
    Probable,
    #[serde(alias = "day-to-day")]
    DayToDay,
    #[serde(alias = "ir")]
    InjuredReserve,
}

impl InjuryStatus {
    /// Player is expected to miss the game.
    pub fn is_likely_out(&self) -> bool {
        matches!(
            self,
            InjuryStatus::Out | InjuryStatus::Doubtful | InjuryStatus::InjuredReserve
        )
    }

    pub fn is_uncertain(&self) -> bool {
        matches!(self, InjuryStatus::Questionable | InjuryStatus::DayToDay)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injury {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    pub status: InjuryStatus,
    pub injury_type: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Impact of this player's absence (0-1)
    #[serde(default = "default_impact_score")]
    pub impact_score: f64,
}

fn default_impact_score() -> f64 {
    0.5
}

impl Injury {
    pub fn new(player_name: &str, team_id: &str, status: InjuryStatus, impact_score: f64) -> Self {
        Self {
            player_id: player_name.to_lowercase().replace(' ', "_"),
            player_name: player_name.to_string(),
            team_id: team_id.to_string(),
            status,
            injury_type: String::new(),
            description: None,
            impact_score,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InjuryReport {
    pub team_id: String,
    pub team_name: String,
    #[serde(default)]
    pub injuries: Vec<Injury>,
}

impl InjuryReport {
    pub fn new(team_id: &str, team_name: &str, injuries: Vec<Injury>) -> Self {
        Self {
            team_id: team_id.to_string(),
            team_name: team_name.to_string(),
            injuries,
        }
    }

    pub fn players_out(&self) -> Vec<&Injury> {
        self.injuries.iter().filter(|i| i.status.is_likely_out()).collect()
    }

    pub fn players_questionable(&self) -> Vec<&Injury> {
        self.injuries.iter().filter(|i| i.status.is_uncertain()).collect()
    }

    pub fn key_injuries(&self, min_impact: f64) -> Vec<&Injury> {
        self.injuries
            .iter()
            .filter(|i| i.impact_score >= min_impact)
            .collect()
    }

    /// Combined absence impact, capped at 1.0.
    ///
    /// Likely-out players count in full, uncertain players at half weight,
    /// probable players not at all.
    pub fn total_impact(&self) -> f64 {
        let out: f64 = self
            .injuries
            .iter()
            .filter(|i| i.status.is_likely_out())
            .map(|i| i.impact_score)
            .sum();
        let uncertain: f64 = self
            .injuries
            .iter()
            .filter(|i| i.status.is_uncertain())
            .map(|i| i.impact_score * UNCERTAIN_IMPACT_SHARE)
            .sum();
        (out + uncertain).min(1.0)
    }
}
