//! Team rosters
//!
//! Rosters are produced upstream by the rating pipeline and are read-only
//! for the duration of a season.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};
use crate::core::types::{Conference, PlayerId, PositionGroup};

/// A player as listed on a team roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub number: Option<u8>,
    pub position: PositionGroup,
    pub offense: u32,
    pub defense: u32,
    pub speed: u32,
    pub chemistry: u32,
    pub overall: u32,
}

impl RosterPlayer {
    /// Offense-heavy composite used to fill the top two forward lines
    pub fn scoring_score(&self) -> f64 {
        self.offense as f64 * 0.6 + self.speed as f64 * 0.25 + self.chemistry as f64 * 0.15
    }

    /// Checking composite used for the bottom-six forwards
    pub fn checking_score(&self) -> f64 {
        self.defense as f64 * 0.5 + self.speed as f64 * 0.3 + self.chemistry as f64 * 0.2
    }

    /// Defense-heavy composite used to rank defense pairs
    pub fn pairing_score(&self) -> f64 {
        self.defense as f64 * 0.6 + self.speed as f64 * 0.2 + self.chemistry as f64 * 0.2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<RosterPlayer>,
}

impl Team {
    pub fn players_at(&self, position: PositionGroup) -> impl Iterator<Item = &RosterPlayer> {
        self.players.iter().filter(move |p| p.position == position)
    }
}

/// Both conferences of the league, in table order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct League {
    pub north: Vec<Team>,
    pub south: Vec<Team>,
}

impl League {
    /// Load a league from a JSON or TOML roster file (chosen by extension)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let league: League = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        league.validate()?;
        Ok(league)
    }

    pub fn teams(&self, conference: Conference) -> &[Team] {
        match conference {
            Conference::North => &self.north,
            Conference::South => &self.south,
        }
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.north.iter().chain(self.south.iter()).find(|t| t.name == name)
    }

    pub fn conference_of(&self, name: &str) -> Option<Conference> {
        Conference::ALL
            .into_iter()
            .find(|c| self.teams(*c).iter().any(|t| t.name == name))
    }

    pub fn team_names(&self, conference: Conference) -> Vec<String> {
        self.teams(conference).iter().map(|t| t.name.clone()).collect()
    }

    /// Team names must be unique across the league
    pub fn validate(&self) -> Result<()> {
        let mut seen = ahash::AHashSet::new();
        for team in self.north.iter().chain(self.south.iter()) {
            if !seen.insert(team.name.as_str()) {
                return Err(LeagueError::Config(format!(
                    "team '{}' appears more than once",
                    team.name
                )));
            }
        }
        if self.north.len() < 2 || self.south.len() < 2 {
            return Err(LeagueError::Config(
                "each conference needs at least two teams".into(),
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conference_lookup() {
        let league = fixtures::league(4);
        assert_eq!(league.conference_of("South 2"), Some(Conference::South));
        assert_eq!(league.conference_of("Nowhere"), None);
        assert_eq!(league.team_names(Conference::North).len(), 4);
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let mut league = fixtures::league(3);
        league.south[0].name = "North 1".to_string();
        assert!(league.validate().is_err());
    }

    #[test]
    fn test_parse_json_roster() {
        let json = r#"{
            "north": [
                {"name": "A", "players": [{"id": "a1", "name": "Al", "number": 9, "position": "F",
                  "offense": 70, "defense": 50, "speed": 60, "chemistry": 55, "overall": 66}]},
                {"name": "B", "players": []}
            ],
            "south": [{"name": "C", "players": []}, {"name": "D", "players": []}]
        }"#;
        let league: League = serde_json::from_str(json).unwrap();
        assert!(league.validate().is_ok());
        assert_eq!(league.north[0].players[0].position, PositionGroup::Forward);
        assert_eq!(league.north[0].players[0].number, Some(9));
    }
}
