//! Playoff bracket
//!
//! The top seeds of each conference are cross-paired (north 1 against south
//! 4, north 2 against south 3, and so on). Every round is a set of
//! independent series played game by game until one side reaches the
//! required wins. Winners keep their bracket position, so adjacent
//! survivors meet in the next round.

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};
use crate::core::types::Conference;
use crate::game::{Decision, MatchResult};

use super::state::{PlayoffSeed, SeasonState};

/// Seed the bracket from the final regular-season tables
pub fn seed_bracket(state: &SeasonState, per_conference: usize) -> Result<Vec<PlayoffSeed>> {
    let seeds = |conference: Conference| -> Result<Vec<PlayoffSeed>> {
        let ranked = state.conference(conference).standings.ranked();
        if ranked.len() < per_conference {
            return Err(LeagueError::PlayoffSeeding(format!(
                "{} has {} teams, {} seeds required",
                conference.label(),
                ranked.len(),
                per_conference
            )));
        }
        Ok(ranked
            .into_iter()
            .take(per_conference)
            .enumerate()
            .map(|(i, row)| PlayoffSeed {
                team: row.name.clone(),
                conference,
                seed: i as u32 + 1,
            })
            .collect())
    };
    let north = seeds(Conference::North)?;
    let south = seeds(Conference::South)?;

    let mut bracket = Vec::with_capacity(per_conference * 2);
    for (i, n) in north.into_iter().enumerate() {
        bracket.push(n);
        bracket.push(south[per_conference - 1 - i].clone());
    }
    Ok(bracket)
}

/// Adjacent survivors form this round's series, better seed first
pub fn pair_round(alive: &[PlayoffSeed]) -> Result<Vec<(PlayoffSeed, PlayoffSeed)>> {
    if alive.len() < 2 || alive.len() % 2 == 1 {
        return Err(LeagueError::InvalidPlayoffState(format!(
            "cannot pair {} surviving teams",
            alive.len()
        )));
    }
    Ok(alive
        .chunks(2)
        .map(|pair| {
            let (a, b) = (pair[0].clone(), pair[1].clone());
            if b.seed < a.seed {
                (b, a)
            } else {
                (a, b)
            }
        })
        .collect())
}

/// Whether the better seed hosts game `game` (1-based).
///
/// Best-of-seven uses the 2-2-1-1-1 format; other lengths alternate.
pub fn higher_seed_hosts(game: u32, wins_needed: u32) -> bool {
    if wins_needed == 4 {
        matches!(game, 1 | 2 | 5 | 7)
    } else {
        game % 2 == 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGame {
    pub game: u32,
    pub home: String,
    pub away: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub decision: Decision,
    pub winner: String,
}

impl SeriesGame {
    fn from_result(game: u32, result: &MatchResult) -> Self {
        Self {
            game,
            home: result.home.clone(),
            away: result.away.clone(),
            home_goals: result.final_score.home,
            away_goals: result.final_score.away,
            decision: result.decision,
            winner: result.winner().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub higher_seed: PlayoffSeed,
    pub lower_seed: PlayoffSeed,
    pub games: Vec<SeriesGame>,
    pub higher_wins: u32,
    pub lower_wins: u32,
    pub winner: String,
    /// Series score from the winner's side, e.g. "4:2"
    pub result: String,
}

impl SeriesResult {
    pub fn winner_seed(&self) -> &PlayoffSeed {
        if self.higher_wins > self.lower_wins {
            &self.higher_seed
        } else {
            &self.lower_seed
        }
    }
}

/// Play a series one game at a time until a side has `wins_needed` wins.
///
/// `play` receives home team, away team and the 1-based game number.
pub fn play_series<F>(
    higher: &PlayoffSeed,
    lower: &PlayoffSeed,
    wins_needed: u32,
    mut play: F,
) -> Result<SeriesResult>
where
    F: FnMut(&str, &str, u32) -> Result<MatchResult>,
{
    let mut games = Vec::new();
    let (mut higher_wins, mut lower_wins) = (0u32, 0u32);

    while higher_wins < wins_needed && lower_wins < wins_needed {
        let game = games.len() as u32 + 1;
        let (home, away) = if higher_seed_hosts(game, wins_needed) {
            (&higher.team, &lower.team)
        } else {
            (&lower.team, &higher.team)
        };
        let result = play(home, away, game)?;
        if result.winner() == higher.team {
            higher_wins += 1;
        } else if result.winner() == lower.team {
            lower_wins += 1;
        } else {
            return Err(LeagueError::InvalidPlayoffState(format!(
                "series game {} returned winner {}",
                game,
                result.winner()
            )));
        }
        games.push(SeriesGame::from_result(game, &result));
    }

    let (winner, result) = if higher_wins > lower_wins {
        (higher.team.clone(), format!("{}:{}", higher_wins, lower_wins))
    } else {
        (lower.team.clone(), format!("{}:{}", lower_wins, higher_wins))
    };
    Ok(SeriesResult {
        higher_seed: higher.clone(),
        lower_seed: lower.clone(),
        games,
        higher_wins,
        lower_wins,
        winner,
        result,
    })
}
