//! Narrative ordering constraints for one designated team
//!
//! The focus team alternates home and away from its first game on, and its
//! third game is a home game against the rival. Both constraints are met by
//! flipping venues of whole pairs and by swapping whole matchdays, so every
//! round stays a perfect matching and every pair still meets once per venue.
//! When a constraint cannot be met the rounds are left exactly as generated.

use crate::core::config::StorylineConfig;
use crate::core::types::slugify;

use super::Fixture;

/// Zero-based index of the focus team's milestone game
const MILESTONE_ROUND: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorylineOutcome {
    /// Constraints hold; `swapped_round` is the round moved into the milestone slot
    Applied { swapped_round: Option<usize> },
    Skipped(&'static str),
}

/// Resolve a configured name against the conference by slug containment
pub fn find_team<'a>(teams: &'a [String], query: &str) -> Option<&'a str> {
    let needle = slugify(query);
    if needle.is_empty() {
        return None;
    }
    teams
        .iter()
        .find(|t| slugify(t) == needle)
        .or_else(|| teams.iter().find(|t| slugify(t).contains(&needle)))
        .map(|t| t.as_str())
}

pub fn apply_storyline(
    rounds: &mut [Vec<Fixture>],
    teams: &[String],
    config: &StorylineConfig,
) -> StorylineOutcome {
    if !config.enabled {
        return StorylineOutcome::Skipped("disabled");
    }
    if teams.len() % 2 == 1 {
        return StorylineOutcome::Skipped("odd team count");
    }
    if rounds.len() <= MILESTONE_ROUND {
        return StorylineOutcome::Skipped("too few matchdays");
    }
    let Some(focus) = find_team(teams, &config.focus_team) else {
        return StorylineOutcome::Skipped("focus team not in conference");
    };
    let Some(rival) = find_team(teams, &config.rival_team) else {
        return StorylineOutcome::Skipped("rival team not in conference");
    };
    if focus == rival {
        return StorylineOutcome::Skipped("focus and rival resolve to the same team");
    }

    let original = rounds.to_vec();

    if !alternate_venues(rounds, focus) {
        rounds.clone_from_slice(&original);
        return StorylineOutcome::Skipped("home/away alternation not feasible");
    }

    let Some(hosting) = rounds
        .iter()
        .position(|r| r.iter().any(|f| f.home == focus && f.away == rival))
    else {
        rounds.clone_from_slice(&original);
        return StorylineOutcome::Skipped("focus never hosts rival");
    };

    // Swapping rounds of different parity would break the alternation
    if hosting % 2 != MILESTONE_ROUND % 2 {
        rounds.clone_from_slice(&original);
        return StorylineOutcome::Skipped("milestone swap breaks alternation");
    }

    if hosting == MILESTONE_ROUND {
        return StorylineOutcome::Applied {
            swapped_round: None,
        };
    }
    rounds.swap(MILESTONE_ROUND, hosting);
    StorylineOutcome::Applied {
        swapped_round: Some(hosting),
    }
}

/// Flip focus-team pairs until the focus team is home in even rounds and
/// away in odd ones. Returns false if the result does not alternate.
fn alternate_venues(rounds: &mut [Vec<Fixture>], focus: &str) -> bool {
    let first_leg = rounds.len() / 2;
    for r in 0..first_leg {
        let want_home = r % 2 == 0;
        let Some(i) = rounds[r].iter().position(|f| f.involves(focus)) else {
            return false;
        };
        if (rounds[r][i].home == focus) == want_home {
            continue;
        }
        let game = rounds[r][i].clone();
        rounds[r][i] = game.flipped();
        // The return leg flips with it so each venue is still used once
        let return_leg = rounds
            .iter()
            .enumerate()
            .skip(r + 1)
            .find_map(|(ri, round)| {
                round
                    .iter()
                    .position(|f| f.same_pair(&game))
                    .map(|fi| (ri, fi))
            });
        match return_leg {
            Some((ri, fi)) => rounds[ri][fi] = rounds[ri][fi].flipped(),
            None => return false,
        }
    }

    rounds.iter().enumerate().all(|(r, round)| {
        let mut games = round.iter().filter(|f| f.involves(focus));
        match (games.next(), games.next()) {
            (Some(f), None) => (f.home == focus) == (r % 2 == 0),
            _ => false,
        }
    })
}
