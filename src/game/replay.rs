//! Replay log synthesis
//!
//! Regulation goals are shuffled together with non-goal possessions and
//! each placeholder is expanded into a short step sequence. The extra-time
//! goal, if any, always comes last. Team scores and player points are read
//! back from this log, so it is the only record of who scored.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Side};
use crate::lineup::Lineup;
use crate::roster::RosterPlayer;

use super::resolution::{Decision, ResolvedScore, ScoreLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Regulation,
    Overtime,
    Shootout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    BuildUp,
    Attack,
    Shot,
    Goal,
    Save,
    Turnover,
}

/// Credited player on a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub id: PlayerId,
    pub name: String,
}

impl From<&RosterPlayer> for Credit {
    fn from(player: &RosterPlayer) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCredit {
    pub scorer: Option<Credit>,
    pub assist: Option<Credit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayEvent {
    pub index: u32,
    pub period: Period,
    /// Side in possession
    pub side: Side,
    pub team: String,
    pub steps: Vec<Step>,
    /// Present exactly when the possession ends in a goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalCredit>,
}

impl ReplayEvent {
    pub fn is_goal(&self) -> bool {
        self.goal.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub home: String,
    pub away: String,
    pub events: Vec<ReplayEvent>,
}

impl Replay {
    pub fn goals(&self) -> impl Iterator<Item = &ReplayEvent> {
        self.events.iter().filter(|e| e.is_goal())
    }

    /// Score counted from goal events, optionally limited to one period
    pub fn score(&self, period: Option<Period>) -> ScoreLine {
        let mut score = ScoreLine::default();
        for event in self.goals() {
            if period.map_or(true, |p| p == event.period) {
                score.add_goal(event.side);
            }
        }
        score
    }

    /// Period of the deciding extra goal, if the game needed one
    pub fn extra_period(&self) -> Option<Period> {
        self.goals()
            .map(|e| e.period)
            .find(|p| *p != Period::Regulation)
    }
}

/// Placeholder before expansion into steps
#[derive(Debug, Clone, Copy)]
enum Possession {
    Goal(Side),
    Empty(Side),
}

fn pick_scorer<'a>(skaters: &[&'a RosterPlayer], rng: &mut ChaCha8Rng) -> Option<&'a RosterPlayer> {
    let weights: Vec<u32> = skaters.iter().map(|p| p.offense.max(1)).collect();
    let dist = WeightedIndex::new(&weights).ok()?;
    Some(skaters[dist.sample(rng)])
}

fn pick_assist<'a>(
    skaters: &[&'a RosterPlayer],
    scorer: Option<&RosterPlayer>,
    rng: &mut ChaCha8Rng,
) -> Option<&'a RosterPlayer> {
    let teammates: Vec<&RosterPlayer> = skaters
        .iter()
        .copied()
        .filter(|p| scorer.map_or(true, |s| s.id != p.id))
        .collect();
    teammates.choose(rng).copied()
}

/// Skaters eligible for credit, falling back to the goalie for an
/// otherwise empty lineup
fn credit_pool(lineup: &Lineup) -> Vec<&RosterPlayer> {
    let skaters: Vec<&RosterPlayer> = lineup.skaters_on_ice().collect();
    if skaters.is_empty() {
        lineup.goalie().into_iter().collect()
    } else {
        skaters
    }
}

/// Build the replay for a resolved game.
///
/// Produces exactly `regulation.home + regulation.away` regulation goal
/// events plus one overtime or shootout goal when `resolved` carries one.
pub fn build_replay(
    home: &Lineup,
    away: &Lineup,
    resolved: &ResolvedScore,
    possessions: usize,
    rng: &mut ChaCha8Rng,
) -> Replay {
    let pools = [credit_pool(home), credit_pool(away)];
    let pool = |side: Side| match side {
        Side::Home => &pools[0],
        Side::Away => &pools[1],
    };
    let team = |side: Side| match side {
        Side::Home => home.team.clone(),
        Side::Away => away.team.clone(),
    };

    let mut placeholders = Vec::with_capacity(resolved.regulation.total() as usize + possessions);
    placeholders.extend((0..resolved.regulation.home).map(|_| Possession::Goal(Side::Home)));
    placeholders.extend((0..resolved.regulation.away).map(|_| Possession::Goal(Side::Away)));
    for _ in 0..possessions {
        let side = if rng.gen_bool(0.5) { Side::Home } else { Side::Away };
        placeholders.push(Possession::Empty(side));
    }
    placeholders.shuffle(rng);

    let mut events = Vec::with_capacity(placeholders.len() + 1);
    for possession in placeholders {
        let index = events.len() as u32;
        let event = match possession {
            Possession::Goal(side) => {
                let scorer = pick_scorer(pool(side), rng);
                let assist = pick_assist(pool(side), scorer, rng);
                ReplayEvent {
                    index,
                    period: Period::Regulation,
                    side,
                    team: team(side),
                    steps: vec![Step::BuildUp, Step::Attack, Step::Shot, Step::Goal],
                    goal: Some(GoalCredit {
                        scorer: scorer.map(Credit::from),
                        assist: assist.map(Credit::from),
                    }),
                }
            }
            Possession::Empty(side) => {
                let end = if rng.gen_bool(0.5) { Step::Save } else { Step::Turnover };
                ReplayEvent {
                    index,
                    period: Period::Regulation,
                    side,
                    team: team(side),
                    steps: vec![Step::BuildUp, Step::Attack, end],
                    goal: None,
                }
            }
        };
        events.push(event);
    }

    if let Some(side) = resolved.extra_goal {
        let index = events.len() as u32;
        let scorer = pick_scorer(pool(side), rng);
        let event = match resolved.decision {
            Decision::Shootout => ReplayEvent {
                index,
                period: Period::Shootout,
                side,
                team: team(side),
                steps: vec![Step::Attack, Step::Shot, Step::Goal],
                goal: Some(GoalCredit {
                    scorer: scorer.map(Credit::from),
                    assist: None,
                }),
            },
            _ => ReplayEvent {
                index,
                period: Period::Overtime,
                side,
                team: team(side),
                steps: vec![Step::BuildUp, Step::Attack, Step::Shot, Step::Goal],
                goal: Some(GoalCredit {
                    scorer: scorer.map(Credit::from),
                    assist: pick_assist(pool(side), scorer, rng).map(Credit::from),
                }),
            },
        };
        events.push(event);
    }

    Replay {
        home: home.team.clone(),
        away: away.team.clone(),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LineupConfig;
    use crate::lineup::build_lineup;
    use crate::roster::fixtures;

    fn lineups() -> (Lineup, Lineup) {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let home = build_lineup(&fixtures::team("Haie", 13, 8, 2, 80), &LineupConfig::default(), &mut rng);
        let away = build_lineup(&fixtures::team("Adler", 13, 8, 2, 78), &LineupConfig::default(), &mut rng);
        (home, away)
    }

    #[test]
    fn test_goal_events_match_score() {
        let (home, away) = lineups();
        let resolved = ResolvedScore {
            regulation: ScoreLine::new(4, 2),
            decision: Decision::Regulation,
            extra_goal: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let replay = build_replay(&home, &away, &resolved, 14, &mut rng);
        assert_eq!(replay.events.len(), 20);
        assert_eq!(replay.score(None), ScoreLine::new(4, 2));
        assert_eq!(replay.extra_period(), None);
        for (i, e) in replay.events.iter().enumerate() {
            assert_eq!(e.index as usize, i);
            assert!(e.steps.len() == 3 || e.steps.len() == 4);
        }
    }

    #[test]
    fn test_overtime_goal_is_last() {
        let (home, away) = lineups();
        let resolved = ResolvedScore {
            regulation: ScoreLine::new(2, 2),
            decision: Decision::Overtime,
            extra_goal: Some(Side::Away),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let replay = build_replay(&home, &away, &resolved, 10, &mut rng);
        let last = replay.events.last().unwrap();
        assert_eq!(last.period, Period::Overtime);
        assert_eq!(last.side, Side::Away);
        assert_eq!(replay.score(None), ScoreLine::new(2, 3));
        assert_eq!(replay.score(Some(Period::Regulation)), ScoreLine::new(2, 2));
    }

    #[test]
    fn test_shootout_goal_has_no_assist() {
        let (home, away) = lineups();
        let resolved = ResolvedScore {
            regulation: ScoreLine::new(1, 1),
            decision: Decision::Shootout,
            extra_goal: Some(Side::Home),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let replay = build_replay(&home, &away, &resolved, 0, &mut rng);
        let last = replay.events.last().unwrap();
        assert_eq!(last.period, Period::Shootout);
        assert_eq!(last.steps, vec![Step::Attack, Step::Shot, Step::Goal]);
        let credit = last.goal.as_ref().unwrap();
        assert!(credit.scorer.is_some());
        assert!(credit.assist.is_none());
    }

    #[test]
    fn test_every_event_has_three_or_four_steps() {
        let (home, away) = lineups();
        for decision in [Decision::Regulation, Decision::Overtime, Decision::Shootout] {
            let resolved = ResolvedScore {
                regulation: if decision == Decision::Regulation {
                    ScoreLine::new(3, 1)
                } else {
                    ScoreLine::new(2, 2)
                },
                decision,
                extra_goal: (decision != Decision::Regulation).then_some(Side::Away),
            };
            let mut rng = ChaCha8Rng::seed_from_u64(17);
            let replay = build_replay(&home, &away, &resolved, 12, &mut rng);
            for event in &replay.events {
                assert!((3..=4).contains(&event.steps.len()));
                assert_eq!(event.steps.last() == Some(&Step::Goal), event.goal.is_some());
            }
        }
    }

    #[test]
    fn test_scorer_and_assist_are_teammates_on_ice() {
        let (home, away) = lineups();
        let resolved = ResolvedScore {
            regulation: ScoreLine::new(6, 5),
            decision: Decision::Regulation,
            extra_goal: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let replay = build_replay(&home, &away, &resolved, 0, &mut rng);
        for event in replay.goals() {
            let lineup = if event.side == Side::Home { &home } else { &away };
            let eligible: Vec<&PlayerId> = lineup.skaters_on_ice().map(|p| &p.id).collect();
            let credit = event.goal.as_ref().unwrap();
            let scorer = credit.scorer.as_ref().unwrap();
            let assist = credit.assist.as_ref().unwrap();
            assert!(eligible.contains(&&scorer.id));
            assert!(eligible.contains(&&assist.id));
            assert_ne!(scorer.id, assist.id);
        }
    }
}
