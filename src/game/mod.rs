//! Single-game resolution
//!
//! Strength, regulation draw, tie-break and replay synthesis combined into
//! one call. Everything random comes from the generator passed in.

pub mod form;
pub mod replay;
pub mod resolution;
pub mod result;
pub mod strength;

use rand_chacha::ChaCha8Rng;

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::Side;
use crate::lineup::Lineup;

pub use replay::{Period, Replay, ReplayEvent};
pub use resolution::{Decision, ScoreLine};
pub use result::MatchResult;
pub use strength::{StrengthModifiers, StrengthPanel};

/// Everything one game needs besides the engine constants
#[derive(Debug, Clone, Copy)]
pub struct GameSetup<'a> {
    pub home: &'a Lineup,
    pub away: &'a Lineup,
    pub home_momentum: u32,
    pub away_momentum: u32,
    pub home_form: f64,
    pub away_form: f64,
}

/// Play one game to a decision
pub fn play_game(setup: GameSetup<'_>, config: &EngineConfig, rng: &mut ChaCha8Rng) -> Result<MatchResult> {
    let home_strength = strength::team_strength(
        setup.home,
        StrengthModifiers {
            side: Side::Home,
            momentum: setup.home_momentum,
            form: setup.home_form,
        },
        config,
        rng,
    );
    let away_strength = strength::team_strength(
        setup.away,
        StrengthModifiers {
            side: Side::Away,
            momentum: setup.away_momentum,
            form: setup.away_form,
        },
        config,
        rng,
    );
    let p = strength::win_probability(home_strength, away_strength);

    let resolved = resolution::resolve_score(p, config, rng)?;
    let replay = replay::build_replay(
        setup.home,
        setup.away,
        &resolved,
        config.possessions_per_game,
        rng,
    );

    let panel = StrengthPanel {
        home_average_overall: setup.home.average_overall(),
        away_average_overall: setup.away.average_overall(),
        home_strength,
        away_strength,
        home_win_probability: p,
        home_form: setup.home_form,
        away_form: setup.away_form,
    };
    let result = MatchResult::from_replay(replay, panel)?;
    tracing::debug!(
        "{} - {} {} (p_home {:.3})",
        result.home,
        result.away,
        result.score_label(),
        p
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LineupConfig;
    use crate::lineup::build_lineup;
    use crate::roster::fixtures;
    use rand::SeedableRng;

    #[test]
    fn test_play_game_is_seed_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let home = build_lineup(&fixtures::team("Haie", 13, 8, 2, 82), &LineupConfig::default(), &mut rng);
        let away = build_lineup(&fixtures::team("Adler", 13, 8, 2, 80), &LineupConfig::default(), &mut rng);
        let setup = GameSetup {
            home: &home,
            away: &away,
            home_momentum: 2,
            away_momentum: 0,
            home_form: 1.05,
            away_form: 0.97,
        };
        let config = EngineConfig::default();
        let a = play_game(setup, &config, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = play_game(setup, &config, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        assert!(!a.final_score.is_tied());
        assert_eq!(a.points(Side::Home) + a.points(Side::Away), 3);
    }
}
