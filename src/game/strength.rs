//! Team strength for a single game

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::types::Side;
use crate::lineup::Lineup;
use crate::roster::RosterPlayer;

/// Strength used when a lineup has nobody in it
const EMPTY_LINEUP_STRENGTH: f64 = 1.0;

/// Modifiers applied to one side's base strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthModifiers {
    pub side: Side,
    pub momentum: u32,
    pub form: f64,
}

/// Attribute blend of one player: offense 0.4, defense 0.3, speed 0.2, chemistry 0.1
pub fn player_rating(player: &RosterPlayer) -> f64 {
    player.offense as f64 * 0.4
        + player.defense as f64 * 0.3
        + player.speed as f64 * 0.2
        + player.chemistry as f64 * 0.1
}

/// Mean attribute blend across the whole lineup
pub fn base_strength(lineup: &Lineup) -> f64 {
    if lineup.is_empty() {
        return EMPTY_LINEUP_STRENGTH;
    }
    let total: f64 = lineup.players().map(|p| player_rating(&p.player)).sum();
    (total / lineup.len() as f64).max(EMPTY_LINEUP_STRENGTH)
}

/// Base strength times daily variance, momentum, home ice and form
pub fn team_strength(
    lineup: &Lineup,
    modifiers: StrengthModifiers,
    config: &EngineConfig,
    rng: &mut ChaCha8Rng,
) -> f64 {
    let daily = if config.daily_variance > 0.0 {
        1.0 + rng.gen_range(-config.daily_variance..=config.daily_variance)
    } else {
        1.0
    };
    let momentum = 1.0 + modifiers.momentum as f64 / 100.0;
    let home = match modifiers.side {
        Side::Home => 1.0 + config.home_advantage,
        Side::Away => 1.0,
    };
    base_strength(lineup) * daily * momentum * home * modifiers.form
}

/// Home win probability from the two strengths
pub fn win_probability(home: f64, away: f64) -> f64 {
    let total = home + away;
    if total <= 0.0 {
        0.5
    } else {
        home / total
    }
}

/// Per-game strength breakdown for the matchday debug panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthPanel {
    pub home_average_overall: f64,
    pub away_average_overall: f64,
    pub home_strength: f64,
    pub away_strength: f64,
    pub home_win_probability: f64,
    pub home_form: f64,
    pub away_form: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LineupConfig;
    use crate::lineup::build_lineup;
    use crate::roster::fixtures;
    use rand::SeedableRng;

    fn lineup(top: u32) -> Lineup {
        let team = fixtures::team("Test", 12, 7, 1, top);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        build_lineup(&team, &LineupConfig::default(), &mut rng)
    }

    #[test]
    fn test_player_rating_weights() {
        let team = fixtures::team("Solo", 1, 0, 0, 80);
        let p = &team.players[0];
        // offense 80, defense 75, speed 80, chemistry 60
        assert!((player_rating(p) - (32.0 + 22.5 + 16.0 + 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_home_ice_raises_strength() {
        let config = EngineConfig {
            daily_variance: 0.0,
            ..EngineConfig::default()
        };
        let l = lineup(75);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let home = team_strength(
            &l,
            StrengthModifiers { side: Side::Home, momentum: 0, form: 1.0 },
            &config,
            &mut rng,
        );
        let away = team_strength(
            &l,
            StrengthModifiers { side: Side::Away, momentum: 0, form: 1.0 },
            &config,
            &mut rng,
        );
        assert!((home / away - 1.03).abs() < 1e-9);
    }

    #[test]
    fn test_momentum_scales_strength() {
        let config = EngineConfig {
            daily_variance: 0.0,
            ..EngineConfig::default()
        };
        let l = lineup(75);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cold = team_strength(
            &l,
            StrengthModifiers { side: Side::Away, momentum: 0, form: 1.0 },
            &config,
            &mut rng,
        );
        let hot = team_strength(
            &l,
            StrengthModifiers { side: Side::Away, momentum: 4, form: 1.0 },
            &config,
            &mut rng,
        );
        assert!((hot / cold - 1.04).abs() < 1e-9);
    }

    #[test]
    fn test_stronger_lineup_is_favoured() {
        let strong = base_strength(&lineup(90));
        let weak = base_strength(&lineup(60));
        assert!(win_probability(strong, weak) > 0.5);
        assert_eq!(win_probability(0.0, 0.0), 0.5);
    }
}
