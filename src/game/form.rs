//! Seasonal form factor
//!
//! Each team follows its own damped oscillation over the season. The phase
//! and the day-to-day wobble come from a hash of the team name, the
//! matchday and the run id, so a fixed run id always reproduces the same
//! curve while a new run id rolls a fresh one.

use std::f64::consts::TAU;

use crate::core::config::EngineConfig;
use crate::core::types::keyed_unit;

/// Full oscillations over one season
const CYCLES_PER_SEASON: f64 = 2.0;
/// Share of the amplitude given to the per-matchday wobble
const WOBBLE_SHARE: f64 = 0.3;

/// Form multiplier of `team` on a 1-based matchday.
///
/// # Arguments
/// * `matchday` - matchday being played
/// * `total_matchdays` - matchdays in the regular season
/// * `run_id` - re-rolls phase and wobble when changed
///
/// # Returns
/// Multiplier within `1 ± form_amplitude`, drifting toward 1.0 as the
/// season progresses.
pub fn seasonal_form(
    team: &str,
    matchday: u32,
    total_matchdays: u32,
    run_id: u64,
    config: &EngineConfig,
) -> f64 {
    let progress = if total_matchdays == 0 {
        1.0
    } else {
        (matchday as f64 / total_matchdays as f64).clamp(0.0, 1.0)
    };

    let phase = keyed_unit(team, &[run_id]) * TAU;
    let wobble = keyed_unit(team, &[matchday as u64, run_id]) * 2.0 - 1.0;
    let wave = (phase + progress * CYCLES_PER_SEASON * TAU).sin();

    let amplitude = config.form_amplitude * (-config.form_decay * progress).exp();
    let form = 1.0 + amplitude * ((1.0 - WOBBLE_SHARE) * wave + WOBBLE_SHARE * wobble);
    form.clamp(1.0 - config.form_amplitude, 1.0 + config.form_amplitude)
}
