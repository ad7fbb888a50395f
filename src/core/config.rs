//! League configuration with documented constants
//!
//! All tuning numbers of the engine live here. The config is an explicit
//! value handed to the season engine; nothing reads it from a global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};

/// Root configuration, usually loaded from `league.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Directory that receives the save file and every artifact
    pub data_root: PathBuf,
    /// Roster file (JSON or TOML), relative paths resolve against the config file
    pub teams_file: PathBuf,
    /// Base seed for all per-matchday generators
    pub seed: u64,
    /// Changing the run id re-rolls seasonal form and game draws
    pub run_id: u64,
    pub lineup: LineupConfig,
    pub engine: EngineConfig,
    pub storyline: StorylineConfig,
    pub playoffs: PlayoffConfig,
    pub output: OutputConfig,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            teams_file: PathBuf::from("teams.json"),
            seed: 20_240_901,
            run_id: 0,
            lineup: LineupConfig::default(),
            engine: EngineConfig::default(),
            storyline: StorylineConfig::default(),
            playoffs: PlayoffConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Game-day lineup sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    pub defenders: usize,
    pub forwards: usize,
    pub goalies: usize,
    /// Selection noise as a fraction of each player's overall rating
    ///
    /// At 0.3 a 70-rated player draws a score in 49..91, so close ratings
    /// swap places regularly while a large gap almost never does.
    pub jitter: f64,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            defenders: 7,
            forwards: 12,
            goalies: 1,
            jitter: 0.3,
        }
    }
}

/// Match resolution constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed home-ice multiplier bonus (0.03 = +3%)
    pub home_advantage: f64,
    /// Expected total regulation goals; each side's mean is probability * scale
    pub goal_scale: f64,
    /// Standard deviation of a regulation goal draw for a lopsided game
    pub base_goal_sd: f64,
    /// Extra standard deviation added as the game approaches 50/50
    pub even_match_sd_bonus: f64,
    /// Chance that a tied regulation game is settled by an overtime goal
    ///
    /// At 1.0 every tie ends in overtime and the shootout branch is never
    /// reached.
    pub overtime_goal_rate: f64,
    /// Pulls the favoured side's shootout probability toward a coin flip
    pub shootout_damping: f64,
    /// Non-goal possessions shuffled into each replay
    pub possessions_per_game: usize,
    /// Peak amplitude of the seasonal form factor (0.2 = ±20%)
    pub form_amplitude: f64,
    /// Exponential decay of the form amplitude over the season
    pub form_decay: f64,
    /// Length of the rolling recent-results window
    pub recent_results: usize,
    /// Daily variance of team strength (0.05 = ±5%)
    pub daily_variance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home_advantage: 0.03,
            goal_scale: 6.0,
            base_goal_sd: 1.0,
            even_match_sd_bonus: 1.0,
            overtime_goal_rate: 1.0,
            shootout_damping: 0.7,
            possessions_per_game: 14,
            form_amplitude: 0.2,
            form_decay: 3.0,
            recent_results: 5,
            daily_variance: 0.05,
        }
    }
}

/// Narrative ordering constraints applied to the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorylineConfig {
    pub enabled: bool,
    /// Team whose home/away pattern alternates (fuzzy matched)
    pub focus_team: String,
    /// Opponent the focus team must host in its third game
    pub rival_team: String,
}

impl Default for StorylineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            focus_team: "Frankfurt".to_string(),
            rival_team: "Mannheim".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayoffConfig {
    pub seeds_per_conference: usize,
    pub wins_needed: u32,
}

impl Default for PlayoffConfig {
    fn default() -> Self {
        Self {
            seeds_per_conference: 4,
            wins_needed: 4,
        }
    }
}

/// Optional sections of the matchday artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub debug_panel: bool,
    pub lineup_snapshot: bool,
    pub top_scorers: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            debug_panel: true,
            lineup_snapshot: true,
            top_scorers: 20,
        }
    }
}

impl LeagueConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config file.
    ///
    /// Relative `data_root` and `teams_file` paths are resolved against the
    /// directory containing the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse_toml(&content)?;
        if let Some(base) = path.parent() {
            if config.data_root.is_relative() {
                config.data_root = base.join(&config.data_root);
            }
            if config.teams_file.is_relative() {
                config.teams_file = base.join(&config.teams_file);
            }
        }
        Ok(config)
    }

    /// Parse config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: LeagueConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.lineup.forwards == 0 && self.lineup.defenders == 0 {
            return Err(LeagueError::Config(
                "lineup needs at least one skater".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.lineup.jitter) {
            return Err(LeagueError::Config(format!(
                "lineup.jitter ({}) must be within 0..=1",
                self.lineup.jitter
            )));
        }
        if self.engine.goal_scale <= 0.0 {
            return Err(LeagueError::Config("engine.goal_scale must be positive".into()));
        }
        if self.engine.base_goal_sd < 0.0 || self.engine.even_match_sd_bonus < 0.0 {
            return Err(LeagueError::Config(
                "goal standard deviations must not be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.engine.shootout_damping) {
            return Err(LeagueError::Config(format!(
                "engine.shootout_damping ({}) must be within 0..=1",
                self.engine.shootout_damping
            )));
        }
        if !(0.0..=1.0).contains(&self.engine.overtime_goal_rate) {
            return Err(LeagueError::Config(format!(
                "engine.overtime_goal_rate ({}) must be within 0..=1",
                self.engine.overtime_goal_rate
            )));
        }
        if self.engine.recent_results == 0 {
            return Err(LeagueError::Config("engine.recent_results must be at least 1".into()));
        }
        if self.playoffs.wins_needed == 0 {
            return Err(LeagueError::Config("playoffs.wins_needed must be at least 1".into()));
        }
        if !self.playoffs.seeds_per_conference.is_power_of_two() {
            return Err(LeagueError::Config(format!(
                "playoffs.seeds_per_conference ({}) must be a power of two",
                self.playoffs.seeds_per_conference
            )));
        }
        Ok(())
    }
}
