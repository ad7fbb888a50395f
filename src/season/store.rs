//! Save file for the season state
//!
//! A missing or empty save means no season has started yet. A save that
//! exists but does not parse is an error; the engine never rebuilds
//! standings it cannot read.

use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::{LeagueError, Result};

use super::state::SeasonState;

pub const SAVE_DIR: &str = "saves";
pub const SAVE_FILE: &str = "savegame.json";

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under a data root
    pub fn in_data_root(data_root: &Path) -> Self {
        Self::new(data_root.join(SAVE_DIR).join(SAVE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<SeasonState>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let state = serde_json::from_str(&content).map_err(|e| LeagueError::CorruptState {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Loaded season state from {:?}", self.path);
        Ok(Some(state))
    }

    /// Write to a temp file, fsync, then rename over the save
    pub fn save(&self, state: &SeasonState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(state)?;
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;
        tracing::debug!("Saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}
