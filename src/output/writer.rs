//! Artifact file layout under the data root

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::Result;

use super::artifacts::{MatchdayArtifact, PlayoffRoundArtifact, ReplayArtifact, ReplayIndex};
use super::snapshot::LeagueSnapshot;

pub const REPLAY_INDEX_FILE: &str = "replay_matchday.json";
pub const LATEST_SNAPSHOT_FILE: &str = "latest.json";

fn season_dir(season: u32) -> String {
    format!("season_{:02}", season)
}

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matchday_dir(&self, season: u32) -> PathBuf {
        self.root.join("matchdays").join(season_dir(season))
    }

    pub fn matchday_path(&self, season: u32, matchday: u32) -> PathBuf {
        self.matchday_dir(season)
            .join(format!("matchday_{:02}.json", matchday))
    }

    pub fn replay_dir(&self, season: u32, matchday: u32) -> PathBuf {
        self.root
            .join("replays")
            .join(season_dir(season))
            .join(format!("matchday_{:02}", matchday))
    }

    pub fn playoff_path(&self, season: u32, round: u32) -> PathBuf {
        self.root
            .join("playoffs")
            .join(season_dir(season))
            .join(format!("round_{:02}.json", round))
    }

    pub fn snapshot_dir(&self, season: u32) -> PathBuf {
        self.root.join("stats").join(season_dir(season)).join("league")
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(path, json)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn write_matchday(&self, artifact: &MatchdayArtifact) -> Result<PathBuf> {
        let path = self.matchday_path(artifact.season, artifact.matchday);
        self.write_json(&path, artifact)?;
        Ok(path)
    }

    /// Write one file per game plus the matchday index
    pub fn write_replays(&self, replays: &[ReplayArtifact], index: &ReplayIndex) -> Result<PathBuf> {
        let dir = self.replay_dir(index.season, index.matchday);
        for (replay, entry) in replays.iter().zip(&index.games) {
            self.write_json(&dir.join(&entry.file), replay)?;
        }
        let index_path = dir.join(REPLAY_INDEX_FILE);
        self.write_json(&index_path, index)?;
        Ok(index_path)
    }

    pub fn write_playoff_round(&self, artifact: &PlayoffRoundArtifact) -> Result<PathBuf> {
        let path = self.playoff_path(artifact.season, artifact.round);
        self.write_json(&path, artifact)?;
        Ok(path)
    }

    /// Write the snapshot for its matchday and refresh `latest.json`
    pub fn write_snapshot(&self, snapshot: &LeagueSnapshot) -> Result<PathBuf> {
        let dir = self.snapshot_dir(snapshot.season);
        let path = dir.join(format!("after_matchday_{:02}.json", snapshot.after_matchday));
        self.write_json(&path, snapshot)?;
        self.write_json(&dir.join(LATEST_SNAPSHOT_FILE), snapshot)?;
        Ok(path)
    }

    pub fn read_matchday(&self, season: u32, matchday: u32) -> Result<MatchdayArtifact> {
        Self::read_json(&self.matchday_path(season, matchday))
    }

    pub fn read_replay(&self, season: u32, matchday: u32, file: &str) -> Result<ReplayArtifact> {
        Self::read_json(&self.replay_dir(season, matchday).join(file))
    }

    pub fn read_replay_index(&self, season: u32, matchday: u32) -> Result<ReplayIndex> {
        Self::read_json(&self.replay_dir(season, matchday).join(REPLAY_INDEX_FILE))
    }

    pub fn read_playoff_round(&self, season: u32, round: u32) -> Result<PlayoffRoundArtifact> {
        Self::read_json(&self.playoff_path(season, round))
    }

    /// Matchday artifacts 1..=`up_to` that exist on disk, in order
    pub fn read_matchdays(&self, season: u32, up_to: u32) -> Result<Vec<MatchdayArtifact>> {
        let mut artifacts = Vec::new();
        for matchday in 1..=up_to {
            if self.matchday_path(season, matchday).exists() {
                artifacts.push(self.read_matchday(season, matchday)?);
            }
        }
        Ok(artifacts)
    }

    /// Highest `season_NN` directory under `matchdays/`
    pub fn latest_season_on_disk(&self) -> Option<u32> {
        let entries = std::fs::read_dir(self.root.join("matchdays")).ok()?;
        entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|name| name.strip_prefix("season_"))
                    .and_then(|n| n.parse::<u32>().ok())
            })
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout() {
        let writer = ArtifactWriter::new("/data");
        assert_eq!(
            writer.matchday_path(1, 3),
            PathBuf::from("/data/matchdays/season_01/matchday_03.json")
        );
        assert_eq!(
            writer.replay_dir(12, 7),
            PathBuf::from("/data/replays/season_12/matchday_07")
        );
        assert_eq!(
            writer.playoff_path(2, 1),
            PathBuf::from("/data/playoffs/season_02/round_01.json")
        );
        assert_eq!(
            writer.snapshot_dir(1),
            PathBuf::from("/data/stats/season_01/league")
        );
    }

    #[test]
    fn test_latest_season_scan() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path());
        assert_eq!(writer.latest_season_on_disk(), None);
        std::fs::create_dir_all(writer.matchday_dir(2)).unwrap();
        std::fs::create_dir_all(writer.matchday_dir(11)).unwrap();
        std::fs::create_dir_all(dir.path().join("matchdays").join("notes")).unwrap();
        assert_eq!(writer.latest_season_on_disk(), Some(11));
    }
}
