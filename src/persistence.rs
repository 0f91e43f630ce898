//! High-score storage
//!
//! Scores live in a single JSON file mapping each difficulty name to its best
//! scores, highest first:
//!
//! ```json
//! { "easy": [42, 17, 3], "hard": [9] }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::game::HighScoreTable;

/// Default file name, relative to the working directory
pub const DEFAULT_SCORES_FILE: &str = "powersnake_scores.json";

/// Load high scores from `path`
///
/// A missing file is not an error and yields an empty table. Lists are
/// re-sorted and truncated in case the file was edited by hand.
pub fn load_high_scores(path: &Path) -> Result<HighScoreTable> {
    if !path.exists() {
        return Ok(HighScoreTable::new());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read high scores from {:?}", path))?;
    let mut table: HighScoreTable =
        serde_json::from_str(&json).context("Failed to deserialize high scores")?;
    table.normalize();

    Ok(table)
}

/// Save high scores to `path`
///
/// Creates parent directories if they don't exist. The table is written to a
/// sibling temp file first and renamed over `path`, so readers never see a
/// half-written file.
pub fn save_high_scores(table: &HighScoreTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let json = serde_json::to_string_pretty(table).context("Failed to serialize high scores")?;
    let temp_path = temp_path_for(path);
    std::fs::write(&temp_path, json)
        .with_context(|| format!("Failed to write high scores to {:?}", temp_path))?;
    if let Err(err) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(err).with_context(|| format!("Failed to replace high scores at {:?}", path));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Background task that owns the scores file
///
/// Saves are queued and written one at a time. When several tables pile up
/// only the newest is written.
pub struct ScoreWriter {
    tx: mpsc::UnboundedSender<HighScoreTable>,
    task: JoinHandle<()>,
}

impl ScoreWriter {
    /// Start the writer; must be called inside a tokio runtime
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<HighScoreTable>();

        let task = tokio::spawn(async move {
            while let Some(mut table) = rx.recv().await {
                while let Ok(newer) = rx.try_recv() {
                    table = newer;
                }

                let target = path.clone();
                match tokio::task::spawn_blocking(move || save_high_scores(&table, &target)).await {
                    Ok(Ok(())) => info!(path = ?path, "high scores saved"),
                    Ok(Err(err)) => warn!(path = ?path, "Failed to save high scores: {:#}", err),
                    Err(err) => warn!(path = ?path, "High score write panicked: {}", err),
                }
            }
        });

        Self { tx, task }
    }

    /// Queue `table` for writing
    pub fn save(&self, table: HighScoreTable) {
        if self.tx.send(table).is_err() {
            warn!("High score writer has stopped, scores not saved");
        }
    }

    /// Wait for queued writes to land, then stop
    pub async fn finish(self) {
        let Self { tx, task } = self;
        drop(tx);
        if let Err(err) = task.await {
            warn!("High score writer failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let table = load_high_scores(&dir.path().join("none.json")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut table = HighScoreTable::new();
        table.record("easy", 12);
        table.record("easy", 30);
        table.record("hard", 4);

        save_high_scores(&table, &path).unwrap();
        let loaded = load_high_scores(&path).unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded.scores("easy"), &[30, 12]);
    }

    #[test]
    fn test_load_normalizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"medium": [3, 50, 8, 8, 1, 20, 2]}"#).unwrap();

        let loaded = load_high_scores(&path).unwrap();
        assert_eq!(loaded.scores("medium"), &[50, 20, 8, 8, 3]);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_high_scores(&path).is_err());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"easy": [1]}"#).unwrap();

        let mut table = HighScoreTable::new();
        table.record("easy", 9);
        save_high_scores(&table, &path).unwrap();

        assert_eq!(load_high_scores(&path).unwrap().scores("easy"), &[9]);
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_writer_keeps_latest_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let writer = ScoreWriter::spawn(path.clone());

        let mut table = HighScoreTable::new();
        for score in [4, 12, 7] {
            table.record("medium", score);
            writer.save(table.clone());
        }
        writer.finish().await;

        assert_eq!(load_high_scores(&path).unwrap().scores("medium"), &[12, 7, 4]);
    }

    #[test]
    fn test_write_failure_is_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();

        assert!(save_high_scores(&HighScoreTable::new(), &path).is_err());
    }
}
