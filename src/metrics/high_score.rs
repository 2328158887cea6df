//! High-score persistence
//!
//! The core treats the high score as injected state; this store is the
//! adapter-side owner of it, backed by a small JSON file next to wherever
//! the user points it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Loads the high score at startup and writes it back whenever it rises
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the stored high score; a missing file means no games played yet
    pub fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("malformed high-score file {}", self.path.display()))?;
        Ok(record.high_score)
    }

    pub fn save(&self, high_score: u32) -> Result<()> {
        let record = HighScoreRecord { high_score };
        let json = serde_json::to_string_pretty(&record)
            .context("failed to serialize high score")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}
