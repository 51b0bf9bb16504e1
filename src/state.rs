use crate::util::atomic_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Most recent high-scoring events kept in session state.
pub const HIGH_SCORE_CAP: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub timestamp: String,
    pub score: f64,
    pub preview: String,
}

/// Session-scoped counters for the memory pipeline. Reset wholesale on
/// `boot`, updated incrementally on each `process`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub session_start: Option<String>,
    pub messages_processed: u64,
    pub high_scores: Vec<HighScore>,
    pub last_consolidation: Option<String>,
}

impl SessionState {
    /// Append a high score, evicting the oldest entries past the cap.
    pub fn push_high_score(&mut self, score: HighScore) {
        self.high_scores.push(score);
        if self.high_scores.len() > HIGH_SCORE_CAP {
            let excess = self.high_scores.len() - HIGH_SCORE_CAP;
            self.high_scores.drain(..excess);
        }
    }
}

/// Whole-document repository for the session state file. Unlike the
/// tracker store, saving creates the parent directory, since the
/// experimental subtree is not part of the base layout.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<SessionState> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("invalid session state at {}", self.path.display()))?;
        Ok(state)
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        atomic_write(&self.path, json.as_bytes())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}
