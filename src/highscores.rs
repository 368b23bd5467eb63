//! Best score tracking
//!
//! Only the single best score survives between runs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a finished run. Returns true on a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New best score {} (was {})", score, self.score);
        self.score = score;
        true
    }

    /// Load from a JSON file; a missing or corrupt file starts fresh
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No best score found, starting fresh");
                return Self::new();
            }
        };
        match serde_json::from_str::<BestScore>(&json) {
            Ok(best) => {
                log::info!("Loaded best score {}", best.score);
                best
            }
            Err(err) => {
                log::warn!("Ignoring unreadable best score in {}: {err}", path.display());
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)
            .with_context(|| format!("writing best score to {}", path.display()))?;
        log::info!("Best score saved ({})", self.score);
        Ok(())
    }
}
