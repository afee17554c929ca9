//! Assist tuning loaded from an optional JSON file.
//!
//! ```json
//! { "auto_delay_ms": 1500, "weights": { "holes": 5.0 } }
//! ```
//!
//! Missing fields keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tetris_assist_core::types::{AUTO_DELAY_MS, AUTO_STREAK_LIMIT};

use crate::search::HeuristicWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Idle time before timed assist places the top suggestion.
    pub auto_delay_ms: u64,
    /// Unattended placements allowed before timed assist waits for the player.
    pub streak_limit: u32,
    pub weights: HeuristicWeights,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            auto_delay_ms: AUTO_DELAY_MS,
            streak_limit: AUTO_STREAK_LIMIT,
            weights: HeuristicWeights::DEFAULT,
        }
    }
}

impl AssistConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.streak_limit == 0 {
            return Err(ConfigError::Invalid("streak_limit must be at least 1"));
        }
        if !self.weights.is_finite() {
            return Err(ConfigError::Invalid("heuristic weights must be finite"));
        }
        Ok(())
    }
}
