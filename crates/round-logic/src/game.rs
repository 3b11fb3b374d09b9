//! Match configuration and round records

use core::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::moves::{Move, Outcome};
use crate::resolve;

/// Points needed to win a match
pub const DEFAULT_WIN_THRESHOLD: u32 = 5;

/// Length of the hand-shake animation before a round is resolved
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 900;

/// Result of a single resolved round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub outcome: Outcome,
}

impl RoundRecord {
    pub fn new(round: u32, move_a: Move, move_b: Move) -> Self {
        Self {
            round,
            move_a,
            move_b,
            outcome: resolve(move_a, move_b),
        }
    }
}

/// Per-match tunables
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Score that ends the match (at least 1)
    pub win_threshold: u32,
    /// Pause between both moves being in and the outcome being applied
    pub reveal_delay_ms: u64,
}

impl MatchConfig {
    /// First to five, 0.9s reveal
    pub fn standard() -> Self {
        Self {
            win_threshold: DEFAULT_WIN_THRESHOLD,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }

    /// Parse a JSON object; missing fields fall back to `standard()`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Errors from loading a `MatchConfig`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Input was not a valid config object.
    Json(String),
    /// A match nobody can win.
    ZeroThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid match config: {}", e),
            ConfigError::ZeroThreshold => write!(f, "win_threshold must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
