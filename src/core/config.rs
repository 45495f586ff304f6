//! Game configuration.
//!
//! Every tunable the engine reads lives here: the win threshold, the session
//! length, the spawn distribution, the unlock secret, the swipe threshold and
//! the storage key prefix.

use serde::{Deserialize, Serialize};

/// Tile value that wins the game.
pub const DEFAULT_WIN_VALUE: u32 = 256;

/// Session length in seconds (five minutes).
pub const DEFAULT_SESSION_SECONDS: u32 = 300;

/// Payload a scanned code must carry to unlock the game.
pub const DEFAULT_UNLOCK_SECRET: &str = "256 game unlock";

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Merging into this value wins the game.
    pub win_value: u32,

    /// Countdown length for a fresh session.
    pub session_seconds: u32,

    /// Probability that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,

    /// Secret a scanned payload must match exactly.
    pub unlock_secret: String,

    /// Minimum swipe length, in input units, on the dominant axis.
    pub min_swipe_distance: f32,

    /// Prefix for persisted keys (`{prefix}-board`, `{prefix}-time`, ...).
    pub storage_prefix: String,

    /// Fixed seed for the spawn RNG. `None` draws a fresh seed per game.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_value: DEFAULT_WIN_VALUE,
            session_seconds: DEFAULT_SESSION_SECONDS,
            four_probability: 0.1,
            unlock_secret: DEFAULT_UNLOCK_SECRET.to_string(),
            min_swipe_distance: 50.0,
            storage_prefix: "game256".to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with a custom win value.
    pub fn with_win_value(mut self, value: u32) -> Self {
        self.win_value = value;
        self
    }

    /// Create a new config with a custom session length.
    pub fn with_session_seconds(mut self, seconds: u32) -> Self {
        self.session_seconds = seconds;
        self
    }

    /// Create a new config with a custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a custom unlock secret.
    pub fn with_unlock_secret(mut self, secret: impl Into<String>) -> Self {
        self.unlock_secret = secret.into();
        self
    }

    /// Create a new config with a custom storage prefix.
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    /// Storage key for a named session field.
    pub fn storage_key(&self, field: &str) -> String {
        format!("{}-{}", self.storage_prefix, field)
    }
}
