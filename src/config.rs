//! Game configuration
//!
//! Playfield size and time limit. Rosters depend on the width, so every
//! player of the daily challenge is expected to run the defaults; overrides
//! exist for testing and practice builds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Problems found while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playfield width {0} leaves no room to spawn enemies")]
    PlayfieldTooNarrow(f64),
    #[error("playfield height {0} must be positive")]
    InvalidHeight(f64),
    #[error("time limit {0}s must be positive")]
    InvalidTimeLimit(f64),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playfield and timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub time_limit_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            time_limit_secs: DEFAULT_TIME_LIMIT,
        }
    }
}

impl GameConfig {
    /// Check that the values describe a playable field
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.width.is_finite() || self.width <= 2.0 * SPAWN_MARGIN_X {
            return Err(ConfigError::PlayfieldTooNarrow(self.width));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if !self.time_limit_secs.is_finite() || self.time_limit_secs <= 0.0 {
            return Err(ConfigError::InvalidTimeLimit(self.time_limit_secs));
        }
        Ok(self)
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<GameConfig>(json)?.validate()
    }

    /// Environment variable naming a JSON config file (native only)
    #[allow(dead_code)]
    const CONFIG_ENV: &'static str = "DAILY_BLITZ_CONFIG";

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "daily_blitz_config";

    /// Load from the file named by `DAILY_BLITZ_CONFIG`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::CONFIG_ENV) else {
            return Self::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load from LocalStorage, else defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}
