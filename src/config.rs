// Game tuning loaded from an optional TOML file, with CLI overrides applied in main.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    pub shoot: PathBuf,
    pub explosion: PathBuf,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            shoot: PathBuf::from("assets/sounds/shoot.wav"),
            explosion: PathBuf::from("assets/sounds/explosion.wav"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; a fresh OS seed is used when absent
    pub seed: Option<u64>,
    pub enemy_count: usize,
    pub fire_delay_frames: u32,
    pub powerup_drop_chance: f64,
    pub frame_millis: u64,
    pub sound: SoundConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            enemy_count: 8,
            fire_delay_frames: 15,
            powerup_drop_chance: 0.1,
            frame_millis: 16,
            sound: SoundConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Falls back to defaults, handing back the error for the caller to log
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Non-fatal warnings for suspicious values
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.enemy_count == 0 {
            warnings.push("enemy_count is 0: nothing to shoot".to_string());
        }
        if self.enemy_count > 100 {
            warnings.push(format!("enemy_count {} is very high", self.enemy_count));
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            warnings.push(format!(
                "powerup_drop_chance {} outside 0..=1, will be clamped",
                self.powerup_drop_chance
            ));
        }
        if self.frame_millis == 0 {
            warnings.push("frame_millis is 0: the game loop will spin".to_string());
        }
        warnings
    }
}
