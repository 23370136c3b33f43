//! Session settings
//!
//! Persisted as JSON next to the level files. Missing fields fall back to
//! their defaults, so older files keep loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Settings could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Host-side configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives at the start of a game
    pub lives: u32,
    /// Ceiling for the time step passed to the kernel (seconds)
    pub max_frame_step: f32,
    /// How long a finished level keeps animating (seconds)
    pub ending_delay: f32,
    /// Seed for collectible phases when parsing levels
    pub level_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lives: START_LIVES,
            max_frame_step: MAX_FRAME_STEP,
            ending_delay: ENDING_DELAY,
            level_seed: DEFAULT_LEVEL_SEED,
        }
    }
}

impl Settings {
    /// Replace out-of-range values with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.lives == 0 {
            log::warn!("lives must be at least 1, using {}", defaults.lives);
            self.lives = defaults.lives;
        }
        if !self.max_frame_step.is_finite() || self.max_frame_step <= 0.0 {
            log::warn!(
                "max_frame_step {} is invalid, using {}",
                self.max_frame_step,
                defaults.max_frame_step
            );
            self.max_frame_step = defaults.max_frame_step;
        }
        if !self.ending_delay.is_finite() || self.ending_delay < 0.0 {
            log::warn!(
                "ending_delay {} is invalid, using {}",
                self.ending_delay,
                defaults.ending_delay
            );
            self.ending_delay = defaults.ending_delay;
        }
        self
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.validated())
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
