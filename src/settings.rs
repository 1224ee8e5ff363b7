//! Game settings and tuning
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::ms_to_ticks;
use crate::sim::maze::{DEFAULT_LEVEL, MazeError, MazeLayout};
use crate::sim::state::Rules;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (None = derive from the clock)
    pub seed: Option<u64>,

    // === Rules ===
    /// How long a power-up keeps adversaries threatened
    pub threatened_duration_ms: u32,
    /// Points per collectible
    pub collectible_score: u64,
    /// Avatar distance per tick
    pub avatar_speed: f32,
    /// Adversary distance per tick
    pub adversary_speed: f32,

    // === Loop ===
    /// Cap on simulation ticks run for one frame
    pub max_substeps: u32,

    /// Reject unknown maze symbols instead of skipping them
    pub strict_maze: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            threatened_duration_ms: THREATENED_DURATION_MS,
            collectible_score: COLLECTIBLE_SCORE,
            avatar_speed: AVATAR_SPEED,
            adversary_speed: ADVERSARY_SPEED,

            max_substeps: MAX_SUBSTEPS,

            strict_maze: false,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Like [`Settings::load`], falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("avatar_speed", self.avatar_speed)?;
        positive("adversary_speed", self.adversary_speed)?;
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Simulation rules for these settings
    pub fn rules(&self) -> Rules {
        Rules {
            avatar_speed: self.avatar_speed,
            adversary_speed: self.adversary_speed,
            collectible_score: self.collectible_score,
            threatened_ticks: ms_to_ticks(self.threatened_duration_ms),
        }
    }

    /// Parse the built-in level honouring `strict_maze`
    pub fn layout(&self) -> Result<MazeLayout, MazeError> {
        if self.strict_maze {
            MazeLayout::parse_strict(DEFAULT_LEVEL)
        } else {
            Ok(MazeLayout::parse(DEFAULT_LEVEL))
        }
    }

    /// Configured seed, or one derived from the wall clock
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
