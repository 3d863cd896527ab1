//! Game settings
//!
//! Accepted once at construction; changing them means starting a new game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_START_LEVEL;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("start level must be at least 1")]
    ZeroStartLevel,
    #[error("start level {0} is above the maximum of {max}", max = MAX_START_LEVEL)]
    StartLevelTooHigh(u32),
    #[error("unknown upgrade `{0}` (expected speed, bullet or hp)")]
    UnknownUpgrade(String),
}

/// Canvas colours (any CSS colour string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Behind HUD text
    pub background: String,
    /// Enemies and HUD text
    pub fill: String,
    /// Tower and projectile outlines
    pub stroke: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            fill: "red".to_string(),
            stroke: "black".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level the game starts at
    pub start_level: u32,
    /// RNG seed (None = pick one from the clock)
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_level: 1,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Create settings starting at a given level
    pub fn with_start_level(start_level: u32) -> Self {
        Self {
            start_level,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check invariants the game relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.start_level == 0 {
            return Err(SettingsError::ZeroStartLevel);
        }
        if self.start_level > MAX_START_LEVEL {
            return Err(SettingsError::StartLevelTooHigh(self.start_level));
        }
        Ok(())
    }

    /// Seed to use, falling back to `fallback` when none is configured
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Parse a start level attribute value (e.g. `data-start-level="5"`)
    pub fn parse_start_level(value: &str) -> Option<u32> {
        value.trim().parse::<u32>().ok().filter(|level| (1..=MAX_START_LEVEL).contains(level))
    }
}
