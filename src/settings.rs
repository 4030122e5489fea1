//! Simulation settings
//!
//! Loaded from a JSON file; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::Rgb;

/// Simulation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Bodies ===
    /// Disc radius shared by all bodies (pixels)
    pub body_radius: f32,
    /// Number of bodies spawned on the first valid layout
    pub initial_bodies: usize,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,

    // === Timing ===
    /// Minimum interval between presented frames (ms)
    pub frame_interval_ms: u64,
    /// Delay before each animation tick (ms)
    pub tick_delay_ms: u64,

    // === Colors ===
    pub background: Rgb,
    pub outline: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            body_radius: BODY_RADIUS,
            initial_bodies: INITIAL_BODIES,
            seed: None,

            frame_interval_ms: FRAME_INTERVAL_MS,
            tick_delay_ms: TICK_DELAY_MS,

            background: Rgb::LIGHT_GRAY,
            outline: Rgb::BLACK,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const ENV_VAR: &'static str = "BOUNCING_BALLS_SETTINGS";

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from the file named by `BOUNCING_BALLS_SETTINGS`.
    ///
    /// Falls back to defaults when the variable is unset or the file is unusable.
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.body_radius.is_finite() || self.body_radius <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "body_radius",
                reason: format!("must be a positive number, got {}", self.body_radius),
            });
        }
        if self.frame_interval_ms > 10_000 {
            return Err(SettingsError::Invalid {
                field: "frame_interval_ms",
                reason: format!("must be at most 10000, got {}", self.frame_interval_ms),
            });
        }
        if self.tick_delay_ms > 10_000 {
            return Err(SettingsError::Invalid {
                field: "tick_delay_ms",
                reason: format!("must be at most 10000, got {}", self.tick_delay_ms),
            });
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms)
    }

    pub fn tick_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_delay_ms)
    }
}
