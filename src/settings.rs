//! Driver settings
//!
//! Input step sizes and loop tunables, read from an optional JSON file.
//! Gameplay rules (radii, footprint, lives, timer durations) are fixed in
//! [`crate::consts`] because the levels were authored against them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_STEP, KEY_STEP, SWIPE_STEP, TICK_MS};
use crate::error::ConfigError;

/// Game loop and input settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Movement steps ===
    /// Step per key press
    pub key_step: f32,
    /// Step per repeat of a held on-screen button
    pub button_step: f32,
    /// Step per swipe segment
    pub swipe_step: f32,

    // === Touch ===
    /// Minimum drag (px) along the dominant axis before a swipe moves
    pub swipe_threshold: f32,

    // === Loop ===
    /// Repeat cadence of a held on-screen button (ms)
    pub button_repeat_ms: u64,
    /// Longest frame the loop will catch up on in one update (ms)
    pub max_frame_ms: u64,

    // === Demo ===
    /// Seed for the demo autopilot
    pub autopilot_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_step: KEY_STEP,
            button_step: BUTTON_STEP,
            swipe_step: SWIPE_STEP,
            swipe_threshold: 5.0,
            button_repeat_ms: TICK_MS,
            max_frame_ms: 250,
            autopilot_seed: 214,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, step) in [
            ("key_step", self.key_step),
            ("button_step", self.button_step),
            ("swipe_step", self.swipe_step),
        ] {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, step
                )));
            }
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "swipe_threshold must be non-negative, got {}",
                self.swipe_threshold
            )));
        }
        if self.button_repeat_ms == 0 {
            return Err(ConfigError::Invalid("button_repeat_ms must be non-zero".into()));
        }
        if self.max_frame_ms == 0 {
            return Err(ConfigError::Invalid("max_frame_ms must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_input_sources() {
        let settings = Settings::default();
        assert_eq!(settings.key_step, 2.5);
        assert_eq!(settings.button_step, 2.0);
        assert_eq!(settings.swipe_step, 1.5);
        assert_eq!(settings.button_repeat_ms, 50);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "swipe_step": 3.0, "autopilot_seed": 7 }"#).unwrap();
        assert_eq!(settings.swipe_step, 3.0);
        assert_eq!(settings.autopilot_seed, 7);
        assert_eq!(settings.key_step, 2.5);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "key_step": 0.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "button_repeat_ms": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Some(Path::new("/nonexistent/love-quest.json")));
        assert_eq!(settings, Settings::default());
        assert_eq!(Settings::load(None), Settings::default());
    }
}
