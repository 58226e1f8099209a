//! Simulation settings with persistence
//!
//! Settings are read from `~/.config/momentum/settings.toml`, or from the path
//! given on the command line. Every section is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec3;
use momentum_core::TimeConfig;
use momentum_game::{CameraConfig, DashConfig, MovementConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::scenario::ScenarioSettings;

/// All simulation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub movement: MovementConfig,
    pub dash: DashConfig,
    pub camera: CameraConfig,
    pub time: TimeConfig,
    pub world: WorldSettings,
    pub scenario: ScenarioSettings,
}

impl SimSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("momentum"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the config directory, or return defaults if absent or broken
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings that would stall or break the run loop
    pub fn validate(&self) -> Result<()> {
        self.time.validate().context("Invalid time settings")?;

        let frame_delta = self.scenario.frame_delta;
        if !(frame_delta.is_finite() && frame_delta > 0.0) {
            anyhow::bail!("scenario.frame_delta must be positive, got {}", frame_delta);
        }
        Ok(())
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Test level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Gravity along Y (m/s²)
    pub gravity: f32,
    /// Where the character capsule starts (center)
    pub spawn: Vec3,
    /// Ramp center
    pub ramp_position: Vec3,
    /// Ramp half extents before tilting
    pub ramp_half_extents: Vec3,
    /// Ramp tilt in degrees
    pub ramp_angle: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            spawn: Vec3::new(0.0, 1.05, 0.0),
            ramp_position: Vec3::new(0.0, 0.0, -20.0),
            ramp_half_extents: Vec3::new(8.0, 0.5, 3.0),
            ramp_angle: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = SimSettings::parse("").unwrap();
        assert_eq!(settings.movement.walk_speed, 5.0);
        assert_eq!(settings.dash.dash_duration, 0.25);
        assert_eq!(settings.world.ramp_angle, 25.0);
        assert!(!settings.scenario.segments.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let settings = SimSettings::parse(
            r#"
            [movement]
            sprint_speed = 9.0

            [dash]
            dash_cooldown = 2.0

            [time]
            fixed_timestep = 0.01
            "#,
        )
        .unwrap();

        assert_eq!(settings.movement.sprint_speed, 9.0);
        assert_eq!(settings.movement.crouch_speed, 3.0);
        assert_eq!(settings.dash.dash_cooldown, 2.0);
        assert_eq!(settings.time.fixed_timestep, 0.01);
        assert_eq!(settings.camera.base_fov, 90.0);
    }

    #[test]
    fn test_validate_rejects_stalling_clock() {
        assert!(SimSettings::default().validate().is_ok());

        for text in [
            "[time]\nmax_delta_time = 0.0",
            "[time]\nmax_delta_time = -1.0",
            "[time]\nfixed_timestep = 0.0",
            "[scenario]\nframe_delta = 0.0",
        ] {
            let settings = SimSettings::parse(text).unwrap();
            assert!(settings.validate().is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_malformed_settings_error() {
        assert!(SimSettings::parse("[movement]\nwalk_speed = \"fast\"").is_err());
    }

    #[test]
    fn test_settings_roundtrip_through_toml() {
        let text = toml::to_string_pretty(&SimSettings::default()).unwrap();
        let parsed = SimSettings::parse(&text).unwrap();
        assert_eq!(parsed.scenario.segments.len(), SimSettings::default().scenario.segments.len());
    }
}
