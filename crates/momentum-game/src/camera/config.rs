//! Camera configuration

use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal look sensitivity (radians per unit of mouse delta per second)
    pub sensitivity_x: f32,
    /// Vertical look sensitivity (radians per unit of mouse delta per second)
    pub sensitivity_y: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    /// Resting field of view in degrees
    pub base_fov: f32,
    /// Seconds taken by FOV transitions
    pub fov_transition: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity_x: 0.2,
            sensitivity_y: 0.2,
            pitch_min: -90.0,
            pitch_max: 90.0,
            base_fov: 90.0,
            fov_transition: 0.1,
        }
    }
}
