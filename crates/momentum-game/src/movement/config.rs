//! Movement and dash tuning

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{finite, non_negative, positive, ConfigError};

use super::MovementState;

/// Ground move force per unit of speed
pub const MOVE_FORCE_MULTIPLIER: f32 = 10.0;

/// Downward impulse applied when crouching starts
pub const CROUCH_IMPULSE: f32 = 5.0;

/// Downward force that keeps the body on a slope while moving up
pub const SLOPE_STICK_FORCE: f32 = 5.0;

/// Delay between triggering a dash and applying its impulse (seconds)
pub const DASH_IMPULSE_DELAY: f32 = 0.025;

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in meters per second
    pub walk_speed: f32,
    /// Sprinting speed in meters per second
    pub sprint_speed: f32,
    /// Crouching speed in meters per second
    pub crouch_speed: f32,
    /// Speed cap while dashing. Should usually be higher than sprint speed
    pub dash_speed: f32,
    /// Ramp rate used to bleed dash momentum back to normal speed
    pub dash_speed_change_factor: f32,
    /// Linear drag while on the ground (walking, sprinting, crouching)
    pub ground_drag: f32,
    /// Height scale while crouched
    pub crouch_y_scale: f32,
    /// Jump impulse
    pub jump_power: f32,
    /// Time before another jump is allowed (seconds)
    pub jump_cooldown: f32,
    /// Move force multiplier while airborne
    pub air_multiplier: f32,
    /// Move force multiplier while on a slope
    pub slope_move_power: f32,
    /// Steepest walkable slope in degrees
    pub max_slope_angle: f32,
    /// Vertical speed cap outside a dash (0 = uncapped)
    pub max_y_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 7.0,
            crouch_speed: 3.0,
            dash_speed: 10.0,
            dash_speed_change_factor: 50.0,
            ground_drag: 5.0,
            crouch_y_scale: 0.5,
            jump_power: 8.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.5,
            slope_move_power: 10.0,
            max_slope_angle: 40.0,
            max_y_speed: 0.0,
        }
    }
}

impl MovementConfig {
    /// Check every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("walk_speed", self.walk_speed)?;
        non_negative("sprint_speed", self.sprint_speed)?;
        non_negative("crouch_speed", self.crouch_speed)?;
        non_negative("dash_speed", self.dash_speed)?;
        positive("dash_speed_change_factor", self.dash_speed_change_factor)?;
        non_negative("ground_drag", self.ground_drag)?;
        non_negative("jump_power", self.jump_power)?;
        non_negative("jump_cooldown", self.jump_cooldown)?;
        non_negative("air_multiplier", self.air_multiplier)?;
        non_negative("slope_move_power", self.slope_move_power)?;
        non_negative("max_y_speed", self.max_y_speed)?;

        let scale = finite("crouch_y_scale", self.crouch_y_scale)?;
        if scale <= 0.0 || scale > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "crouch_y_scale",
                range: "(0, 1]",
                value: scale,
            });
        }

        let angle = finite("max_slope_angle", self.max_slope_angle)?;
        if angle <= 0.0 || angle > 90.0 {
            return Err(ConfigError::OutOfRange {
                field: "max_slope_angle",
                range: "(0, 90]",
                value: angle,
            });
        }

        Ok(())
    }

    /// Drag to apply in the given state
    pub fn drag(&self, state: MovementState) -> f32 {
        if state.is_ground_bound() {
            self.ground_drag
        } else {
            0.0
        }
    }
}

/// Dash configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Impulse along the dash direction
    pub dash_force: f32,
    /// Extra impulse along the up vector
    pub dash_upward_force: f32,
    /// Vertical speed cap while a dash is active
    pub max_dash_y_speed: f32,
    /// How long a dash lasts (seconds)
    pub dash_duration: f32,
    /// Time before another dash is allowed, counted from the trigger (seconds)
    pub dash_cooldown: f32,
    /// Delay between trigger and impulse (seconds)
    pub impulse_delay: f32,
    /// Aim with the camera (pitch included) instead of the flat orientation
    pub use_cam_forward: bool,
    /// Let the movement axes steer the dash; otherwise always dash forward
    pub allow_all_directions: bool,
    /// Suspend gravity while dashing
    pub disable_gravity: bool,
    /// Zero the velocity right before the impulse
    pub reset_velocity: bool,
    /// Field-of-view increase while dashing (degrees)
    pub fov_increase: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            dash_force: 30.0,
            dash_upward_force: 0.0,
            max_dash_y_speed: 3.0,
            dash_duration: 0.25,
            dash_cooldown: 1.0,
            impulse_delay: DASH_IMPULSE_DELAY,
            use_cam_forward: true,
            allow_all_directions: true,
            disable_gravity: true,
            reset_velocity: true,
            fov_increase: 10.0,
        }
    }
}

impl DashConfig {
    /// Check every value is usable.
    ///
    /// A duration shorter than the impulse delay is allowed: the dash ends
    /// before its impulse is due and the impulse is dropped. That case is
    /// only logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("dash_force", self.dash_force)?;
        finite("dash_upward_force", self.dash_upward_force)?;
        non_negative("max_dash_y_speed", self.max_dash_y_speed)?;
        positive("dash_duration", self.dash_duration)?;
        non_negative("dash_cooldown", self.dash_cooldown)?;
        non_negative("impulse_delay", self.impulse_delay)?;
        finite("fov_increase", self.fov_increase)?;

        if self.drops_impulse() {
            warn!(
                duration = self.dash_duration,
                delay = self.impulse_delay,
                "Dash ends before its impulse is due; dashes will have no impulse"
            );
        }
        Ok(())
    }

    /// Whether the dash ends before its impulse would be applied
    pub fn drops_impulse(&self) -> bool {
        self.dash_duration < self.impulse_delay
    }
}
