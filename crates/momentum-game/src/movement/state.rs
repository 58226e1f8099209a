//! Movement state selection and speed targeting

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ramp::SpeedRamp;
use super::MovementConfig;

/// What the player is doing this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementState {
    /// Not yet updated
    #[default]
    Idle,
    Walking,
    Sprinting,
    Crouching,
    Dashing,
    /// Airborne, whether from a jump or a fall
    Jumping,
}

impl MovementState {
    /// States that use ground drag
    pub fn is_ground_bound(self) -> bool {
        matches!(
            self,
            MovementState::Walking | MovementState::Sprinting | MovementState::Crouching
        )
    }
}

/// Everything the state machine looks at, sampled fresh each tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionContext {
    pub grounded: bool,
    /// Angle between up and the ground normal, in degrees
    pub slope_angle: f32,
    /// Forward/back axis in [-1, 1]
    pub forward: f32,
    /// Strafe axis in [-1, 1]
    pub strafe: f32,
    pub dashing: bool,
    pub crouch_held: bool,
    pub sprint_held: bool,
}

/// Result of one state machine update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: MovementState,
    pub previous: MovementState,
    /// Speed the player is heading toward
    pub target_speed: f32,
    /// Speed to use this tick (ramped or snapped)
    pub speed: f32,
}

impl Transition {
    /// Whether the state differs from last tick
    pub fn changed(&self) -> bool {
        self.state != self.previous
    }
}

/// Picks the movement state and drives the speed ramp.
///
/// Speed snaps to each new target unless the player is coming out of a dash,
/// in which case the change is ramped so the dash speed bleeds off. That
/// momentum flag clears when the ramp finishes.
#[derive(Debug, Clone)]
pub struct MovementStateMachine {
    state: MovementState,
    target_speed: f32,
    keep_momentum: bool,
    ramp_rate: f32,
    ramp: SpeedRamp,
}

impl MovementStateMachine {
    /// Create a machine idling at walk speed
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            state: MovementState::Idle,
            target_speed: config.walk_speed,
            keep_momentum: false,
            ramp_rate: 1.0,
            ramp: SpeedRamp::new(config.walk_speed),
        }
    }

    /// Pick the state and target speed for a context.
    ///
    /// First match wins: dashing, crouching, sprinting on the ground, walking
    /// on the ground, then airborne. Airborne keeps the sprint tier if the
    /// previous target was already at or above sprint speed.
    pub fn select(
        config: &MovementConfig,
        ctx: &MotionContext,
        previous_target: f32,
    ) -> (MovementState, f32) {
        if ctx.dashing {
            (MovementState::Dashing, config.dash_speed)
        } else if ctx.crouch_held {
            (MovementState::Crouching, config.crouch_speed)
        } else if ctx.grounded && ctx.sprint_held {
            (MovementState::Sprinting, config.sprint_speed)
        } else if ctx.grounded {
            (MovementState::Walking, config.walk_speed)
        } else if previous_target >= config.sprint_speed {
            (MovementState::Jumping, config.sprint_speed)
        } else {
            (MovementState::Jumping, config.walk_speed)
        }
    }

    /// Advance one tick
    pub fn update(&mut self, config: &MovementConfig, ctx: &MotionContext, dt: f32) -> Transition {
        let previous = self.state;
        let previous_target = self.target_speed;
        let (state, target_speed) = Self::select(config, ctx, previous_target);

        if state == MovementState::Dashing {
            self.ramp_rate = config.dash_speed_change_factor;
        }

        let target_changed = target_speed != previous_target;
        if target_changed && previous == MovementState::Dashing {
            self.keep_momentum = true;
        }

        if target_changed {
            if self.keep_momentum {
                self.ramp.begin(self.ramp.speed(), target_speed, self.ramp_rate);
                debug!(
                    from = self.ramp.speed(),
                    to = target_speed,
                    rate = self.ramp_rate,
                    "Ramping speed"
                );
            } else {
                self.ramp.snap(target_speed);
            }
        }

        let was_running = self.ramp.is_running();
        let speed = self.ramp.tick(dt);
        if was_running && !self.ramp.is_running() {
            self.keep_momentum = false;
            self.ramp_rate = 1.0;
        }

        if state != previous {
            debug!(?previous, ?state, target_speed, "Movement state changed");
        }

        self.state = state;
        self.target_speed = target_speed;

        Transition {
            state,
            previous,
            target_speed,
            speed,
        }
    }

    /// Current state
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Current target speed
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// Current effective speed
    pub fn speed(&self) -> f32 {
        self.ramp.speed()
    }

    /// Whether a dash-exit ramp is pending or running
    pub fn keeps_momentum(&self) -> bool {
        self.keep_momentum
    }

    /// Whether the speed ramp is in flight
    pub fn is_ramping(&self) -> bool {
        self.ramp.is_running()
    }
}
