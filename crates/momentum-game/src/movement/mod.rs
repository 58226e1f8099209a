//! Movement core
//!
//! State selection, speed ramping, dash sequencing, and slope handling. Each
//! piece advances once per tick and talks to the physics body only through
//! [`momentum_physics::PhysicsBody`].

mod config;
mod dash;
mod ramp;
mod slope;
mod state;

pub use config::{
    DashConfig, MovementConfig, CROUCH_IMPULSE, DASH_IMPULSE_DELAY, MOVE_FORCE_MULTIPLIER,
    SLOPE_STICK_FORCE,
};
pub use dash::{DashAim, DashEvent, DashOutcome, DashPhase, DashSequencer, DashState};
pub use ramp::{SpeedProfile, SpeedRamp};
pub use slope::{SlopeProjector, SlopeReport};
pub use state::{MotionContext, MovementState, MovementStateMachine, Transition};
