//! Momentum Game - Player movement for first-person games
//!
//! Provides the movement state machine, speed ramp, dash sequencer, slope
//! handling, look camera, and the player controller that runs them per tick.

pub mod camera;
mod error;
pub mod input;
pub mod movement;
pub mod player;

pub use camera::{CameraConfig, FovTween, LookCamera};
pub use error::ConfigError;
pub use input::{InputAction, InputSampler, MotionInput};
pub use movement::{
    DashAim, DashConfig, DashEvent, DashOutcome, DashPhase, DashSequencer, DashState,
    MotionContext, MovementConfig, MovementState, MovementStateMachine, SlopeProjector,
    SlopeReport, SpeedProfile, SpeedRamp, Transition,
};
pub use player::{PlayerController, PlayerEvent, TickReport};
