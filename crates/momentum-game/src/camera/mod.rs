//! Camera system module
//!
//! First-person look camera with pitch clamping and timed FOV effects.

mod config;
mod controller;
mod fov;

pub use config::CameraConfig;
pub use controller::LookCamera;
pub use fov::FovTween;
