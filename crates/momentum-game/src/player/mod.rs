//! Player controller module
//!
//! Ties the movement core, the look camera, and the deferred-event scheduler
//! to a physics body.

mod controller;

pub use controller::{PlayerController, PlayerEvent, TickReport};
