//! Momentum Core - Core types and utilities for the Momentum movement core
//!
//! This crate provides the foundational pieces shared by the other crates:
//! - Vector math helpers (re-exported glam types plus plane projection)
//! - A fixed-step simulation clock
//! - A deferred-event scheduler polled once per tick

pub mod math;
pub mod schedule;
pub mod time;

pub use glam::{Quat, Vec2, Vec3};
pub use schedule::Scheduler;
pub use time::{GameTime, TimeConfig, TimeConfigError};
