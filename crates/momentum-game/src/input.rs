//! Per-tick input sample
//!
//! The movement core does not read devices. A host samples its input once per
//! tick into a [`MotionInput`]: two movement axes, held/pressed action states,
//! and a look delta.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Actions the movement core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Jump (Space by default)
    Jump,
    /// Sprint modifier (Left Shift by default)
    Sprint,
    /// Crouch (Left Ctrl by default)
    Crouch,
    /// Dash (E by default)
    Dash,
}

/// Input state for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionInput {
    /// Forward/back axis in [-1, 1]
    pub forward: f32,
    /// Strafe axis in [-1, 1] (positive = right)
    pub strafe: f32,
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were pressed this tick
    pub just_pressed: HashSet<InputAction>,
    /// Mouse movement for this tick
    pub look_delta: Vec2,
}

impl MotionInput {
    /// Create a new empty input sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both movement axes, clamped to [-1, 1]
    pub fn with_axes(mut self, forward: f32, strafe: f32) -> Self {
        self.forward = forward.clamp(-1.0, 1.0);
        self.strafe = strafe.clamp(-1.0, 1.0);
        self
    }

    /// Mark an action as held
    pub fn holding(mut self, action: InputAction) -> Self {
        self.held.insert(action);
        self
    }

    /// Mark an action as pressed this tick (and held)
    pub fn pressing(mut self, action: InputAction) -> Self {
        self.just_pressed.insert(action);
        self.held.insert(action);
        self
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was pressed this tick
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Whether either movement axis is non-zero
    pub fn has_direction(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }

    /// Clear per-tick data, keeping held actions and axes
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.look_delta = Vec2::ZERO;
    }
}

/// Source of one [`MotionInput`] per tick
pub trait InputSampler {
    fn sample(&mut self, dt: f32) -> MotionInput;
}
