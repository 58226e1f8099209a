//! Scripted input for headless runs
//!
//! A scenario is a list of timed segments. Each segment holds its axes and
//! held actions for its whole duration; `press` actions fire on its first tick.

use glam::Vec2;
use momentum_game::{InputAction, InputSampler, MotionInput};
use serde::{Deserialize, Serialize};

/// One stretch of constant input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSegment {
    /// Label used in logs
    pub name: String,
    /// Seconds this segment lasts
    pub duration: f32,
    pub forward: f32,
    pub strafe: f32,
    /// Actions held for the whole segment
    pub hold: Vec<InputAction>,
    /// Actions pressed on the first tick of the segment
    pub press: Vec<InputAction>,
    /// Look delta applied every tick
    pub look: Vec2,
}

impl Default for InputSegment {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: 0.0,
            forward: 0.0,
            strafe: 0.0,
            hold: Vec::new(),
            press: Vec::new(),
            look: Vec2::ZERO,
        }
    }
}

impl InputSegment {
    fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration,
            ..Default::default()
        }
    }

    fn axes(mut self, forward: f32, strafe: f32) -> Self {
        self.forward = forward;
        self.strafe = strafe;
        self
    }

    fn hold(mut self, action: InputAction) -> Self {
        self.hold.push(action);
        self
    }

    fn press(mut self, action: InputAction) -> Self {
        self.press.push(action);
        self
    }
}

/// Scenario section of the settings file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Simulated frame length fed to the fixed-step clock
    pub frame_delta: f32,
    pub segments: Vec<InputSegment>,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        use InputAction::*;

        Self {
            frame_delta: 1.0 / 90.0,
            segments: vec![
                InputSegment::new("settle", 0.5),
                InputSegment::new("walk", 1.0).axes(1.0, 0.0),
                InputSegment::new("sprint", 1.0).axes(1.0, 0.0).hold(Sprint),
                InputSegment::new("dash", 1.0).axes(1.0, 0.0).hold(Sprint).press(Dash),
                InputSegment::new("strafe dash", 1.0).axes(0.0, 1.0).press(Dash),
                InputSegment::new("crouch", 1.0).axes(1.0, 0.0).hold(Crouch),
                InputSegment::new("jump", 0.1).axes(1.0, 0.0).hold(Jump),
                InputSegment::new("air", 0.9).axes(1.0, 0.0),
                InputSegment::new("climb", 3.0).axes(1.0, 0.0).hold(Sprint),
                InputSegment::new("stop", 1.0),
            ],
        }
    }
}

impl ScenarioSettings {
    /// Total scripted time
    pub fn duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration.max(0.0)).sum()
    }
}

/// Plays a scenario back one tick at a time
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    segments: Vec<InputSegment>,
    index: usize,
    elapsed: f32,
    entered: bool,
}

impl ScriptedInput {
    pub fn new(settings: &ScenarioSettings) -> Self {
        Self {
            segments: settings.segments.clone(),
            index: 0,
            elapsed: 0.0,
            entered: false,
        }
    }

    /// Segment that the next sample will come from
    pub fn current(&self) -> Option<&InputSegment> {
        self.segments.get(self.index)
    }

    /// Index of the segment the last sample came from
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.segments.len()
    }

    fn advance(&mut self) {
        while let Some(segment) = self.segments.get(self.index) {
            if self.elapsed < segment.duration {
                break;
            }
            self.elapsed -= segment.duration.max(0.0);
            self.index += 1;
            self.entered = false;
        }
    }
}

impl InputSampler for ScriptedInput {
    fn sample(&mut self, dt: f32) -> MotionInput {
        self.advance();
        let Some(segment) = self.segments.get(self.index) else {
            return MotionInput::new();
        };

        let mut input = MotionInput::new().with_axes(segment.forward, segment.strafe);
        for &action in &segment.hold {
            input = input.holding(action);
        }
        if !self.entered {
            for &action in &segment.press {
                input = input.pressing(action);
            }
            self.entered = true;
        }
        input.look_delta = segment.look;

        self.elapsed += dt;
        input
    }
}
