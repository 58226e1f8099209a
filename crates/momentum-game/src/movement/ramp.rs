//! Time-scaled linear speed ramp

use serde::{Deserialize, Serialize};

/// Current speed, the speed being approached, and how fast the ramp runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    pub current: f32,
    pub target: f32,
    pub rate: f32,
}

/// One in-flight interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
struct RampSegment {
    from: f32,
    to: f32,
    span: f32,
    elapsed: f32,
}

/// Moves a speed linearly toward a target.
///
/// Elapsed time is scaled by the ramp rate and compared against the speed
/// difference, so a rate of 1 closes one unit of speed per second. At most one
/// segment is in flight; beginning another drops the old one where it stands.
#[derive(Debug, Clone)]
pub struct SpeedRamp {
    profile: SpeedProfile,
    segment: Option<RampSegment>,
}

impl SpeedRamp {
    /// Create a ramp resting at `speed`
    pub fn new(speed: f32) -> Self {
        Self {
            profile: SpeedProfile {
                current: speed,
                target: speed,
                rate: 1.0,
            },
            segment: None,
        }
    }

    /// Start ramping from `from` to `to`, cancelling any ramp in flight.
    ///
    /// Completes immediately when the two speeds are equal.
    pub fn begin(&mut self, from: f32, to: f32, rate: f32) {
        self.profile = SpeedProfile {
            current: from,
            target: to,
            rate,
        };

        let span = (to - from).abs();
        self.segment = if span > 0.0 {
            Some(RampSegment {
                from,
                to,
                span,
                elapsed: 0.0,
            })
        } else {
            self.profile.current = to;
            None
        };
    }

    /// Jump straight to `speed`, cancelling any ramp in flight
    pub fn snap(&mut self, speed: f32) {
        self.segment = None;
        self.profile.current = speed;
        self.profile.target = speed;
    }

    /// Advance by `dt` seconds and return the interpolated speed.
    ///
    /// Once scaled elapsed time reaches the speed difference the ramp returns
    /// exactly the target and stops. Without a ramp in flight the current
    /// speed is returned unchanged.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let Some(segment) = self.segment.as_mut() else {
            return self.profile.current;
        };

        segment.elapsed += dt * self.profile.rate;
        if segment.elapsed >= segment.span {
            self.profile.current = segment.to;
            self.segment = None;
        } else {
            let t = segment.elapsed / segment.span;
            self.profile.current = segment.from + (segment.to - segment.from) * t;
        }
        self.profile.current
    }

    /// Whether a ramp is in flight
    pub fn is_running(&self) -> bool {
        self.segment.is_some()
    }

    /// Current speed
    pub fn speed(&self) -> f32 {
        self.profile.current
    }

    /// Snapshot of the profile
    pub fn profile(&self) -> SpeedProfile {
        self.profile
    }
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self::new(0.0)
    }
}
