//! Timed field-of-view interpolation

/// Linear FOV change over a fixed duration, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovTween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl FovTween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` and return the FOV for this tick; exactly `to` once done
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        if self.is_done() {
            self.to
        } else {
            self.from + (self.to - self.from) * (self.elapsed / self.duration)
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}
