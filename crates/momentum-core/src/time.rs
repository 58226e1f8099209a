//! Fixed-step simulation clock
//!
//! Hosts feed variable frame lengths in; the clock hands back how many
//! fixed movement ticks are due.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for simulation time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Simulated seconds per real second
    pub time_scale: f32,
    /// Length of one movement tick (seconds)
    pub fixed_timestep: f32,
    /// Longest frame accepted before clamping (seconds)
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Rejected time configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeConfigError {
    #[error("'{field}' must be a finite number greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

impl TimeConfig {
    /// Every value must be finite and positive, or the clock would stall
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        for (field, value) in [
            ("time_scale", self.time_scale),
            ("fixed_timestep", self.fixed_timestep),
            ("max_delta_time", self.max_delta_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TimeConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Accumulates frame time into fixed ticks
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    accumulator: f32,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
        }
    }

    /// Add one frame. Negative or NaN frames count as zero; long frames are clamped.
    pub fn update(&mut self, raw_delta: f32) {
        let delta = raw_delta.max(0.0).min(self.config.max_delta_time.max(0.0));
        self.accumulator += delta * self.config.time_scale;
    }

    /// Number of fixed ticks now due; consumes them from the accumulator
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if !(step > 0.0) {
            return 0;
        }

        let mut steps = 0;
        while self.accumulator >= step {
            self.accumulator -= step;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.25,
            ..Default::default()
        });

        time.update(0.125);
        assert_eq!(time.fixed_steps(), 0);

        time.update(0.125);
        assert_eq!(time.fixed_steps(), 1);

        time.update(0.375);
        assert_eq!(time.fixed_steps(), 1);

        time.update(0.125);
        assert_eq!(time.fixed_steps(), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.125,
            max_delta_time: 0.25,
            ..Default::default()
        });
        time.update(5.0);
        assert_eq!(time.fixed_steps(), 2);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.125,
            time_scale: 2.0,
            ..Default::default()
        });
        time.update(0.125);
        assert_eq!(time.fixed_steps(), 2);
    }

    #[test]
    fn test_validate_rejects_stalling_config() {
        assert!(TimeConfig::default().validate().is_ok());

        for max_delta_time in [-1.0, 0.0, f32::NAN] {
            let config = TimeConfig {
                max_delta_time,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TimeConfigError::NotPositive { field: "max_delta_time", .. })
            ));
        }

        let config = TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_max_delta_does_not_panic() {
        let mut time = GameTime::new(TimeConfig {
            max_delta_time: -1.0,
            ..Default::default()
        });
        time.update(0.016);
        assert_eq!(time.fixed_steps(), 0);

        time.config.max_delta_time = f32::NAN;
        time.update(0.016);
        assert_eq!(time.fixed_steps(), 0);
    }
}
