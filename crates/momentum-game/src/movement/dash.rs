//! One-shot timed dash with a delayed impulse and a cooldown
//!
//! A trigger stores the impulse and queues two events from the same instant:
//! the impulse after [`DashConfig::impulse_delay`] and the end of the dash
//! after [`DashConfig::dash_duration`]. Each event carries the id of the dash
//! that queued it and re-checks the sequencer state when it fires, so a stale
//! or out-of-order event is ignored instead of being cancelled.

use glam::Vec3;
use momentum_core::Scheduler;
use momentum_physics::PhysicsBody;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::DashConfig;

/// Deferred dash step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashEvent {
    ApplyImpulse { dash: u32 },
    End { dash: u32 },
}

/// Where the sequencer is in a dash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashPhase {
    #[default]
    Idle,
    /// Triggered; impulse not yet applied
    ImpulsePending,
    /// Impulse applied; waiting for the dash to end
    Active,
}

/// What firing a dash event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashOutcome {
    ImpulseApplied(Vec3),
    /// The dash ended before its impulse was due
    ImpulseDropped,
    Ended,
}

/// Basis the dash direction is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashAim {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for DashAim {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

/// Timers and flags that persist between dashes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    /// Seconds until another dash is allowed (never negative)
    pub cooldown_remaining: f32,
    pub active: bool,
    /// Stored at trigger time, consumed by the impulse event
    pub impulse: Option<Vec3>,
    /// Seconds left in the active dash
    pub duration_remaining: f32,
}

/// Runs dashes: trigger, delayed impulse, end, cooldown
#[derive(Debug, Clone)]
pub struct DashSequencer {
    pub config: DashConfig,
    state: DashState,
    phase: DashPhase,
    dash_id: u32,
}

impl DashSequencer {
    pub fn new(config: DashConfig) -> Self {
        Self {
            config,
            state: DashState::default(),
            phase: DashPhase::Idle,
            dash_id: 0,
        }
    }

    /// Unit dash direction for the given movement axes.
    ///
    /// Without input (or with directional dashing disabled) this is the aim's
    /// forward vector; it is never zero for a non-degenerate aim.
    pub fn direction(aim: &DashAim, forward_axis: f32, strafe_axis: f32, allow_all_directions: bool) -> Vec3 {
        let no_input = forward_axis == 0.0 && strafe_axis == 0.0;
        if !allow_all_directions || no_input {
            return aim.forward.normalize_or_zero();
        }

        let steered = (aim.forward * forward_axis + aim.right * strafe_axis).normalize_or_zero();
        if steered == Vec3::ZERO {
            aim.forward.normalize_or_zero()
        } else {
            steered
        }
    }

    /// Start a dash.
    ///
    /// Does nothing while the cooldown is running. Otherwise restarts the
    /// cooldown, samples the direction once, suspends gravity if configured,
    /// and queues the impulse and the end. Returns the stored impulse.
    pub fn trigger<B, E>(
        &mut self,
        now: f64,
        aim: &DashAim,
        forward_axis: f32,
        strafe_axis: f32,
        body: &mut B,
        scheduler: &mut Scheduler<E>,
    ) -> Option<Vec3>
    where
        B: PhysicsBody + ?Sized,
        E: From<DashEvent>,
    {
        if self.state.cooldown_remaining > 0.0 {
            trace!(remaining = self.state.cooldown_remaining, "Dash on cooldown");
            return None;
        }

        let direction =
            Self::direction(aim, forward_axis, strafe_axis, self.config.allow_all_directions);
        let impulse = direction * self.config.dash_force + aim.up * self.config.dash_upward_force;

        self.dash_id = self.dash_id.wrapping_add(1);
        self.state = DashState {
            cooldown_remaining: self.config.dash_cooldown,
            active: true,
            impulse: Some(impulse),
            duration_remaining: self.config.dash_duration,
        };
        self.phase = DashPhase::ImpulsePending;

        if self.config.disable_gravity {
            body.set_gravity_enabled(false);
        }

        let dash = self.dash_id;
        scheduler.schedule_after(now, self.config.impulse_delay, DashEvent::ApplyImpulse { dash }.into());
        scheduler.schedule_after(now, self.config.dash_duration, DashEvent::End { dash }.into());

        debug!(dash, ?impulse, "Dash triggered");
        Some(impulse)
    }

    /// Handle a fired dash event. Returns `None` for events from an older dash.
    pub fn fire<B>(&mut self, event: DashEvent, body: &mut B) -> Option<DashOutcome>
    where
        B: PhysicsBody + ?Sized,
    {
        match event {
            DashEvent::ApplyImpulse { dash } => {
                if dash != self.dash_id {
                    return None;
                }
                let impulse = self.state.impulse.take();
                match impulse {
                    Some(impulse) if self.state.active && self.phase == DashPhase::ImpulsePending => {
                        if self.config.reset_velocity {
                            body.set_velocity(Vec3::ZERO);
                        }
                        body.apply_impulse(impulse);
                        self.phase = DashPhase::Active;
                        debug!(dash, ?impulse, "Dash impulse applied");
                        Some(DashOutcome::ImpulseApplied(impulse))
                    }
                    _ => {
                        debug!(dash, "Dash ended before its impulse; impulse dropped");
                        Some(DashOutcome::ImpulseDropped)
                    }
                }
            }
            DashEvent::End { dash } => {
                if dash != self.dash_id || !self.state.active {
                    return None;
                }
                self.state.active = false;
                self.state.duration_remaining = 0.0;
                self.phase = DashPhase::Idle;

                if self.config.disable_gravity {
                    body.set_gravity_enabled(true);
                }
                debug!(dash, "Dash ended");
                Some(DashOutcome::Ended)
            }
        }
    }

    /// Count timers down by `dt`
    pub fn tick(&mut self, dt: f32) {
        self.state.cooldown_remaining = (self.state.cooldown_remaining - dt).max(0.0);
        if self.state.active {
            self.state.duration_remaining = (self.state.duration_remaining - dt).max(0.0);
        }
    }

    /// Vertical speed cap: the dash cap while dashing, otherwise `base`
    pub fn vertical_cap(&self, base: f32) -> f32 {
        if self.state.active {
            self.config.max_dash_y_speed
        } else {
            base
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn phase(&self) -> DashPhase {
        self.phase
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.state.cooldown_remaining
    }

    pub fn state(&self) -> &DashState {
        &self.state
    }
}
