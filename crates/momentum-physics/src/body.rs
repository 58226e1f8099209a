//! The physics collaborator driven by the movement core
//!
//! The movement core never integrates motion itself. It reads velocity and a
//! ground probe from the host body and sends back impulses, forces, and
//! gravity/drag toggles.

use glam::Vec3;

/// Result of a downward ground/slope probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Whether the probe ray hit anything
    pub hit: bool,
    /// Surface normal at the hit point (meaningless when `hit` is false)
    pub normal: Vec3,
}

impl GroundProbe {
    /// Probe that found nothing underneath
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::Y,
        }
    }

    /// Probe that hit a surface with the given normal
    pub fn hit(normal: Vec3) -> Self {
        Self { hit: true, normal }
    }
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self::miss()
    }
}

/// Ground information sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundSample {
    /// Standing on walkable ground (short ray)
    pub grounded: bool,
    /// Slope probe (slightly longer ray, reports the surface normal)
    pub probe: GroundProbe,
}

impl GroundSample {
    /// Airborne: nothing below within reach
    pub fn airborne() -> Self {
        Self::default()
    }

    /// Standing on flat ground
    pub fn flat() -> Self {
        Self::on_surface(Vec3::Y)
    }

    /// Standing on a surface with the given normal
    pub fn on_surface(normal: Vec3) -> Self {
        Self {
            grounded: true,
            probe: GroundProbe::hit(normal),
        }
    }
}

/// A simulated body the movement core can query and push around
pub trait PhysicsBody {
    /// Current linear velocity
    fn velocity(&self) -> Vec3;

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, velocity: Vec3);

    /// Instantaneous velocity change (unit mass)
    fn apply_impulse(&mut self, impulse: Vec3);

    /// Continuous force for the coming physics step
    fn add_force(&mut self, force: Vec3);

    /// Toggle gravity for this body
    fn set_gravity_enabled(&mut self, enabled: bool);

    /// Set the linear drag coefficient
    fn set_drag(&mut self, drag: f32);

    /// Sample ground and slope underneath the body
    fn ground(&self) -> GroundSample;

    /// Scale the body's height (crouching). Hosts without resizable shapes may ignore it.
    fn set_height_scale(&mut self, _scale: f32) {}
}

/// A request the movement core made of its body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyRequest {
    SetVelocity(Vec3),
    Impulse(Vec3),
    Force(Vec3),
    Gravity(bool),
    Drag(f32),
    HeightScale(f32),
}

/// Body that records every request and keeps the last applied state.
///
/// Velocity reacts to impulses and `set_velocity`; forces are only recorded.
/// Useful for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct RecordingBody {
    pub velocity: Vec3,
    pub ground: GroundSample,
    pub gravity_enabled: bool,
    pub drag: f32,
    pub height_scale: f32,
    pub requests: Vec<BodyRequest>,
}

impl RecordingBody {
    /// Create a resting body on flat ground
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            ground: GroundSample::flat(),
            gravity_enabled: true,
            drag: 0.0,
            height_scale: 1.0,
            requests: Vec::new(),
        }
    }

    /// Create a resting body with a specific ground sample
    pub fn with_ground(ground: GroundSample) -> Self {
        Self {
            ground,
            ..Self::new()
        }
    }

    /// All impulses applied so far, in order
    pub fn impulses(&self) -> Vec<Vec3> {
        self.requests
            .iter()
            .filter_map(|request| match request {
                BodyRequest::Impulse(impulse) => Some(*impulse),
                _ => None,
            })
            .collect()
    }

    /// All forces added so far, in order
    pub fn forces(&self) -> Vec<Vec3> {
        self.requests
            .iter()
            .filter_map(|request| match request {
                BodyRequest::Force(force) => Some(*force),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingBody {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBody for RecordingBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.requests.push(BodyRequest::SetVelocity(velocity));
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
        self.requests.push(BodyRequest::Impulse(impulse));
    }

    fn add_force(&mut self, force: Vec3) {
        self.requests.push(BodyRequest::Force(force));
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
        self.requests.push(BodyRequest::Gravity(enabled));
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
        self.requests.push(BodyRequest::Drag(drag));
    }

    fn ground(&self) -> GroundSample {
        self.ground
    }

    fn set_height_scale(&mut self, scale: f32) {
        self.height_scale = scale;
        self.requests.push(BodyRequest::HeightScale(scale));
    }
}
