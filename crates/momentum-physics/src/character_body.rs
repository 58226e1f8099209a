//! Dynamic capsule body backed by rapier3d

use glam::Vec3;
use rapier3d::prelude::*;

use crate::body::{GroundProbe, GroundSample, PhysicsBody};
use crate::PhysicsWorld;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 2m)
    pub height: f32,
    /// Capsule radius (default: 0.5m)
    pub radius: f32,
    /// Body mass; scales the response to forces (default: 1kg)
    pub mass: f32,
    /// Extra reach below the capsule for the grounded check
    pub ground_check_margin: f32,
    /// Extra reach below the capsule for the slope probe
    pub slope_check_margin: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            mass: 1.0,
            ground_check_margin: 0.2,
            slope_check_margin: 0.3,
        }
    }
}

/// Handles to a spawned character capsule
#[derive(Debug, Clone)]
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Rigid body handle
    pub body: RigidBodyHandle,
    /// Capsule collider handle
    pub collider: ColliderHandle,
    /// Current height scale (1.0 = standing)
    height_scale: f32,
}

impl CharacterBody {
    /// Spawn a rotation-locked dynamic capsule centered at `position`
    pub fn spawn(physics: &mut PhysicsWorld, config: CharacterBodyConfig, position: Vec3) -> Self {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .lock_rotations()
            .build();

        let collider = ColliderBuilder::capsule_y(Self::half_segment(&config, 1.0), config.radius)
            .mass(config.mass)
            .friction(0.0)
            .restitution(0.0)
            .build();

        let (body, collider) = physics.add_dynamic_body(rigid_body, collider);
        tracing::debug!(?position, "Spawned character body");

        Self {
            config,
            body,
            collider,
            height_scale: 1.0,
        }
    }

    /// Borrow the world as a [`PhysicsBody`] for this character
    pub fn bind<'w>(&'w mut self, physics: &'w mut PhysicsWorld) -> RapierBody<'w> {
        RapierBody {
            physics,
            character: self,
        }
    }

    /// Center position of the capsule
    pub fn position(&self, physics: &PhysicsWorld) -> Vec3 {
        physics
            .get_rigid_body(self.body)
            .map(|rb| {
                let t = rb.translation();
                Vec3::new(t.x, t.y, t.z)
            })
            .unwrap_or(Vec3::ZERO)
    }

    /// Current height scale
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    fn half_segment(config: &CharacterBodyConfig, scale: f32) -> f32 {
        ((config.height * scale - 2.0 * config.radius) / 2.0).max(0.01)
    }

    fn half_height(&self) -> f32 {
        self.config.height * self.height_scale * 0.5
    }
}

/// A character body bound to its world for one tick
pub struct RapierBody<'w> {
    physics: &'w mut PhysicsWorld,
    character: &'w mut CharacterBody,
}

impl RapierBody<'_> {
    fn rigid_body(&self) -> Option<&RigidBody> {
        self.physics.get_rigid_body(self.character.body)
    }

    fn rigid_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.physics.get_rigid_body_mut(self.character.body)
    }
}

impl PhysicsBody for RapierBody<'_> {
    fn velocity(&self) -> Vec3 {
        self.rigid_body()
            .map(|rb| {
                let v = rb.linvel();
                Vec3::new(v.x, v.y, v.z)
            })
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.set_linvel(vector![velocity.x, velocity.y, velocity.z], true);
        }
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        // Velocity-domain: the change does not depend on the body's mass
        if let Some(rb) = self.rigid_body_mut() {
            let v = *rb.linvel() + vector![impulse.x, impulse.y, impulse.z];
            rb.set_linvel(v, true);
        }
    }

    fn add_force(&mut self, force: Vec3) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.add_force(vector![force.x, force.y, force.z], true);
        }
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.set_gravity_scale(if enabled { 1.0 } else { 0.0 }, true);
        }
    }

    fn set_drag(&mut self, drag: f32) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.set_linear_damping(drag);
        }
    }

    fn ground(&self) -> GroundSample {
        let Some(rb) = self.rigid_body() else {
            return GroundSample::airborne();
        };
        let t = rb.translation();
        let origin = Vec3::new(t.x, t.y, t.z);

        let half_height = self.character.half_height();
        let ground_reach = half_height + self.character.config.ground_check_margin;
        let slope_reach = half_height + self.character.config.slope_check_margin;
        let filter = QueryFilter::default().exclude_rigid_body(self.character.body);

        match self
            .physics
            .raycast_detailed(origin, Vec3::NEG_Y, slope_reach.max(ground_reach), filter)
        {
            Some(hit) => GroundSample {
                grounded: hit.distance <= ground_reach,
                probe: if hit.distance <= slope_reach {
                    GroundProbe::hit(hit.normal)
                } else {
                    GroundProbe::miss()
                },
            },
            None => GroundSample::airborne(),
        }
    }

    fn set_height_scale(&mut self, scale: f32) {
        let scale = scale.max(0.05);
        let half_segment = CharacterBody::half_segment(&self.character.config, scale);
        let radius = self.character.config.radius;
        if let Some(collider) = self.physics.collider_set.get_mut(self.character.collider) {
            collider.set_shape(SharedShape::capsule_y(half_segment, radius));
        }
        self.character.height_scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_body_config() {
        let config = CharacterBodyConfig::default();
        assert_eq!(config.height, 2.0);
        assert_eq!(config.radius, 0.5);
        assert_eq!(config.mass, 1.0);
    }

    #[test]
    fn test_ground_probe_on_flat_ground() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let mut character =
            CharacterBody::spawn(&mut world, CharacterBodyConfig::default(), Vec3::new(0.0, 1.05, 0.0));
        world.update_queries();

        let body = character.bind(&mut world);
        let sample = body.ground();
        assert!(sample.grounded);
        assert!(sample.probe.hit);
        assert!((sample.probe.normal - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_ground_probe_in_the_air() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let mut character =
            CharacterBody::spawn(&mut world, CharacterBodyConfig::default(), Vec3::new(0.0, 10.0, 0.0));
        world.update_queries();

        let body = character.bind(&mut world);
        assert_eq!(body.ground(), GroundSample::airborne());
    }

    #[test]
    fn test_impulse_changes_velocity() {
        let mut world = PhysicsWorld::new();
        let mut character =
            CharacterBody::spawn(&mut world, CharacterBodyConfig::default(), Vec3::new(0.0, 5.0, 0.0));

        let mut body = character.bind(&mut world);
        body.set_gravity_enabled(false);
        body.apply_impulse(Vec3::new(3.0, 0.0, 0.0));
        assert!((body.velocity().x - 3.0).abs() < 1e-3);
    }
}
