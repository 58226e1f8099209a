//! Slope classification and move-direction projection

use glam::Vec3;
use momentum_core::math::{angle_between_degrees, project_on_plane, UP};
use momentum_physics::GroundProbe;

/// What the slope check decided for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeReport {
    /// Standing on a walkable, non-flat slope
    pub on_slope: bool,
    /// Angle between up and the ground normal in degrees (0 without a hit)
    pub angle: f32,
    /// Move direction projected onto the slope plane (unit length or zero)
    pub direction: Vec3,
    /// Push down to stop bouncing off the crest
    pub push_down: bool,
    /// Gravity stays off while on a slope so the body does not slide
    pub gravity_enabled: bool,
}

/// Classifies ground as slope and bends movement along it
#[derive(Debug, Clone, Copy)]
pub struct SlopeProjector {
    /// Steepest walkable slope in degrees
    pub max_angle: f32,
}

impl SlopeProjector {
    pub fn new(max_angle: f32) -> Self {
        Self { max_angle }
    }

    /// Slope angle for a probe, in degrees
    pub fn angle(probe: &GroundProbe) -> f32 {
        if probe.hit {
            angle_between_degrees(UP, probe.normal)
        } else {
            0.0
        }
    }

    /// Flat ground (exactly 0) and anything at or past the limit are not slopes
    pub fn is_walkable_slope(&self, angle: f32) -> bool {
        angle > 0.0 && angle < self.max_angle
    }

    /// Whether the probe found a walkable slope
    pub fn on_slope(&self, probe: &GroundProbe) -> bool {
        probe.hit && self.is_walkable_slope(Self::angle(probe))
    }

    /// Project a move vector onto the plane with the given normal
    pub fn project(move_dir: Vec3, normal: Vec3) -> Vec3 {
        project_on_plane(move_dir, normal).normalize_or_zero()
    }

    /// Classify the ground and project the move direction
    pub fn evaluate(&self, probe: &GroundProbe, move_dir: Vec3, vertical_velocity: f32) -> SlopeReport {
        let angle = Self::angle(probe);
        let on_slope = probe.hit && self.is_walkable_slope(angle);

        let direction = if on_slope {
            Self::project(move_dir, probe.normal)
        } else {
            Vec3::ZERO
        };

        SlopeReport {
            on_slope,
            angle,
            direction,
            push_down: on_slope && vertical_velocity > 0.0,
            gravity_enabled: !on_slope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tilted(angle_degrees: f32) -> GroundProbe {
        let a = angle_degrees.to_radians();
        GroundProbe::hit(Vec3::new(a.sin(), a.cos(), 0.0))
    }

    #[test]
    fn test_flat_ground_is_not_a_slope() {
        let projector = SlopeProjector::new(40.0);
        let report = projector.evaluate(&GroundProbe::hit(Vec3::Y), Vec3::X, 1.0);
        assert_eq!(report.angle, 0.0);
        assert!(!report.on_slope);
        assert!(!report.push_down);
        assert!(report.gravity_enabled);
    }

    #[test]
    fn test_slope_bounds() {
        let projector = SlopeProjector::new(40.0);
        assert!(!projector.is_walkable_slope(0.0));
        assert!(projector.is_walkable_slope(0.01));
        assert!(projector.is_walkable_slope(39.99));
        assert!(!projector.is_walkable_slope(40.0));
        assert!(!projector.is_walkable_slope(60.0));

        assert!(projector.on_slope(&tilted(39.5)));
        assert!(!projector.on_slope(&tilted(40.5)));
    }

    #[test]
    fn test_miss_is_not_a_slope() {
        let projector = SlopeProjector::new(40.0);
        let report = projector.evaluate(&GroundProbe::miss(), Vec3::X, 0.0);
        assert!(!report.on_slope);
        assert!(report.gravity_enabled);
    }

    #[test]
    fn test_projection_follows_the_slope() {
        let projector = SlopeProjector::new(45.0);
        let probe = tilted(30.0);
        let report = projector.evaluate(&probe, Vec3::NEG_X, 0.0);

        assert!(report.on_slope);
        assert!(!report.gravity_enabled);
        assert!((report.direction.length() - 1.0).abs() < 1e-5);
        assert!(report.direction.dot(probe.normal).abs() < 1e-5);
        // Walking toward -X climbs this slope
        assert!(report.direction.y > 0.0);
    }

    #[test]
    fn test_push_down_only_when_rising() {
        let projector = SlopeProjector::new(45.0);
        let probe = tilted(20.0);
        assert!(projector.evaluate(&probe, Vec3::X, 0.5).push_down);
        assert!(!projector.evaluate(&probe, Vec3::X, 0.0).push_down);
        assert!(!projector.evaluate(&probe, Vec3::X, -0.5).push_down);
    }

    #[test]
    fn test_no_input_projects_to_zero() {
        let projector = SlopeProjector::new(45.0);
        let report = projector.evaluate(&tilted(20.0), Vec3::ZERO, 0.0);
        assert_eq!(report.direction, Vec3::ZERO);
    }

    #[test]
    fn test_capsule_on_rapier_ramp_is_on_slope() {
        use momentum_physics::{CharacterBody, CharacterBodyConfig, PhysicsBody, PhysicsWorld};

        let mut world = PhysicsWorld::new();
        world.create_ground(-5.0);
        world.create_ramp(Vec3::new(5.0, 0.5, 5.0), Vec3::ZERO, 25.0);
        // Ramp top over the origin sits at 0.5 / cos(25°); stand just above it
        let mut character = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            Vec3::new(0.0, 1.65, 0.0),
        );
        world.update_queries();

        let body = character.bind(&mut world);
        let ground = body.ground();
        assert!(ground.grounded);
        assert!(ground.probe.hit);
        assert!((SlopeProjector::angle(&ground.probe) - 25.0).abs() < 0.1);

        let projector = SlopeProjector::new(40.0);
        let report = projector.evaluate(&ground.probe, Vec3::NEG_X, 0.0);
        assert!(report.on_slope);
        assert!(!report.gravity_enabled);
        assert!(report.direction.y > 0.0);

        assert!(!SlopeProjector::new(20.0).on_slope(&ground.probe));
    }
}
