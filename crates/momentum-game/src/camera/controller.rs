//! First-person look camera

use glam::{Quat, Vec2, Vec3};

use crate::movement::DashAim;

use super::{CameraConfig, FovTween};

/// Yaw/pitch look camera with animated field of view
#[derive(Debug, Clone)]
pub struct LookCamera {
    /// Configuration
    pub config: CameraConfig,
    /// Yaw rotation in radians (horizontal)
    pub yaw: f32,
    /// Pitch rotation in radians (vertical, positive = up)
    pub pitch: f32,
    /// Current field of view in degrees
    fov: f32,
    /// FOV transition in flight
    tween: Option<FovTween>,
}

impl LookCamera {
    /// Create a new camera
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        let fov = config.base_fov;
        Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
            fov,
            tween: None,
        }
    }

    /// Camera forward, including pitch
    pub fn forward(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.pitch.sin(),
            -self.yaw.cos() * cos_pitch,
        )
    }

    /// Body orientation forward (yaw only)
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Right direction
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Camera rotation
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::YXZ, -self.yaw, self.pitch, 0.0)
    }

    /// Move direction for the given axes on the flat orientation
    pub fn move_direction(&self, forward_axis: f32, strafe_axis: f32) -> Vec3 {
        self.flat_forward() * forward_axis + self.right() * strafe_axis
    }

    /// Dash basis: camera forward or flat orientation forward
    pub fn dash_aim(&self, use_cam_forward: bool) -> DashAim {
        DashAim {
            forward: if use_cam_forward {
                self.forward()
            } else {
                self.flat_forward()
            },
            right: self.right(),
            up: Vec3::Y,
        }
    }

    /// Handle mouse look input
    pub fn look(&mut self, mouse_delta: Vec2, dt: f32) {
        self.yaw += mouse_delta.x * dt * self.config.sensitivity_x;
        self.set_pitch(self.pitch - mouse_delta.y * dt * self.config.sensitivity_y);
    }

    /// Set the camera pitch, clamped to the configured range
    pub fn set_pitch(&mut self, pitch: f32) {
        let pitch_min = self.config.pitch_min.to_radians();
        let pitch_max = self.config.pitch_max.to_radians();
        self.pitch = pitch.clamp(pitch_min, pitch_max);
    }

    /// Current field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Animate the FOV to `end` over `duration`, replacing any running transition
    pub fn lerp_fov(&mut self, end: f32, duration: f32) {
        self.tween = Some(FovTween::new(self.fov, end, duration));
    }

    /// Animate the FOV to the base FOV plus `increase`
    pub fn lerp_fov_increase(&mut self, increase: f32) {
        self.lerp_fov(self.config.base_fov + increase, self.config.fov_transition);
    }

    /// Animate the FOV back to the base FOV
    pub fn reset_fov(&mut self) {
        self.lerp_fov(self.config.base_fov, self.config.fov_transition);
    }

    /// Advance the FOV transition
    pub fn tick(&mut self, dt: f32) {
        if let Some(tween) = self.tween.as_mut() {
            self.fov = tween.tick(dt);
            if tween.is_done() {
                self.tween = None;
            }
        }
    }

    /// Whether a FOV transition is running
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

impl Default for LookCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = LookCamera::new();
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.fov(), 90.0);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_camera_pitch_clamping() {
        let mut camera = LookCamera::new();
        camera.set_pitch(100.0_f32.to_radians());
        assert!(camera.pitch <= camera.config.pitch_max.to_radians() + 1e-4);

        camera.look(Vec2::new(0.0, 1.0e6), 1.0);
        assert!(camera.pitch >= camera.config.pitch_min.to_radians() - 1e-4);
    }

    #[test]
    fn test_flat_forward_ignores_pitch() {
        let mut camera = LookCamera::new();
        camera.set_pitch(45.0_f32.to_radians());
        assert!(camera.forward().y > 0.5);
        assert_eq!(camera.flat_forward().y, 0.0);

        let aim = camera.dash_aim(false);
        assert_eq!(aim.forward, camera.flat_forward());
        assert_eq!(camera.dash_aim(true).forward, camera.forward());
    }

    #[test]
    fn test_basis_is_orthogonal() {
        let mut camera = LookCamera::new();
        camera.yaw = 0.7;
        assert!(camera.flat_forward().dot(camera.right()).abs() < 1e-6);
        assert!((camera.rotation() * Vec3::NEG_Z - camera.forward()).length() < 1e-5);
    }

    #[test]
    fn test_fov_increase_and_reset() {
        let mut camera = LookCamera::new();
        camera.lerp_fov_increase(10.0);
        for _ in 0..10 {
            camera.tick(0.02);
        }
        assert_eq!(camera.fov(), 100.0);
        assert!(!camera.is_animating());

        camera.reset_fov();
        camera.tick(0.05);
        assert!(camera.fov() < 100.0 && camera.fov() > 90.0);
        camera.tick(0.1);
        assert_eq!(camera.fov(), 90.0);
    }
}
