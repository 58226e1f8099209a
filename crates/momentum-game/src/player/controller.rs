//! Player controller: runs the movement core once per tick against a body

use glam::Vec3;
use momentum_core::math::{clamp_length, flatten, UP};
use momentum_core::Scheduler;
use momentum_physics::PhysicsBody;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::camera::{CameraConfig, LookCamera};
use crate::error::ConfigError;
use crate::input::{InputAction, MotionInput};
use crate::movement::{
    DashConfig, DashEvent, DashOutcome, DashSequencer, MotionContext, MovementConfig,
    MovementState, MovementStateMachine, SlopeProjector, SlopeReport, CROUCH_IMPULSE,
    MOVE_FORCE_MULTIPLIER, SLOPE_STICK_FORCE,
};

/// Deferred player events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Dash(DashEvent),
    /// Jump cooldown elapsed
    ResetJump,
}

impl From<DashEvent> for PlayerEvent {
    fn from(event: DashEvent) -> Self {
        PlayerEvent::Dash(event)
    }
}

/// Summary of one tick, for hosts and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Simulation time at the end of the tick
    pub time: f64,
    pub state: MovementState,
    pub previous_state: MovementState,
    pub speed: f32,
    pub target_speed: f32,
    pub on_slope: bool,
    pub slope_angle: f32,
    pub dash_active: bool,
    pub dash_triggered: bool,
    pub dash_impulse_applied: bool,
    pub jumped: bool,
    pub fov: f32,
}

/// Player controller handling input, movement state, dashing, and forces
pub struct PlayerController {
    /// Movement configuration
    pub config: MovementConfig,
    /// Look camera (orientation and FOV)
    pub camera: LookCamera,
    machine: MovementStateMachine,
    dash: DashSequencer,
    slope: SlopeProjector,
    scheduler: Scheduler<PlayerEvent>,
    /// Simulation clock driving the scheduler
    time: f64,
    ready_to_jump: bool,
    jumping: bool,
    crouched: bool,
}

impl PlayerController {
    /// Create a player controller with default tuning
    pub fn new() -> Self {
        Self::from_parts(MovementConfig::default(), DashConfig::default(), CameraConfig::default())
    }

    /// Create a player controller after validating its tuning
    pub fn with_config(
        movement: MovementConfig,
        dash: DashConfig,
        camera: CameraConfig,
    ) -> Result<Self, ConfigError> {
        movement.validate()?;
        dash.validate()?;
        Ok(Self::from_parts(movement, dash, camera))
    }

    fn from_parts(movement: MovementConfig, dash: DashConfig, camera: CameraConfig) -> Self {
        Self {
            machine: MovementStateMachine::new(&movement),
            slope: SlopeProjector::new(movement.max_slope_angle),
            dash: DashSequencer::new(dash),
            camera: LookCamera::with_config(camera),
            config: movement,
            scheduler: Scheduler::new(),
            time: 0.0,
            ready_to_jump: true,
            jumping: false,
            crouched: false,
        }
    }

    /// Current movement state
    pub fn state(&self) -> MovementState {
        self.machine.state()
    }

    /// Current effective move speed
    pub fn speed(&self) -> f32 {
        self.machine.speed()
    }

    /// Dash sequencer (read-only)
    pub fn dash(&self) -> &DashSequencer {
        &self.dash
    }

    /// Simulation time seen by this controller
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Height scale requested of the body
    pub fn height_scale(&self) -> f32 {
        if self.crouched {
            self.config.crouch_y_scale
        } else {
            1.0
        }
    }

    /// Whether a jump is allowed once grounded
    pub fn is_ready_to_jump(&self) -> bool {
        self.ready_to_jump
    }

    /// Advance one tick
    pub fn fixed_update<B>(&mut self, body: &mut B, input: &MotionInput, dt: f32) -> TickReport
    where
        B: PhysicsBody + ?Sized,
    {
        self.time += dt as f64;
        self.camera.look(input.look_delta, dt);

        let mut dash_impulse_applied = false;
        for event in self.scheduler.drain_due(self.time) {
            match event {
                PlayerEvent::Dash(event) => match self.dash.fire(event, body) {
                    Some(DashOutcome::ImpulseApplied(_)) => dash_impulse_applied = true,
                    Some(DashOutcome::Ended) => self.camera.reset_fov(),
                    Some(DashOutcome::ImpulseDropped) | None => {}
                },
                PlayerEvent::ResetJump => {
                    self.ready_to_jump = true;
                    self.jumping = false;
                }
            }
        }

        let mut dash_triggered = false;
        if input.is_just_pressed(InputAction::Dash) {
            let aim = self.camera.dash_aim(self.dash.config.use_cam_forward);
            let triggered = self.dash.trigger(
                self.time,
                &aim,
                input.forward,
                input.strafe,
                body,
                &mut self.scheduler,
            );
            if triggered.is_some() {
                self.camera.lerp_fov_increase(self.dash.config.fov_increase);
                dash_triggered = true;
            }
        }
        self.dash.tick(dt);
        self.camera.tick(dt);

        let ground = body.ground();
        let ctx = MotionContext {
            grounded: ground.grounded,
            slope_angle: SlopeProjector::angle(&ground.probe),
            forward: input.forward,
            strafe: input.strafe,
            dashing: self.dash.is_active(),
            crouch_held: input.is_held(InputAction::Crouch),
            sprint_held: input.is_held(InputAction::Sprint),
        };
        let transition = self.machine.update(&self.config, &ctx, dt);

        self.handle_crouch(body, ctx.crouch_held);
        let jumped = self.handle_jump(body, input, ground.grounded);

        let move_dir = self.camera.move_direction(input.forward, input.strafe);
        let slope = self
            .slope
            .evaluate(&ground.probe, move_dir, body.velocity().y);

        self.control_speed(body, &slope, transition.speed);
        body.set_drag(self.config.drag(transition.state));

        if transition.state != MovementState::Dashing {
            self.move_player(body, move_dir, &slope, ground.grounded, transition.speed);
        }

        let report = TickReport {
            time: self.time,
            state: transition.state,
            previous_state: transition.previous,
            speed: transition.speed,
            target_speed: transition.target_speed,
            on_slope: slope.on_slope,
            slope_angle: slope.angle,
            dash_active: self.dash.is_active(),
            dash_triggered,
            dash_impulse_applied,
            jumped,
            fov: self.camera.fov(),
        };
        trace!(?report, "Player tick");
        report
    }

    /// Shrink on the crouch press, restore on release
    fn handle_crouch<B: PhysicsBody + ?Sized>(&mut self, body: &mut B, crouch_held: bool) {
        if crouch_held && !self.crouched {
            self.crouched = true;
            body.set_height_scale(self.config.crouch_y_scale);
            body.apply_impulse(-UP * CROUCH_IMPULSE);
        } else if !crouch_held && self.crouched {
            self.crouched = false;
            body.set_height_scale(1.0);
        }
    }

    /// Jump while held, ready, and grounded; readiness returns after the cooldown
    fn handle_jump<B: PhysicsBody + ?Sized>(
        &mut self,
        body: &mut B,
        input: &MotionInput,
        grounded: bool,
    ) -> bool {
        if !(input.is_held(InputAction::Jump) && self.ready_to_jump && grounded) {
            return false;
        }

        self.ready_to_jump = false;
        self.jumping = true;

        let v = body.velocity();
        body.set_velocity(Vec3::new(v.x, 0.0, v.z));
        body.apply_impulse(UP * self.config.jump_power);

        self.scheduler
            .schedule_after(self.time, self.config.jump_cooldown, PlayerEvent::ResetJump);
        debug!(power = self.config.jump_power, "Jumped");
        true
    }

    /// Keep velocity within the current speed and vertical cap
    fn control_speed<B: PhysicsBody + ?Sized>(&self, body: &mut B, slope: &SlopeReport, speed: f32) {
        let v = body.velocity();

        let mut limited = if slope.on_slope {
            clamp_length(v, speed)
        } else {
            let flat = clamp_length(flatten(v), speed);
            Vec3::new(flat.x, v.y, flat.z)
        };

        let y_cap = self.dash.vertical_cap(self.config.max_y_speed);
        if y_cap != 0.0 && limited.y > y_cap {
            limited.y = y_cap;
        }

        if limited != v {
            body.set_velocity(limited);
        }
    }

    /// Push the body along the move direction (never called while dashing)
    fn move_player<B: PhysicsBody + ?Sized>(
        &self,
        body: &mut B,
        move_dir: Vec3,
        slope: &SlopeReport,
        grounded: bool,
        speed: f32,
    ) {
        if slope.on_slope && !self.jumping {
            body.add_force(slope.direction * speed * self.config.slope_move_power);

            if slope.push_down {
                body.add_force(-UP * SLOPE_STICK_FORCE);
            }
        }

        body.set_gravity_enabled(slope.gravity_enabled);

        let force = move_dir.normalize_or_zero() * speed * MOVE_FORCE_MULTIPLIER;
        if grounded {
            body.add_force(force);
        } else {
            body.add_force(force * self.config.air_multiplier);
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_physics::{BodyRequest, GroundSample, RecordingBody};

    const DT: f32 = 1.0 / 128.0;

    fn sprint_forward() -> MotionInput {
        MotionInput::new()
            .with_axes(1.0, 0.0)
            .holding(InputAction::Sprint)
    }

    #[test]
    fn test_player_controller_creation() {
        let player = PlayerController::new();
        assert_eq!(player.state(), MovementState::Idle);
        assert_eq!(player.height_scale(), 1.0);
        assert!(player.is_ready_to_jump());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let movement = MovementConfig {
            max_slope_angle: 120.0,
            ..Default::default()
        };
        assert!(PlayerController::with_config(movement, DashConfig::default(), CameraConfig::default()).is_err());
    }

    #[test]
    fn test_walk_and_sprint_on_flat_ground() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();

        let report = player.fixed_update(&mut body, &MotionInput::new().with_axes(1.0, 0.0), DT);
        assert_eq!(report.state, MovementState::Walking);
        assert_eq!(report.speed, 5.0);
        assert_eq!(body.drag, 5.0);
        assert!(body.gravity_enabled);
        let force = *body.forces().last().expect("move force");
        assert!((force - Vec3::NEG_Z * 50.0).length() < 1e-4);

        let report = player.fixed_update(&mut body, &sprint_forward(), DT);
        assert_eq!(report.state, MovementState::Sprinting);
        assert_eq!(report.speed, 7.0);
    }

    #[test]
    fn test_dash_retrigger_on_cooldown_keeps_sprinting() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();

        let report = player.fixed_update(&mut body, &sprint_forward().pressing(InputAction::Dash), DT);
        assert!(report.dash_triggered);
        assert_eq!(report.state, MovementState::Dashing);
        assert_eq!(report.target_speed, 10.0);

        // Let the dash finish (0.25s) but stay within the 1s cooldown
        for _ in 0..40 {
            player.fixed_update(&mut body, &sprint_forward(), DT);
        }
        assert!(!player.dash().is_active());
        assert!(player.dash().cooldown_remaining() > 0.0);

        let report = player.fixed_update(&mut body, &sprint_forward().pressing(InputAction::Dash), DT);
        assert!(!report.dash_triggered);
        assert_eq!(report.state, MovementState::Sprinting);
        assert_eq!(report.target_speed, 7.0);
        assert_eq!(body.impulses().len(), 1);
    }

    #[test]
    fn test_dash_applies_impulse_after_delay_and_skips_move_force() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();

        player.fixed_update(&mut body, &MotionInput::new().pressing(InputAction::Dash), DT);
        assert!(!body.gravity_enabled);
        assert!(body.forces().is_empty());

        let mut applied_at = None;
        for _ in 0..8 {
            let report = player.fixed_update(&mut body, &MotionInput::new(), DT);
            if report.dash_impulse_applied {
                applied_at = Some(report.time);
            }
        }
        let applied_at = applied_at.expect("impulse should be applied");
        assert!(applied_at >= DT as f64 + 0.025);

        // No input: dash goes along camera forward
        let impulse = body.impulses()[0];
        assert!((impulse - Vec3::NEG_Z * 30.0).length() < 1e-4);
        assert!(body.forces().is_empty());
        assert!(player.camera.fov() > 90.0);
    }

    #[test]
    fn test_dash_end_restores_gravity_and_ramps_speed() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();

        player.fixed_update(&mut body, &MotionInput::new().pressing(InputAction::Dash), DT);
        let mut exit = None;
        for _ in 0..60 {
            let report = player.fixed_update(&mut body, &MotionInput::new(), DT);
            if report.previous_state == MovementState::Dashing && report.state == MovementState::Walking {
                exit = Some(report);
            }
        }

        let exit = exit.expect("dash should end");
        assert!(body.gravity_enabled);
        assert!(exit.speed < 10.0 && exit.speed > 5.0);
        assert_eq!(player.speed(), 5.0);
    }

    #[test]
    fn test_dash_caps_vertical_speed() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();

        player.fixed_update(&mut body, &MotionInput::new().pressing(InputAction::Dash), DT);
        body.velocity = Vec3::new(0.0, 8.0, 0.0);
        player.fixed_update(&mut body, &MotionInput::new(), DT);
        assert_eq!(body.velocity.y, 3.0);

        for _ in 0..40 {
            player.fixed_update(&mut body, &MotionInput::new(), DT);
        }
        body.velocity = Vec3::new(0.0, 8.0, 0.0);
        player.fixed_update(&mut body, &MotionInput::new(), DT);
        assert_eq!(body.velocity.y, 8.0);
    }

    #[test]
    fn test_jump_then_cooldown() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();
        body.velocity = Vec3::new(1.0, -3.0, 0.0);
        let jump = MotionInput::new().holding(InputAction::Jump);

        let report = player.fixed_update(&mut body, &jump, DT);
        assert!(report.jumped);
        assert!(!player.is_ready_to_jump());
        assert_eq!(body.impulses(), vec![UP * 8.0]);
        assert!(body.requests.contains(&BodyRequest::SetVelocity(Vec3::new(1.0, 0.0, 0.0))));

        // Still held and grounded, but on cooldown
        let report = player.fixed_update(&mut body, &jump, DT);
        assert!(!report.jumped);

        for _ in 0..32 {
            player.fixed_update(&mut body, &MotionInput::new(), DT);
        }
        assert!(player.is_ready_to_jump());
    }

    #[test]
    fn test_airborne_state_and_air_force() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::with_ground(GroundSample::airborne());

        let report = player.fixed_update(&mut body, &MotionInput::new().with_axes(1.0, 0.0), DT);
        assert_eq!(report.state, MovementState::Jumping);
        assert_eq!(body.drag, 0.0);
        let force = *body.forces().last().expect("air force");
        assert!((force - Vec3::NEG_Z * 25.0).length() < 1e-4);
    }

    #[test]
    fn test_crouch_press_and_release() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();

        let report = player.fixed_update(&mut body, &MotionInput::new().holding(InputAction::Crouch), DT);
        assert_eq!(report.state, MovementState::Crouching);
        assert_eq!(report.speed, 3.0);
        assert_eq!(body.height_scale, 0.5);
        assert_eq!(body.impulses(), vec![-UP * CROUCH_IMPULSE]);

        player.fixed_update(&mut body, &MotionInput::new().holding(InputAction::Crouch), DT);
        assert_eq!(body.impulses().len(), 1);

        player.fixed_update(&mut body, &MotionInput::new(), DT);
        assert_eq!(body.height_scale, 1.0);
        assert_eq!(player.height_scale(), 1.0);
    }

    #[test]
    fn test_slope_disables_gravity_and_follows_surface() {
        let mut player = PlayerController::new();
        let a = 20.0_f32.to_radians();
        let normal = Vec3::new(0.0, a.cos(), a.sin());
        let mut body = RecordingBody::with_ground(GroundSample::on_surface(normal));
        body.velocity = Vec3::new(0.0, 1.0, 0.0);

        let report = player.fixed_update(&mut body, &MotionInput::new().with_axes(1.0, 0.0), DT);
        assert!(report.on_slope);
        assert!((report.slope_angle - 20.0).abs() < 1e-3);
        assert!(!body.gravity_enabled);

        let forces = body.forces();
        // Slope force, stick-down force, then the regular move force
        assert_eq!(forces.len(), 3);
        assert!(forces[0].dot(normal).abs() < 1e-4);
        assert!(forces[0].y > 0.0);
        assert_eq!(forces[1], -UP * SLOPE_STICK_FORCE);

        body.ground = GroundSample::flat();
        player.fixed_update(&mut body, &MotionInput::new().with_axes(1.0, 0.0), DT);
        assert!(body.gravity_enabled);
    }

    #[test]
    fn test_speed_control_clamps_flat_velocity() {
        let mut player = PlayerController::new();
        let mut body = RecordingBody::new();
        body.velocity = Vec3::new(30.0, -2.0, 40.0);

        player.fixed_update(&mut body, &MotionInput::new(), DT);
        let flat = flatten(body.velocity).length();
        assert!((flat - 5.0).abs() < 1e-4);
        assert_eq!(body.velocity.y, -2.0);
    }
}
