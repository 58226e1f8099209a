//! Momentum - headless movement simulation
//!
//! Builds a small rapier level (flat ground and a ramp), drives a player
//! capsule with a scripted input scenario at a fixed timestep, logs every
//! movement state change and prints a JSON summary of the run.
//!
//! Usage: `momentum [settings.toml]`

mod scenario;
mod settings;

use anyhow::{Context, Result};
use glam::Vec3;
use momentum_core::math::flatten;
use momentum_core::GameTime;
use momentum_game::{InputSampler, MovementState, PlayerController, TickReport};
use momentum_physics::{CharacterBody, CharacterBodyConfig, PhysicsBody, PhysicsConfig, PhysicsWorld};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::scenario::ScriptedInput;
use crate::settings::SimSettings;

/// One movement state change
#[derive(Debug, Clone, Serialize)]
struct StateChange {
    time: f64,
    from: MovementState,
    to: MovementState,
    target_speed: f32,
}

/// What the run produced
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    ticks: u64,
    simulated_seconds: f64,
    dashes: u32,
    dash_impulses: u32,
    jumps: u32,
    max_ground_speed: f32,
    max_height: f32,
    final_position: [f32; 3],
    transitions: Vec<StateChange>,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport, velocity: Vec3, position: Vec3) {
        self.ticks += 1;
        self.simulated_seconds = report.time;
        self.dashes += report.dash_triggered as u32;
        self.dash_impulses += report.dash_impulse_applied as u32;
        self.jumps += report.jumped as u32;
        self.max_ground_speed = self.max_ground_speed.max(flatten(velocity).length());
        self.max_height = self.max_height.max(position.y);
        self.final_position = position.to_array();

        if report.state != report.previous_state {
            self.transitions.push(StateChange {
                time: report.time,
                from: report.previous_state,
                to: report.state,
                target_speed: report.target_speed,
            });
        }
    }
}

/// The level and the player being simulated
struct Simulation {
    world: PhysicsWorld,
    character: CharacterBody,
    player: PlayerController,
    input: ScriptedInput,
    time: GameTime,
    summary: RunSummary,
}

impl Simulation {
    fn new(settings: &SimSettings) -> Result<Self> {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::new(0.0, settings.world.gravity, 0.0),
            timestep: settings.time.fixed_timestep,
        });
        world.create_ground(0.0);
        world.create_ramp(
            settings.world.ramp_half_extents,
            settings.world.ramp_position,
            settings.world.ramp_angle,
        );
        world.update_queries();

        let character = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            settings.world.spawn,
        );

        let player = PlayerController::with_config(
            settings.movement.clone(),
            settings.dash.clone(),
            settings.camera.clone(),
        )
        .context("Invalid movement settings")?;

        Ok(Self {
            world,
            character,
            player,
            input: ScriptedInput::new(&settings.scenario),
            time: GameTime::new(settings.time.clone()),
            summary: RunSummary::default(),
        })
    }

    /// Feed one frame to the clock and run the fixed ticks it produced
    fn frame(&mut self, frame_delta: f32) {
        self.time.update(frame_delta);
        let dt = self.time.config.fixed_timestep;

        for _ in 0..self.time.fixed_steps() {
            let before = self.input.position();
            let input = self.input.sample(dt);
            if self.input.position() != before {
                if let Some(segment) = self.input.current() {
                    info!(time = self.player.time(), "Segment: {}", segment.name);
                }
            }

            let (report, velocity) = {
                let mut body = self.character.bind(&mut self.world);
                let report = self.player.fixed_update(&mut body, &input, dt);
                (report, body.velocity())
            };
            self.world.step();

            if report.state != report.previous_state {
                info!(
                    time = report.time,
                    speed = report.target_speed,
                    "{:?} -> {:?}",
                    report.previous_state,
                    report.state
                );
            }
            if report.dash_impulse_applied {
                debug!(?velocity, "Dash impulse applied");
            }

            let position = self.character.position(&self.world);
            self.summary.record(&report, velocity, position);
        }
    }

    fn is_finished(&self) -> bool {
        self.input.is_finished()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Momentum simulation...");

    let settings = match std::env::args().nth(1) {
        Some(path) => SimSettings::load_from(path)?,
        None => SimSettings::load(),
    };

    settings.validate()?;
    let frame_delta = settings.scenario.frame_delta;

    let mut sim = Simulation::new(&settings)?;
    info!(
        duration = settings.scenario.duration(),
        tick = settings.time.fixed_timestep,
        "Running scenario"
    );

    while !sim.is_finished() {
        sim.frame(frame_delta);
    }

    info!(
        ticks = sim.summary.ticks,
        transitions = sim.summary.transitions.len(),
        "Simulation finished"
    );
    println!("{}", serde_json::to_string_pretty(&sim.summary)?);

    Ok(())
}
