//! Headless game loop with App trait.
//!
//! Drives a [`PhysicsWorld`] at a fixed timestep from simulated frame times
//! and hands the interpolated state to the application each frame.

use crate::ecs::components::physics::RigidBody;
use crate::error::{PhysicsError, Result};
use crate::physics::{PhysicsConfig, PhysicsWorld};

/// Game loop configuration.
#[derive(Debug, Clone)]
pub struct GameLoopConfig {
    /// Physics settings, including the fixed timestep and substep cap.
    pub physics: PhysicsConfig,
    /// Simulated wall time per frame (seconds). Default: 1/60.
    pub frame_time: f64,
    /// Number of frames to run. Default: 600.
    pub frame_count: u64,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            frame_time: 1.0 / 60.0,
            frame_count: 600,
        }
    }
}

/// System execution context passed to App callbacks.
pub struct SystemContext<'a> {
    /// The physics world, for queries such as [`PhysicsWorld::trace`].
    pub physics: &'a PhysicsWorld,
    /// Index of the current frame.
    pub frame: u64,
    /// Time since last frame (seconds).
    pub delta_time: f64,
    /// Fixed timestep interval (seconds).
    pub fixed_delta_time: f64,
    /// Simulated time since start (seconds).
    pub elapsed_time: f64,
    /// Interpolation factor between the last two physics steps.
    pub alpha: f32,
    /// Number of physics steps run this frame.
    pub substeps: u32,
}

/// Trait for simulation applications.
///
/// Implement this trait and pass it to [`run_app`] to drive a world with
/// automatic physics scheduling.
pub trait App {
    /// Called once before the first frame. Spawn bodies and constraints.
    fn init(&mut self, world: &mut hecs::World);

    /// Called before every fixed physics step. Apply forces here. Optional.
    fn fixed_update(&mut self, _world: &mut hecs::World, _dt: f32) {}

    /// Called each frame after physics has run. Handle game logic.
    fn update(&mut self, world: &mut hecs::World, ctx: &SystemContext);

    /// Called after interpolation has written render poses. Optional.
    fn post_update(&mut self, _world: &mut hecs::World, _ctx: &SystemContext) {}
}

/// Run an application for `config.frame_count` frames.
///
/// Each frame runs:
/// 1. [`PhysicsWorld::step_with`], calling `App::fixed_update` before each
///    fixed step the accumulator allows
/// 2. `App::update`
/// 3. [`PhysicsWorld::interpolate`]
/// 4. `App::post_update`
///
/// Returns the world so the caller can inspect the final state.
pub fn run_app<A: App>(config: GameLoopConfig, app: &mut A) -> Result<hecs::World> {
    if !config.frame_time.is_finite() || config.frame_time < 0.0 {
        return Err(PhysicsError::InvalidConfig {
            field: "frame_time",
            value: config.frame_time,
        });
    }
    let mut physics = PhysicsWorld::try_new(config.physics.clone())?;

    let mut world = hecs::World::new();
    app.init(&mut world);
    tracing::info!(
        bodies = world.query::<&RigidBody>().iter().count(),
        frames = config.frame_count,
        "simulation started"
    );

    let mut elapsed_time = 0.0;
    for frame in 0..config.frame_count {
        elapsed_time += config.frame_time;

        // Fixed timestep loop
        let ticks = physics.step_with(&mut world, config.frame_time, |world, dt| {
            app.fixed_update(world, dt)
        });

        let ctx = SystemContext {
            physics: &physics,
            frame,
            delta_time: config.frame_time,
            fixed_delta_time: physics.config().fixed_timestep,
            elapsed_time,
            alpha: ticks.alpha,
            substeps: ticks.steps,
        };
        app.update(&mut world, &ctx);

        physics.interpolate(&mut world, ticks.alpha);
        app.post_update(&mut world, &ctx);
    }

    tracing::info!(elapsed = elapsed_time, "simulation finished");
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::Collider;
    use crate::ecs::components::transform::{GlobalTransform, Transform};
    use glam::Vec3;

    #[derive(Default)]
    struct Recorder {
        body: Option<hecs::Entity>,
        fixed_steps: u32,
        frames: u64,
        last_alpha: f32,
        last_global_x: f32,
    }

    impl App for Recorder {
        fn init(&mut self, world: &mut hecs::World) {
            let body = RigidBody::new_dynamic(1.0).with_collider(Collider::sphere(Vec3::ZERO, 0.5));
            self.body = Some(world.spawn((body, Transform::identity(), GlobalTransform::default())));
        }

        fn fixed_update(&mut self, world: &mut hecs::World, _dt: f32) {
            self.fixed_steps += 1;
            if let Some(entity) = self.body {
                if let Ok(mut body) = world.get::<&mut RigidBody>(entity) {
                    body.apply_central_force(Vec3::new(1.0, 0.0, 0.0));
                }
            }
        }

        fn update(&mut self, _world: &mut hecs::World, ctx: &SystemContext) {
            self.frames += 1;
            self.last_alpha = ctx.alpha;
        }

        fn post_update(&mut self, world: &mut hecs::World, _ctx: &SystemContext) {
            if let Some(entity) = self.body {
                if let Ok(global) = world.get::<&GlobalTransform>(entity) {
                    self.last_global_x = global.0.w_axis.x;
                }
            }
        }
    }

    fn config(fixed_timestep: f64, frame_time: f64, frame_count: u64) -> GameLoopConfig {
        GameLoopConfig {
            physics: PhysicsConfig {
                fixed_timestep,
                ..PhysicsConfig::default()
            },
            frame_time,
            frame_count,
        }
    }

    #[test]
    fn test_game_loop_config_default() {
        let config = GameLoopConfig::default();
        assert!((config.frame_time - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(config.frame_count, 600);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_fixed_steps_per_frame() {
        let mut app = Recorder::default();
        let world = run_app(config(0.125, 0.25, 10), &mut app).unwrap();
        assert_eq!(app.frames, 10);
        assert_eq!(app.fixed_steps, 20);
        assert_eq!(app.last_alpha, 0.0);

        // Constant unit force on unit mass
        let body = world.get::<&RigidBody>(app.body.unwrap()).unwrap();
        assert!(body.linear_velocity().x > 2.4);
        let transform = world.get::<&Transform>(app.body.unwrap()).unwrap();
        assert_eq!(transform.position, body.position());
    }

    #[test]
    fn test_slow_frames_interpolate() {
        let mut app = Recorder::default();
        run_app(config(0.25, 0.125, 3), &mut app).unwrap();
        // Frames at 0.125, 0.25 and 0.375 seconds: one step ran
        assert_eq!(app.fixed_steps, 1);
        assert!((app.last_alpha - 0.5).abs() < 1e-6);
        assert!(app.last_global_x > 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut app = Recorder::default();
        assert!(matches!(
            run_app(config(1.0 / 60.0, -1.0, 1), &mut app),
            Err(PhysicsError::InvalidConfig { field: "frame_time", .. })
        ));
        assert!(run_app(config(0.0, 1.0 / 60.0, 1), &mut app).is_err());
        assert_eq!(app.frames, 0);
    }
}
