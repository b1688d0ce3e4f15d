//! Rigid body simulation for the colony.
//!
//! # Architecture
//!
//! [`PhysicsWorld::update`] advances the simulation by one fixed step:
//!
//! 1. Broadphase pair generation (all pairs sharing a layer, not both static)
//! 2. Narrowphase contact generation through the shape dispatch table
//! 3. Spring constraints
//! 4. Collision response (restitution and friction impulses)
//! 5. Integration of forces and velocities
//! 6. Positional correction of remaining penetration
//! 7. Synchronization of [`Transform`](crate::ecs::components::transform::Transform) components
//!
//! [`PhysicsWorld::step`] drives `update` from variable frame times with a
//! fixed timestep accumulator, and [`PhysicsWorld::interpolate`] blends the
//! last two simulated poses for rendering.

pub mod body_set;
pub mod broadphase;
pub mod collider;
pub mod constraint;
pub mod contact;
pub mod material;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;
pub mod timestep;
pub mod trace;

use glam::Vec3;

use crate::ecs::components::physics::SpringConstraint;
use crate::error::{PhysicsError, Result};
use crate::geom::Ray;

use self::body_set::BodySet;
use self::broadphase::{detect_collisions_broad, BodyPair};
use self::contact::CollisionManifold;
use self::narrowphase::detect_collisions_narrow;
use self::timestep::FixedTimestep;
use self::trace::TraceHit;

pub use self::timestep::Ticks;

/// Configuration for the physics simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    /// Gravity vector. Default: zero, gameplay code applies its own forces.
    pub gravity: Vec3,
    /// Fixed timestep for physics updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per frame. Default: 4.
    pub max_substeps: u32,
    /// Penetration depth left uncorrected. Default: 0.01.
    pub penetration_slop: f32,
    /// Fraction of the remaining penetration corrected per step. Default: 0.4.
    pub correction_factor: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::ZERO,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
            penetration_slop: 0.01,
            correction_factor: 0.4,
        }
    }
}

impl PhysicsConfig {
    /// Check that every value is finite and in range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, value: f64| Err(PhysicsError::InvalidConfig { field, value });

        if !self.gravity.is_finite() {
            return invalid("gravity", f64::NAN);
        }
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return invalid("fixed_timestep", self.fixed_timestep);
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps", 0.0);
        }
        if !self.penetration_slop.is_finite() || self.penetration_slop < 0.0 {
            return invalid("penetration_slop", self.penetration_slop.into());
        }
        if !(0.0..=1.0).contains(&self.correction_factor) {
            return invalid("correction_factor", self.correction_factor.into());
        }
        Ok(())
    }
}

/// The physics pipeline and its per-step scratch buffers.
///
/// Bodies live in the [`hecs::World`] as [`RigidBody`] components; springs as
/// [`SpringConstraint`] components. Nothing here outlives a step except the
/// timestep accumulator.
///
/// [`RigidBody`]: crate::ecs::components::physics::RigidBody
pub struct PhysicsWorld {
    config: PhysicsConfig,
    clock: FixedTimestep,
    pairs: Vec<BodyPair>,
    manifolds: Vec<CollisionManifold>,
    springs: Vec<SpringConstraint>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        let clock = FixedTimestep::new(config.fixed_timestep, config.max_substeps);
        Self {
            config,
            clock,
            pairs: Vec::new(),
            manifolds: Vec::new(),
            springs: Vec::new(),
        }
    }

    /// Validate `config`, then create the world.
    pub fn try_new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Broadphase pairs from the last step.
    pub fn pairs(&self) -> &[BodyPair] {
        &self.pairs
    }

    /// Contact manifolds from the last step.
    pub fn manifolds(&self) -> &[CollisionManifold] {
        &self.manifolds
    }

    /// Advance by `frame_time` seconds of wall time, running as many fixed
    /// steps as the accumulator allows.
    ///
    /// Returns the interpolation alpha to pass to [`interpolate`](Self::interpolate).
    pub fn step(&mut self, world: &mut hecs::World, frame_time: f64) -> f32 {
        self.step_with(world, frame_time, |_, _| {}).alpha
    }

    /// Like [`step`](Self::step), calling `before_update` ahead of every
    /// fixed step so gameplay code can apply forces at the simulation rate.
    pub fn step_with<F>(&mut self, world: &mut hecs::World, frame_time: f64, mut before_update: F) -> Ticks
    where
        F: FnMut(&mut hecs::World, f32),
    {
        let ticks = self.clock.advance(frame_time);
        let dt = self.fixed_timestep();
        for _ in 0..ticks.steps {
            before_update(world, dt);
            self.update(world, dt);
        }
        ticks
    }

    /// Length of one fixed step in seconds.
    #[inline]
    pub fn fixed_timestep(&self) -> f32 {
        self.clock.step() as f32
    }

    /// Run one simulation step of `dt` seconds.
    pub fn update(&mut self, world: &mut hecs::World, dt: f32) {
        self.springs.clear();
        self.springs.extend(
            world
                .query_mut::<&SpringConstraint>()
                .into_iter()
                .map(|(_, spring)| spring.clone()),
        );

        let body_count = {
            let mut bodies = BodySet::new(world);

            detect_collisions_broad(&bodies, &mut self.pairs);
            detect_collisions_narrow(&bodies, &self.pairs, &mut self.manifolds);
            constraint::solve_constraints(&mut bodies, &self.springs, dt);
            solver::resolve_collisions(&mut bodies, &self.manifolds);
            rigid_body::integrate(&mut bodies, self.config.gravity, dt);
            solver::correct_positions(
                &mut bodies,
                &self.manifolds,
                self.config.penetration_slop,
                self.config.correction_factor,
            );
            bodies.len()
        };

        rigid_body::sync_transforms(world);

        tracing::debug!(
            bodies = body_count,
            pairs = self.pairs.len(),
            manifolds = self.manifolds.len(),
            springs = self.springs.len(),
            "physics step"
        );
    }

    /// Blend previous and current body poses into each entity's
    /// [`GlobalTransform`](crate::ecs::components::transform::GlobalTransform).
    pub fn interpolate(&self, world: &mut hecs::World, alpha: f32) {
        rigid_body::interpolate_transforms(world, alpha);
    }

    /// Nearest mesh hit along `ray`. See [`trace::trace`].
    pub fn trace(
        &self,
        world: &hecs::World,
        ray: &Ray,
        ignore: Option<hecs::Entity>,
        layer_mask: u32,
    ) -> Option<TraceHit> {
        trace::trace(world, ray, ignore, layer_mask)
    }
}
