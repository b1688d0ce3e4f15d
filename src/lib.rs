//! Anthill physics core
//!
//! Rigid body simulation for the colony, built on hecs and glam.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **error** - Construction-time validation errors
//! 2. **geom** - Rays, planes, segments and BVH-accelerated triangle meshes
//! 3. **ecs** - Transform and physics components stored in a `hecs::World`
//! 4. **physics** - Collision detection, impulse resolution and integration
//! 5. **engine** - Headless fixed timestep loop with App trait

pub mod ecs;
pub mod engine;
pub mod error;
pub mod geom;
pub mod physics;

pub use ecs::prelude::*;

pub use engine::{run_app, App, GameLoopConfig, SystemContext};

pub use error::{PhysicsError, Result};

pub use geom::{Ray, TriangleMesh};

pub use physics::{PhysicsConfig, PhysicsWorld};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
