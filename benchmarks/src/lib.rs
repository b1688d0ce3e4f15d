//! Scene builders shared by the benchmarks.

use std::sync::Arc;

use anthill::physics::contact::{CollisionContact, CollisionManifold};
use anthill::{Collider, PhysicsConfig, PhysicsWorld, RigidBody, Transform, TriangleMesh};
use glam::Vec3;

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Deterministic pseudo-random position in a cube of side `extent`.
fn scatter(i: usize, extent: f32) -> Vec3 {
    let hash = |seed: usize| ((seed.wrapping_mul(2654435761) >> 7) % 1000) as f32 / 1000.0;
    Vec3::new(hash(i * 3), hash(i * 3 + 1), hash(i * 3 + 2)) * extent
}

pub fn sphere_body(position: Vec3, radius: f32) -> RigidBody {
    RigidBody::new_dynamic(1.0)
        .with_transform(Transform::from_position(position))
        .with_collider(Collider::sphere(Vec3::ZERO, radius))
}

/// Ground plane plus `n` spheres packed into a cube proportional to `n`.
pub fn setup_sphere_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    world.spawn((RigidBody::new_static().with_collider(Collider::plane(Vec3::Y, 0.0)),));
    let extent = (n as f32).cbrt() * 1.5;
    for i in 0..n {
        world.spawn((
            Transform::identity(),
            sphere_body(scatter(i, extent) + Vec3::Y, 0.5),
        ));
    }
    world
}

/// Ground plane plus `n` bodies cycling through sphere, box and capsule.
pub fn setup_mixed_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    world.spawn((RigidBody::new_static().with_collider(Collider::plane(Vec3::Y, 0.0)),));
    let extent = (n as f32).cbrt() * 1.5;
    for i in 0..n {
        let collider = match i % 3 {
            0 => Collider::sphere(Vec3::ZERO, 0.5),
            1 => Collider::cuboid(Vec3::splat(-0.4), Vec3::splat(0.4)),
            _ => Collider::capsule(Vec3::new(0.0, -0.3, 0.0), Vec3::new(0.0, 0.3, 0.0), 0.2),
        };
        world.spawn((
            Transform::identity(),
            RigidBody::new_dynamic(1.0)
                .with_transform(Transform::from_position(scatter(i, extent) + Vec3::Y))
                .with_collider(collider),
        ));
    }
    world
}

/// `n` sphere pairs, each overlapping by 0.1, far apart from each other.
pub fn setup_contacts(n: usize) -> (hecs::World, Vec<CollisionManifold>) {
    let mut world = hecs::World::new();
    let mut manifolds = Vec::with_capacity(n);
    for i in 0..n {
        let x = i as f32 * 4.0;
        let mut a = sphere_body(Vec3::new(x, 0.0, 0.0), 0.5);
        a.set_linear_velocity(Vec3::X);
        let mut b = sphere_body(Vec3::new(x + 0.9, 0.0, 0.0), 0.5);
        b.set_linear_velocity(-Vec3::X);
        let ea = world.spawn((a,));
        let eb = world.spawn((b,));

        let mut manifold = CollisionManifold::new(ea, eb);
        manifold.push(CollisionContact {
            point: Vec3::new(x + 0.45, 0.0, 0.0),
            normal: Vec3::X,
            depth: 0.1,
        });
        manifolds.push(manifold);
    }
    (world, manifolds)
}

/// Flat heightfield with `cells` x `cells` quads of unit size, centered on the origin.
pub fn grid_mesh(cells: u32) -> Arc<TriangleMesh> {
    let side = cells + 1;
    let half = cells as f32 * 0.5;
    let vertices = (0..side * side)
        .map(|i| Vec3::new((i % side) as f32 - half, 0.0, (i / side) as f32 - half))
        .collect();
    let mut triangles = Vec::with_capacity((cells * cells * 2) as usize);
    for row in 0..cells {
        for col in 0..cells {
            let i = row * side + col;
            triangles.push([i, i + side, i + 1]);
            triangles.push([i + 1, i + side, i + side + 1]);
        }
    }
    Arc::new(TriangleMesh::new(vertices, triangles).expect("grid mesh is valid"))
}

pub fn gravity_physics() -> PhysicsWorld {
    PhysicsWorld::new(PhysicsConfig {
        gravity: GRAVITY,
        ..PhysicsConfig::default()
    })
}
