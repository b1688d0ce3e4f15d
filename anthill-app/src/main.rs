use std::sync::Arc;

use anthill::engine::{run_app, App, GameLoopConfig, SystemContext};
use anthill::physics::material::{CombineMode, PhysicsMaterial};
use anthill::physics::rigid_body::{solid_capsule_inertia, solid_sphere_inertia};
use anthill::physics::trace::trace;
use anthill::{
    Collider, GlobalTransform, PhysicsConfig, Ray, RigidBody, SpringConstraint, Transform,
    TriangleMesh,
};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

const LAYER_GROUND: u32 = 1 << 0;
const LAYER_EGGS: u32 = 1 << 1;
const LAYER_WORKERS: u32 = 1 << 2;
const LAYER_TERRAIN: u32 = 1 << 3;

const TERRAIN_ORIGIN: Vec3 = Vec3::new(12.0, 0.0, 0.0);

/// Heightfield patch of `cells` x `cells` quads, `spacing` apart.
fn terrain_mesh(cells: u32, spacing: f32) -> anthill::Result<TriangleMesh> {
    let side = cells + 1;
    let half = cells as f32 * spacing * 0.5;
    let mut vertices = Vec::with_capacity((side * side) as usize);
    for row in 0..side {
        for col in 0..side {
            let x = col as f32 * spacing - half;
            let z = row as f32 * spacing - half;
            let y = 0.3 * (x * 0.8).sin() * (z * 0.6).cos();
            vertices.push(Vec3::new(x, y, z));
        }
    }

    let mut triangles = Vec::with_capacity((cells * cells * 2) as usize);
    for row in 0..cells {
        for col in 0..cells {
            let i = row * side + col;
            triangles.push([i, i + side, i + 1]);
            triangles.push([i + 1, i + side, i + side + 1]);
        }
    }
    TriangleMesh::new(vertices, triangles)
}

struct ColonyApp {
    terrain: Arc<TriangleMesh>,
    eggs: Vec<hecs::Entity>,
    worker: Option<hecs::Entity>,
    queen: Option<hecs::Entity>,
}

impl ColonyApp {
    fn new(terrain: Arc<TriangleMesh>) -> Self {
        Self {
            terrain,
            eggs: Vec::new(),
            worker: None,
            queen: None,
        }
    }
}

impl App for ColonyApp {
    fn init(&mut self, world: &mut hecs::World) {
        let soil = Arc::new(
            PhysicsMaterial::new(0.2, 0.8, 0.6).with_friction_combine_mode(CombineMode::Max),
        );
        let shell = Arc::new(
            PhysicsMaterial::new(0.6, 0.3, 0.2).with_restitution_combine_mode(CombineMode::Multiply),
        );

        // Ground
        world.spawn((RigidBody::new_static().with_collider(
            Collider::plane(Vec3::Y, 0.0)
                .with_layer_mask(LAYER_GROUND | LAYER_EGGS | LAYER_WORKERS)
                .with_material(soil.clone()),
        ),));

        // Terrain patch, only reachable by traces
        world.spawn((RigidBody::new_static()
            .with_transform(Transform::from_position(TERRAIN_ORIGIN))
            .with_collider(
                Collider::mesh(self.terrain.clone())
                    .with_layer_mask(LAYER_TERRAIN)
                    .with_material(soil),
            ),));

        // Eggs
        for i in 0..5 {
            let radius = 0.15;
            let position = Vec3::new(i as f32 * 0.5 - 1.0, 1.0 + i as f32 * 0.4, 0.0);
            let body = RigidBody::new_dynamic(0.05)
                .with_transform(Transform::from_position(position))
                .with_inertia(solid_sphere_inertia(0.05, radius))
                .with_damping(0.05, 0.1)
                .with_collider(
                    Collider::sphere(Vec3::ZERO, radius)
                        .with_layer_mask(LAYER_GROUND | LAYER_EGGS)
                        .with_material(shell.clone()),
                );
            self.eggs.push(world.spawn((
                Transform::from_position(position),
                GlobalTransform::default(),
                body,
            )));
        }

        // Worker tethered to an anchor above the nest
        let anchor = world.spawn((RigidBody::new_static()
            .with_transform(Transform::from_position(Vec3::new(0.0, 3.0, 2.0)))
            .with_collider(Collider::sphere(Vec3::ZERO, 0.05).with_layer_mask(LAYER_WORKERS)),));
        let worker_position = Vec3::new(0.5, 2.0, 2.0);
        let worker = world.spawn((
            Transform::from_position(worker_position),
            GlobalTransform::default(),
            RigidBody::new_dynamic(0.2)
                .with_transform(Transform::from_position(worker_position))
                .with_inertia(solid_capsule_inertia(0.2, 0.08, 0.3))
                .with_damping(0.1, 0.5)
                .with_collider(
                    Collider::capsule(Vec3::new(0.0, -0.15, 0.0), Vec3::new(0.0, 0.15, 0.0), 0.08)
                        .with_layer_mask(LAYER_GROUND | LAYER_WORKERS),
                ),
        ));
        world.spawn((SpringConstraint::new(anchor, worker, 0.8)
            .with_points(Vec3::ZERO, Vec3::new(0.0, 0.15, 0.0))
            .with_stiffness(20.0)
            .with_damping(0.5),));
        self.worker = Some(worker);

        // Queen, kinematic for the purpose of this demo
        self.queen = Some(world.spawn((
            Transform::from_position(TERRAIN_ORIGIN + Vec3::new(0.4, 2.0, -0.3)),
            RigidBody::new_static()
                .with_transform(Transform::from_position(TERRAIN_ORIGIN + Vec3::new(0.4, 2.0, -0.3))),
        )));
    }

    fn fixed_update(&mut self, world: &mut hecs::World, _dt: f32) {
        // Worker pushes sideways against its tether
        if let Some(worker) = self.worker {
            if let Ok(mut body) = world.get::<&mut RigidBody>(worker) {
                body.apply_force(Vec3::new(0.0, 0.0, 0.3), Vec3::new(0.0, 0.15, 0.0));
            }
        }
    }

    fn update(&mut self, world: &mut hecs::World, ctx: &SystemContext) {
        if ctx.frame % 60 != 0 {
            return;
        }
        for (index, egg) in self.eggs.iter().enumerate() {
            if let Ok(transform) = world.get::<&Transform>(*egg) {
                tracing::debug!(index, height = transform.position.y, "egg");
            }
        }
        let Some(worker) = self.worker else {
            return;
        };
        if let Ok(transform) = world.get::<&Transform>(worker) {
            tracing::info!(
                time = ctx.elapsed_time,
                contacts = ctx.physics.manifolds().len(),
                worker = ?transform.position,
                "colony tick"
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let terrain = Arc::new(terrain_mesh(16, 0.5)?);
    let config = GameLoopConfig {
        physics: PhysicsConfig {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ..PhysicsConfig::default()
        },
        frame_time: 1.0 / 90.0,
        frame_count: 900,
    };

    let mut app = ColonyApp::new(terrain);
    let world = run_app(config, &mut app)?;

    let resting = app
        .eggs
        .iter()
        .filter_map(|egg| world.get::<&RigidBody>(*egg).ok())
        .filter(|body| body.position().y < 0.2 && body.linear_velocity().length() < 0.05)
        .count();
    tracing::info!(resting, total = app.eggs.len(), "eggs settled");

    // Where would the queen lay?
    let queen = app.queen.ok_or_else(|| anyhow::anyhow!("queen was not spawned"))?;
    let origin = world.get::<&RigidBody>(queen)?.position();
    let ray = Ray::new(origin, Vec3::NEG_Y);
    match trace(&world, &ray, Some(queen), LAYER_TERRAIN) {
        Some(hit) => tracing::info!(
            point = ?hit.point(&ray),
            face = hit.face_index,
            normal = ?hit.normal,
            "oviposition site"
        ),
        None => tracing::warn!("no terrain below the queen"),
    }

    Ok(())
}
