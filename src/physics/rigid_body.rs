//! World-level rigid body passes: integration, transform sync and
//! render interpolation. Also helpers for common inertia tensors.

use glam::{Mat3, Vec3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::{GlobalTransform, Transform};

use super::body_set::BodySet;

fn integrate_body(body: &mut RigidBody, gravity: Vec3, dt: f32) {
    if body.collider().is_none() {
        return;
    }
    if gravity != Vec3::ZERO {
        body.apply_central_force(gravity * body.mass());
    }
    body.integrate(dt);
}

/// Integrate every body that carries a collider.
///
/// `gravity` is applied as a central force scaled by each body's mass.
/// Each body is touched by exactly one task, so with the `parallel`
/// feature the pass runs on the rayon pool with identical results.
pub fn integrate(bodies: &mut BodySet<'_>, gravity: Vec3, dt: f32) {
    #[cfg(feature = "parallel")]
    bodies
        .as_mut_slice()
        .par_iter_mut()
        .for_each(|(_, body)| integrate_body(body, gravity, dt));

    #[cfg(not(feature = "parallel"))]
    bodies
        .as_mut_slice()
        .iter_mut()
        .for_each(|(_, body)| integrate_body(body, gravity, dt));
}

/// Copy each body's current transform into the entity's [`Transform`].
pub fn sync_transforms(world: &mut hecs::World) {
    for (_, (body, transform)) in world.query_mut::<(&RigidBody, &mut Transform)>() {
        *transform = *body.transform();
    }
}

/// Write each body's interpolated pose into the entity's [`GlobalTransform`].
pub fn interpolate_transforms(world: &mut hecs::World, alpha: f32) {
    let mut targets: Vec<(&RigidBody, &mut GlobalTransform)> = world
        .query_mut::<(&RigidBody, &mut GlobalTransform)>()
        .into_iter()
        .map(|(_, item)| item)
        .collect();

    #[cfg(feature = "parallel")]
    targets
        .par_iter_mut()
        .for_each(|(body, global)| global.0 = body.interpolate(alpha).to_matrix());

    #[cfg(not(feature = "parallel"))]
    targets
        .iter_mut()
        .for_each(|(body, global)| global.0 = body.interpolate(alpha).to_matrix());
}

/// Inertia tensor of a solid sphere.
pub fn solid_sphere_inertia(mass: f32, radius: f32) -> Mat3 {
    Mat3::from_diagonal(Vec3::splat(0.4 * mass * radius * radius))
}

/// Inertia tensor of a solid box with full edge lengths `size`.
pub fn solid_box_inertia(mass: f32, size: Vec3) -> Mat3 {
    let sq = size * size;
    Mat3::from_diagonal(Vec3::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y) * (mass / 12.0))
}

/// Inertia tensor of a solid capsule aligned with the Y axis.
///
/// `length` is the length of the cylindrical section, excluding the caps.
pub fn solid_capsule_inertia(mass: f32, radius: f32, length: f32) -> Mat3 {
    let r2 = radius * radius;
    let cylinder_volume = std::f32::consts::PI * r2 * length;
    let sphere_volume = 4.0 / 3.0 * std::f32::consts::PI * r2 * radius;
    let total_volume = cylinder_volume + sphere_volume;
    if total_volume <= 0.0 {
        return Mat3::ZERO;
    }

    let cylinder_mass = mass * cylinder_volume / total_volume;
    let caps_mass = mass * sphere_volume / total_volume;

    let axial = cylinder_mass * r2 * 0.5 + caps_mass * r2 * 0.4;
    let lateral = cylinder_mass * (length * length / 12.0 + r2 * 0.25)
        + caps_mass * (r2 * 0.4 + length * length * 0.25 + 0.375 * length * radius);
    Mat3::from_diagonal(Vec3::new(lateral, axial, lateral))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::Collider;
    use glam::Mat4;

    #[test]
    fn test_free_fall() {
        let mut world = hecs::World::new();
        let entity = world.spawn((
            Transform::from_position(Vec3::new(0.0, 10.0, 0.0)),
            RigidBody::new_dynamic(1.0)
                .with_transform(Transform::from_position(Vec3::new(0.0, 10.0, 0.0)))
                .with_collider(Collider::sphere(Vec3::ZERO, 0.5)),
        ));

        let gravity = Vec3::new(0.0, -9.81, 0.0);
        let dt = 1.0 / 60.0;

        // Simulate 1 second (60 steps)
        for _ in 0..60 {
            let mut bodies = BodySet::new(&mut world);
            integrate(&mut bodies, gravity, dt);
            drop(bodies);
            sync_transforms(&mut world);
        }

        let transform = world.get::<&Transform>(entity).unwrap();
        // Semi-implicit Euler lands slightly below the analytic 5.095
        assert!(
            (transform.position.y - 5.0).abs() < 0.2,
            "Body should have fallen about 5m: y = {}",
            transform.position.y
        );

        let eps = 1e-5;
        assert!(transform.position.x.abs() < eps);
        assert!(transform.position.z.abs() < eps);
    }

    #[test]
    fn test_static_and_colliderless_bodies_unaffected() {
        let mut world = hecs::World::new();
        let ground = world.spawn((RigidBody::new_static().with_collider(Collider::plane(Vec3::Y, 0.0)),));
        let mut loose = RigidBody::new_dynamic(1.0);
        loose.set_linear_velocity(Vec3::X);
        let loose = world.spawn((loose,));

        let mut bodies = BodySet::new(&mut world);
        for _ in 0..60 {
            integrate(&mut bodies, Vec3::new(0.0, -9.81, 0.0), 1.0 / 60.0);
        }
        assert_eq!(bodies.get(ground).unwrap().position(), Vec3::ZERO);
        assert_eq!(bodies.get(loose).unwrap().position(), Vec3::ZERO);
    }

    #[test]
    fn test_interpolate_transforms_writes_global() {
        let mut world = hecs::World::new();
        let mut body = RigidBody::new_dynamic(1.0).with_collider(Collider::sphere(Vec3::ZERO, 0.5));
        body.set_linear_velocity(Vec3::new(0.0, 0.0, 6.0));
        let entity = world.spawn((body, GlobalTransform::default()));

        let mut bodies = BodySet::new(&mut world);
        integrate(&mut bodies, Vec3::ZERO, 0.5);
        drop(bodies);

        interpolate_transforms(&mut world, 0.25);
        let global = world.get::<&GlobalTransform>(entity).unwrap();
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, 0.75));
        assert!(global.0.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_inertia_helpers() {
        let sphere = solid_sphere_inertia(5.0, 2.0);
        assert!((sphere.x_axis.x - 8.0).abs() < 1e-5);

        let cube = solid_box_inertia(12.0, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cube, Mat3::from_diagonal(Vec3::new(13.0, 10.0, 5.0)));

        // A capsule with no cylinder is a sphere
        let ball = solid_capsule_inertia(5.0, 2.0, 0.0);
        assert!((ball.x_axis.x - sphere.x_axis.x).abs() < 1e-4);
        assert!((ball.y_axis.y - sphere.y_axis.y).abs() < 1e-4);

        // Long capsules are harder to tumble than to spin
        let rod = solid_capsule_inertia(1.0, 0.1, 2.0);
        assert!(rod.x_axis.x > rod.y_axis.y);
        assert_eq!(rod.x_axis.x, rod.z_axis.z);
    }
}
