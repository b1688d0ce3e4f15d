//! Ray queries against mesh colliders.

use glam::Vec3;

use crate::ecs::components::physics::{ColliderShape, RigidBody};
use crate::geom::Ray;

use super::broadphase::matches_layers;

/// Nearest hit reported by [`trace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: hecs::Entity,
    /// Distance from the ray origin to the hit point, in world units.
    pub distance: f32,
    /// Index of the triangle that was hit.
    pub face_index: u32,
    /// Unit surface normal at the hit, in world space.
    pub normal: Vec3,
}

impl TraceHit {
    /// World-space hit point on `ray`.
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.origin + ray.direction.normalize_or_zero() * self.distance
    }
}

/// Cast `ray` against every mesh collider and return the nearest hit.
///
/// Bodies are skipped when they are `ignore`, have no collider, or share no
/// bit with `layer_mask`. The ray is taken into each body's local space, so
/// rotated, translated and scaled meshes are all handled.
pub fn trace(
    world: &hecs::World,
    ray: &Ray,
    ignore: Option<hecs::Entity>,
    layer_mask: u32,
) -> Option<TraceHit> {
    let direction_length = ray.direction.length();
    if direction_length == 0.0 {
        return None;
    }

    let mut query = world.query::<&RigidBody>();
    let mut nearest: Option<TraceHit> = None;

    for (entity, body) in query.iter() {
        if Some(entity) == ignore {
            continue;
        }
        let Some(collider) = body.collider() else {
            continue;
        };
        if !matches_layers(collider, layer_mask) {
            continue;
        }
        let ColliderShape::Mesh(mesh) = &collider.shape else {
            continue;
        };

        let transform = body.transform();
        let local_ray = Ray::new(
            transform.inverse_transform_point(ray.origin),
            transform.inverse_transform_vector(ray.direction),
        );
        let Some(hit) = mesh.intersect_ray(&local_ray) else {
            continue;
        };

        // The transform is affine, so the local ray parameter is also the
        // world ray parameter.
        let distance = hit.t * direction_length;
        if nearest.map_or(true, |n| distance < n.distance) {
            nearest = Some(TraceHit {
                entity,
                distance,
                face_index: hit.face_index,
                normal: transform.transform_normal(hit.normal),
            });
        }
    }

    nearest
}
