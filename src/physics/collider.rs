//! World-space views of collider shapes for collision detection.
//!
//! Shapes are stored in body space. Points go through the body's full
//! transform; radii are used as authored and do not scale with the body.

use glam::Vec3;

use crate::ecs::components::transform::Transform;
use crate::geom::{Plane, Segment};

/// Plane in world space. Only the body's rotation and translation apply.
#[inline]
pub fn world_plane(transform: &Transform, normal: Vec3, constant: f32) -> Plane {
    let normal = transform.rotation * normal;
    Plane::new(normal, constant - normal.dot(transform.position))
}

/// Sphere center in world space.
#[inline]
pub fn world_point(transform: &Transform, point: Vec3) -> Vec3 {
    transform.transform_point(point)
}

/// Capsule axis in world space.
#[inline]
pub fn world_segment(transform: &Transform, segment: &Segment) -> Segment {
    Segment::new(
        transform.transform_point(segment.a),
        transform.transform_point(segment.b),
    )
}

/// The 8 box corners in world space, z varying fastest and x slowest.
pub fn world_box_corners(transform: &Transform, min: Vec3, max: Vec3) -> [Vec3; 8] {
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let local = Vec3::new(
            if i & 4 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 1 == 0 { min.z } else { max.z },
        );
        *corner = transform.transform_point(local);
    }
    corners
}
