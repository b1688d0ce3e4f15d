//! Narrowphase collision detection.
//!
//! Each pair of primitive collider kinds has a dedicated test, looked up in
//! a fixed table indexed by the kinds of the two colliders. Mirrored cells
//! call the canonical test with the bodies swapped, so a manifold's `body_a`
//! is always the body whose collider kind comes first (plane before sphere
//! before box before capsule).
//!
//! Mesh colliders never generate contacts; they only answer ray traces.

use glam::Vec3;

use crate::ecs::components::physics::{ColliderShape, ColliderType, RigidBody};

use super::body_set::BodySet;
use super::broadphase::BodyPair;
use super::collider::{world_box_corners, world_plane, world_point, world_segment};
use super::contact::{CollisionContact, CollisionManifold, MAX_CONTACTS};

/// A body handle together with the body itself.
pub type BodyRef<'a> = (hecs::Entity, &'a RigidBody);

/// Signature of a single narrowphase test.
pub type NarrowPhaseTest = for<'a, 'b> fn(BodyRef<'a>, BodyRef<'b>) -> Option<CollisionManifold>;

const PRIMITIVE_KINDS: usize = 4;

/// Dispatch table indexed `[kind(a)][kind(b)]` over plane, sphere, box and capsule.
static NARROW_PHASE_TABLE: [[NarrowPhaseTest; PRIMITIVE_KINDS]; PRIMITIVE_KINDS] = [
    [plane_plane, plane_sphere, plane_box, plane_capsule],
    [sphere_plane, sphere_sphere, sphere_box, sphere_capsule],
    [box_plane, box_sphere, box_box, box_capsule],
    [capsule_plane, capsule_sphere, capsule_box, capsule_capsule],
];

/// Run the test for the collider kinds of `a` and `b`.
///
/// Returns `None` if either body lacks a collider, either collider is a
/// mesh, or the shapes do not touch.
pub fn detect_collision(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let kind_a = a.1.collider()?.collider_type();
    let kind_b = b.1.collider()?.collider_type();
    if kind_a == ColliderType::Mesh || kind_b == ColliderType::Mesh {
        return None;
    }
    NARROW_PHASE_TABLE[kind_a.index()][kind_b.index()](a, b)
}

/// Run the narrowphase over every broadphase pair, replacing the contents
/// of `manifolds` with the pairs that touch, in pair order.
pub fn detect_collisions_narrow(
    bodies: &BodySet<'_>,
    pairs: &[BodyPair],
    manifolds: &mut Vec<CollisionManifold>,
) {
    manifolds.clear();
    for &(entity_a, entity_b) in pairs {
        let (Some(body_a), Some(body_b)) = (bodies.get(entity_a), bodies.get(entity_b)) else {
            continue;
        };
        if let Some(manifold) = detect_collision((entity_a, body_a), (entity_b, body_b)) {
            manifolds.push(manifold);
        }
    }
}

// -- Shape extraction ------------------------------------------------------

fn plane_of(body: &RigidBody) -> Option<(Vec3, f32)> {
    match body.collider()?.shape {
        ColliderShape::Plane { normal, constant } => Some((normal, constant)),
        _ => None,
    }
}

fn sphere_of(body: &RigidBody) -> Option<(Vec3, f32)> {
    match body.collider()?.shape {
        ColliderShape::Sphere { center, radius } => Some((center, radius)),
        _ => None,
    }
}

fn box_of(body: &RigidBody) -> Option<(Vec3, Vec3)> {
    match body.collider()?.shape {
        ColliderShape::Box { min, max } => Some((min, max)),
        _ => None,
    }
}

fn capsule_of(body: &RigidBody) -> Option<(crate::geom::Segment, f32)> {
    match body.collider()?.shape {
        ColliderShape::Capsule { segment, radius } => Some((segment, radius)),
        _ => None,
    }
}

/// Single contact between two spheres, or `None` if they are apart, just
/// touching, or their centers coincide.
fn sphere_contact(
    center_a: Vec3,
    radius_a: f32,
    center_b: Vec3,
    radius_b: f32,
) -> Option<CollisionContact> {
    let sum_radii = radius_a + radius_b;
    let difference = center_b - center_a;
    let sqr_distance = difference.length_squared();
    if sqr_distance >= sum_radii * sum_radii {
        return None;
    }
    if sqr_distance == 0.0 {
        tracing::trace!("skipping coincident sphere centers");
        return None;
    }

    let distance = sqr_distance.sqrt();
    let normal = difference / distance;
    let depth = sum_radii - distance;
    Some(CollisionContact {
        point: center_a + normal * (radius_a - depth * 0.5),
        normal,
        depth,
    })
}

fn single_contact(a: BodyRef<'_>, b: BodyRef<'_>, contact: CollisionContact) -> CollisionManifold {
    let mut manifold = CollisionManifold::new(a.0, b.0);
    manifold.push(contact);
    manifold
}

// -- Plane -----------------------------------------------------------------

fn plane_plane(_a: BodyRef<'_>, _b: BodyRef<'_>) -> Option<CollisionManifold> {
    None
}

fn plane_sphere(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let (normal, constant) = plane_of(a.1)?;
    let (center, radius) = sphere_of(b.1)?;

    let plane = world_plane(a.1.transform(), normal, constant);
    let center = world_point(b.1.transform(), center);

    let distance = plane.distance(center);
    if distance > radius {
        return None;
    }

    Some(single_contact(
        a,
        b,
        CollisionContact {
            point: center - plane.normal * radius,
            normal: plane.normal,
            depth: (distance - radius).abs(),
        },
    ))
}

fn plane_box(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let (normal, constant) = plane_of(a.1)?;
    let (min, max) = box_of(b.1)?;

    let plane = world_plane(a.1.transform(), normal, constant);

    let mut manifold = CollisionManifold::new(a.0, b.0);
    for point in world_box_corners(b.1.transform(), min, max) {
        let distance = plane.distance(point);
        if distance <= 0.0 {
            manifold.push(CollisionContact {
                point,
                normal: plane.normal,
                depth: distance.abs(),
            });
            if manifold.contact_count() >= MAX_CONTACTS {
                break;
            }
        }
    }
    manifold.non_empty()
}

fn plane_capsule(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let (normal, constant) = plane_of(a.1)?;
    let (segment, radius) = capsule_of(b.1)?;

    let plane = world_plane(a.1.transform(), normal, constant);
    let segment = world_segment(b.1.transform(), &segment);

    let mut manifold = CollisionManifold::new(a.0, b.0);
    for endpoint in [segment.a, segment.b] {
        let distance = plane.distance(endpoint);
        if distance <= radius {
            manifold.push(CollisionContact {
                point: endpoint - plane.normal * radius,
                normal: plane.normal,
                depth: (distance - radius).abs(),
            });
        }
    }
    manifold.non_empty()
}

// -- Sphere ----------------------------------------------------------------

fn sphere_plane(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    plane_sphere(b, a)
}

fn sphere_sphere(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let (center_a, radius_a) = sphere_of(a.1)?;
    let (center_b, radius_b) = sphere_of(b.1)?;

    let center_a = world_point(a.1.transform(), center_a);
    let center_b = world_point(b.1.transform(), center_b);

    let contact = sphere_contact(center_a, radius_a, center_b, radius_b)?;
    Some(single_contact(a, b, contact))
}

fn sphere_box(_a: BodyRef<'_>, _b: BodyRef<'_>) -> Option<CollisionManifold> {
    None
}

fn sphere_capsule(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let (center_a, radius_a) = sphere_of(a.1)?;
    let (segment_b, radius_b) = capsule_of(b.1)?;

    let center_a = world_point(a.1.transform(), center_a);
    let segment_b = world_segment(b.1.transform(), &segment_b);

    let closest = segment_b.closest_point(center_a);
    let contact = sphere_contact(center_a, radius_a, closest, radius_b)?;
    Some(single_contact(a, b, contact))
}

// -- Box -------------------------------------------------------------------

fn box_plane(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    plane_box(b, a)
}

// Boxes only collide with planes.
fn box_sphere(_a: BodyRef<'_>, _b: BodyRef<'_>) -> Option<CollisionManifold> {
    None
}

fn box_box(_a: BodyRef<'_>, _b: BodyRef<'_>) -> Option<CollisionManifold> {
    None
}

fn box_capsule(_a: BodyRef<'_>, _b: BodyRef<'_>) -> Option<CollisionManifold> {
    None
}

// -- Capsule ---------------------------------------------------------------

fn capsule_plane(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    plane_capsule(b, a)
}

fn capsule_sphere(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    sphere_capsule(b, a)
}

fn capsule_box(_a: BodyRef<'_>, _b: BodyRef<'_>) -> Option<CollisionManifold> {
    None
}

fn capsule_capsule(a: BodyRef<'_>, b: BodyRef<'_>) -> Option<CollisionManifold> {
    let (segment_a, radius_a) = capsule_of(a.1)?;
    let (segment_b, radius_b) = capsule_of(b.1)?;

    let segment_a = world_segment(a.1.transform(), &segment_a);
    let segment_b = world_segment(b.1.transform(), &segment_b);

    let (closest_a, closest_b) = segment_a.closest_points(&segment_b);
    let contact = sphere_contact(closest_a, radius_a, closest_b, radius_b)?;
    Some(single_contact(a, b, contact))
}
