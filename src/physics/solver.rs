//! Sequential impulse contact resolution and positional correction.

use glam::{Mat3, Vec3};

use super::body_set::BodySet;
use super::contact::CollisionManifold;
use super::material::CombinedMaterial;

/// Effective inverse mass of a pair along `direction` at the given lever arms.
#[inline]
fn effective_inverse_mass(
    sum_inverse_mass: f32,
    inverse_inertia_a: &Mat3,
    radius_a: Vec3,
    inverse_inertia_b: &Mat3,
    radius_b: Vec3,
    direction: Vec3,
) -> f32 {
    let angular_a = (*inverse_inertia_a * radius_a.cross(direction)).cross(radius_a);
    let angular_b = (*inverse_inertia_b * radius_b.cross(direction)).cross(radius_b);
    sum_inverse_mass + (angular_a + angular_b).dot(direction)
}

/// Coulomb friction: keep the impulse that would stop sliding while it stays
/// inside the static cone, otherwise fall back to kinetic friction.
#[inline]
pub fn friction_impulse(
    required: f32,
    normal_impulse: f32,
    static_friction: f32,
    dynamic_friction: f32,
) -> f32 {
    if required.abs() >= normal_impulse * static_friction {
        -normal_impulse * dynamic_friction
    } else {
        required
    }
}

/// Apply restitution and friction impulses for every manifold, in order.
///
/// The impulse of each contact is divided by the manifold's contact count.
/// Contacts that are already separating are skipped.
pub fn resolve_collisions(bodies: &mut BodySet<'_>, manifolds: &[CollisionManifold]) {
    for manifold in manifolds {
        let combined = {
            let (Some(body_a), Some(body_b)) = (bodies.get(manifold.body_a), bodies.get(manifold.body_b))
            else {
                continue;
            };
            let (Some(collider_a), Some(collider_b)) = (body_a.collider(), body_b.collider()) else {
                continue;
            };
            CombinedMaterial::new(&collider_a.material, &collider_b.material)
        };

        let Some((body_a, body_b)) = bodies.pair_mut(manifold.body_a, manifold.body_b) else {
            continue;
        };

        let sum_inverse_mass = body_a.inverse_mass() + body_b.inverse_mass();
        let impulse_scale = 1.0 / manifold.contact_count() as f32;

        for contact in manifold.contacts() {
            let radius_a = contact.point - body_a.position();
            let radius_b = contact.point - body_b.position();

            let relative_velocity =
                body_b.point_velocity(radius_b) - body_a.point_velocity(radius_a);
            let contact_velocity = relative_velocity.dot(contact.normal);
            if contact_velocity > 0.0 {
                continue;
            }

            let normal_denominator = effective_inverse_mass(
                sum_inverse_mass,
                body_a.inverse_inertia(),
                radius_a,
                body_b.inverse_inertia(),
                radius_b,
                contact.normal,
            );
            if normal_denominator <= 0.0 {
                tracing::trace!("skipping contact with zero effective mass");
                continue;
            }

            let normal_impulse = -(1.0 + combined.restitution) * contact_velocity
                / normal_denominator
                * impulse_scale;
            let reaction = contact.normal * normal_impulse;
            body_a.apply_impulse(-reaction, radius_a);
            body_b.apply_impulse(reaction, radius_b);

            // Friction opposes the tangential part of the pre-impulse velocity
            let tangent = (relative_velocity - contact.normal * contact_velocity).normalize_or_zero();
            let tangent_denominator = effective_inverse_mass(
                sum_inverse_mass,
                body_a.inverse_inertia(),
                radius_a,
                body_b.inverse_inertia(),
                radius_b,
                tangent,
            );
            if tangent_denominator <= 0.0 {
                continue;
            }

            let required = relative_velocity.dot(-tangent) / tangent_denominator * impulse_scale;
            let magnitude = friction_impulse(
                required,
                normal_impulse,
                combined.static_friction,
                combined.dynamic_friction,
            );
            let friction = tangent * magnitude;
            body_a.apply_impulse(-friction, radius_a);
            body_b.apply_impulse(friction, radius_b);
        }
    }
}

/// Push penetrating bodies apart along the contact normals.
///
/// Only the depth beyond `slop` is corrected, scaled by `factor` and split
/// between the bodies by inverse mass.
pub fn correct_positions(
    bodies: &mut BodySet<'_>,
    manifolds: &[CollisionManifold],
    slop: f32,
    factor: f32,
) {
    for manifold in manifolds {
        let Some((body_a, body_b)) = bodies.pair_mut(manifold.body_a, manifold.body_b) else {
            continue;
        };

        let sum_inverse_mass = body_a.inverse_mass() + body_b.inverse_mass();
        if sum_inverse_mass == 0.0 {
            continue;
        }

        for contact in manifold.contacts() {
            let correction =
                contact.normal * ((contact.depth - slop).max(0.0) / sum_inverse_mass) * factor;
            body_a.set_position(body_a.position() - correction * body_a.inverse_mass());
            body_b.set_position(body_b.position() + correction * body_b.inverse_mass());
        }
    }
}
