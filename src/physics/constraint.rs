//! Spring constraints between pairs of bodies.

use crate::ecs::components::physics::{RigidBody, SpringConstraint};

use super::body_set::BodySet;

/// Accumulate the force of one spring on its two bodies.
///
/// The force acts along the line between the world-space attachment points
/// with magnitude `stiffness * stretch + damping * closing speed`. Body A is
/// pulled towards B and B towards A; forces apply at the attachment points,
/// so off-center springs also produce torque.
pub fn solve_spring(spring: &SpringConstraint, body_a: &mut RigidBody, body_b: &mut RigidBody) {
    let point_a = body_a.transform().transform_point(spring.point_a);
    let point_b = body_b.transform().transform_point(spring.point_b);
    let radius_a = point_a - body_a.position();
    let radius_b = point_b - body_b.position();

    let difference = point_b - point_a;
    let length = difference.length();
    if length <= f32::EPSILON {
        return;
    }
    let direction = difference / length;

    let relative_velocity = body_b.point_velocity(radius_b) - body_a.point_velocity(radius_a);
    let magnitude = spring.stiffness * (length - spring.resting_length)
        + spring.damping * relative_velocity.dot(direction);
    let force = direction * magnitude;

    body_a.apply_force(force, radius_a);
    body_b.apply_force(-force, radius_b);
}

/// Apply every fully attached spring. `dt` is unused: springs contribute
/// forces, which are integrated with the rest of the step.
pub fn solve_constraints(bodies: &mut BodySet<'_>, springs: &[SpringConstraint], _dt: f32) {
    for spring in springs {
        let Some((entity_a, entity_b)) = spring.bodies() else {
            continue;
        };
        let Some((body_a, body_b)) = bodies.pair_mut(entity_a, entity_b) else {
            continue;
        };
        solve_spring(spring, body_a, body_b);
    }
}
