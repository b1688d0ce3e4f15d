//! Broadphase pair generation.

use crate::ecs::components::physics::{Collider, RigidBody};

use super::body_set::BodySet;

/// Candidate pair of bodies for the narrowphase.
pub type BodyPair = (hecs::Entity, hecs::Entity);

/// Whether two bodies may touch at all: both have colliders, they share a
/// collision layer and at least one of them can move.
#[inline]
pub fn can_collide(a: &RigidBody, b: &RigidBody) -> bool {
    let (Some(collider_a), Some(collider_b)) = (a.collider(), b.collider()) else {
        return false;
    };
    if !collider_a.shares_layer(collider_b) {
        return false;
    }
    !(a.is_static() && b.is_static())
}

/// Fill `pairs` with every unordered pair of distinct bodies that
/// passes [`can_collide`], in body query order.
///
/// O(n^2) brute force, sufficient for colony-sized scenes.
pub fn detect_collisions_broad(bodies: &BodySet<'_>, pairs: &mut Vec<BodyPair>) {
    pairs.clear();

    let entries: Vec<(hecs::Entity, &RigidBody)> = bodies
        .iter()
        .filter(|(_, body)| body.collider().is_some())
        .collect();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (entity_a, body_a) = entries[i];
            let (entity_b, body_b) = entries[j];
            if can_collide(body_a, body_b) {
                pairs.push((entity_a, entity_b));
            }
        }
    }

    tracing::trace!(candidates = entries.len(), pairs = pairs.len(), "broadphase");
}

/// Layer filter used by queries against a single collider.
#[inline]
pub(crate) fn matches_layers(collider: &Collider, layer_mask: u32) -> bool {
    collider.layer_mask & layer_mask != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::Collider;
    use glam::Vec3;

    fn sphere(mass: f32, layer_mask: u32) -> RigidBody {
        let body = if mass > 0.0 {
            RigidBody::new_dynamic(mass)
        } else {
            RigidBody::new_static()
        };
        body.with_collider(Collider::sphere(Vec3::ZERO, 0.5).with_layer_mask(layer_mask))
    }

    fn pairs_of(world: &mut hecs::World) -> Vec<BodyPair> {
        let bodies = BodySet::new(world);
        let mut pairs = Vec::new();
        detect_collisions_broad(&bodies, &mut pairs);
        pairs
    }

    #[test]
    fn test_all_pairs_regardless_of_distance() {
        let mut world = hecs::World::new();
        world.spawn((sphere(1.0, u32::MAX),));
        world.spawn((sphere(1.0, u32::MAX),));
        world.spawn((sphere(1.0, u32::MAX),));
        assert_eq!(pairs_of(&mut world).len(), 3);
    }

    #[test]
    fn test_static_static_skipped() {
        let mut world = hecs::World::new();
        world.spawn((sphere(0.0, u32::MAX),));
        world.spawn((sphere(0.0, u32::MAX),));
        assert!(pairs_of(&mut world).is_empty());

        let dynamic = world.spawn((sphere(1.0, u32::MAX),));
        let pairs = pairs_of(&mut world);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(a, b)| *a == dynamic || *b == dynamic));
    }

    #[test]
    fn test_layer_mismatch_skipped() {
        let mut world = hecs::World::new();
        world.spawn((sphere(1.0, 0b01),));
        world.spawn((sphere(1.0, 0b10),));
        assert!(pairs_of(&mut world).is_empty());

        world.spawn((sphere(1.0, 0b11),));
        assert_eq!(pairs_of(&mut world).len(), 2);
    }

    #[test]
    fn test_bodies_without_colliders_skipped() {
        let mut world = hecs::World::new();
        world.spawn((sphere(1.0, u32::MAX),));
        world.spawn((RigidBody::new_dynamic(1.0),));
        assert!(pairs_of(&mut world).is_empty());
    }

    #[test]
    fn test_pairs_are_distinct_and_unordered() {
        let mut world = hecs::World::new();
        for _ in 0..5 {
            world.spawn((sphere(1.0, u32::MAX),));
        }
        let pairs = pairs_of(&mut world);
        assert_eq!(pairs.len(), 10);
        for (i, (a, b)) in pairs.iter().enumerate() {
            assert_ne!(a, b);
            for (c, d) in &pairs[i + 1..] {
                assert!(!(a == c && b == d) && !(a == d && b == c));
            }
        }
    }
}
