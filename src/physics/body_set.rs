//! Per-step view of every rigid body in the world.
//!
//! The solver needs two bodies mutably at once, which hecs cannot hand out
//! for the same component column. The set borrows all bodies once, in query
//! order, and splits the slice on demand.

use std::collections::HashMap;

use crate::ecs::components::physics::RigidBody;

pub struct BodySet<'w> {
    bodies: Vec<(hecs::Entity, &'w mut RigidBody)>,
    index: HashMap<hecs::Entity, usize>,
}

impl<'w> BodySet<'w> {
    pub fn new(world: &'w mut hecs::World) -> Self {
        let bodies: Vec<_> = world.query_mut::<&mut RigidBody>().into_iter().collect();
        let index = bodies
            .iter()
            .enumerate()
            .map(|(i, (entity, _))| (*entity, i))
            .collect();
        Self { bodies, index }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, entity: hecs::Entity) -> Option<&RigidBody> {
        let i = *self.index.get(&entity)?;
        Some(&*self.bodies[i].1)
    }

    pub fn get_mut(&mut self, entity: hecs::Entity) -> Option<&mut RigidBody> {
        let i = *self.index.get(&entity)?;
        Some(&mut *self.bodies[i].1)
    }

    /// Both bodies mutably. `None` if either is missing or `a == b`.
    pub fn pair_mut(
        &mut self,
        a: hecs::Entity,
        b: hecs::Entity,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (head, tail) = self.bodies.split_at_mut(ib);
            Some((&mut *head[ia].1, &mut *tail[0].1))
        } else {
            let (head, tail) = self.bodies.split_at_mut(ia);
            Some((&mut *tail[0].1, &mut *head[ib].1))
        }
    }

    /// Bodies in query order.
    pub fn iter(&self) -> impl Iterator<Item = (hecs::Entity, &RigidBody)> + '_ {
        self.bodies.iter().map(|(entity, body)| (*entity, &**body))
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [(hecs::Entity, &'w mut RigidBody)] {
        &mut self.bodies
    }
}
