//! Contact data structures for collision response.

use glam::Vec3;

/// Maximum number of contacts a manifold can hold.
pub const MAX_CONTACTS: usize = 4;

/// A single point of contact between two colliders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionContact {
    /// Contact position in world space.
    pub point: Vec3,
    /// Contact normal in world space, pointing from body A towards body B.
    pub normal: Vec3,
    /// Penetration depth, non-negative.
    pub depth: f32,
}

/// Up to [`MAX_CONTACTS`] contacts between two bodies.
///
/// Manifolds are rebuilt every step and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    pub body_a: hecs::Entity,
    pub body_b: hecs::Entity,
    contact_count: usize,
    contacts: [CollisionContact; MAX_CONTACTS],
}

impl CollisionManifold {
    /// Empty manifold between `body_a` and `body_b`.
    pub fn new(body_a: hecs::Entity, body_b: hecs::Entity) -> Self {
        Self {
            body_a,
            body_b,
            contact_count: 0,
            contacts: [CollisionContact::default(); MAX_CONTACTS],
        }
    }

    /// Add a contact. Returns `false` (and drops it) once the manifold is full.
    pub fn push(&mut self, contact: CollisionContact) -> bool {
        if self.is_full() {
            return false;
        }
        self.contacts[self.contact_count] = contact;
        self.contact_count += 1;
        true
    }

    #[inline]
    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contact_count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.contact_count == MAX_CONTACTS
    }

    /// The populated contacts.
    #[inline]
    pub fn contacts(&self) -> &[CollisionContact] {
        &self.contacts[..self.contact_count]
    }

    /// `Some(self)` when the manifold holds at least one contact.
    #[inline]
    pub(crate) fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    /// Deepest penetration among the contacts, 0 if empty.
    pub fn max_depth(&self) -> f32 {
        self.contacts().iter().fold(0.0, |acc, c| acc.max(c.depth))
    }
}
