//! Physics components for ECS entities.

use std::sync::Arc;

use glam::{Mat3, Quat, Vec3};

use crate::ecs::components::transform::Transform;
use crate::geom::{Segment, TriangleMesh};
use crate::physics::material::PhysicsMaterial;

/// Collider shape kind, in dispatch-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColliderType {
    Plane = 0,
    Sphere = 1,
    Box = 2,
    Capsule = 3,
    Mesh = 4,
}

impl ColliderType {
    /// Number of collider kinds.
    pub const COUNT: usize = 5;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Collider shape, expressed in the owning body's local space.
#[derive(Debug, Clone)]
pub enum ColliderShape {
    /// Plane `normal . p + constant = 0`. `normal` must be unit length.
    Plane { normal: Vec3, constant: f32 },
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box in body space.
    Box { min: Vec3, max: Vec3 },
    Capsule { segment: Segment, radius: f32 },
    /// Triangle mesh. Only participates in ray traces.
    Mesh(Arc<TriangleMesh>),
}

impl ColliderShape {
    pub fn collider_type(&self) -> ColliderType {
        match self {
            ColliderShape::Plane { .. } => ColliderType::Plane,
            ColliderShape::Sphere { .. } => ColliderType::Sphere,
            ColliderShape::Box { .. } => ColliderType::Box,
            ColliderShape::Capsule { .. } => ColliderType::Capsule,
            ColliderShape::Mesh(_) => ColliderType::Mesh,
        }
    }
}

/// Collision shape with a layer mask and a shared surface material.
#[derive(Debug, Clone)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Collision layers this collider belongs to.
    pub layer_mask: u32,
    pub material: Arc<PhysicsMaterial>,
}

impl Collider {
    /// Collider on every layer with the default material.
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            layer_mask: u32::MAX,
            material: Arc::new(PhysicsMaterial::default()),
        }
    }

    pub fn plane(normal: Vec3, constant: f32) -> Self {
        Self::new(ColliderShape::Plane { normal, constant })
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::new(ColliderShape::Sphere { center, radius })
    }

    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        Self::new(ColliderShape::Box { min, max })
    }

    pub fn capsule(a: Vec3, b: Vec3, radius: f32) -> Self {
        Self::new(ColliderShape::Capsule {
            segment: Segment::new(a, b),
            radius,
        })
    }

    pub fn mesh(mesh: Arc<TriangleMesh>) -> Self {
        Self::new(ColliderShape::Mesh(mesh))
    }

    pub fn with_layer_mask(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    pub fn with_material(mut self, material: Arc<PhysicsMaterial>) -> Self {
        self.material = material;
        self
    }

    #[inline]
    pub fn collider_type(&self) -> ColliderType {
        self.shape.collider_type()
    }

    /// Whether the two colliders share at least one layer.
    #[inline]
    pub fn shares_layer(&self, other: &Collider) -> bool {
        self.layer_mask & other.layer_mask != 0
    }
}

/// Rigid body component.
///
/// A body with zero inverse mass is static: it never moves under forces or
/// impulses but still collides. Linear and angular momentum are the
/// integrated state; velocities are derived from them.
#[derive(Debug, Clone)]
pub struct RigidBody {
    current_transform: Transform,
    previous_transform: Transform,
    mass: f32,
    inverse_mass: f32,
    inertia: Mat3,
    inverse_inertia: Mat3,
    linear_damping: f32,
    angular_damping: f32,
    collider: Option<Collider>,
    applied_force: Vec3,
    applied_torque: Vec3,
    linear_momentum: Vec3,
    angular_momentum: Vec3,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new_dynamic(1.0)
    }
}

impl RigidBody {
    /// Create a new dynamic rigid body with the given mass.
    pub fn new_dynamic(mass: f32) -> Self {
        // Default inertia tensor: identity * mass (unit sphere approximation)
        let mut body = Self::new_static();
        body.set_mass(mass);
        body.set_inertia(Mat3::from_diagonal(Vec3::splat(mass)));
        body
    }

    /// Create a new static rigid body.
    pub fn new_static() -> Self {
        Self {
            current_transform: Transform::identity(),
            previous_transform: Transform::identity(),
            mass: 0.0,
            inverse_mass: 0.0,
            inertia: Mat3::ZERO,
            inverse_inertia: Mat3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
            collider: None,
            applied_force: Vec3::ZERO,
            applied_torque: Vec3::ZERO,
            linear_momentum: Vec3::ZERO,
            angular_momentum: Vec3::ZERO,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Place the body, resetting the previous transform as well.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.current_transform = transform;
        self.previous_transform = transform;
        self
    }

    pub fn with_inertia(mut self, inertia: Mat3) -> Self {
        self.set_inertia(inertia);
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    // -- Integration --------------------------------------------------------

    /// Turn accumulated forces into momentum, apply damping, derive
    /// velocities and clear the accumulators.
    pub fn integrate_forces(&mut self, dt: f32) {
        self.linear_momentum += self.applied_force * dt;
        self.angular_momentum += self.applied_torque * dt;

        self.linear_momentum *= (1.0 - self.linear_damping * dt).max(0.0);
        self.angular_momentum *= (1.0 - self.angular_damping * dt).max(0.0);

        self.linear_velocity = self.linear_momentum * self.inverse_mass;
        self.angular_velocity = self.inverse_inertia * self.angular_momentum;

        self.applied_force = Vec3::ZERO;
        self.applied_torque = Vec3::ZERO;
    }

    /// Record the previous transform, then advance position and orientation.
    pub fn integrate_velocities(&mut self, dt: f32) {
        self.previous_transform = self.current_transform;

        self.current_transform.position += self.linear_velocity * dt;

        // q' = q + 0.5 * dt * omega_quat * q
        let omega = self.angular_velocity * 0.5;
        let spin = Quat::from_xyzw(omega.x, omega.y, omega.z, 0.0) * self.current_transform.rotation;
        self.current_transform.rotation =
            (self.current_transform.rotation + spin * dt).normalize();
    }

    /// [`integrate_forces`](Self::integrate_forces) then
    /// [`integrate_velocities`](Self::integrate_velocities).
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_forces(dt);
        self.integrate_velocities(dt);
    }

    /// Blend between the previous and current transform.
    pub fn interpolate(&self, alpha: f32) -> Transform {
        self.previous_transform
            .interpolate(&self.current_transform, alpha)
    }

    // -- Forces and impulses ------------------------------------------------

    /// Apply a force at `radius` from the center of mass. Forces accumulate
    /// until the next [`integrate_forces`](Self::integrate_forces).
    pub fn apply_force(&mut self, force: Vec3, radius: Vec3) {
        if self.is_static() {
            return;
        }
        self.applied_force += force;
        self.applied_torque += radius.cross(force);
    }

    pub fn apply_central_force(&mut self, force: Vec3) {
        if self.is_static() {
            return;
        }
        self.applied_force += force;
    }

    pub fn apply_torque(&mut self, torque: Vec3) {
        if self.is_static() {
            return;
        }
        self.applied_torque += torque;
    }

    /// Apply an impulse at `radius` from the center of mass. Velocities
    /// change immediately. Static bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec3, radius: Vec3) {
        if self.is_static() {
            return;
        }
        self.linear_momentum += impulse;
        self.angular_momentum += radius.cross(impulse);
        self.linear_velocity = self.linear_momentum * self.inverse_mass;
        self.angular_velocity = self.inverse_inertia * self.angular_momentum;
    }

    pub fn apply_central_impulse(&mut self, impulse: Vec3) {
        if self.is_static() {
            return;
        }
        self.linear_momentum += impulse;
        self.linear_velocity = self.linear_momentum * self.inverse_mass;
    }

    pub fn apply_angular_impulse(&mut self, impulse: Vec3) {
        if self.is_static() {
            return;
        }
        self.angular_momentum += impulse;
        self.angular_velocity = self.inverse_inertia * self.angular_momentum;
    }

    /// Velocity of a point at `radius` from the center of mass.
    #[inline]
    pub fn point_velocity(&self, radius: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(radius)
    }

    // -- Transform ----------------------------------------------------------

    /// Replace the current transform. The previous transform is kept, so the
    /// next interpolation blends from it.
    pub fn set_transform(&mut self, transform: Transform) {
        self.current_transform = transform;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.current_transform.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.current_transform.rotation = orientation;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.current_transform.scale = scale;
    }

    /// Replace the previous transform, e.g. after teleporting a body.
    pub fn set_previous_transform(&mut self, transform: Transform) {
        self.previous_transform = transform;
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.current_transform
    }

    #[inline]
    pub fn previous_transform(&self) -> &Transform {
        &self.previous_transform
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.current_transform.position
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.current_transform.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.current_transform.scale
    }

    // -- Mass properties ----------------------------------------------------

    /// Set the mass. Zero makes the body static: inertia, momenta and
    /// velocities are cleared so it neither moves nor spins.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        if mass == 0.0 {
            self.inverse_mass = 0.0;
            self.inertia = Mat3::ZERO;
            self.inverse_inertia = Mat3::ZERO;
            self.linear_momentum = Vec3::ZERO;
            self.angular_momentum = Vec3::ZERO;
            self.linear_velocity = Vec3::ZERO;
            self.angular_velocity = Vec3::ZERO;
        } else {
            self.inverse_mass = 1.0 / mass;
        }
    }

    /// Set the body-space inertia tensor. A singular tensor, or a static
    /// body, yields zero inverse inertia, so the body does not rotate.
    pub fn set_inertia(&mut self, inertia: Mat3) {
        self.inertia = inertia;
        self.inverse_inertia = if !self.is_static() && inertia.determinant() != 0.0 {
            inertia.inverse()
        } else {
            Mat3::ZERO
        };
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    #[inline]
    pub fn inertia(&self) -> &Mat3 {
        &self.inertia
    }

    #[inline]
    pub fn inverse_inertia(&self) -> &Mat3 {
        &self.inverse_inertia
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    // -- Damping ------------------------------------------------------------

    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping;
    }

    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping;
    }

    #[inline]
    pub fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    #[inline]
    pub fn angular_damping(&self) -> f32 {
        self.angular_damping
    }

    // -- Momentum and velocity ----------------------------------------------

    pub fn set_linear_momentum(&mut self, momentum: Vec3) {
        if self.is_static() {
            return;
        }
        self.linear_momentum = momentum;
        self.linear_velocity = momentum * self.inverse_mass;
    }

    pub fn set_angular_momentum(&mut self, momentum: Vec3) {
        if self.is_static() {
            return;
        }
        self.angular_momentum = momentum;
        self.angular_velocity = self.inverse_inertia * momentum;
    }

    pub fn set_linear_velocity(&mut self, velocity: Vec3) {
        if self.is_static() {
            return;
        }
        self.linear_velocity = velocity;
        self.linear_momentum = velocity * self.mass;
    }

    pub fn set_angular_velocity(&mut self, velocity: Vec3) {
        if self.is_static() {
            return;
        }
        self.angular_velocity = velocity;
        self.angular_momentum = self.inertia * velocity;
    }

    #[inline]
    pub fn linear_momentum(&self) -> Vec3 {
        self.linear_momentum
    }

    #[inline]
    pub fn angular_momentum(&self) -> Vec3 {
        self.angular_momentum
    }

    #[inline]
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    #[inline]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    #[inline]
    pub fn applied_force(&self) -> Vec3 {
        self.applied_force
    }

    #[inline]
    pub fn applied_torque(&self) -> Vec3 {
        self.applied_torque
    }

    // -- Collider -----------------------------------------------------------

    /// Attach a collider, replacing any existing one.
    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = Some(collider);
    }

    /// Detach and return the collider.
    pub fn take_collider(&mut self) -> Option<Collider> {
        self.collider.take()
    }

    #[inline]
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }
}

/// Damped spring between attachment points on two bodies.
///
/// Springs live on their own entity. A spring with either end detached has
/// no effect.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringConstraint {
    pub body_a: Option<hecs::Entity>,
    pub body_b: Option<hecs::Entity>,
    /// Attachment point on body A, in body space.
    pub point_a: Vec3,
    /// Attachment point on body B, in body space.
    pub point_b: Vec3,
    pub resting_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringConstraint {
    fn default() -> Self {
        Self {
            body_a: None,
            body_b: None,
            point_a: Vec3::ZERO,
            point_b: Vec3::ZERO,
            resting_length: 0.0,
            stiffness: 1.0,
            damping: 1.0,
        }
    }
}

impl SpringConstraint {
    /// Spring between the centers of mass of two bodies.
    pub fn new(body_a: hecs::Entity, body_b: hecs::Entity, resting_length: f32) -> Self {
        Self {
            body_a: Some(body_a),
            body_b: Some(body_b),
            resting_length,
            ..Self::default()
        }
    }

    pub fn with_points(mut self, point_a: Vec3, point_b: Vec3) -> Self {
        self.point_a = point_a;
        self.point_b = point_b;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Both attached bodies, if the spring is fully attached.
    #[inline]
    pub fn bodies(&self) -> Option<(hecs::Entity, hecs::Entity)> {
        Some((self.body_a?, self.body_b?))
    }

    pub fn detach(&mut self) {
        self.body_a = None;
        self.body_b = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_new_dynamic_mass_properties() {
        let body = RigidBody::new_dynamic(2.0);
        assert_eq!(body.mass(), 2.0);
        assert_eq!(body.inverse_mass(), 0.5);
        assert!(!body.is_static());
        assert_eq!(*body.inverse_inertia(), Mat3::from_diagonal(Vec3::splat(0.5)));
    }

    #[test]
    fn test_zero_mass_is_static() {
        let mut body = RigidBody::new_dynamic(1.0);
        body.set_mass(0.0);
        assert!(body.is_static());
        assert_eq!(body.inverse_mass(), 0.0);
        assert_eq!(*body.inverse_inertia(), Mat3::ZERO);

        body.set_inertia(Mat3::IDENTITY);
        assert_eq!(*body.inertia(), Mat3::IDENTITY);
        assert_eq!(*body.inverse_inertia(), Mat3::ZERO);
    }

    #[test]
    fn test_spinning_body_made_static_stops() {
        let mut body = RigidBody::new_dynamic(1.0);
        body.set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
        body.set_angular_velocity(Vec3::new(0.0, 3.0, 0.0));
        body.set_mass(0.0);

        body.integrate(1.0 / 60.0);
        body.integrate(1.0 / 60.0);
        assert_eq!(body.position(), Vec3::ZERO);
        assert_eq!(body.orientation(), Quat::IDENTITY);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
        assert_eq!(body.angular_momentum(), Vec3::ZERO);
    }

    #[test]
    fn test_static_body_ignores_velocity_setters() {
        let mut body = RigidBody::new_static();
        body.set_linear_velocity(Vec3::X);
        body.set_angular_velocity(Vec3::Y);
        body.set_linear_momentum(Vec3::Z);
        body.set_angular_momentum(Vec3::X);
        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
        assert_eq!(body.linear_momentum(), Vec3::ZERO);
        assert_eq!(body.angular_momentum(), Vec3::ZERO);

        body.integrate(1.0);
        assert_eq!(body.position(), Vec3::ZERO);
    }

    #[test]
    fn test_integrate_forces_clears_accumulators() {
        let mut body = RigidBody::new_dynamic(2.0);
        body.apply_force(Vec3::new(4.0, 0.0, 0.0), Vec3::Y);
        body.integrate_forces(0.5);

        assert_eq!(body.linear_momentum(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(body.linear_velocity(), Vec3::new(1.0, 0.0, 0.0));
        // torque = Y x 4X = -4Z
        assert_eq!(body.angular_momentum(), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(body.angular_velocity(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(body.applied_force(), Vec3::ZERO);
        assert_eq!(body.applied_torque(), Vec3::ZERO);
    }

    #[test]
    fn test_damping_clamps_at_zero() {
        let mut body = RigidBody::new_dynamic(1.0).with_damping(0.5, 100.0);
        body.set_linear_momentum(Vec3::X * 2.0);
        body.set_angular_momentum(Vec3::Y);
        body.integrate_forces(0.1);
        assert!((body.linear_momentum().x - 1.9).abs() < 1e-6);
        assert_eq!(body.angular_momentum(), Vec3::ZERO);
    }

    #[test]
    fn test_integrate_velocities_records_previous() {
        let mut body = RigidBody::new_dynamic(1.0)
            .with_transform(Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
        body.set_linear_velocity(Vec3::new(2.0, 0.0, 0.0));
        body.integrate_velocities(0.5);

        assert_eq!(body.previous_transform().position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(body.position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_angular_integration_stays_normalized() {
        let mut body = RigidBody::new_dynamic(1.0);
        body.set_angular_velocity(Vec3::new(0.0, PI, 0.0));
        for _ in 0..120 {
            body.integrate_velocities(1.0 / 120.0);
            assert!((body.orientation().length() - 1.0).abs() < 1e-5);
        }
        // Roughly half a turn about Y
        let forward = body.orientation() * Vec3::X;
        assert!(forward.x < -0.9, "forward = {forward:?}");
    }

    #[test]
    fn test_interpolate_between_steps() {
        let mut body = RigidBody::new_dynamic(1.0);
        body.set_linear_velocity(Vec3::new(0.0, 0.0, 4.0));
        body.integrate_velocities(0.25);

        let half = body.interpolate(0.5);
        assert!((half.position - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-6);
        assert_eq!(body.interpolate(1.0).position, body.position());
        assert_eq!(body.interpolate(0.0).position, Vec3::ZERO);
    }

    #[test]
    fn test_impulse_changes_velocity_immediately() {
        let mut body = RigidBody::new_dynamic(2.0);
        body.apply_impulse(Vec3::new(0.0, 4.0, 0.0), Vec3::X);
        assert_eq!(body.linear_velocity(), Vec3::new(0.0, 2.0, 0.0));
        // X x 4Y = 4Z, inverse inertia 0.5
        assert_eq!(body.angular_velocity(), Vec3::new(0.0, 0.0, 2.0));

        let v = body.point_velocity(Vec3::X);
        assert_eq!(v, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_static_body_ignores_impulses() {
        let mut body = RigidBody::new_static();
        body.apply_impulse(Vec3::ONE, Vec3::X);
        body.apply_central_impulse(Vec3::ONE);
        body.apply_angular_impulse(Vec3::ONE);
        body.apply_central_force(Vec3::ONE);
        body.integrate(1.0);
        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
        assert_eq!(body.linear_momentum(), Vec3::ZERO);
        assert_eq!(body.position(), Vec3::ZERO);
    }

    #[test]
    fn test_velocity_and_momentum_setters_agree() {
        let mut body = RigidBody::new_dynamic(4.0);
        body.set_linear_velocity(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.linear_momentum(), Vec3::new(4.0, 8.0, 12.0));
        body.set_angular_velocity(Vec3::X);
        assert_eq!(body.angular_momentum(), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_collider_attach_detach() {
        let mut body = RigidBody::new_dynamic(1.0);
        assert!(body.collider().is_none());
        body.set_collider(Collider::sphere(Vec3::ZERO, 0.5).with_layer_mask(0b10));
        assert_eq!(body.collider().map(Collider::collider_type), Some(ColliderType::Sphere));

        let collider = body.take_collider();
        assert_eq!(collider.map(|c| c.layer_mask), Some(0b10));
        assert!(body.collider().is_none());
    }

    #[test]
    fn test_collider_layers_and_ordinals() {
        let a = Collider::plane(Vec3::Y, 0.0).with_layer_mask(0b0011);
        let b = Collider::sphere(Vec3::ZERO, 1.0).with_layer_mask(0b0100);
        let c = Collider::capsule(Vec3::ZERO, Vec3::Y, 0.2).with_layer_mask(0b0110);
        assert!(!a.shares_layer(&b));
        assert!(b.shares_layer(&c));
        assert!(a.shares_layer(&c));
        let default_mask = Collider::new(ColliderShape::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        })
        .layer_mask;
        assert_eq!(default_mask, u32::MAX);

        assert_eq!(ColliderType::Plane.index(), 0);
        assert_eq!(ColliderType::Sphere.index(), 1);
        assert_eq!(ColliderType::Box.index(), 2);
        assert_eq!(ColliderType::Capsule.index(), 3);
        assert_eq!(ColliderType::Mesh.index(), 4);
    }

    #[test]
    fn test_spring_bodies_requires_both_ends() {
        let mut world = hecs::World::new();
        let a = world.spawn(());
        let b = world.spawn(());

        let mut spring = SpringConstraint::new(a, b, 1.0);
        assert_eq!(spring.bodies(), Some((a, b)));
        assert_eq!(spring.stiffness, 1.0);
        assert_eq!(spring.damping, 1.0);

        spring.body_b = None;
        assert_eq!(spring.bodies(), None);
        spring.detach();
        assert!(spring.body_a.is_none());
    }
}
