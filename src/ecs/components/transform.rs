//! Transform components for ECS entities.

use glam::{Mat4, Quat, Vec3};

/// Translation, rotation and scale. Applied as scale, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform from a position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Map a local-space point into world space.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (point * self.scale)
    }

    /// Map a local-space direction into world space (no translation).
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * (vector * self.scale)
    }

    /// Map a world-space point into local space: inverse rotate, then inverse scale.
    ///
    /// Zero scale components collapse to zero instead of producing infinities.
    #[inline]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.inverse_transform_vector(point - self.position)
    }

    /// Map a world-space direction into local space.
    #[inline]
    pub fn inverse_transform_vector(&self, vector: Vec3) -> Vec3 {
        (self.rotation.inverse() * vector) * safe_recip(self.scale)
    }

    /// Map a local-space surface normal into world space.
    ///
    /// Normals use the inverse scale so they stay perpendicular under
    /// non-uniform scaling. The result is unit length, or zero if degenerate.
    #[inline]
    pub fn transform_normal(&self, normal: Vec3) -> Vec3 {
        (self.rotation * (normal * safe_recip(self.scale))).normalize_or_zero()
    }

    /// Blend towards `other`: lerp for position and scale, nlerp for rotation.
    pub fn interpolate(&self, other: &Transform, alpha: f32) -> Transform {
        Transform {
            position: self.position.lerp(other.position, alpha),
            rotation: nlerp(self.rotation, other.rotation, alpha),
            scale: self.scale.lerp(other.scale, alpha),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Normalized linear interpolation between two rotations along the shorter arc.
pub fn nlerp(from: Quat, to: Quat, alpha: f32) -> Quat {
    let to = if from.dot(to) < 0.0 { -to } else { to };
    let blended = from * (1.0 - alpha) + to * alpha;
    let length = blended.length();
    if length > 1e-6 {
        blended / length
    } else {
        from
    }
}

fn safe_recip(v: Vec3) -> Vec3 {
    Vec3::select(v.cmpeq(Vec3::ZERO), Vec3::ZERO, v.recip())
}

/// Render-facing world matrix. Written by the physics interpolation pass
/// once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform(pub Mat4);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_point_roundtrip_with_nonuniform_scale() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: Vec3::new(2.0, 1.0, 0.5),
        };
        let local = Vec3::new(0.3, -1.2, 4.0);
        let world = t.transform_point(local);
        assert!((world - t.to_matrix().transform_point3(local)).length() < 1e-5);
        assert!((t.inverse_transform_point(world) - local).length() < 1e-5);
    }

    #[test]
    fn test_normal_stays_perpendicular_under_scale() {
        let t = Transform {
            scale: Vec3::new(4.0, 1.0, 1.0),
            ..Transform::identity()
        };
        // Surface x + y = 0 in local space, normal (1, 1, 0)
        let tangent_local = Vec3::new(1.0, -1.0, 0.0);
        let normal = t.transform_normal(Vec3::new(1.0, 1.0, 0.0).normalize());
        let tangent = t.transform_vector(tangent_local);
        assert!(normal.dot(tangent).abs() < 1e-5);
        assert!((normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let a = Transform::from_position(Vec3::ZERO);
        let b = Transform {
            position: Vec3::new(2.0, 0.0, 0.0),
            rotation: Quat::from_rotation_z(FRAC_PI_2),
            scale: Vec3::splat(3.0),
        };
        let start = a.interpolate(&b, 0.0);
        let end = a.interpolate(&b, 1.0);
        assert!((start.position - a.position).length() < 1e-6);
        assert!(end.rotation.dot(b.rotation).abs() > 1.0 - 1e-6);

        let mid = a.interpolate(&b, 0.5);
        assert!((mid.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((mid.scale - Vec3::splat(2.0)).length() < 1e-6);
        assert!((mid.rotation.length() - 1.0).abs() < 1e-6);
        let expected = Quat::from_rotation_z(FRAC_PI_2 * 0.5);
        assert!(mid.rotation.dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn test_nlerp_takes_short_arc() {
        let a = Quat::IDENTITY;
        let b = -Quat::from_rotation_x(0.2);
        let mid = nlerp(a, b, 0.5);
        assert!(mid.dot(Quat::from_rotation_x(0.1)).abs() > 1.0 - 1e-5);
        assert!(mid.w > 0.0);
    }

    #[test]
    fn test_global_transform_default() {
        assert_eq!(GlobalTransform::default().0, Mat4::IDENTITY);
    }
}
