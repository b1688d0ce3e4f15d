//! Geometric primitives and closest-point queries used by the narrowphase
//! and the trace query.

pub mod mesh;

use glam::Vec3;

pub use mesh::{Aabb, MeshHit, TriangleMesh};

/// Squared length below which a direction is treated as degenerate.
const EPSILON_SQ: f32 = 1e-12;

/// Half-line with an origin and a direction.
///
/// The direction does not need to be normalized; hit parameters are
/// expressed in multiples of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn extrapolate(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Plane `normal . p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    /// Plane through `point` with the given unit `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            constant: -normal.dot(point),
        }
    }

    /// Signed distance from the plane to `point`, positive on the normal side.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec3,
    pub b: Vec3,
}

impl Segment {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    /// Closest point on the segment to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        if len_sq <= EPSILON_SQ {
            return self.a;
        }
        let t = ((point - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    /// Closest pair of points between two segments.
    ///
    /// Returns `(point on self, point on other)`. Handles parallel and
    /// zero-length segments by clamping to the nearest endpoint.
    pub fn closest_points(&self, other: &Segment) -> (Vec3, Vec3) {
        let d1 = self.b - self.a;
        let d2 = other.b - other.a;
        let r = self.a - other.a;
        let a = d1.length_squared();
        let e = d2.length_squared();
        let f = d2.dot(r);

        if a <= EPSILON_SQ && e <= EPSILON_SQ {
            return (self.a, other.a);
        }

        let (s, t) = if a <= EPSILON_SQ {
            (0.0, (f / e).clamp(0.0, 1.0))
        } else {
            let c = d1.dot(r);
            if e <= EPSILON_SQ {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else {
                let b = d1.dot(d2);
                let denom = a * e - b * b;

                // Parallel segments: any s works, pick the start
                let mut s = if denom > 0.0 {
                    ((b * f - c * e) / denom).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let mut t = (b * s + f) / e;

                if t < 0.0 {
                    t = 0.0;
                    s = (-c / a).clamp(0.0, 1.0);
                } else if t > 1.0 {
                    t = 1.0;
                    s = ((b - c) / a).clamp(0.0, 1.0);
                }
                (s, t)
            }
        };

        (self.a + d1 * s, other.a + d2 * t)
    }
}
