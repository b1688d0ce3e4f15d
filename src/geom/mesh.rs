//! Triangle mesh with a bounding volume hierarchy for ray queries.
//!
//! Mesh colliders never take part in pairwise dynamics; they exist so
//! gameplay code can trace rays against terrain and nest geometry.

use glam::Vec3;
use smallvec::SmallVec;

use super::Ray;
use crate::error::{PhysicsError, Result};

/// Maximum number of triangles stored in a BVH leaf.
const MAX_LEAF_SIZE: usize = 4;

/// Determinant threshold below which a ray is parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Inverted box that any expansion overwrites.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn from_triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            min: v0.min(v1).min(v2),
            max: v0.max(v1).max(v2),
        }
    }

    pub fn expand(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Index of the longest axis (0 = X, 1 = Y, 2 = Z).
    pub fn longest_axis(&self) -> usize {
        let d = self.max - self.min;
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// Slab test. Returns the entry parameter if the ray hits the box at
    /// or beyond its origin and no farther than `t_max`.
    pub fn intersect_ray(&self, ray: &Ray, t_max: f32) -> Option<f32> {
        let mut t_enter = 0.0f32;
        let mut t_exit = t_max;
        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() < PARALLEL_EPSILON {
                // Parallel to this slab: inside or never
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let t0 = (self.min[axis] - origin) * inv;
            let t1 = (self.max[axis] - origin) * inv;
            t_enter = t_enter.max(t0.min(t1));
            t_exit = t_exit.min(t0.max(t1));
            if t_enter > t_exit {
                return None;
            }
        }
        Some(t_enter)
    }
}

/// BVH node containing either leaf triangles or two children.
#[derive(Debug)]
enum BvhNode {
    Leaf {
        bbox: Aabb,
        triangles: SmallVec<[u32; MAX_LEAF_SIZE]>,
    },
    Internal {
        bbox: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    fn bbox(&self) -> &Aabb {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }

    fn build(bounds: &[(u32, Aabb)], mut indices: Vec<usize>) -> Self {
        let mut bbox = Aabb::empty();
        for &i in &indices {
            bbox.expand(&bounds[i].1);
        }

        if indices.len() <= MAX_LEAF_SIZE {
            return Self::Leaf {
                bbox,
                triangles: indices.iter().map(|&i| bounds[i].0).collect(),
            };
        }

        // Median split along the longest axis
        let axis = bbox.longest_axis();
        indices.sort_by(|&a, &b| {
            let ca = bounds[a].1.center()[axis];
            let cb = bounds[b].1.center()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });
        let right_indices = indices.split_off(indices.len() / 2);

        Self::Internal {
            bbox,
            left: Box::new(Self::build(bounds, indices)),
            right: Box::new(Self::build(bounds, right_indices)),
        }
    }
}

/// Result of a ray-mesh intersection in mesh space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Ray parameter of the hit, in multiples of the ray direction.
    pub t: f32,
    /// Index of the intersected triangle.
    pub face_index: u32,
    /// Unit geometric normal of the intersected triangle (counter-clockwise winding).
    pub normal: Vec3,
}

/// Immutable indexed triangle mesh with a BVH over its faces.
#[derive(Debug)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    root: BvhNode,
}

impl TriangleMesh {
    /// Build a mesh from vertices and triangles, validating indices.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(PhysicsError::EmptyMesh);
        }
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(PhysicsError::NonFiniteVertex(i));
        }
        for (triangle, face) in triangles.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(PhysicsError::InvalidMeshIndex {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let bounds: Vec<(u32, Aabb)> = triangles
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let [v0, v1, v2] = f.map(|idx| vertices[idx as usize]);
                (i as u32, Aabb::from_triangle(v0, v1, v2))
            })
            .collect();
        let root = BvhNode::build(&bounds, (0..bounds.len()).collect());

        tracing::debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "built triangle mesh"
        );

        Ok(Self {
            vertices,
            triangles,
            root,
        })
    }

    /// Build a mesh from a flat index buffer (three indices per triangle).
    pub fn from_indices(vertices: Vec<Vec3>, indices: &[u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(PhysicsError::IndexCountNotTriangles(indices.len()));
        }
        let triangles = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(vertices, triangles)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Vertex positions of triangle `index`, if it exists.
    pub fn triangle(&self, index: u32) -> Option<[Vec3; 3]> {
        self.triangles
            .get(index as usize)
            .map(|f| f.map(|i| self.vertices[i as usize]))
    }

    /// Bounds of the whole mesh.
    pub fn aabb(&self) -> Aabb {
        *self.root.bbox()
    }

    /// Nearest intersection of `ray` with any triangle, front or back facing.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<MeshHit> {
        if ray.direction.length_squared() == 0.0 {
            return None;
        }

        let mut nearest: Option<MeshHit> = None;
        let mut stack: SmallVec<[&BvhNode; 32]> = SmallVec::new();
        stack.push(&self.root);

        while let Some(node) = stack.pop() {
            let t_max = nearest.map_or(f32::INFINITY, |hit| hit.t);
            if node.bbox().intersect_ray(ray, t_max).is_none() {
                continue;
            }
            match node {
                BvhNode::Leaf { triangles, .. } => {
                    for &face_index in triangles {
                        let [v0, v1, v2] = self.triangles[face_index as usize]
                            .map(|i| self.vertices[i as usize]);
                        if let Some(t) = intersect_triangle(ray, v0, v1, v2) {
                            if nearest.map_or(true, |hit| t < hit.t) {
                                nearest = Some(MeshHit {
                                    t,
                                    face_index,
                                    normal: (v1 - v0).cross(v2 - v0).normalize_or_zero(),
                                });
                            }
                        }
                    }
                }
                BvhNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        nearest
    }
}

/// Möller-Trumbore ray-triangle intersection. Returns the ray parameter.
fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
