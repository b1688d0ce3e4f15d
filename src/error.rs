//! Error types for fallible construction.
//!
//! The simulation step itself never fails; degenerate geometry is skipped.
//! Errors only surface when building meshes or validating configuration.

use thiserror::Error;

/// Errors raised while building physics resources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A mesh was built without any triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// A triangle references a vertex outside the vertex buffer.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidMeshIndex {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A flat index buffer was not a multiple of three.
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    /// A mesh vertex is NaN or infinite.
    #[error("vertex {0} is not finite")]
    NonFiniteVertex(usize),

    /// A configuration value is out of range.
    #[error("invalid physics config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },
}

/// Convenience alias for results using [`PhysicsError`].
pub type Result<T> = std::result::Result<T, PhysicsError>;
