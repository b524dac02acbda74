//! FtrError: unified error type for ftr-reeb public APIs
//!
//! Every fallible entry point of the crate (adapter construction, the growth
//! engine, invariant validation) reports through this type instead of
//! panicking.

use crate::topology::ids::{TriangleId, VertexId};
use thiserror::Error;

/// Unified error type for Reeb graph construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FtrError {
    /// The current vertex could not be located in a triangle's ordered edge
    /// triple. The ordering or the adjacency of the mesh is inconsistent.
    #[error("vertex {vertex} has no position in ordered triangle {triangle}")]
    UnknownVertexPosition {
        /// Vertex being swept.
        vertex: VertexId,
        /// Triangle that failed classification.
        triangle: TriangleId,
    },
    /// The scalar field does not cover the mesh.
    #[error("scalar field has {found} values but the mesh has {expected} vertices")]
    ScalarLengthMismatch {
        /// Number of mesh vertices.
        expected: usize,
        /// Number of scalar values supplied.
        found: usize,
    },
    /// A scalar value is NaN or infinite.
    #[error("scalar value of vertex {vertex} is not finite")]
    NonFiniteScalar {
        /// Offending vertex.
        vertex: VertexId,
    },
    /// A triangle references a vertex outside the mesh.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// Triangle index.
        triangle: TriangleId,
        /// The invalid vertex index.
        vertex: VertexId,
    },
    /// A triangle repeats a vertex.
    #[error("triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle {
        /// Triangle index.
        triangle: TriangleId,
    },
    /// An edge is shared by more than two triangles.
    #[error("edge ({v0}, {v1}) has more than two incident triangles")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: VertexId,
        /// Second vertex of the edge.
        v1: VertexId,
    },
    /// More propagations were requested than the pool can address.
    #[error("propagation pool exhausted (capacity {capacity})")]
    PoolExhausted {
        /// Number of addressable propagations.
        capacity: usize,
    },
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
    /// The resulting Reeb graph violates a structural invariant.
    #[error("invalid Reeb graph: {0}")]
    InvalidSkeleton(String),
}
