//! Mesh-side collaborators of the Reeb graph engine: entity ids, the
//! triangulated surface adapter and the scalar order.

pub mod ids;
pub mod mesh;
pub mod scalar;

pub use ids::{ArcId, EdgeId, NodeId, PropagationId, TriangleId, VertexId};
pub use mesh::{TriangleMesh, TriangulatedMesh};
pub use scalar::{ScalarField, ScalarOrder};
