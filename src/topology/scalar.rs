//! Scalar field adapter.
//!
//! The engine never looks at raw values: it needs a strict total order over
//! vertices and an integer "mirror" strictly monotone in that order (used to
//! weight virtual edges). [`ScalarField`] provides both by ranking vertices by
//! `(value, vertex id)`, the usual simulation-of-simplicity tie-break.

use num_traits::Float;
use std::cmp::Ordering;

use crate::ftr_error::FtrError;
use crate::topology::ids::VertexId;
use crate::topology::mesh::TriangulatedMesh;

/// Total order over mesh vertices.
pub trait ScalarOrder: Sync {
    /// Number of ordered vertices.
    fn vertex_count(&self) -> usize;

    /// `true` when `a` comes strictly before `b`.
    fn is_lower(&self, a: VertexId, b: VertexId) -> bool;

    /// `true` when `a` comes strictly after `b`.
    fn is_higher(&self, a: VertexId, b: VertexId) -> bool {
        self.is_lower(b, a)
    }

    /// Integer strictly increasing with the order.
    fn mirror(&self, v: VertexId) -> i64;
}

/// Per-vertex scalar values together with their rank.
#[derive(Debug, Clone)]
pub struct ScalarField<T> {
    values: Vec<T>,
    ranks: Vec<usize>,
    sorted: Vec<VertexId>,
}

impl<T: Float> ScalarField<T> {
    /// Ranks `values`; vertex `i` carries `values[i]`.
    pub fn new(values: Vec<T>) -> Result<Self, FtrError> {
        if let Some(vertex) = values.iter().position(|x| !x.is_finite()) {
            return Err(FtrError::NonFiniteScalar { vertex });
        }
        let mut sorted: Vec<VertexId> = (0..values.len()).collect();
        sorted.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        let mut ranks = vec![0; values.len()];
        for (rank, &v) in sorted.iter().enumerate() {
            ranks[v] = rank;
        }
        Ok(Self {
            values,
            ranks,
            sorted,
        })
    }

    /// Same as [`ScalarField::new`] but checks that every mesh vertex has a
    /// value.
    pub fn for_mesh<M: TriangulatedMesh>(mesh: &M, values: Vec<T>) -> Result<Self, FtrError> {
        if values.len() != mesh.vertex_count() {
            return Err(FtrError::ScalarLengthMismatch {
                expected: mesh.vertex_count(),
                found: values.len(),
            });
        }
        Self::new(values)
    }

    /// Raw value at `v`.
    pub fn value(&self, v: VertexId) -> T {
        self.values[v]
    }

    /// Position of `v` in the total order.
    pub fn rank(&self, v: VertexId) -> usize {
        self.ranks[v]
    }

    /// Vertex at position `rank` of the total order.
    pub fn vertex_at(&self, rank: usize) -> VertexId {
        self.sorted[rank]
    }
}

impl<T: Float + Send + Sync> ScalarOrder for ScalarField<T> {
    fn vertex_count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn is_lower(&self, a: VertexId, b: VertexId) -> bool {
        self.ranks[a] < self.ranks[b]
    }

    #[inline]
    fn mirror(&self, v: VertexId) -> i64 {
        self.ranks[v] as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_break_by_vertex_id() {
        let f = ScalarField::new(vec![1.0_f64, 0.0, 1.0, -2.0]).unwrap();
        assert_eq!(f.rank(3), 0);
        assert_eq!(f.rank(1), 1);
        assert_eq!(f.rank(0), 2);
        assert_eq!(f.rank(2), 3);
        assert!(f.is_lower(0, 2));
        assert!(f.is_higher(2, 0));
        assert_eq!(f.vertex_at(0), 3);
        assert_eq!(f.mirror(2), 3);
    }

    #[test]
    fn rejects_nan_and_length_mismatch() {
        assert_eq!(
            ScalarField::new(vec![0.0_f32, f32::NAN]).unwrap_err(),
            FtrError::NonFiniteScalar { vertex: 1 }
        );
        let mesh = crate::topology::mesh::TriangleMesh::grid(2, 2).unwrap();
        assert_eq!(
            ScalarField::for_mesh(&mesh, vec![0.0_f64; 3]).unwrap_err(),
            FtrError::ScalarLengthMismatch {
                expected: 4,
                found: 3
            }
        );
    }
}
