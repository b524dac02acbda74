//! Canonical ordering of edges and triangles along a sweep.
//!
//! A triangle swept by a front is entered at its first vertex, crossed at its
//! middle vertex and left at its last. Sorting its three edges by the sweep
//! order (first endpoints, then second endpoints) yields `(e0, e1, e2)` with
//! `e0 = (lo, mid)`, `e1 = (lo, hi)` and `e2 = (mid, hi)`; the position of a
//! vertex in that triple tells which virtual edge of the triangle's preimage
//! must be created, replaced or destroyed.

use std::cmp::Ordering;

use crate::ftr::config::SweepDirection;
use crate::ftr_error::FtrError;
use crate::topology::ids::{EdgeId, TriangleId, VertexId};
use crate::topology::mesh::TriangulatedMesh;
use crate::topology::scalar::ScalarOrder;

/// Order in which a front meets vertices.
pub trait SweepOrder {
    /// `true` when the front meets `a` strictly before `b`.
    fn precedes(&self, a: VertexId, b: VertexId) -> bool;
    /// Integer strictly increasing with the scalar order, independent of the
    /// sweep direction.
    fn mirror(&self, v: VertexId) -> i64;
    /// `true` for descending fronts.
    fn descending(&self) -> bool;
}

/// A scalar order seen through a sweep direction.
#[derive(Debug)]
pub struct Sweep<'a, S: ?Sized> {
    scalars: &'a S,
    direction: SweepDirection,
}

impl<S: ?Sized> Clone for Sweep<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Sweep<'_, S> {}

impl<'a, S: ScalarOrder + ?Sized> Sweep<'a, S> {
    pub fn new(scalars: &'a S, direction: SweepDirection) -> Self {
        Self { scalars, direction }
    }

    #[inline]
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    #[inline]
    pub fn scalars(&self) -> &'a S {
        self.scalars
    }

    /// Priority key: smaller keys are met first.
    #[inline]
    pub fn key(&self, v: VertexId) -> i64 {
        match self.direction {
            SweepDirection::Ascending => self.scalars.mirror(v),
            SweepDirection::Descending => -self.scalars.mirror(v),
        }
    }
}

impl<S: ScalarOrder + ?Sized> SweepOrder for Sweep<'_, S> {
    #[inline]
    fn precedes(&self, a: VertexId, b: VertexId) -> bool {
        match self.direction {
            SweepDirection::Ascending => self.scalars.is_lower(a, b),
            SweepDirection::Descending => self.scalars.is_higher(a, b),
        }
    }

    #[inline]
    fn mirror(&self, v: VertexId) -> i64 {
        self.scalars.mirror(v)
    }

    #[inline]
    fn descending(&self) -> bool {
        !self.direction.is_up()
    }
}

/// Edge with its endpoints in sweep order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedEdge {
    pub lower: VertexId,
    pub upper: VertexId,
    pub edge: EdgeId,
}

/// Triangle with its edges in sweep order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedTriangle {
    pub edges: [OrderedEdge; 3],
    pub triangle: TriangleId,
}

/// Where a vertex sits in an ordered triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexPosition {
    /// First vertex met: the triangle enters the preimage.
    Start,
    /// Middle vertex: the triangle's virtual edge is replaced.
    Middle,
    /// Last vertex: the triangle leaves the preimage.
    End,
}

pub fn ordered_edge<M, O>(mesh: &M, edge: EdgeId, order: &O) -> OrderedEdge
where
    M: TriangulatedMesh + ?Sized,
    O: SweepOrder + ?Sized,
{
    let [a, b] = mesh.edge_vertices(edge);
    if order.precedes(a, b) {
        OrderedEdge {
            lower: a,
            upper: b,
            edge,
        }
    } else {
        OrderedEdge {
            lower: b,
            upper: a,
            edge,
        }
    }
}

fn cmp_vertices<O: SweepOrder + ?Sized>(order: &O, a: VertexId, b: VertexId) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if order.precedes(a, b) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn cmp_edges<O: SweepOrder + ?Sized>(order: &O, a: &OrderedEdge, b: &OrderedEdge) -> Ordering {
    cmp_vertices(order, a.lower, b.lower).then_with(|| cmp_vertices(order, a.upper, b.upper))
}

/// Sorts the edges of `triangle` lexicographically by sweep order.
pub fn ordered_triangle<M, O>(mesh: &M, triangle: TriangleId, order: &O) -> OrderedTriangle
where
    M: TriangulatedMesh + ?Sized,
    O: SweepOrder + ?Sized,
{
    let mut edges = mesh
        .triangle_edges(triangle)
        .map(|e| ordered_edge(mesh, e, order));
    edges.sort_unstable_by(|a, b| cmp_edges(order, a, b));
    OrderedTriangle { edges, triangle }
}

/// Classifies `v` in `triangle`.
pub fn vertex_position(triangle: &OrderedTriangle, v: VertexId) -> Result<VertexPosition, FtrError> {
    let first = &triangle.edges[0];
    if first.lower == v {
        Ok(VertexPosition::Start)
    } else if first.upper == v {
        Ok(VertexPosition::Middle)
    } else if triangle.edges[2].upper == v {
        Ok(VertexPosition::End)
    } else {
        Err(FtrError::UnknownVertexPosition {
            vertex: v,
            triangle: triangle.triangle,
        })
    }
}

/// Weight of the virtual edge `(e0, e1)`: the mirror of whichever far
/// endpoint is met first, negated for descending fronts. It is the vertex at
/// which the sweep removes that virtual edge.
pub fn weight<O: SweepOrder + ?Sized>(e0: &OrderedEdge, e1: &OrderedEdge, order: &O) -> i64 {
    let end = if order.precedes(e0.upper, e1.upper) {
        e0.upper
    } else {
        e1.upper
    };
    let w = order.mirror(end);
    if order.descending() { -w } else { w }
}
