//! Triangulated surface adapter.
//!
//! [`TriangulatedMesh`] is the read-only adjacency interface the Reeb graph
//! engine consumes. [`TriangleMesh`] is an in-memory implementation built from
//! an indexed triangle list; per-vertex relations are stored in CSR form
//! (`offsets` into a flat value array) and sorted for deterministic iteration.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::ftr_error::FtrError;
use crate::topology::ids::{EdgeId, TriangleId, VertexId};

/// Adjacency queries over a 2-manifold triangulation (with or without
/// boundary).
pub trait TriangulatedMesh: Sync {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;
    /// Number of edges.
    fn edge_count(&self) -> usize;
    /// Number of triangles.
    fn triangle_count(&self) -> usize;
    /// Vertices sharing an edge with `v`.
    fn vertex_neighbors(&self, v: VertexId) -> &[VertexId];
    /// Edges incident to `v`.
    fn vertex_edges(&self, v: VertexId) -> &[EdgeId];
    /// Triangles incident to `v`.
    fn vertex_triangles(&self, v: VertexId) -> &[TriangleId];
    /// The two endpoints of edge `e`.
    fn edge_vertices(&self, e: EdgeId) -> [VertexId; 2];
    /// The three edges of triangle `t`.
    fn triangle_edges(&self, t: TriangleId) -> [EdgeId; 3];
}

/// CSR relation: the values of row `i` are `values[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, Default)]
struct Csr {
    offsets: Vec<usize>,
    values: Vec<usize>,
}

impl Csr {
    fn from_rows(rows: Vec<Vec<usize>>) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        offsets.push(0);
        let mut values = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for row in rows {
            values.extend(row);
            offsets.push(values.len());
        }
        Self { offsets, values }
    }

    #[inline]
    fn row(&self, i: usize) -> &[usize] {
        &self.values[self.offsets[i]..self.offsets[i + 1]]
    }
}

/// In-memory triangle mesh.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    vertex_count: usize,
    edges: Vec<[VertexId; 2]>,
    triangles: Vec<[EdgeId; 3]>,
    neighbors: Csr,
    vertex_edges: Csr,
    vertex_triangles: Csr,
}

impl TriangleMesh {
    /// Builds the mesh from `vertex_count` vertices and an indexed triangle
    /// list.
    ///
    /// Edges are numbered in order of first appearance. Fails when a
    /// triangle references a vertex out of range, repeats a vertex, or when
    /// an edge ends up shared by more than two triangles.
    pub fn from_triangles(
        vertex_count: usize,
        triangles: &[[VertexId; 3]],
    ) -> Result<Self, FtrError> {
        let mut edge_index: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();
        let mut edges: Vec<[VertexId; 2]> = Vec::new();
        let mut edge_uses: Vec<u8> = Vec::new();
        let mut tri_edges: Vec<[EdgeId; 3]> = Vec::with_capacity(triangles.len());
        let mut v_tris: Vec<Vec<TriangleId>> = vec![Vec::new(); vertex_count];

        for (t, tri) in triangles.iter().enumerate() {
            if let Some(&bad) = tri.iter().find(|&&v| v >= vertex_count) {
                return Err(FtrError::InvalidVertexIndex {
                    triangle: t,
                    vertex: bad,
                });
            }
            let [a, b, c] = *tri;
            if a == b || b == c || a == c {
                return Err(FtrError::DegenerateTriangle { triangle: t });
            }
            let mut local = [0; 3];
            for (slot, (u, v)) in [(a, b), (b, c), (c, a)].into_iter().enumerate() {
                let key = (u.min(v), u.max(v));
                let e = *edge_index.entry(key).or_insert_with(|| {
                    edges.push([key.0, key.1]);
                    edge_uses.push(0);
                    edges.len() - 1
                });
                edge_uses[e] += 1;
                if edge_uses[e] > 2 {
                    return Err(FtrError::NonManifoldEdge {
                        v0: key.0,
                        v1: key.1,
                    });
                }
                local[slot] = e;
            }
            tri_edges.push(local);
            for v in tri {
                v_tris[*v].push(t);
            }
        }

        let mut v_nbrs: Vec<Vec<VertexId>> = vec![Vec::new(); vertex_count];
        let mut v_edges: Vec<Vec<EdgeId>> = vec![Vec::new(); vertex_count];
        for (e, &[u, v]) in edges.iter().enumerate() {
            v_nbrs[u].push(v);
            v_nbrs[v].push(u);
            v_edges[u].push(e);
            v_edges[v].push(e);
        }
        let sort_rows = |rows: Vec<Vec<usize>>| {
            rows.into_iter()
                .map(|row| row.into_iter().sorted_unstable().dedup().collect())
                .collect::<Vec<Vec<usize>>>()
        };

        Ok(Self {
            vertex_count,
            edges,
            triangles: tri_edges,
            neighbors: Csr::from_rows(sort_rows(v_nbrs)),
            vertex_edges: Csr::from_rows(sort_rows(v_edges)),
            vertex_triangles: Csr::from_rows(sort_rows(v_tris)),
        })
    }

    /// Structured `rows x cols` grid, vertex `(r, c)` has id `r * cols + c`.
    /// Each quad is split along its `(r, c)`–`(r + 1, c + 1)` diagonal.
    pub fn grid(rows: usize, cols: usize) -> Result<Self, FtrError> {
        let id = |r: usize, c: usize| r * cols + c;
        let mut tris = Vec::new();
        for r in 0..rows.saturating_sub(1) {
            for c in 0..cols.saturating_sub(1) {
                let (a, b, d, e) = (id(r, c), id(r, c + 1), id(r + 1, c), id(r + 1, c + 1));
                tris.push([a, b, e]);
                tris.push([a, e, d]);
            }
        }
        Self::from_triangles(rows * cols, &tris)
    }

    /// Grid with periodic wrap in both directions, a closed genus-one
    /// surface. Needs at least three rows and three columns.
    pub fn torus(rows: usize, cols: usize) -> Result<Self, FtrError> {
        let id = |r: usize, c: usize| (r % rows) * cols + (c % cols);
        let mut tris = Vec::with_capacity(2 * rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let (a, b, d, e) = (id(r, c), id(r, c + 1), id(r + 1, c), id(r + 1, c + 1));
                tris.push([a, b, e]);
                tris.push([a, e, d]);
            }
        }
        Self::from_triangles(rows * cols, &tris)
    }

    /// Endpoints of every edge, indexed by edge id.
    pub fn edges(&self) -> &[[VertexId; 2]] {
        &self.edges
    }
}

impl TriangulatedMesh for TriangleMesh {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    fn vertex_neighbors(&self, v: VertexId) -> &[VertexId] {
        self.neighbors.row(v)
    }

    #[inline]
    fn vertex_edges(&self, v: VertexId) -> &[EdgeId] {
        self.vertex_edges.row(v)
    }

    #[inline]
    fn vertex_triangles(&self, v: VertexId) -> &[TriangleId] {
        self.vertex_triangles.row(v)
    }

    #[inline]
    fn edge_vertices(&self, e: EdgeId) -> [VertexId; 2] {
        self.edges[e]
    }

    #[inline]
    fn triangle_edges(&self, t: TriangleId) -> [EdgeId; 3] {
        self.triangles[t]
    }
}
