#![allow(dead_code)]
use std::collections::BTreeSet;

use ftr_reeb::prelude::*;

pub fn serial() -> FtrConfig {
    FtrConfig {
        threads: Some(1),
        check_invariants: true,
        ..FtrConfig::default()
    }
}

pub fn parallel(threads: usize) -> FtrConfig {
    FtrConfig {
        threads: Some(threads),
        check_invariants: true,
        ..FtrConfig::default()
    }
}

pub fn ascending(cfg: FtrConfig) -> FtrConfig {
    FtrConfig {
        mode: SweepMode::Ascending,
        ..cfg
    }
}

pub fn descending(cfg: FtrConfig) -> FtrConfig {
    FtrConfig {
        mode: SweepMode::Descending,
        ..cfg
    }
}

pub fn build(mesh: &TriangleMesh, values: Vec<f64>, cfg: FtrConfig) -> ReebGraph {
    let field = ScalarField::for_mesh(mesh, values).unwrap();
    compute_reeb_graph(mesh, &field, cfg).unwrap()
}

/// Visible arcs as `(lower vertex, upper vertex)` pairs.
pub fn arc_pairs(g: &ReebGraph) -> BTreeSet<(VertexId, VertexId)> {
    g.arcs().iter().map(|a| (a.down_vertex, a.up_vertex)).collect()
}

/// Every swept, non-critical vertex belongs to exactly one visible arc.
pub fn assert_total_visitation(mesh: &TriangleMesh, g: &ReebGraph) {
    let seg = g.segmentation().expect("segmentation enabled");
    for v in 0..mesh.vertex_count() {
        if mesh.vertex_neighbors(v).is_empty() {
            continue;
        }
        if g.node_for_vertex(v).is_some() {
            continue;
        }
        assert!(seg[v].is_some(), "vertex {v} is not on any arc\n{g}");
    }
    assert!(
        !g.diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::SharedVertex { .. })),
        "{:?}",
        g.diagnostics()
    );
}

/// `arcs - nodes + components`, the number of independent loops.
pub fn cycle_rank(g: &ReebGraph) -> isize {
    let nodes: Vec<NodeId> = g.nodes().iter().map(|n| n.id).collect();
    let index = |id: NodeId| nodes.iter().position(|n| *n == id).unwrap();
    let mut parent: Vec<usize> = (0..nodes.len()).collect();
    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }
    for a in g.arcs() {
        let (ra, rb) = (
            find(&mut parent, index(a.down)),
            find(&mut parent, index(a.up)),
        );
        parent[ra] = rb;
    }
    let components = (0..nodes.len())
        .filter(|&i| find(&mut parent, i) == i)
        .count();
    g.arcs().len() as isize - nodes.len() as isize + components as isize
}

/// Height of a standing torus sampled on a `rows x cols` periodic grid.
pub fn torus_height(rows: usize, cols: usize) -> Vec<f64> {
    use std::f64::consts::TAU;
    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let u = TAU * (c as f64 + 0.25) / cols as f64;
            let v = TAU * r as f64 / rows as f64;
            out.push((3.0 + v.cos()) * u.sin());
        }
    }
    out
}

pub fn octahedron() -> TriangleMesh {
    TriangleMesh::from_triangles(
        6,
        &[
            [0, 1, 2],
            [0, 2, 3],
            [0, 3, 4],
            [0, 4, 1],
            [5, 2, 1],
            [5, 3, 2],
            [5, 4, 3],
            [5, 1, 4],
        ],
    )
    .unwrap()
}
