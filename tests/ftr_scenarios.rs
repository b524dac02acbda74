use std::collections::BTreeSet;
use std::sync::Arc;

use ftr_reeb::prelude::*;
use parking_lot::Mutex;

mod util;
use util::*;

#[test]
fn single_triangle_in_every_mode() {
    let mesh = TriangleMesh::from_triangles(3, &[[0, 1, 2]]).unwrap();

    for cfg in [serial(), ascending(serial())] {
        let up = build(&mesh, vec![0.0, 1.0, 2.0], cfg);
        assert_eq!(arc_pairs(&up), BTreeSet::from([(0, 2)]));
        assert_eq!(up.nodes().len(), 2);
        assert!(up.arcs()[0].from_up);
        assert_total_visitation(&mesh, &up);
    }

    let down = build(&mesh, vec![0.0, 1.0, 2.0], descending(serial()));
    assert_eq!(arc_pairs(&down), BTreeSet::from([(0, 2)]));
    assert!(!down.arcs()[0].from_up);
    assert_total_visitation(&mesh, &down);
}

#[test]
fn diagonal_between_min_and_max_has_no_saddle() {
    // the shared edge joins the global minimum 0 and maximum 1; 2 and 3 tie
    let mesh = TriangleMesh::from_triangles(4, &[[0, 1, 2], [0, 1, 3]]).unwrap();
    let field = ScalarField::for_mesh(&mesh, vec![0.0, 3.0, 1.0, 1.0]).unwrap();
    assert!(field.is_lower(2, 3), "ties break by vertex id");

    // 0 and 2 lie below the meeting level, 3 and 1 above it
    for cfg in [serial(), ascending(serial()), descending(serial())] {
        let g = compute_reeb_graph(&mesh, &field, cfg).unwrap();
        assert_eq!(arc_pairs(&g), BTreeSet::from([(0, 1)]));
        assert_eq!(g.critical_vertices(), vec![0, 1]);
        let arc = g.arcs()[0].id;
        let seg = g.segmentation().unwrap();
        assert_eq!(seg[2], Some(arc));
        assert_eq!(seg[3], Some(arc));
    }
}

#[test]
fn two_minima_join_below_the_maximum() {
    let mesh = TriangleMesh::from_triangles(4, &[[0, 1, 2], [1, 2, 3]]).unwrap();
    for cfg in [serial(), parallel(4), ascending(parallel(4)), descending(serial())] {
        let g = build(&mesh, vec![0.0, 1.0, 2.0, 0.5], cfg);
        assert_eq!(arc_pairs(&g), BTreeSet::from([(0, 1), (3, 1), (1, 2)]));
        assert_eq!(g.node_for_vertex(1).unwrap().degree, 3);
        let saddle = g.node_for_vertex(1).unwrap().id;
        assert_eq!(g.arcs_to(saddle).count(), 2);
        assert_eq!(g.arcs_from(saddle).count(), 1);
        assert_eq!(cycle_rank(&g), 0);
    }
}

#[test]
fn one_minimum_splits_towards_two_maxima() {
    let mesh = TriangleMesh::from_triangles(4, &[[0, 1, 2], [1, 2, 3]]).unwrap();
    let g = build(&mesh, vec![0.0, -1.0, -2.0, -0.5], serial());
    assert_eq!(arc_pairs(&g), BTreeSet::from([(2, 1), (1, 0), (1, 3)]));
    let saddle = g.node_for_vertex(1).unwrap().id;
    assert_eq!(g.arcs_from(saddle).count(), 2);
    assert!(g.diagnostics().is_empty());
}

#[test]
fn descending_sweep_sees_the_split_as_a_join() {
    let mesh = TriangleMesh::from_triangles(4, &[[0, 1, 2], [1, 2, 3]]).unwrap();
    let g = build(&mesh, vec![0.0, -1.0, -2.0, -0.5], descending(serial()));
    assert_eq!(arc_pairs(&g), BTreeSet::from([(2, 1), (1, 0), (1, 3)]));
    assert!(g.arcs().iter().all(|a| !a.from_up));
    let saddle = g.node_for_vertex(1).unwrap().id;
    assert_eq!(g.arcs_from(saddle).count(), 2);
}

#[test]
fn plateau_grid_has_no_phantom_saddles() {
    // f = column index: each column is a plateau, ties broken by id
    let mesh = TriangleMesh::grid(3, 3).unwrap();
    let values: Vec<f64> = (0..9).map(|v| (v % 3) as f64).collect();
    for cfg in [serial(), ascending(serial()), descending(serial())] {
        let g = build(&mesh, values.clone(), cfg);
        assert_eq!(arc_pairs(&g), BTreeSet::from([(0, 8)]));
        assert_total_visitation(&mesh, &g);
    }
}

#[test]
fn octahedron_height_is_a_single_arc() {
    let mesh = octahedron();
    let values = vec![1.0, 0.0, 0.0, 0.0, 0.0, -1.0];
    let g = build(&mesh, values, parallel(2));
    assert_eq!(arc_pairs(&g), BTreeSet::from([(5, 0)]));
    assert_total_visitation(&mesh, &g);
}

#[test]
fn torus_height_has_one_loop() {
    let mesh = TriangleMesh::torus(8, 12).unwrap();
    let values = torus_height(8, 12);
    for cfg in [
        serial(),
        parallel(4),
        ascending(parallel(2)),
        descending(parallel(3)),
    ] {
        let g = build(&mesh, values.clone(), cfg);
        assert_eq!(cycle_rank(&g), 1, "{g}");
        assert_total_visitation(&mesh, &g);
    }
}

#[test]
fn topology_does_not_depend_on_scheduling() {
    let mesh = TriangleMesh::torus(6, 10).unwrap();
    let values = torus_height(6, 10);
    let reference = arc_pairs(&build(&mesh, values.clone(), serial()));
    for threads in [2, 4, 8] {
        for _ in 0..5 {
            let g = build(&mesh, values.clone(), parallel(threads));
            assert_eq!(arc_pairs(&g), reference);
        }
    }
}

#[derive(Default)]
struct Recorder {
    splits: Mutex<Vec<(VertexId, usize)>>,
    opened: Mutex<Vec<(ArcId, VertexId)>>,
    joins: Mutex<Vec<(VertexId, usize)>>,
    fused: Mutex<Vec<(ArcId, ArcId)>>,
}

impl GrowthObserver for Recorder {
    fn split_detected(&self, saddle: VertexId, branches: usize) {
        self.splits.lock().push((saddle, branches));
    }

    fn arc_opened(&self, arc: ArcId, down: VertexId) {
        self.opened.lock().push((arc, down));
    }

    fn join_confirmed(&self, saddle: VertexId, merged: usize) {
        self.joins.lock().push((saddle, merged));
    }

    fn arc_fused(&self, kept: ArcId, absorbed: ArcId) {
        self.fused.lock().push((kept, absorbed));
    }
}

#[test]
fn observer_sees_split_branches_and_joins() {
    let mesh = TriangleMesh::from_triangles(4, &[[0, 1, 2], [1, 2, 3]]).unwrap();

    let field = ScalarField::for_mesh(&mesh, vec![0.0, -1.0, -2.0, -0.5]).unwrap();
    let recorder = Arc::new(Recorder::default());
    FtrGraph::new(&mesh, &field, serial())
        .unwrap()
        .with_observer(recorder.clone())
        .build()
        .unwrap();
    assert_eq!(*recorder.splits.lock(), vec![(1, 2)]);
    let at_saddle = recorder.opened.lock().iter().filter(|(_, v)| *v == 1).count();
    assert_eq!(at_saddle, 2);
    // each branch meets one descending front coming down from 0 or 3
    assert_eq!(recorder.fused.lock().len(), 2);

    let field = ScalarField::for_mesh(&mesh, vec![0.0, 1.0, 2.0, 0.5]).unwrap();
    let recorder = Arc::new(Recorder::default());
    FtrGraph::new(&mesh, &field, ascending(parallel(2)))
        .unwrap()
        .with_observer(recorder.clone())
        .build()
        .unwrap();
    assert_eq!(*recorder.joins.lock(), vec![(1, 1)]);
    assert!(recorder.fused.lock().is_empty());

    // with both sides seeded, the join at 1 is above the meeting level and
    // the descending front from 2 splits there instead
    let recorder = Arc::new(Recorder::default());
    FtrGraph::new(&mesh, &field, parallel(2))
        .unwrap()
        .with_observer(recorder.clone())
        .build()
        .unwrap();
    assert!(recorder.joins.lock().is_empty());
    assert_eq!(*recorder.splits.lock(), vec![(1, 2)]);
    assert_eq!(recorder.fused.lock().len(), 2);
}

#[test]
fn segmentation_can_be_disabled() {
    let mesh = TriangleMesh::grid(3, 3).unwrap();
    let cfg = FtrConfig {
        segmentation: false,
        ..serial()
    };
    let g = build(&mesh, (0..9).map(|v| v as f64).collect(), cfg);
    assert!(g.segmentation().is_none());
}

#[test]
fn reeb_graph_serializes() {
    let mesh = TriangleMesh::from_triangles(4, &[[0, 1, 2], [1, 2, 3]]).unwrap();
    let g = build(&mesh, vec![0.0, 1.0, 2.0, 0.5], serial());
    let json = serde_json::to_string(&g).unwrap();
    let back: ReebGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, g);
    assert!(g.to_string().starts_with("Reeb graph: 4 nodes, 3 arcs"));
}
