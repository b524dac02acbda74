#![cfg_attr(docsrs, feature(doc_cfg))]
//! # ftr-reeb
//!
//! ftr-reeb computes the Reeb graph of a scalar field on a triangulated
//! surface. A Reeb graph contracts every connected component of every level
//! set to a point: its nodes are the critical points of the field (extrema
//! and saddles) and its arcs are the regions swept between them.
//!
//! ## Algorithm
//! Sweep fronts start from every local extremum at once and advance in
//! scalar order, one rayon task per front. Each front tracks the connectivity
//! of its level set with a dynamic forest over mesh edges; a change in the
//! number of components around a vertex reveals a join or a split saddle.
//! Fronts meeting at a join are merged by the last one to arrive, decided by
//! a lock-free valence counter; a front reaching a split hands each outgoing
//! component to a new task.
//!
//! ## Usage
//! ```rust
//! use ftr_reeb::prelude::*;
//!
//! let mesh = TriangleMesh::from_triangles(3, &[[0, 1, 2]])?;
//! let field = ScalarField::for_mesh(&mesh, vec![0.0, 1.0, 2.0])?;
//! let graph = compute_reeb_graph(&mesh, &field, FtrConfig::default())?;
//! assert_eq!(graph.arcs().len(), 1);
//! # Ok::<(), ftr_reeb::ftr_error::FtrError>(())
//! ```
//!
//! ## Determinism
//! The topology of the result does not depend on scheduling. Node and arc
//! ids may, so the output is sorted by scalar rank.

pub mod debug_invariants;
pub mod ftr;
pub mod ftr_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::ftr::{
        Diagnostic, FtrConfig, FtrGraph, GrowthObserver, LogObserver, ReebArc, ReebGraph,
        ReebNode, SweepDirection, SweepMode, compute_reeb_graph,
    };
    pub use crate::ftr_error::FtrError;
    pub use crate::topology::{
        ArcId, NodeId, ScalarField, ScalarOrder, TriangleMesh, TriangulatedMesh, VertexId,
    };
}
