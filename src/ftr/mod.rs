//! Fast topological Reeb graph construction.
//!
//! Building blocks, leaf first:
//! - [`dyn_graph`]: connectivity of a front's preimage.
//! - [`propagation`]: one sweep front.
//! - [`group`]: union-find over merged fronts.
//! - [`valence`]: arrival counting at join saddles.
//! - [`skeleton`]: the shared, concurrently written Reeb graph.
//! - [`graph`]: the orchestrator driving every front.

pub mod config;
pub mod dyn_graph;
pub mod graph;
pub mod group;
pub mod observer;
pub mod ordering;
pub mod output;
pub mod propagation;
pub mod skeleton;
pub mod valence;

pub use config::{FtrConfig, SweepDirection, SweepMode};
pub use dyn_graph::{ComponentHandle, DynGraph};
pub use graph::{FtrGraph, compute_reeb_graph};
pub use group::GroupForest;
pub use observer::{GrowthObserver, LogObserver, NoopObserver};
pub use ordering::{OrderedEdge, OrderedTriangle, Sweep, SweepOrder, VertexPosition};
pub use output::{Diagnostic, ReebArc, ReebGraph, ReebNode};
pub use propagation::Propagation;
pub use skeleton::{Node, Skeleton, SuperArc};
pub use valence::ValenceCounter;
