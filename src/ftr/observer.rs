//! Hooks into the growth of arcs.
//!
//! [`GrowthObserver`] is called at every step of the growth state machine.
//! All methods default to no-ops; [`LogObserver`] forwards the events to the
//! `log` facade at `trace` level.

use log::trace;

use crate::ftr::ordering::VertexPosition;
use crate::topology::ids::{ArcId, PropagationId, TriangleId, VertexId};

pub trait GrowthObserver: Send + Sync {
    /// A task starts growing from `seed`.
    fn growth_started(&self, _seed: VertexId, _propagation: PropagationId) {}
    /// `arc` was opened at the node of `down`.
    fn arc_opened(&self, _arc: ArcId, _down: VertexId) {}
    /// `vertex` was tagged with `arc`.
    fn vertex_visited(&self, _vertex: VertexId, _arc: ArcId) {}
    /// One triangle of the preimage was updated at `vertex`.
    fn preimage_updated(&self, _vertex: VertexId, _triangle: TriangleId, _position: VertexPosition) {}
    /// A front reached a join saddle and is not the last one.
    fn join_pending(&self, _saddle: VertexId, _propagation: PropagationId) {}
    /// The last front reached a join saddle; `merged` fronts were absorbed.
    fn join_confirmed(&self, _saddle: VertexId, _merged: usize) {}
    /// The front splits into `branches` pieces at `saddle`.
    fn split_detected(&self, _saddle: VertexId, _branches: usize) {}
    /// `arc` was closed at the node of `up`.
    fn arc_closed(&self, _arc: ArcId, _up: VertexId) {}
    /// `arc` was hidden.
    fn arc_hidden(&self, _arc: ArcId) {}
    /// The descending arc `absorbed` met the ascending arc `kept` and was
    /// merged into it.
    fn arc_fused(&self, _kept: ArcId, _absorbed: ArcId) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GrowthObserver for NoopObserver {}

/// Observer that traces every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl GrowthObserver for LogObserver {
    fn growth_started(&self, seed: VertexId, propagation: PropagationId) {
        trace!("prop#{propagation}: growth from {seed}");
    }

    fn arc_opened(&self, arc: ArcId, down: VertexId) {
        trace!("arc {arc} opened at {down}");
    }

    fn vertex_visited(&self, vertex: VertexId, arc: ArcId) {
        trace!("visit {vertex} on arc {arc}");
    }

    fn preimage_updated(&self, vertex: VertexId, triangle: TriangleId, position: VertexPosition) {
        trace!("preimage at {vertex}: triangle {triangle} {position:?}");
    }

    fn join_pending(&self, saddle: VertexId, propagation: PropagationId) {
        trace!("prop#{propagation}: waiting at join {saddle}");
    }

    fn join_confirmed(&self, saddle: VertexId, merged: usize) {
        trace!("join {saddle}: absorbed {merged} fronts");
    }

    fn split_detected(&self, saddle: VertexId, branches: usize) {
        trace!("split {saddle}: {branches} branches");
    }

    fn arc_closed(&self, arc: ArcId, up: VertexId) {
        trace!("arc {arc} closed at {up}");
    }

    fn arc_hidden(&self, arc: ArcId) {
        trace!("arc {arc} hidden");
    }

    fn arc_fused(&self, kept: ArcId, absorbed: ArcId) {
        trace!("arc {absorbed} fused into {kept}");
    }
}
