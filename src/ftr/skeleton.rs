//! Shared Reeb graph skeleton.
//!
//! The [`Skeleton`] is written concurrently by every growing front. Nodes and
//! arcs live in `DashMap`s with ids handed out by atomic counters; per-vertex
//! state (visit tags, valence counters) lives in dense vectors sized by the
//! mesh. Arcs are never removed: an arc that turns out to be useless is
//! hidden and keeps its id, and an arc fused into another one forwards to it.

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ftr::group::GroupForest;
use crate::ftr::propagation::Propagation;
use crate::ftr::valence::ValenceCounter;
use crate::topology::ids::{ArcId, NodeId, PropagationId, VertexId};
use crate::topology::scalar::ScalarOrder;

/// Critical point of the skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub vertex: VertexId,
    /// Arcs closed at this node.
    pub incoming: Vec<ArcId>,
    /// Arcs opened at this node.
    pub outgoing: Vec<ArcId>,
}

impl Node {
    fn new(vertex: VertexId) -> Self {
        Self {
            vertex,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperArc {
    pub down: Option<NodeId>,
    /// `None` while the arc is still growing.
    pub up: Option<NodeId>,
    /// Grown by an ascending front.
    pub from_up: bool,
    pub hidden: bool,
    /// Front that opened the arc.
    pub propagation: PropagationId,
    /// Arc this one was fused into; set on hidden arcs only.
    pub fused_into: Option<ArcId>,
}

impl SuperArc {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.up.is_none()
    }
}

#[derive(Debug)]
pub struct Skeleton {
    nodes: DashMap<NodeId, Node>,
    node_of_vertex: DashMap<VertexId, NodeId>,
    arcs: DashMap<ArcId, SuperArc>,
    visits: Vec<Mutex<Vec<ArcId>>>,
    val_up: Vec<ValenceCounter>,
    val_down: Vec<ValenceCounter>,
    next_node: AtomicUsize,
    next_arc: AtomicUsize,
}

impl Skeleton {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            nodes: DashMap::new(),
            node_of_vertex: DashMap::new(),
            arcs: DashMap::new(),
            visits: (0..vertex_count).map(|_| Mutex::new(Vec::new())).collect(),
            val_up: (0..vertex_count).map(|_| ValenceCounter::new()).collect(),
            val_down: (0..vertex_count).map(|_| ValenceCounter::new()).collect(),
            next_node: AtomicUsize::new(0),
            next_arc: AtomicUsize::new(0),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.visits.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Node of `v`, created on first request. Concurrent callers for the
    /// same vertex all get the same node.
    pub fn make_node(&self, v: VertexId) -> NodeId {
        if let Some(id) = self.node_of_vertex.get(&v) {
            return *id;
        }
        *self.node_of_vertex.entry(v).or_insert_with(|| {
            let id = NodeId::new(self.next_node.fetch_add(1, Ordering::Relaxed));
            self.nodes.insert(id, Node::new(v));
            id
        })
    }

    pub fn node_id(&self, v: VertexId) -> Option<NodeId> {
        self.node_of_vertex.get(&v).map(|id| *id)
    }

    pub fn is_node(&self, v: VertexId) -> bool {
        self.node_of_vertex.contains_key(&v)
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(&id).map(|n| n.clone())
    }

    pub fn node_vertex(&self, id: NodeId) -> Option<VertexId> {
        self.nodes.get(&id).map(|n| n.vertex)
    }

    pub fn arc(&self, id: ArcId) -> Option<SuperArc> {
        self.arcs.get(&id).map(|a| *a)
    }

    /// Opens an arc at `down` on behalf of `propagation`.
    pub fn open_arc<S>(&self, down: NodeId, propagation: &Propagation<'_, S>) -> ArcId
    where
        S: ScalarOrder + ?Sized,
    {
        let id = ArcId::new(self.next_arc.fetch_add(1, Ordering::Relaxed));
        self.arcs.insert(
            id,
            SuperArc {
                down: Some(down),
                up: None,
                from_up: propagation.go_up(),
                hidden: false,
                propagation: propagation.id(),
                fused_into: None,
            },
        );
        if let Some(mut node) = self.nodes.get_mut(&down) {
            node.outgoing.push(id);
        }
        id
    }

    pub fn close_arc(&self, arc: ArcId, up: NodeId) {
        if let Some(mut a) = self.arcs.get_mut(&arc) {
            a.up = Some(up);
        }
        if let Some(mut node) = self.nodes.get_mut(&up) {
            node.incoming.push(arc);
        }
    }

    pub fn hide_arc(&self, arc: ArcId) {
        if let Some(mut a) = self.arcs.get_mut(&arc) {
            a.hidden = true;
        }
    }

    /// Joins two open arcs grown towards each other: `keep` is closed at the
    /// down node of `absorbed`, which is hidden and forwards to `keep`.
    /// Returns the node `keep` now ends at.
    pub fn fuse(&self, keep: ArcId, absorbed: ArcId) -> Option<NodeId> {
        let up = self.arc(absorbed)?.down?;
        self.close_arc(keep, up);
        if let Some(mut a) = self.arcs.get_mut(&absorbed) {
            a.hidden = true;
            a.fused_into = Some(keep);
        }
        Some(up)
    }

    /// Arc standing for `arc` once fusions are followed.
    pub fn resolve(&self, mut arc: ArcId) -> ArcId {
        while let Some(next) = self.arc(arc).and_then(|a| a.fused_into) {
            arc = next;
        }
        arc
    }

    /// Tags `v` as swept by `arc`.
    pub fn visit(&self, v: VertexId, arc: ArcId) {
        let mut tags = self.visits[v].lock();
        if !tags.contains(&arc) {
            tags.push(arc);
        }
    }

    /// Arcs that swept `v`, hidden ones included.
    pub fn visits(&self, v: VertexId) -> Vec<ArcId> {
        self.visits[v].lock().clone()
    }

    /// `true` when an arc grown by the group `rpz` already swept `v`.
    pub fn has_visited(&self, v: VertexId, rpz: PropagationId, groups: &GroupForest) -> bool {
        let tags = self.visits(v);
        tags.iter().any(|a| {
            self.arc(*a)
                .is_some_and(|arc| groups.find(arc.propagation) == rpz)
        })
    }

    /// Visible arcs closed at `node`, the branches a join saddle merges.
    pub fn merge_at_saddle(&self, node: NodeId) -> Vec<ArcId> {
        let Some(incoming) = self.nodes.get(&node).map(|n| n.incoming.clone()) else {
            return Vec::new();
        };
        let mut merged: Vec<ArcId> = incoming
            .into_iter()
            .filter(|a| self.arc(*a).is_some_and(|arc| !arc.hidden))
            .collect();
        merged.sort_unstable();
        merged.dedup();
        merged
    }

    /// Counter of the lower star of `v`, used by ascending fronts.
    #[inline]
    pub fn val_down(&self, v: VertexId) -> &ValenceCounter {
        &self.val_down[v]
    }

    /// Counter of the upper star of `v`, used by descending fronts.
    #[inline]
    pub fn val_up(&self, v: VertexId) -> &ValenceCounter {
        &self.val_up[v]
    }

    /// Every arc, sorted by id.
    pub fn arcs(&self) -> Vec<(ArcId, SuperArc)> {
        let mut out: Vec<_> = self.arcs.iter().map(|e| (*e.key(), *e.value())).collect();
        out.sort_unstable_by_key(|(id, _)| *id);
        out
    }

    /// Every node, sorted by id.
    pub fn nodes(&self) -> Vec<(NodeId, Node)> {
        let mut out: Vec<_> = self
            .nodes
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        out.sort_unstable_by_key(|(id, _)| *id);
        out
    }
}
