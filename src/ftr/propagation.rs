//! A single sweep front.
//!
//! A [`Propagation`] owns everything a front needs to advance without
//! touching shared state: its pending vertices in sweep order, the vertex it
//! is currently on, and the private connectivity structure of its preimage.
//! It moves between tasks by value; merging fronts absorb each other.

use std::collections::BTreeSet;
use std::fmt;

use crate::ftr::config::SweepDirection;
use crate::ftr::dyn_graph::DynGraph;
use crate::ftr::group::GroupForest;
use crate::ftr::ordering::{Sweep, SweepOrder};
use crate::topology::ids::{PropagationId, VertexId};
use crate::topology::scalar::ScalarOrder;

pub struct Propagation<'a, S: ?Sized> {
    id: PropagationId,
    sweep: Sweep<'a, S>,
    /// `(key, vertex)`, smallest key popped first.
    queue: BTreeSet<(i64, VertexId)>,
    current: Option<VertexId>,
    preimage: DynGraph,
}

impl<'a, S: ScalarOrder + ?Sized> Propagation<'a, S> {
    /// Front about to start at `seed`; the seed is its first pending vertex.
    pub fn new(id: PropagationId, seed: VertexId, sweep: Sweep<'a, S>) -> Self {
        let mut p = Self::branch(id, seed, sweep, DynGraph::new());
        p.add_new_vertex(seed);
        p
    }

    /// Front continuing from `origin` with an inherited preimage and no
    /// pending vertices yet.
    pub fn branch(
        id: PropagationId,
        origin: VertexId,
        sweep: Sweep<'a, S>,
        preimage: DynGraph,
    ) -> Self {
        Self {
            id,
            sweep,
            queue: BTreeSet::new(),
            current: Some(origin),
            preimage,
        }
    }

    #[inline]
    pub fn id(&self) -> PropagationId {
        self.id
    }

    /// Representative of this front's group.
    #[inline]
    pub fn rpz(&self, groups: &GroupForest) -> PropagationId {
        groups.find(self.id)
    }

    #[inline]
    pub fn sweep(&self) -> Sweep<'a, S> {
        self.sweep
    }

    #[inline]
    pub fn go_up(&self) -> bool {
        self.sweep.direction().is_up()
    }

    #[inline]
    pub fn go_down(&self) -> bool {
        !self.go_up()
    }

    pub fn direction(&self) -> SweepDirection {
        self.sweep.direction()
    }

    /// `true` when this front meets `a` strictly before `b`.
    #[inline]
    pub fn compare(&self, a: VertexId, b: VertexId) -> bool {
        self.sweep.precedes(a, b)
    }

    /// Pops the next pending vertex and makes it current.
    pub fn next_vertex(&mut self) -> Option<VertexId> {
        let (_, v) = self.queue.pop_first()?;
        self.current = Some(v);
        Some(v)
    }

    /// Next pending vertex, without popping it.
    pub fn peek_vertex(&self) -> Option<VertexId> {
        self.queue.first().map(|&(_, v)| v)
    }

    #[inline]
    pub fn current_vertex(&self) -> Option<VertexId> {
        self.current
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending vertices.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Enqueues `v`; returns `false` when it was already pending.
    pub fn add_new_vertex(&mut self, v: VertexId) -> bool {
        self.queue.insert((self.sweep.key(v), v))
    }

    /// Drops `v` from the pending vertices; returns whether it was pending.
    pub fn remove_duplicates(&mut self, v: VertexId) -> bool {
        self.queue.remove(&(self.sweep.key(v), v))
    }

    /// Pending vertices in sweep order.
    pub fn pending(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.queue.iter().map(|&(_, v)| v)
    }

    /// Empties the queue, returning the pending vertices in sweep order.
    pub fn drain_pending(&mut self) -> Vec<VertexId> {
        std::mem::take(&mut self.queue)
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    }

    #[inline]
    pub fn preimage(&self) -> &DynGraph {
        &self.preimage
    }

    #[inline]
    pub fn preimage_mut(&mut self) -> &mut DynGraph {
        &mut self.preimage
    }

    /// Takes the preimage out, leaving an empty one.
    pub fn take_preimage(&mut self) -> DynGraph {
        std::mem::take(&mut self.preimage)
    }

    /// Merges `other` into this front: pending vertices and preimage. Group
    /// membership is the caller's business.
    pub fn absorb(&mut self, mut other: Propagation<'a, S>) {
        if other.queue.len() > self.queue.len() {
            std::mem::swap(&mut self.queue, &mut other.queue);
        }
        self.queue.append(&mut other.queue);
        self.preimage.absorb(other.preimage);
    }
}

impl<S: ?Sized> fmt::Debug for Propagation<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Propagation")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("pending", &self.queue.len())
            .field("preimage", &self.preimage.len())
            .finish()
    }
}

impl<S: ?Sized> fmt::Display for Propagation<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prop#{} [", self.id)?;
        for (i, (_, v)) in self.queue.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::scalar::ScalarField;

    fn field() -> ScalarField<f64> {
        ScalarField::new(vec![3.0, 0.0, 2.0, 1.0, 2.0]).unwrap()
    }

    #[test]
    fn pops_in_sweep_order_without_duplicates() {
        let f = field();
        let mut p = Propagation::new(
            PropagationId::new(0),
            1,
            Sweep::new(&f, SweepDirection::Ascending),
        );
        assert!(p.add_new_vertex(0));
        assert!(p.add_new_vertex(4));
        assert!(p.add_new_vertex(2));
        assert!(!p.add_new_vertex(4));
        assert!(p.add_new_vertex(3));
        assert_eq!(p.peek_vertex(), Some(1));
        let order: Vec<_> = std::iter::from_fn(|| p.next_vertex()).collect();
        assert_eq!(order, vec![1, 3, 2, 4, 0]);
        assert_eq!(p.current_vertex(), Some(0));
        assert!(p.is_empty());
    }

    #[test]
    fn descending_and_removal() {
        let f = field();
        let mut p = Propagation::new(
            PropagationId::new(0),
            0,
            Sweep::new(&f, SweepDirection::Descending),
        );
        p.add_new_vertex(2);
        p.add_new_vertex(1);
        assert!(p.go_down());
        assert!(p.compare(2, 1));
        assert!(p.remove_duplicates(2));
        assert!(!p.remove_duplicates(2));
        assert_eq!(p.to_string(), "prop#0 [0 1]");
    }

    #[test]
    fn absorb_merges_queues_and_preimages() {
        let f = field();
        let sweep = Sweep::new(&f, SweepDirection::Ascending);
        let mut a = Propagation::new(PropagationId::new(0), 1, sweep);
        let mut b = Propagation::new(PropagationId::new(1), 3, sweep);
        a.add_new_vertex(2);
        b.add_new_vertex(2);
        b.add_new_vertex(0);
        a.preimage_mut().insert_edge(1, 2, 0);
        b.preimage_mut().insert_edge(5, 6, 0);
        a.absorb(b);
        assert_eq!(a.id(), PropagationId::new(0));
        assert_eq!(a.drain_pending(), vec![1, 3, 2, 0]);
        assert_eq!(a.preimage().len(), 4);
    }
}
