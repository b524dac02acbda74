//! Propagation groups.
//!
//! This module provides [`GroupForest`], a concurrent union-find over
//! propagation ids. Fronts that merge at a join saddle are united so that the
//! arcs they grew before the merge are recognised as belonging to the merged
//! front (see `Skeleton::has_visited`).

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ftr_error::FtrError;
use crate::topology::ids::PropagationId;

/// Union-find over a fixed pool of propagation ids, plus the allocator for
/// those ids.
///
/// Unions are only performed on groups whose fronts are all parked, so a
/// concurrent `find` on another thread may see either the old or the new
/// root of those groups but never a root of an unrelated group.
#[derive(Debug)]
pub struct GroupForest {
    parents: Vec<AtomicUsize>,
    next: AtomicUsize,
}

impl GroupForest {
    /// Forest able to address `capacity` propagations, each its own group.
    pub fn new(capacity: usize) -> Self {
        let parents = (0..capacity).map(AtomicUsize::new).collect();
        Self {
            parents,
            next: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.parents.len()
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> usize {
        self.next.load(Ordering::Relaxed).min(self.capacity())
    }

    /// Hands out a fresh propagation id.
    pub fn allocate(&self) -> Result<PropagationId, FtrError> {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        if id >= self.capacity() {
            return Err(FtrError::PoolExhausted {
                capacity: self.capacity(),
            });
        }
        Ok(PropagationId::new(id))
    }

    #[inline]
    fn get(&self, idx: usize) -> usize {
        self.parents[idx].load(Ordering::Acquire)
    }

    #[inline]
    fn set(&self, idx: usize, val: usize) {
        self.parents[idx].store(val, Ordering::Release)
    }

    /// Representative of the group of `id`, with path compression.
    pub fn find(&self, id: PropagationId) -> PropagationId {
        let mut root = id.get();
        while root != self.get(root) {
            root = self.get(root);
        }
        let mut cur = id.get();
        while cur != root {
            let parent = self.get(cur);
            self.set(cur, root);
            cur = parent;
        }
        PropagationId::new(root)
    }

    /// Merges the groups of `a` and `b`, returns the new representative.
    pub fn union(&self, a: PropagationId, b: PropagationId) -> PropagationId {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.set(small.get(), big.get());
        big
    }

    #[inline]
    pub fn same_group(&self, a: PropagationId, b: PropagationId) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(i: usize) -> PropagationId {
        PropagationId::new(i)
    }

    #[test]
    fn union_find_basic() {
        let uf = GroupForest::new(5);
        for i in 0..5 {
            assert_eq!(uf.find(pid(i)), pid(i));
        }
        let r = uf.union(pid(1), pid(2));
        assert_eq!(uf.find(pid(1)), r);
        assert_eq!(uf.find(pid(2)), r);
        let r2 = uf.union(pid(2), pid(3));
        assert_eq!(uf.find(pid(3)), r2);
        assert_eq!(uf.find(pid(1)), r2);
        assert!(uf.same_group(pid(1), pid(3)));
        assert!(!uf.same_group(pid(0), pid(3)));
    }

    #[test]
    fn allocation_is_bounded() {
        let uf = GroupForest::new(2);
        assert_eq!(uf.allocate().unwrap(), pid(0));
        assert_eq!(uf.allocate().unwrap(), pid(1));
        assert_eq!(
            uf.allocate().unwrap_err(),
            FtrError::PoolExhausted { capacity: 2 }
        );
        assert_eq!(uf.allocated(), 2);
    }
}
