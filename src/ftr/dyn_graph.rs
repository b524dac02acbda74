//! Dynamic connectivity over virtual edges.
//!
//! The preimage of a sweep front is a set of curves crossing mesh edges. Each
//! crossed mesh edge is a node of a [`DynGraph`]; every triangle currently cut
//! by the front contributes one virtual edge joining two of its mesh edges.
//! Connected components of this graph are the connected pieces of the front.
//!
//! The forest is stored with parent pointers and kept as a maximum spanning
//! forest: the weight of a virtual edge is the key of the vertex at which the
//! sweep will remove it, so the lightest edge of a cycle is always removed
//! first and a removal never needs a replacement edge.
//!
//! Each tree carries an optional arc tag on its root, so the arc that owns a
//! piece of the front can be recovered from any of its edges.
//!
//! Nodes count their forest edges. Once the sweep has passed both ends of a
//! mesh edge it has no virtual edge left and is [released](DynGraph::release),
//! so the structure only ever holds the live level set.

use hashbrown::HashMap;
use std::collections::BTreeSet;

use crate::topology::ids::{ArcId, EdgeId};

/// Opaque name of a connected component, valid until the next mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentHandle(EdgeId);

impl ComponentHandle {
    /// The mesh edge at the root of the component.
    pub fn root(self) -> EdgeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DynNode {
    parent: Option<EdgeId>,
    /// Weight of the edge to `parent`.
    weight: i64,
    /// Only meaningful on roots.
    arc: Option<ArcId>,
    /// Forest edges touching this node, the one to `parent` included.
    degree: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DynGraph {
    nodes: HashMap<EdgeId, DynNode>,
}

impl DynGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mesh edges known to the structure.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, e: EdgeId) -> bool {
        self.nodes.contains_key(&e)
    }

    /// Mesh edges known to the structure, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.nodes.keys().copied()
    }

    /// How many of `edges` are known to the structure.
    pub fn count_present(&self, edges: &[EdgeId]) -> usize {
        edges.iter().filter(|e| self.nodes.contains_key(*e)).count()
    }

    fn root_of(&self, mut e: EdgeId) -> EdgeId {
        while let Some(p) = self.nodes.get(&e).and_then(|n| n.parent) {
            e = p;
        }
        e
    }

    /// Component of a single edge. Unknown edges are their own component.
    #[inline]
    pub fn component(&self, e: EdgeId) -> ComponentHandle {
        ComponentHandle(self.root_of(e))
    }

    /// Distinct components reached from `edges`.
    pub fn find_root<'e, I>(&self, edges: I) -> BTreeSet<ComponentHandle>
    where
        I: IntoIterator<Item = &'e EdgeId>,
    {
        edges.into_iter().map(|&e| self.component(e)).collect()
    }

    /// `true` when `a` and `b` are joined by a forest edge.
    pub fn has_edge(&self, a: EdgeId, b: EdgeId) -> bool {
        let parent = |x: EdgeId| self.nodes.get(&x).and_then(|n| n.parent);
        parent(a) == Some(b) || parent(b) == Some(a)
    }

    /// Inserts the virtual edge `(a, b)`.
    ///
    /// When `a` and `b` are already connected, the lightest edge of the tree
    /// path is swapped out if it is lighter than `weight`; otherwise nothing
    /// changes. Returns whether a forest edge was inserted.
    pub fn insert_edge(&mut self, a: EdgeId, b: EdgeId, weight: i64) -> bool {
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.nodes.entry(a).or_default();
        self.nodes.entry(b).or_default();
        if self.root_of(a) != self.root_of(b) {
            self.link(a, b, weight);
            return true;
        }
        match self.lightest_on_path(a, b) {
            Some((child, w)) if w < weight => {
                self.cut(child);
                self.link(a, b, weight);
                true
            }
            _ => false,
        }
    }

    /// Removes the forest edge `(a, b)` if present.
    pub fn remove_edge(&mut self, a: EdgeId, b: EdgeId) -> bool {
        let parent = |x: EdgeId| self.nodes.get(&x).and_then(|n| n.parent);
        if parent(a) == Some(b) {
            self.cut(a);
            true
        } else if parent(b) == Some(a) {
            self.cut(b);
            true
        } else {
            false
        }
    }

    /// Forgets `e` when no forest edge touches it. Returns whether it was
    /// dropped.
    pub fn release(&mut self, e: EdgeId) -> bool {
        match self.nodes.get(&e) {
            Some(node) if node.degree == 0 => {
                self.nodes.remove(&e);
                true
            }
            _ => false,
        }
    }

    /// Tags the component of `e` with `arc`. Creates `e` if unknown.
    pub fn set_subtree_arc(&mut self, e: EdgeId, arc: ArcId) {
        self.nodes.entry(e).or_default();
        let root = self.root_of(e);
        if let Some(node) = self.nodes.get_mut(&root) {
            node.arc = Some(arc);
        }
    }

    /// Arc tag of the component of `e`.
    pub fn get_subtree_arc(&self, e: EdgeId) -> Option<ArcId> {
        self.nodes.get(&self.root_of(e)).and_then(|n| n.arc)
    }

    /// Moves every node of `other` into `self`. Node sets are expected to be
    /// disjoint; on a clash the entry already in `self` wins.
    pub fn absorb(&mut self, mut other: DynGraph) {
        if other.nodes.len() > self.nodes.len() {
            std::mem::swap(&mut self.nodes, &mut other.nodes);
        }
        for (e, node) in other.nodes {
            self.nodes.entry(e).or_insert(node);
        }
    }

    /// Moves the trees rooted in each of `parts` into a structure of their
    /// own, in a single pass over the nodes. Trees named by no part stay in
    /// `self`; a tree named by several parts goes to the first one.
    pub fn split_into(&mut self, parts: &[BTreeSet<ComponentHandle>]) -> Vec<DynGraph> {
        let mut part_of: HashMap<EdgeId, usize> = HashMap::new();
        for (i, part) in parts.iter().enumerate() {
            for c in part {
                part_of.entry(c.root()).or_insert(i);
            }
        }
        let moving: Vec<(EdgeId, usize)> = self
            .roots()
            .into_iter()
            .filter_map(|(e, root)| part_of.get(&root).map(|&i| (e, i)))
            .collect();
        let mut out = vec![DynGraph::new(); parts.len()];
        for (e, i) in moving {
            if let Some(node) = self.nodes.remove(&e) {
                out[i].nodes.insert(e, node);
            }
        }
        out
    }

    /// Root of every node, each parent chain walked once.
    fn roots(&self) -> HashMap<EdgeId, EdgeId> {
        let mut root: HashMap<EdgeId, EdgeId> = HashMap::with_capacity(self.nodes.len());
        let mut path = Vec::new();
        for &start in self.nodes.keys() {
            let mut cur = start;
            let r = loop {
                if let Some(&r) = root.get(&cur) {
                    break r;
                }
                match self.nodes.get(&cur).and_then(|n| n.parent) {
                    Some(p) => {
                        path.push(cur);
                        cur = p;
                    }
                    None => break cur,
                }
            };
            root.insert(cur, r);
            for e in path.drain(..) {
                root.insert(e, r);
            }
        }
        root
    }

    /// Makes `x` the root of its tree, carrying the root's arc tag along.
    fn evert(&mut self, x: EdgeId) {
        let old_root = self.root_of(x);
        if old_root == x {
            return;
        }
        let tag = self.nodes.get_mut(&old_root).and_then(|n| n.arc.take());
        let mut prev: Option<EdgeId> = None;
        let mut prev_weight = 0;
        let mut cur = Some(x);
        while let Some(c) = cur {
            let Some(node) = self.nodes.get_mut(&c) else {
                break;
            };
            let next = node.parent;
            let w = node.weight;
            node.parent = prev;
            node.weight = prev_weight;
            prev = Some(c);
            prev_weight = w;
            cur = next;
        }
        if let Some(node) = self.nodes.get_mut(&x) {
            node.arc = tag;
        }
    }

    /// Hangs the tree of `a` below `b`. The merged tree keeps `b`'s tag, or
    /// `a`'s when `b`'s tree has none.
    fn link(&mut self, a: EdgeId, b: EdgeId, weight: i64) {
        self.evert(a);
        let mut tag = None;
        if let Some(node) = self.nodes.get_mut(&a) {
            node.parent = Some(b);
            node.weight = weight;
            node.degree += 1;
            tag = node.arc.take();
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.degree += 1;
        }
        let root = self.root_of(b);
        if let Some(node) = self.nodes.get_mut(&root) {
            node.arc = node.arc.or(tag);
        }
    }

    /// Detaches `child` from its parent; both halves keep the tag.
    fn cut(&mut self, child: EdgeId) {
        let tag = self.nodes.get(&self.root_of(child)).and_then(|n| n.arc);
        let mut parent = None;
        if let Some(node) = self.nodes.get_mut(&child) {
            parent = node.parent.take();
            if parent.is_some() {
                node.degree = node.degree.saturating_sub(1);
            }
            node.weight = 0;
            node.arc = tag;
        }
        if let Some(node) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            node.degree = node.degree.saturating_sub(1);
        }
    }

    /// Lightest forest edge on the path between `a` and `b`, named by its
    /// child endpoint. `None` when the path is empty or does not exist.
    fn lightest_on_path(&self, a: EdgeId, b: EdgeId) -> Option<(EdgeId, i64)> {
        let mut depth_a: HashMap<EdgeId, usize> = HashMap::new();
        let mut chain_a = Vec::new();
        let mut cur = Some(a);
        while let Some(c) = cur {
            depth_a.insert(c, chain_a.len());
            chain_a.push(c);
            cur = self.nodes.get(&c).and_then(|n| n.parent);
        }

        let mut best: Option<(EdgeId, i64)> = None;
        let consider = |child: EdgeId, best: &mut Option<(EdgeId, i64)>| {
            if let Some(node) = self.nodes.get(&child) {
                if best.is_none_or(|(_, w)| node.weight < w) {
                    *best = Some((child, node.weight));
                }
            }
        };

        let mut cur = Some(b);
        let meet = loop {
            let c = cur?;
            if let Some(&d) = depth_a.get(&c) {
                break d;
            }
            consider(c, &mut best);
            cur = self.nodes.get(&c).and_then(|n| n.parent);
        };
        for &c in &chain_a[..meet] {
            consider(c, &mut best);
        }
        best
    }
}
