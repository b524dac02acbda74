//! FTR orchestrator: concurrent growth of Reeb graph arcs.
//!
//! The vertex set is cut at a meeting level (the median rank by default).
//! Every local minimum below it seeds an ascending front and every local
//! maximum above it a descending one; all of them grow at once. Each front
//! pops vertices in its own sweep order, never crosses the meeting level,
//! keeps the connectivity of its preimage up to date and watches the number
//! of preimage components around the vertex it is on:
//!
//! - more than one component in the lower star: a join. Every front reaching
//!   the saddle closes its arc there and parks; the last one (decided by the
//!   saddle's [`ValenceCounter`](crate::ftr::valence::ValenceCounter))
//!   absorbs the parked fronts and continues with a fresh arc.
//! - more than one component in the upper star: a split. The front hands
//!   each component, with the pending vertices it reaches, to a new front.
//! - empty queue: the arc ends at the last vertex swept, unless the front
//!   still crosses the meeting level. Such arcs stay open until every front
//!   has stopped; each piece of the meeting level is then crossed by one
//!   ascending and one descending arc, and the two are fused.
//!
//! Growth steps are rayon tasks spawned on one scope; continuations after a
//! join or a split are spawned as new tasks instead of recursing.

use dashmap::DashMap;
use hashbrown::HashMap;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::debug_invariants::DebugInvariants;
use crate::ftr::config::{FtrConfig, SweepDirection, SweepMode};
use crate::ftr::dyn_graph::ComponentHandle;
use crate::ftr::group::GroupForest;
use crate::ftr::observer::{GrowthObserver, NoopObserver};
use crate::ftr::ordering::{
    Sweep, SweepOrder, VertexPosition, ordered_edge, ordered_triangle, vertex_position, weight,
};
use crate::ftr::output::{Diagnostic, ReebGraph};
use crate::ftr::propagation::Propagation;
use crate::ftr::skeleton::Skeleton;
use crate::ftr_error::FtrError;
use crate::topology::ids::{ArcId, EdgeId, NodeId, PropagationId, VertexId};
use crate::topology::mesh::TriangulatedMesh;
use crate::topology::scalar::ScalarOrder;

const UNCLAIMED: usize = usize::MAX;

/// A unit of work: grow one arc from `seed`.
struct Growth<'a, S: ?Sized> {
    seed: VertexId,
    propagation: Propagation<'a, S>,
    /// Arc already opened at `seed`, if any.
    arc: Option<ArcId>,
}

/// Arc whose front ran out of vertices on its side of the meeting level.
#[derive(Debug)]
struct Boundary {
    arc: ArcId,
    ascending: bool,
    /// Mesh edges crossing the meeting level, sorted.
    edges: Vec<EdgeId>,
}

/// Reeb graph builder for one mesh and one scalar field.
pub struct FtrGraph<'a, M: ?Sized, S: ?Sized> {
    mesh: &'a M,
    scalars: &'a S,
    config: FtrConfig,
    /// Ascending fronts sweep the vertices whose mirror is at most this,
    /// descending fronts the others.
    split_rank: i64,
    skeleton: Skeleton,
    groups: GroupForest,
    /// Last front that enqueued each vertex. A hint only.
    claims: Vec<AtomicUsize>,
    parked: DashMap<VertexId, Vec<Propagation<'a, S>>>,
    boundary: Mutex<Vec<Boundary>>,
    diagnostics: Mutex<Vec<Diagnostic>>,
    failures: Mutex<Vec<FtrError>>,
    observer: Arc<dyn GrowthObserver>,
}

impl<'a, M, S> FtrGraph<'a, M, S>
where
    M: TriangulatedMesh + ?Sized,
    S: ScalarOrder + ?Sized,
{
    pub fn new(mesh: &'a M, scalars: &'a S, config: FtrConfig) -> Result<Self, FtrError> {
        let n = mesh.vertex_count();
        if scalars.vertex_count() != n {
            return Err(FtrError::ScalarLengthMismatch {
                expected: n,
                found: scalars.vertex_count(),
            });
        }
        // seeds plus at most one front per upper-star edge at splits
        let capacity = n + mesh.edge_count() + 1;
        let split_rank = match config.mode {
            SweepMode::Both => median_mirror(scalars),
            SweepMode::Ascending => i64::MAX,
            SweepMode::Descending => i64::MIN,
        };
        Ok(Self {
            mesh,
            scalars,
            config,
            split_rank,
            skeleton: Skeleton::new(n),
            groups: GroupForest::new(capacity),
            claims: (0..n).map(|_| AtomicUsize::new(UNCLAIMED)).collect(),
            parked: DashMap::new(),
            boundary: Mutex::new(Vec::new()),
            diagnostics: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            observer: Arc::new(NoopObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn GrowthObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &FtrConfig {
        &self.config
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[inline]
    fn sweep(&self, direction: SweepDirection) -> Sweep<'a, S> {
        Sweep::new(self.scalars, direction)
    }

    /// `true` when `v` is on the side of the meeting level swept by fronts
    /// going in `direction`.
    #[inline]
    fn within(&self, v: VertexId, direction: SweepDirection) -> bool {
        (self.scalars.mirror(v) <= self.split_rank) == direction.is_up()
    }

    /// Vertices met before all their neighbours by a front allowed to sweep
    /// them: local minima below the meeting level seed ascending fronts,
    /// local maxima above it descending ones. Isolated vertices are skipped.
    pub fn leaf_search(&self) -> Vec<(VertexId, SweepDirection)> {
        (0..self.mesh.vertex_count())
            .into_par_iter()
            .filter_map(|v| {
                let nbrs = self.mesh.vertex_neighbors(v);
                if nbrs.is_empty() {
                    return None;
                }
                [SweepDirection::Ascending, SweepDirection::Descending]
                    .into_iter()
                    .find(|&direction| {
                        let sweep = self.sweep(direction);
                        self.within(v, direction) && nbrs.iter().all(|&u| sweep.precedes(v, u))
                    })
                    .map(|direction| (v, direction))
            })
            .collect()
    }

    /// Grows every arc and assembles the Reeb graph.
    pub fn build(self) -> Result<ReebGraph, FtrError> {
        let seeds = self.leaf_search();
        let ascending = seeds.iter().filter(|(_, d)| d.is_up()).count();
        info!(
            "ftr: {} vertices, {} seeds ({} ascending, {} descending), {:?} sweep",
            self.mesh.vertex_count(),
            seeds.len(),
            ascending,
            seeds.len() - ascending,
            self.config.mode
        );
        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| FtrError::ThreadPool(e.to_string()))?;
                pool.install(|| self.grow_all(&seeds))?;
            }
            None => self.grow_all(&seeds)?,
        }
        self.finish()
    }

    fn seed_tasks(
        &self,
        seeds: &[(VertexId, SweepDirection)],
    ) -> Result<Vec<Growth<'a, S>>, FtrError> {
        let mut tasks = Vec::with_capacity(seeds.len());
        for &(seed, direction) in seeds {
            let id = self.groups.allocate()?;
            self.claims[seed].store(id.get(), Ordering::Relaxed);
            tasks.push(Growth {
                seed,
                propagation: Propagation::new(id, seed, self.sweep(direction)),
                arc: None,
            });
        }
        Ok(tasks)
    }

    fn grow_all(&self, seeds: &[(VertexId, SweepDirection)]) -> Result<(), FtrError> {
        let tasks = self.seed_tasks(seeds)?;
        rayon::scope(|scope| {
            for task in tasks {
                scope.spawn(move |s| self.execute(s, task));
            }
        });
        match self.failures.lock().first() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn execute<'s>(&'s self, scope: &rayon::Scope<'s>, task: Growth<'a, S>) {
        match self.grow(task) {
            Ok(next) => {
                for task in next {
                    scope.spawn(move |s| self.execute(s, task));
                }
            }
            Err(e) => {
                error!("ftr: growth aborted: {e}");
                self.failures.lock().push(e);
            }
        }
    }

    fn finish(self) -> Result<ReebGraph, FtrError> {
        self.stitch_boundaries();
        let mut diagnostics = self.diagnostics.into_inner();
        for entry in self.parked.iter() {
            warn!(
                "ftr: {} fronts never released at join {}",
                entry.value().len(),
                entry.key()
            );
            diagnostics.push(Diagnostic::UnresolvedJoin {
                saddle: *entry.key(),
                fronts: entry.value().len(),
            });
        }
        let graph = ReebGraph::from_skeleton(
            &self.skeleton,
            self.scalars,
            self.config.segmentation,
            diagnostics,
        );
        info!(
            "ftr: {} nodes, {} arcs, {} diagnostics",
            graph.nodes().len(),
            graph.arcs().len(),
            graph.diagnostics().len()
        );
        if self.config.check_invariants {
            graph.validate_invariants()?;
        }
        Ok(graph)
    }

    /// Grows one arc from `task.seed` until the queue empties or a saddle
    /// hands the front over. Returns the continuations to schedule.
    fn grow(&self, task: Growth<'a, S>) -> Result<Vec<Growth<'a, S>>, FtrError> {
        let Growth {
            seed,
            mut propagation,
            arc,
        } = task;
        self.observer.growth_started(seed, propagation.id());

        if let Some(next) = propagation.peek_vertex() {
            if self.check_already_attached(seed, next, &propagation) {
                debug!("prop#{}: {seed} already attached", propagation.id());
                if let Some(arc) = arc {
                    self.hide_arc(arc);
                }
                return Ok(Vec::new());
            }
        }

        let down = self.skeleton.make_node(seed);
        let current_arc = match arc {
            Some(arc) => arc,
            None => self.open_arc(down, &propagation),
        };
        self.visit(seed, current_arc);
        let mut last = seed;

        while let Some(v) = propagation.next_vertex() {
            if v != seed
                && self
                    .skeleton
                    .has_visited(v, propagation.rpz(&self.groups), &self.groups)
            {
                continue;
            }
            let (lower, upper) = self.visit_star(v, propagation.sweep());
            let owned = propagation.preimage().count_present(&lower);
            // nothing of the front reaches v: another front owns it
            if v != seed && owned == 0 {
                continue;
            }
            self.visit(v, current_arc);
            last = v;

            let mut joined = false;
            if propagation.preimage().find_root(&lower).len() > 1 {
                match self.arrive_at_join(v, propagation, current_arc, owned, lower.len()) {
                    Some(merged) => {
                        propagation = merged;
                        joined = true;
                    }
                    None => return Ok(Vec::new()),
                }
            }

            self.update_preimage(&mut propagation, v, current_arc)?;
            // every virtual edge of a lower edge lives in a triangle around v
            for &e in &lower {
                propagation.preimage_mut().release(e);
            }
            let split = propagation.preimage().find_root(&upper).len() > 1;
            if !joined || split {
                self.local_growth(&mut propagation, v);
            }
            if !joined && !split {
                continue;
            }

            let node = self.skeleton.make_node(v);
            if joined {
                if !split {
                    self.local_growth(&mut propagation, v);
                }
                self.merge_at_saddle(v, node, &mut propagation);
            } else {
                self.close_arc(current_arc, node, v);
            }
            if split {
                return self.split_at_saddle(v, node, propagation, &upper);
            }
            let arc = self.open_arc(node, &propagation);
            return Ok(vec![Growth {
                seed: v,
                propagation,
                arc: Some(arc),
            }]);
        }

        if self.reaches_boundary(&propagation) {
            self.leave_open(current_arc, &propagation);
        } else {
            self.update_reeb_graph(current_arc, last);
        }
        Ok(Vec::new())
    }

    /// Lower and upper star of `v`.
    fn visit_star(&self, v: VertexId, sweep: Sweep<'a, S>) -> (Vec<EdgeId>, Vec<EdgeId>) {
        let mut lower = Vec::new();
        let mut upper = Vec::new();
        for &e in self.mesh.vertex_edges(v) {
            if ordered_edge(self.mesh, e, &sweep).lower == v {
                upper.push(e);
            } else {
                lower.push(e);
            }
        }
        (lower, upper)
    }

    /// Tells whether an arc already reached `seed` coming from the other side
    /// of `next`, in which case growing from `seed` would duplicate it.
    fn check_already_attached(
        &self,
        seed: VertexId,
        next: VertexId,
        propagation: &Propagation<'a, S>,
    ) -> bool {
        let Some(seed_node) = self.skeleton.node_id(seed) else {
            return false;
        };
        for id in self.skeleton.visits(next) {
            let Some(arc) = self.skeleton.arc(id) else {
                continue;
            };
            if arc.hidden || arc.up != Some(seed_node) {
                continue;
            }
            match arc.down.and_then(|d| self.skeleton.node_vertex(d)) {
                Some(down_vertex) => {
                    if propagation.compare(seed, down_vertex) {
                        return true;
                    }
                }
                None => {
                    warn!("ftr: arc {id} visiting {next} has no down node");
                    self.diagnostics
                        .lock()
                        .push(Diagnostic::NullDownNode { arc: id });
                }
            }
        }
        false
    }

    /// Closes the current arc at the saddle, parks the front and registers
    /// its arrival. Returns the merged front to the last arrival only.
    fn arrive_at_join(
        &self,
        saddle: VertexId,
        propagation: Propagation<'a, S>,
        arc: ArcId,
        owned: usize,
        total: usize,
    ) -> Option<Propagation<'a, S>> {
        let node = self.skeleton.make_node(saddle);
        self.close_arc(arc, node, saddle);
        let id = propagation.id();
        let counter = if propagation.go_up() {
            self.skeleton.val_down(saddle)
        } else {
            self.skeleton.val_up(saddle)
        };
        // parked before counting so the last arrival finds every front
        self.parked.entry(saddle).or_default().push(propagation);
        if !counter.arrive(owned as i64, total as i64) {
            self.observer.join_pending(saddle, id);
            return None;
        }

        let mut fronts = self
            .parked
            .remove(&saddle)
            .map(|(_, fronts)| fronts)
            .unwrap_or_default();
        let Some(own) = fronts.iter().position(|p| p.id() == id) else {
            error!("ftr: prop#{id} lost at join {saddle}");
            return None;
        };
        let mut merged = fronts.swap_remove(own);
        let absorbed = fronts.len();
        for other in fronts {
            self.groups.union(merged.id(), other.id());
            merged.absorb(other);
        }
        debug!("ftr: join at {saddle}, prop#{id} absorbed {absorbed} fronts");
        self.observer.join_confirmed(saddle, absorbed);
        Some(merged)
    }

    fn merge_at_saddle(
        &self,
        saddle: VertexId,
        node: NodeId,
        propagation: &mut Propagation<'a, S>,
    ) {
        let merged = self.skeleton.merge_at_saddle(node);
        debug!("ftr: node {node} at {saddle} merges arcs {merged:?}");
        propagation.remove_duplicates(saddle);
    }

    /// Applies the triangle fan of `v` to the front's preimage.
    fn update_preimage(
        &self,
        propagation: &mut Propagation<'a, S>,
        v: VertexId,
        arc: ArcId,
    ) -> Result<(), FtrError> {
        let sweep = propagation.sweep();
        let preimage = propagation.preimage_mut();
        for &t in self.mesh.vertex_triangles(v) {
            let tri = ordered_triangle(self.mesh, t, &sweep);
            let position = vertex_position(&tri, v)?;
            let [e0, e1, e2] = tri.edges;
            match position {
                VertexPosition::Start => {
                    preimage.insert_edge(e0.edge, e1.edge, weight(&e0, &e1, &sweep));
                    preimage.set_subtree_arc(e1.edge, arc);
                }
                VertexPosition::Middle => {
                    preimage.remove_edge(e0.edge, e1.edge);
                    preimage.insert_edge(e1.edge, e2.edge, weight(&e1, &e2, &sweep));
                    preimage.set_subtree_arc(e2.edge, arc);
                }
                VertexPosition::End => {
                    preimage.remove_edge(e1.edge, e2.edge);
                }
            }
            self.observer.preimage_updated(v, t, position);
        }
        Ok(())
    }

    /// Enqueues the neighbours of `v` met after it on the front's side of the
    /// meeting level, unless the front's group already claimed them.
    fn local_growth(&self, propagation: &mut Propagation<'a, S>, v: VertexId) {
        let rpz = propagation.rpz(&self.groups);
        let direction = propagation.direction();
        for &n in self.mesh.vertex_neighbors(v) {
            if !propagation.compare(v, n) || !self.within(n, direction) {
                continue;
            }
            let claim = self.claims[n].load(Ordering::Acquire);
            if claim != UNCLAIMED && self.groups.find(PropagationId::new(claim)) == rpz {
                continue;
            }
            propagation.add_new_vertex(n);
            self.claims[n].store(propagation.id().get(), Ordering::Release);
        }
    }

    /// Hands every upper-star component of `saddle` to a new front.
    fn split_at_saddle(
        &self,
        saddle: VertexId,
        node: NodeId,
        mut parent: Propagation<'a, S>,
        upper: &[EdgeId],
    ) -> Result<Vec<Growth<'a, S>>, FtrError> {
        let sweep = parent.sweep();
        let parent_rpz = parent.rpz(&self.groups);

        let mut roots: Vec<ComponentHandle> = Vec::new();
        for &e in upper {
            let c = parent.preimage().component(e);
            if !roots.contains(&c) {
                roots.push(c);
            }
        }

        // pending vertices follow the components of their swept lower edges
        let mut queues: Vec<Vec<VertexId>> = vec![Vec::new(); roots.len()];
        for w in parent.drain_pending() {
            if self.skeleton.has_visited(w, parent_rpz, &self.groups) {
                continue;
            }
            let (lower, _) = self.visit_star(w, sweep);
            let mut targets: Vec<usize> = lower
                .iter()
                .filter(|&&e| parent.preimage().contains(e))
                .map(|&e| {
                    let c = parent.preimage().component(e);
                    roots.iter().position(|r| *r == c).unwrap_or(0)
                })
                .collect();
            targets.sort_unstable();
            targets.dedup();
            for i in targets {
                queues[i].push(w);
            }
        }

        let parts: Vec<BTreeSet<ComponentHandle>> =
            roots.iter().map(|r| BTreeSet::from([*r])).collect();
        let mut preimages = parent.preimage_mut().split_into(&parts);
        if !parent.preimage().is_empty() {
            debug!(
                "ftr: split {saddle}: {} stray edges go to the first branch",
                parent.preimage().len()
            );
            if let Some(first) = preimages.first_mut() {
                first.absorb(parent.take_preimage());
            }
        }

        debug!("ftr: split at {saddle} into {} branches", roots.len());
        self.observer.split_detected(saddle, roots.len());

        let mut out = Vec::with_capacity(roots.len());
        for (queue, preimage) in queues.into_iter().zip(preimages) {
            let id = self.groups.allocate()?;
            let mut branch = Propagation::branch(id, saddle, sweep, preimage);
            for w in queue {
                branch.add_new_vertex(w);
                self.claims[w].store(id.get(), Ordering::Release);
            }
            if let Some(next) = branch.peek_vertex() {
                if self.check_already_attached(saddle, next, &branch) {
                    debug!("ftr: split {saddle}: branch towards {next} already attached");
                    continue;
                }
            }
            let arc = self.open_arc(node, &branch);
            if branch.is_empty() {
                if self.reaches_boundary(&branch) {
                    self.leave_open(arc, &branch);
                    continue;
                }
                info!("ftr: split {saddle}: empty branch, arc {arc} hidden");
                self.hide_arc(arc);
                self.diagnostics
                    .lock()
                    .push(Diagnostic::EmptyBranch { saddle, arc });
                continue;
            }
            out.push(Growth {
                seed: saddle,
                propagation: branch,
                arc: Some(arc),
            });
        }
        Ok(out)
    }

    /// `true` when the front stopped on the meeting level: its preimage is
    /// not empty and every edge it still crosses leads to the other side.
    fn reaches_boundary(&self, propagation: &Propagation<'a, S>) -> bool {
        let sweep = propagation.sweep();
        let direction = propagation.direction();
        let preimage = propagation.preimage();
        !preimage.is_empty()
            && preimage
                .edges()
                .all(|e| !self.within(ordered_edge(self.mesh, e, &sweep).upper, direction))
    }

    /// Leaves `arc` open for [`Self::stitch_boundaries`].
    fn leave_open(&self, arc: ArcId, propagation: &Propagation<'a, S>) {
        let mut edges: Vec<EdgeId> = propagation.preimage().edges().collect();
        edges.sort_unstable();
        debug!(
            "ftr: prop#{}: arc {arc} stops on the meeting level across {} edges",
            propagation.id(),
            edges.len()
        );
        self.boundary.lock().push(Boundary {
            arc,
            ascending: propagation.go_up(),
            edges,
        });
    }

    /// Pairs the arcs left open on the meeting level. Arcs sharing a crossing
    /// edge cross the same piece of that level; a piece crossed by exactly
    /// one ascending and one descending arc turns them into a single arc.
    fn stitch_boundaries(&self) {
        let open = std::mem::take(&mut *self.boundary.lock());
        if open.is_empty() {
            return;
        }
        let mut link: Vec<usize> = (0..open.len()).collect();
        let mut owner: HashMap<EdgeId, usize> = HashMap::new();
        for (i, b) in open.iter().enumerate() {
            for &e in &b.edges {
                if let Some(j) = owner.insert(e, i) {
                    let (ri, rj) = (find_piece(&mut link, i), find_piece(&mut link, j));
                    link[ri] = rj;
                }
            }
        }
        let mut pieces: BTreeMap<usize, (Vec<ArcId>, Vec<ArcId>)> = BTreeMap::new();
        for (i, b) in open.iter().enumerate() {
            let piece = pieces.entry(find_piece(&mut link, i)).or_default();
            if b.ascending {
                piece.0.push(b.arc);
            } else {
                piece.1.push(b.arc);
            }
        }
        let pieces_count = pieces.len();
        for (up, down) in pieces.into_values() {
            if let ([kept], [absorbed]) = (up.as_slice(), down.as_slice()) {
                if self.skeleton.fuse(*kept, *absorbed).is_some() {
                    debug!("ftr: arc {absorbed} fused into {kept}");
                    self.observer.arc_fused(*kept, *absorbed);
                    continue;
                }
            }
            let mut arcs: Vec<ArcId> = up.into_iter().chain(down).collect();
            arcs.sort_unstable();
            warn!("ftr: arcs {arcs:?} meet without a partner");
            self.diagnostics
                .lock()
                .push(Diagnostic::UnmatchedBoundary { arcs });
        }
        debug!("ftr: {} open arcs met in {pieces_count} pieces", open.len());
    }

    /// Ends `arc` at `v`. An arc ending where it started is hidden.
    fn update_reeb_graph(&self, arc: ArcId, v: VertexId) -> NodeId {
        let node = self.skeleton.make_node(v);
        if self.skeleton.arc(arc).and_then(|a| a.down) == Some(node) {
            self.hide_arc(arc);
        } else {
            self.close_arc(arc, node, v);
        }
        node
    }

    fn open_arc(&self, down: NodeId, propagation: &Propagation<'a, S>) -> ArcId {
        let arc = self.skeleton.open_arc(down, propagation);
        if let Some(v) = self.skeleton.node_vertex(down) {
            debug!("ftr: prop#{} opens arc {arc} at {v}", propagation.id());
            self.observer.arc_opened(arc, v);
        }
        arc
    }

    fn close_arc(&self, arc: ArcId, up: NodeId, v: VertexId) {
        self.skeleton.close_arc(arc, up);
        debug!("ftr: arc {arc} closed at {v}");
        self.observer.arc_closed(arc, v);
    }

    fn hide_arc(&self, arc: ArcId) {
        self.skeleton.hide_arc(arc);
        self.observer.arc_hidden(arc);
    }

    fn visit(&self, v: VertexId, arc: ArcId) {
        self.skeleton.visit(v, arc);
        self.observer.vertex_visited(v, arc);
    }
}

fn find_piece(link: &mut [usize], mut i: usize) -> usize {
    while link[i] != i {
        link[i] = link[link[i]];
        i = link[i];
    }
    i
}

/// Mirror of the median vertex, the last one ascending fronts sweep.
fn median_mirror<S: ScalarOrder + ?Sized>(scalars: &S) -> i64 {
    let mut mirrors: Vec<i64> = (0..scalars.vertex_count())
        .map(|v| scalars.mirror(v))
        .collect();
    if mirrors.is_empty() {
        return i64::MAX;
    }
    let mid = (mirrors.len() - 1) / 2;
    *mirrors.select_nth_unstable(mid).1
}

/// Builds the Reeb graph of `scalars` over `mesh` in one call.
pub fn compute_reeb_graph<M, S>(
    mesh: &M,
    scalars: &S,
    config: FtrConfig,
) -> Result<ReebGraph, FtrError>
where
    M: TriangulatedMesh + ?Sized,
    S: ScalarOrder + ?Sized,
{
    FtrGraph::new(mesh, scalars, config)?.build()
}
