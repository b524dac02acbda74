//! Finished Reeb graph.
//!
//! [`ReebGraph`] is the immutable result of a run: visible nodes and arcs in
//! a deterministic order (nodes by scalar rank, arcs by the ranks of their
//! endpoints), an optional per-vertex segmentation and the anomalies the
//! growth tolerated along the way. Arcs always run from their lower node to
//! their higher one, whichever front grew them; nodes no visible arc touches
//! are left out.

use hashbrown::{HashMap, HashSet};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::debug_invariants::DebugInvariants;
use crate::ftr::skeleton::Skeleton;
use crate::ftr_error::FtrError;
use crate::topology::ids::{ArcId, NodeId, VertexId};
use crate::topology::scalar::ScalarOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReebNode {
    pub id: NodeId,
    pub vertex: VertexId,
    /// Mirror of `vertex` in the scalar order.
    pub rank: i64,
    /// Number of visible arcs ending at this node, never zero.
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReebArc {
    pub id: ArcId,
    /// Lower end.
    pub down: NodeId,
    /// Higher end.
    pub up: NodeId,
    pub down_vertex: VertexId,
    pub up_vertex: VertexId,
    /// Grown, or fused into, by an ascending front.
    pub from_up: bool,
}

/// Anomaly tolerated while growing arcs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// An arc met by the attachment check had no down node.
    NullDownNode { arc: ArcId },
    /// A split branch had nothing left to sweep; its arc was hidden.
    EmptyBranch { saddle: VertexId, arc: ArcId },
    /// An arc was still open when every front had stopped.
    OpenArc { arc: ArcId },
    /// A regular vertex was swept by more than one visible arc.
    SharedVertex { vertex: VertexId, arcs: Vec<ArcId> },
    /// Fronts were still parked at a join saddle when every front had
    /// stopped.
    UnresolvedJoin { saddle: VertexId, fronts: usize },
    /// Arcs left open on the level where ascending and descending fronts
    /// meet could not be paired one to one; they stay open.
    UnmatchedBoundary { arcs: Vec<ArcId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReebGraph {
    nodes: Vec<ReebNode>,
    arcs: Vec<ReebArc>,
    segmentation: Option<Vec<Option<ArcId>>>,
    diagnostics: Vec<Diagnostic>,
}

impl ReebGraph {
    pub(crate) fn from_skeleton<S>(
        skeleton: &Skeleton,
        scalars: &S,
        with_segmentation: bool,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Self
    where
        S: ScalarOrder + ?Sized,
    {
        let mut arcs = Vec::new();
        for (id, arc) in skeleton.arcs() {
            if arc.hidden {
                continue;
            }
            let Some(up) = arc.up else {
                warn!("arc {id} still open after growth");
                diagnostics.push(Diagnostic::OpenArc { arc: id });
                continue;
            };
            let Some(down) = arc.down else {
                continue;
            };
            let (Some(start), Some(end)) = (skeleton.node_vertex(down), skeleton.node_vertex(up))
            else {
                continue;
            };
            let (down, up, down_vertex, up_vertex) = if arc.from_up {
                (down, up, start, end)
            } else {
                (up, down, end, start)
            };
            arcs.push(ReebArc {
                id,
                down,
                up,
                down_vertex,
                up_vertex,
                from_up: arc.from_up,
            });
        }
        arcs.sort_by_key(|a| (scalars.mirror(a.down_vertex), scalars.mirror(a.up_vertex), a.id));

        let mut degree: HashMap<NodeId, usize> = HashMap::new();
        for a in &arcs {
            *degree.entry(a.down).or_default() += 1;
            *degree.entry(a.up).or_default() += 1;
        }
        let mut nodes: Vec<ReebNode> = skeleton
            .nodes()
            .into_iter()
            .filter_map(|(id, node)| {
                let degree = degree.get(&id).copied()?;
                Some(ReebNode {
                    id,
                    vertex: node.vertex,
                    rank: scalars.mirror(node.vertex),
                    degree,
                })
            })
            .collect();
        nodes.sort_by_key(|n| (n.rank, n.id));

        let segmentation = with_segmentation.then(|| {
            let visible: HashSet<ArcId> = arcs.iter().map(|a| a.id).collect();
            let critical: HashSet<VertexId> = nodes.iter().map(|n| n.vertex).collect();
            (0..skeleton.vertex_count())
                .map(|v| {
                    if critical.contains(&v) {
                        return None;
                    }
                    let mut owners: Vec<ArcId> = skeleton
                        .visits(v)
                        .into_iter()
                        .map(|a| skeleton.resolve(a))
                        .filter(|a| visible.contains(a))
                        .collect();
                    owners.sort_unstable();
                    owners.dedup();
                    if owners.len() > 1 {
                        diagnostics.push(Diagnostic::SharedVertex {
                            vertex: v,
                            arcs: owners.clone(),
                        });
                    }
                    owners.first().copied()
                })
                .collect()
        });

        Self {
            nodes,
            arcs,
            segmentation,
            diagnostics,
        }
    }

    pub fn nodes(&self) -> &[ReebNode] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[ReebArc] {
        &self.arcs
    }

    /// Arc owning each regular vertex; `None` for nodes and unswept vertices.
    pub fn segmentation(&self) -> Option<&[Option<ArcId>]> {
        self.segmentation.as_deref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn node(&self, id: NodeId) -> Option<&ReebNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_for_vertex(&self, v: VertexId) -> Option<&ReebNode> {
        self.nodes.iter().find(|n| n.vertex == v)
    }

    pub fn arc(&self, id: ArcId) -> Option<&ReebArc> {
        self.arcs.iter().find(|a| a.id == id)
    }

    /// Arcs leaving `node` upwards.
    pub fn arcs_from(&self, node: NodeId) -> impl Iterator<Item = &ReebArc> + '_ {
        self.arcs.iter().filter(move |a| a.down == node)
    }

    /// Arcs reaching `node` from below.
    pub fn arcs_to(&self, node: NodeId) -> impl Iterator<Item = &ReebArc> + '_ {
        self.arcs.iter().filter(move |a| a.up == node)
    }

    /// Vertices of the nodes, in rank order.
    pub fn critical_vertices(&self) -> Vec<VertexId> {
        self.nodes.iter().map(|n| n.vertex).collect()
    }
}

impl fmt::Display for ReebGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reeb graph: {} nodes, {} arcs",
            self.nodes.len(),
            self.arcs.len()
        )?;
        for a in &self.arcs {
            writeln!(f, "  arc {}: {} -> {}", a.id, a.down_vertex, a.up_vertex)?;
        }
        Ok(())
    }
}

impl DebugInvariants for ReebGraph {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "ReebGraph");
    }

    fn validate_invariants(&self) -> Result<(), FtrError> {
        let by_id: HashMap<NodeId, &ReebNode> = self.nodes.iter().map(|n| (n.id, n)).collect();
        let mut degree: HashMap<NodeId, usize> = HashMap::new();
        for a in &self.arcs {
            if a.down == a.up {
                return Err(FtrError::InvalidSkeleton(format!(
                    "arc {} is a loop at node {}",
                    a.id, a.down
                )));
            }
            let (Some(down), Some(up)) = (by_id.get(&a.down), by_id.get(&a.up)) else {
                return Err(FtrError::InvalidSkeleton(format!(
                    "arc {} references a missing node",
                    a.id
                )));
            };
            if down.rank >= up.rank {
                return Err(FtrError::InvalidSkeleton(format!(
                    "arc {} runs downwards ({} -> {})",
                    a.id, a.down_vertex, a.up_vertex
                )));
            }
            *degree.entry(a.down).or_default() += 1;
            *degree.entry(a.up).or_default() += 1;
        }
        for n in &self.nodes {
            let expected = degree.get(&n.id).copied().unwrap_or(0);
            if expected == 0 {
                return Err(FtrError::InvalidSkeleton(format!(
                    "node {} at {} has no arc",
                    n.id, n.vertex
                )));
            }
            if n.degree != expected {
                return Err(FtrError::InvalidSkeleton(format!(
                    "node {} has degree {} but {} arcs",
                    n.id, n.degree, expected
                )));
            }
        }
        if let Some(seg) = &self.segmentation {
            let visible: HashSet<ArcId> = self.arcs.iter().map(|a| a.id).collect();
            if let Some(v) = seg
                .iter()
                .position(|a| a.is_some_and(|a| !visible.contains(&a)))
            {
                return Err(FtrError::InvalidSkeleton(format!(
                    "vertex {v} is assigned to a hidden arc"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftr::config::SweepDirection;
    use crate::ftr::group::GroupForest;
    use crate::ftr::ordering::Sweep;
    use crate::ftr::propagation::Propagation;
    use crate::topology::scalar::ScalarField;

    fn line(n: usize) -> ScalarField<f64> {
        ScalarField::new((0..n).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn nodes_without_visible_arcs_are_left_out() {
        let f = line(4);
        let groups = GroupForest::new(2);
        let up = Propagation::new(
            groups.allocate().unwrap(),
            0,
            Sweep::new(&f, SweepDirection::Ascending),
        );
        let sk = Skeleton::new(4);
        let n0 = sk.make_node(0);
        let n2 = sk.make_node(2);
        let n3 = sk.make_node(3);
        let kept = sk.open_arc(n0, &up);
        sk.visit(1, kept);
        sk.close_arc(kept, n2);
        let dropped = sk.open_arc(n2, &up);
        sk.visit(3, dropped);
        sk.close_arc(dropped, n3);
        sk.hide_arc(dropped);

        let g = ReebGraph::from_skeleton(&sk, &f, true, Vec::new());
        assert_eq!(g.nodes().len(), 2);
        assert!(g.node_for_vertex(3).is_none());
        assert_eq!(g.critical_vertices(), vec![0, 2]);
        assert!(g.nodes().iter().all(|n| n.degree == 1));
        assert_eq!(
            g.to_string().lines().next(),
            Some("Reeb graph: 2 nodes, 1 arcs")
        );
        assert_eq!(g.segmentation().unwrap(), &[None, Some(kept), None, None]);
        g.validate_invariants().unwrap();
    }

    #[test]
    fn arcs_run_upwards_whatever_grew_them() {
        let f = line(5);
        let groups = GroupForest::new(4);
        let asc = Sweep::new(&f, SweepDirection::Ascending);
        let desc = Sweep::new(&f, SweepDirection::Descending);

        // one descending arc from 4 down to 0
        let sk = Skeleton::new(5);
        let down = Propagation::new(groups.allocate().unwrap(), 4, desc);
        let (n0, n4) = (sk.make_node(0), sk.make_node(4));
        let arc = sk.open_arc(n4, &down);
        sk.close_arc(arc, n0);
        let g = ReebGraph::from_skeleton(&sk, &f, false, Vec::new());
        let a = &g.arcs()[0];
        assert_eq!((a.down_vertex, a.up_vertex), (0, 4));
        assert_eq!((a.down, a.up), (n0, n4));
        assert!(!a.from_up);
        assert_eq!(g.arcs_from(n0).count(), 1);
        assert!(g.segmentation().is_none());

        // an ascending and a descending arc meeting between 1 and 2
        let sk = Skeleton::new(5);
        let up = Propagation::new(groups.allocate().unwrap(), 0, asc);
        let down = Propagation::new(groups.allocate().unwrap(), 4, desc);
        let (n0, n4) = (sk.make_node(0), sk.make_node(4));
        let low = sk.open_arc(n0, &up);
        let high = sk.open_arc(n4, &down);
        sk.visit(1, low);
        sk.visit(2, high);
        sk.visit(3, high);
        sk.fuse(low, high);
        let g = ReebGraph::from_skeleton(&sk, &f, true, Vec::new());
        assert_eq!(g.arcs().len(), 1);
        let a = &g.arcs()[0];
        assert_eq!((a.id, a.down_vertex, a.up_vertex), (low, 0, 4));
        assert!(a.from_up);
        assert_eq!(
            g.segmentation().unwrap(),
            &[None, Some(low), Some(low), Some(low), None]
        );
        g.validate_invariants().unwrap();
    }

    #[test]
    fn validation_rejects_nodes_without_arcs() {
        let g = ReebGraph {
            nodes: vec![ReebNode {
                id: NodeId::new(0),
                vertex: 0,
                rank: 0,
                degree: 0,
            }],
            arcs: Vec::new(),
            segmentation: None,
            diagnostics: Vec::new(),
        };
        assert!(matches!(
            g.validate_invariants(),
            Err(FtrError::InvalidSkeleton(_))
        ));
    }
}
