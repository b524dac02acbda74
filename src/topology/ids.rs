//! Index types for mesh entities and Reeb graph elements.
//!
//! Mesh entities (vertices, edges, triangles) are dense `usize` indices handed
//! out by the mesh adapter. Reeb graph elements are wrapped in strong newtypes
//! so a node can never be passed where an arc is expected:
//! - [`NodeId`]: a critical point of the skeleton.
//! - [`ArcId`]: a super-arc between two nodes.
//! - [`PropagationId`]: a sweep front, also the key of its union-find group.
//!
//! All three are `repr(transparent)` over `usize` and print as the bare
//! integer through `Display`.

use std::fmt;

/// Dense vertex index.
pub type VertexId = usize;
/// Dense edge index.
pub type EdgeId = usize;
/// Dense triangle index.
pub type TriangleId = usize;

macro_rules! index_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Wraps a raw index.
            #[inline]
            pub const fn new(raw: usize) -> Self {
                $name(raw)
            }

            /// Returns the raw index.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_newtype!(
    /// Handle of a skeleton node. Each mesh vertex owns at most one node.
    NodeId
);
index_newtype!(
    /// Handle of a skeleton super-arc.
    ArcId
);
index_newtype!(
    /// Handle of a sweep front. Merged fronts share the representative
    /// returned by [`GroupForest::find`](crate::ftr::group::GroupForest::find).
    PropagationId
);

static_assertions::assert_eq_size!(NodeId, usize);
static_assertions::assert_eq_size!(ArcId, usize);
static_assertions::assert_eq_size!(PropagationId, usize);
