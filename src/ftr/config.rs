//! Run configuration for [`FtrGraph`](crate::ftr::graph::FtrGraph).

use serde::{Deserialize, Serialize};

/// Direction in which fronts sweep the scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    /// Fronts start at local minima and move towards higher values.
    #[default]
    Ascending,
    /// Fronts start at local maxima and move towards lower values.
    Descending,
}

impl SweepDirection {
    /// `true` for [`SweepDirection::Ascending`].
    #[inline]
    pub fn is_up(self) -> bool {
        matches!(self, SweepDirection::Ascending)
    }
}

/// Which fronts a run seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SweepMode {
    /// Minima seed ascending fronts and maxima seed descending ones. The
    /// vertex set is cut at the median rank: ascending fronts sweep the lower
    /// half, descending fronts the upper half, and the arcs left open on the
    /// cut level are fused pairwise.
    #[default]
    Both,
    /// Only ascending fronts, seeded at local minima.
    Ascending,
    /// Only descending fronts, seeded at local maxima.
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtrConfig {
    pub mode: SweepMode,
    /// Size of a dedicated worker pool; `None` runs on the global rayon pool.
    pub threads: Option<usize>,
    /// Attach the per-vertex arc map to the output.
    pub segmentation: bool,
    /// Validate the output graph before returning it.
    pub check_invariants: bool,
}

impl Default for FtrConfig {
    fn default() -> Self {
        Self {
            mode: SweepMode::Both,
            threads: None,
            segmentation: true,
            check_invariants: cfg!(debug_assertions),
        }
    }
}
