//! Before/after diagram comparison

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::information::{persistence_entropy, wasserstein_distance};
use crate::topology::{DiagramSet, PersistenceDiagram};

/// Change in one homology dimension between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionDelta {
    /// Wasserstein distance; 0 when either side has no features
    pub distance: f64,
    /// count(after) − count(before)
    pub component_count_delta: i64,
    /// entropy(after) − entropy(before)
    pub entropy_delta: f64,
    pub before_count: usize,
    pub after_count: usize,
}

/// Per-dimension diagram comparison
#[derive(Debug, Clone, Copy)]
pub struct DiagramComparator {
    entropy_epsilon: f64,
}

impl DiagramComparator {
    pub fn new(entropy_epsilon: f64) -> Self {
        Self { entropy_epsilon }
    }

    pub fn compare(&self, before: &PersistenceDiagram, after: &PersistenceDiagram) -> DimensionDelta {
        // An empty side reports distance 0 rather than the cost of creating
        // or destroying every feature on the other side.
        let distance = if before.is_empty() || after.is_empty() {
            0.0
        } else {
            wasserstein_distance(before, after)
        };

        DimensionDelta {
            distance,
            component_count_delta: after.len() as i64 - before.len() as i64,
            entropy_delta: persistence_entropy(after, self.entropy_epsilon)
                - persistence_entropy(before, self.entropy_epsilon),
            before_count: before.len(),
            after_count: after.len(),
        }
    }

    pub fn compare_dimension(
        &self,
        before: &DiagramSet,
        after: &DiagramSet,
        dim: usize,
    ) -> Result<DimensionDelta> {
        Ok(self.compare(before.dim(dim)?, after.dim(dim)?))
    }
}

impl Default for DiagramComparator {
    fn default() -> Self {
        Self::new(1e-9)
    }
}
