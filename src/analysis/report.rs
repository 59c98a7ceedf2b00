//! Analysis report structures

use serde::{Serialize, Serializer};

use super::comparator::DimensionDelta;
use super::signature::{validate_signature, Indicator};
use super::storage::StorageSummary;
use crate::cluster::FailureType;

/// Resource-metric point cloud changes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSpaceReport {
    pub h0: DimensionDelta,
    pub h1: DimensionDelta,
    /// Storage statistics of the post-failure population
    pub storage: StorageSummary,
}

/// Dependency network changes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub h0: DimensionDelta,
    pub h1: DimensionDelta,
    /// Active dependencies after the failure
    pub active_dependencies: usize,
    pub total_dependencies: usize,
}

/// Result of one before/after analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub failure_type: FailureType,
    pub metric: MetricSpaceReport,
    pub network: NetworkReport,
    pub storage_outliers: usize,
    /// Catalog description of the declared failure, indicator → description
    #[serde(serialize_with = "indicator_map")]
    pub signature_match: &'static [Indicator],
}

impl AnalysisReport {
    /// Strict validation of the declared failure against this report
    pub fn supports_declared_failure(&self) -> bool {
        validate_signature(self, self.failure_type)
    }
}

fn indicator_map<S: Serializer>(indicators: &&'static [Indicator], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(indicators.iter().map(|i| (i.name, i.description)))
}
