//! Analysis Module: From Diagrams to Failure Signatures
//!
//! Compares before/after persistence diagrams per homology dimension,
//! scores storage outliers on the failed population, and attaches the
//! catalog description of the declared failure mode.
//!
//! Per dimension the comparator reports:
//! - Wasserstein distance between diagrams
//! - feature count delta (after − before)
//! - persistent entropy delta (after − before)

mod comparator;
mod pipeline;
mod report;
mod signature;
mod storage;

pub use comparator::{DiagramComparator, DimensionDelta};
pub use pipeline::ClusterAnalyzer;
pub use report::{AnalysisReport, MetricSpaceReport, NetworkReport};
pub use signature::{
    describe, lookup, validate_signature, zone_outage_matches, Indicator,
    ZONE_OUTAGE_MIN_DISTANCE, ZONE_OUTAGE_MIN_FRAGMENTS,
};
pub use storage::{OutlierDetector, StorageSummary};
