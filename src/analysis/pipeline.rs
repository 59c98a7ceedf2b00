//! Before/after analysis pipeline
//!
//! ```text
//! snapshot ──► FeatureMatrix ──► Rips ──► DiagramSet ─┐
//!          └─► NetworkComplex ─► Rips ──► DiagramSet ─┼─► comparator ─► report
//! failed nodes ──► outlier detector ──────────────────┘
//! ```
//!
//! Every stage is a pure function of its input; no state survives a call.

use tracing::{debug, warn};

use super::comparator::DiagramComparator;
use super::report::{AnalysisReport, MetricSpaceReport, NetworkReport};
use super::signature::{describe, validate_signature};
use super::storage::OutlierDetector;
use crate::cluster::{ClusterSnapshot, FailureType, Node, ServiceDependency};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::topology::{DiagramSet, FeatureMatrix, NetworkComplex, PersistenceEngine};

/// Single entry point for topological failure analysis
#[derive(Debug, Clone)]
pub struct ClusterAnalyzer {
    config: AnalysisConfig,
    engine: PersistenceEngine,
    comparator: DiagramComparator,
    detector: OutlierDetector,
}

impl ClusterAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            engine: PersistenceEngine::new(config.filtration_bound()),
            comparator: DiagramComparator::new(config.entropy_epsilon),
            detector: OutlierDetector::new(config.outlier_z_threshold, config.outlier_method),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// H0-H2 diagrams of the standardized node metric space
    pub fn metric_diagrams(&self, nodes: &[Node]) -> Result<DiagramSet> {
        if nodes.len() < 2 {
            warn!(nodes = nodes.len(), "metric space has fewer than two nodes");
        }
        let features = FeatureMatrix::from_nodes(nodes);
        self.engine.from_points(features.standardized())
    }

    /// H0-H2 diagrams of the active dependency network
    pub fn network_diagrams(&self, dependencies: &[ServiceDependency]) -> Result<DiagramSet> {
        let complex = NetworkComplex::from_dependencies(dependencies, self.config.latency_epsilon);
        if complex.is_empty() {
            warn!(dependencies = dependencies.len(), "no active dependencies");
        }
        self.engine.from_network(&complex)
    }

    /// Compare two snapshots and describe the declared failure
    pub fn analyze(
        &self,
        before: &ClusterSnapshot,
        after: &ClusterSnapshot,
        failure: FailureType,
    ) -> Result<AnalysisReport> {
        let metric_before = self.metric_diagrams(&before.nodes)?;
        let metric_after = self.metric_diagrams(&after.nodes)?;
        let network_before = self.network_diagrams(&before.dependencies)?;
        let network_after = self.network_diagrams(&after.dependencies)?;

        self.analyze_diagrams(
            &metric_before,
            &metric_after,
            &network_before,
            &network_after,
            failure,
            after,
        )
    }

    /// Compare precomputed diagrams; `failed` supplies the post-failure
    /// population and dependency counts
    pub fn analyze_diagrams(
        &self,
        metric_before: &DiagramSet,
        metric_after: &DiagramSet,
        network_before: &DiagramSet,
        network_after: &DiagramSet,
        failure: FailureType,
        failed: &ClusterSnapshot,
    ) -> Result<AnalysisReport> {
        let metric = MetricSpaceReport {
            h0: self.comparator.compare_dimension(metric_before, metric_after, 0)?,
            h1: self.comparator.compare_dimension(metric_before, metric_after, 1)?,
            storage: self.detector.summarize(&failed.nodes),
        };
        let network = NetworkReport {
            h0: self.comparator.compare_dimension(network_before, network_after, 0)?,
            h1: self.comparator.compare_dimension(network_before, network_after, 1)?,
            active_dependencies: failed.active_dependency_count(),
            total_dependencies: failed.dependencies.len(),
        };
        let storage_outliers = self.detector.storage_outliers(&failed.nodes);

        debug!(
            failure = %failure,
            metric_h0_distance = metric.h0.distance,
            metric_h1_distance = metric.h1.distance,
            network_h0_delta = network.h0.component_count_delta,
            network_h1_delta = network.h1.component_count_delta,
            storage_outliers,
            "analysis complete"
        );

        Ok(AnalysisReport {
            failure_type: failure,
            metric,
            network,
            storage_outliers,
            signature_match: describe(failure),
        })
    }

    /// Strict evidence check for a declared failure
    pub fn validate(&self, report: &AnalysisReport, failure: FailureType) -> bool {
        validate_signature(report, failure)
    }
}

impl Default for ClusterAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::NodeMetrics;
    use chrono::Utc;

    fn node(name: &str, zone: &str, cpu: f64, storage: f64) -> Node {
        Node::new(name, zone, NodeMetrics::new(cpu, 0.3, 2, storage), Vec::new(), Utc::now())
            .unwrap()
    }

    fn dep(src: &str, tgt: &str, latency: f64) -> ServiceDependency {
        ServiceDependency::new(src, tgt, latency).unwrap()
    }

    #[test]
    fn test_network_single_active_edge() {
        let deps = vec![dep("node1", "node2", 50.0), dep("node2", "node3", 150.0).with_active(false)];
        let set = ClusterAnalyzer::default().network_diagrams(&deps).unwrap();

        let h0 = set.dim(0).unwrap();
        assert_eq!(h0.len(), 1, "One connected component");
        assert!((h0.deaths()[0] - 1.0 / 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_network() {
        let set = ClusterAnalyzer::default().network_diagrams(&[]).unwrap();
        assert_eq!(set.counts(), [0, 0, 0]);
        for diagram in set.iter() {
            assert_eq!(diagram.points().ncols(), 2);
        }
    }

    #[test]
    fn test_metric_diagrams_shape() {
        let nodes = vec![node("node1", "z", 0.3, 0.5), node("node2", "z", 0.6, 0.5)];
        let set = ClusterAnalyzer::default().metric_diagrams(&nodes).unwrap();
        assert_eq!(set.iter().count(), 3);
        assert_eq!(set.dim(0).unwrap().points().ncols(), 2);
        assert_eq!(set.dim(0).unwrap().len(), 1);
    }

    #[test]
    fn test_unchanged_snapshot() {
        let nodes = vec![
            node("a", "z0", 0.1, 0.2),
            node("b", "z0", 0.5, 0.3),
            node("c", "z1", 0.9, 0.1),
            node("d", "z1", 0.4, 0.8),
        ];
        let deps = vec![dep("a", "b", 10.0), dep("b", "c", 150.0), dep("c", "d", 10.0)];
        let snapshot = ClusterSnapshot::new(nodes, deps);

        let report = ClusterAnalyzer::default()
            .analyze(&snapshot, &snapshot, FailureType::StorageFailure)
            .unwrap();

        for delta in [report.metric.h0, report.metric.h1, report.network.h0, report.network.h1] {
            assert_eq!(delta.distance, 0.0);
            assert_eq!(delta.component_count_delta, 0);
            assert_eq!(delta.entropy_delta, 0.0);
        }
        assert_eq!(report.network.active_dependencies, 3);
        assert_eq!(report.signature_match, describe(FailureType::StorageFailure));
        assert!(!report.supports_declared_failure());
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let before = ClusterSnapshot::new(
            vec![node("a", "z0", 0.1, 0.2), node("b", "z1", 0.7, 0.9)],
            vec![dep("a", "b", 10.0)],
        );
        let after = ClusterSnapshot::new(vec![node("a", "z0", 0.1, 0.2)], Vec::new());
        let (before_copy, after_copy) = (before.clone(), after.clone());

        let report = ClusterAnalyzer::default()
            .analyze(&before, &after, FailureType::ZoneOutage)
            .unwrap();

        assert_eq!(before, before_copy);
        assert_eq!(after, after_copy);
        assert_eq!(report.network.h0.component_count_delta, -1);
        assert_eq!(report.network.active_dependencies, 0);
    }
}
