//! # TDA Cluster Faults
//!
//! Topological Failure Detection for Distributed Clusters via
//! Persistent Homology
//!
//! ## Framework
//!
//! A cluster is viewed through two lenses:
//!
//! 1. **Metric space**: every node is a point in R⁴ built from its resource
//!    readings (CPU, memory, pods, storage), standardized per snapshot
//!
//! 2. **Dependency network**: active service dependencies form a graph whose
//!    edge weight is inverse latency, so fast links connect first
//!
//! Both lenses are filtered with a Vietoris-Rips complex and reduced to
//! persistence diagrams (H0, H1, H2). A failure is characterized by how the
//! diagrams move between a healthy and a failed snapshot:
//!
//! - Wasserstein distance between diagrams
//! - change in feature counts
//! - change in persistent entropy
//!
//! Storage pressure is scored separately with a z-score outlier detector.
//!
//! ## Failure Modes
//!
//! | Mode               | Expected signature                            |
//! |--------------------|-----------------------------------------------|
//! | zone_outage        | network fragments, metric space collapses     |
//! | storage_failure    | storage outliers, H1 cycles in metric space   |
//! | network_congestion | new network cycles, entropy rises             |
//! | dns_failure        | ingress edges vanish, components isolate      |
//! | pod_overload       | CPU-dominant cluster, H0 consolidation        |
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Cohen-Steiner, Edelsbrunner & Harer, "Stability of Persistence
//!   Diagrams" (2007)
//! - Atienza et al., "Persistent Entropy for Separating Topological
//!   Features from Noise in Vietoris-Rips Complexes" (2019)

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod error;
pub mod information;
pub mod topology;

pub use error::{Error, Result};

pub use config::{AnalysisConfig, OutlierMethod};

// Re-exports from cluster
pub use cluster::{
    ClusterGenerator,
    ClusterSnapshot,
    FailureType,
    Node,
    NodeMetrics,
    ServiceDependency,
};

// Re-exports from topology
pub use topology::{
    DiagramSet,
    FeatureMatrix,
    NetworkComplex,
    PersistenceDiagram,
    PersistenceEngine,
    VietorisRips,
};

// Re-exports from information
pub use information::{
    persistence_entropy,
    wasserstein_distance,
    TopologicalEntropy,
};

// Re-exports from analysis
pub use analysis::{
    AnalysisReport,
    ClusterAnalyzer,
    DiagramComparator,
    DimensionDelta,
    Indicator,
    OutlierDetector,
};
