//! Topology Module: Persistent Homology of Cluster State
//!
//! Turns cluster snapshots into persistence diagrams:
//! - Node metrics → standardized point cloud in R⁴
//! - Active dependencies → weighted graph as a distance matrix
//! - Vietoris-Rips filtration over either representation
//! - Exact persistence via boundary matrix reduction (H0, H1, H2)
//!
//! ## Mathematical Background
//!
//! For a point cloud X we construct a filtration of simplicial complexes
//! VR_ε(X) indexed by the scale parameter ε. Persistent homology tracks the
//! birth and death of connected components (H0), loops (H1) and voids (H2)
//! across this filtration. A graph enters the same machinery by assigning
//! +∞ to non-adjacent vertex pairs.
//!
//! ## Canonical Output
//!
//! Every diagram leaving this module is an n × 2 array of finite
//! (birth, death) rows, including n = 0.

mod diagram;
mod features;
mod network;
mod persistence;
mod vietoris_rips;

pub use diagram::{DiagramSet, PersistenceDiagram, HOMOLOGY_DIMENSIONS};
pub use features::{FeatureMatrix, StandardScaler, FEATURE_COUNT, POD_SCALE};
pub use network::{DependencyGraph, NetworkComplex};
pub use persistence::{compute_intervals, PersistenceEngine, PersistenceInterval};
pub use vietoris_rips::{FilteredSimplex, VietorisRips};
