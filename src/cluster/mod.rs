//! Cluster Module: Nodes, Dependencies and Synthetic Failures
//!
//! Supplies the raw material for topological analysis:
//!
//! - `Node`: one cluster member with bounded resource readings
//! - `ServiceDependency`: a directed edge weighted by latency
//! - `ClusterSnapshot`: nodes and dependencies at one instant
//! - `ClusterGenerator`: seedable synthetic clusters plus failure injection
//!
//! Records are validated once at construction and never mutated; a failure
//! produces a new snapshot built from derived copies.

mod failure;
mod generator;
mod node;
mod snapshot;

pub use failure::FailureType;
pub use generator::{ClusterGenerator, INGRESS_SERVICE};
pub use node::{Node, NodeMetrics, ServiceDependency};
pub use snapshot::ClusterSnapshot;
