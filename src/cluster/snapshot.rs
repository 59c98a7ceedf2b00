//! Point-in-time cluster state

use serde::Serialize;

use super::{Node, ServiceDependency};

/// Nodes and dependencies observed at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterSnapshot {
    pub nodes: Vec<Node>,
    pub dependencies: Vec<ServiceDependency>,
}

impl ClusterSnapshot {
    pub fn new(nodes: Vec<Node>, dependencies: Vec<ServiceDependency>) -> Self {
        Self { nodes, dependencies }
    }

    pub fn active_dependencies(&self) -> impl Iterator<Item = &ServiceDependency> {
        self.dependencies.iter().filter(|d| d.is_active())
    }

    pub fn active_dependency_count(&self) -> usize {
        self.active_dependencies().count()
    }

    /// Distinct zones in order of first appearance
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if !zones.contains(&node.zone()) {
                zones.push(node.zone());
            }
        }
        zones
    }
}
