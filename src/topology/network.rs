//! Dependency network embedding
//!
//! Active dependencies induce an undirected graph over their endpoints.
//! Each edge carries weight 1 / (latency_ms + ε), so fast links have small
//! values and join early in the Rips filtration; vertex pairs without an
//! edge sit at +∞ and never join. Inactive dependencies are ignored.

use ndarray::{Array2, ArrayView2};
use std::collections::BTreeMap;

use crate::cluster::ServiceDependency;

/// Weighted dependency graph as a distance matrix
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Endpoint names, sorted; index i labels row/column i
    labels: Vec<String>,
    distances: Array2<f64>,
}

impl DependencyGraph {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn distances(&self) -> ArrayView2<'_, f64> {
        self.distances.view()
    }

    pub fn n_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Number of vertex pairs joined by at least one active dependency
    pub fn n_edges(&self) -> usize {
        let n = self.n_vertices();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.distances[[i, j]].is_finite())
            .count()
    }
}

/// Network input for the persistence engine
#[derive(Debug, Clone)]
pub enum NetworkComplex {
    /// No active dependencies
    Empty,
    Weighted(DependencyGraph),
}

impl NetworkComplex {
    pub fn from_dependencies(dependencies: &[ServiceDependency], latency_epsilon: f64) -> Self {
        let active: Vec<&ServiceDependency> =
            dependencies.iter().filter(|d| d.is_active()).collect();
        if active.is_empty() {
            return NetworkComplex::Empty;
        }

        let mut index: BTreeMap<&str, usize> = BTreeMap::new();
        for dep in &active {
            index.insert(dep.source(), 0);
            index.insert(dep.target(), 0);
        }
        for (i, slot) in index.values_mut().enumerate() {
            *slot = i;
        }

        let size = index.len();
        let mut distances = Array2::from_elem((size, size), f64::INFINITY);
        for i in 0..size {
            distances[[i, i]] = 0.0;
        }

        // Later dependencies between the same pair overwrite earlier ones
        for dep in &active {
            let i = index[dep.source()];
            let j = index[dep.target()];
            if i == j {
                continue;
            }
            let weight = 1.0 / (dep.latency_ms() + latency_epsilon);
            distances[[i, j]] = weight;
            distances[[j, i]] = weight;
        }

        NetworkComplex::Weighted(DependencyGraph {
            labels: index.keys().map(|s| s.to_string()).collect(),
            distances,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NetworkComplex::Empty)
    }

    pub fn graph(&self) -> Option<&DependencyGraph> {
        match self {
            NetworkComplex::Empty => None,
            NetworkComplex::Weighted(graph) => Some(graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(src: &str, tgt: &str, latency: f64) -> ServiceDependency {
        ServiceDependency::new(src, tgt, latency).unwrap()
    }

    #[test]
    fn test_only_active_endpoints() {
        let deps = vec![dep("node1", "node2", 50.0), dep("node2", "node3", 150.0).with_active(false)];
        let complex = NetworkComplex::from_dependencies(&deps, 1e-9);
        let graph = complex.graph().unwrap();

        assert_eq!(graph.labels(), ["node1", "node2"]);
        assert_eq!(graph.n_edges(), 1);
        assert!((graph.distances()[[0, 1]] - 1.0 / 50.0).abs() < 1e-12);
        assert_eq!(graph.distances()[[1, 0]], graph.distances()[[0, 1]]);
    }

    #[test]
    fn test_no_active_dependencies_is_empty() {
        assert!(NetworkComplex::from_dependencies(&[], 1e-9).is_empty());
        let inactive = vec![dep("a", "b", 10.0).with_active(false)];
        assert!(NetworkComplex::from_dependencies(&inactive, 1e-9).is_empty());
    }

    #[test]
    fn test_zero_latency_is_finite() {
        let complex = NetworkComplex::from_dependencies(&[dep("a", "b", 0.0)], 1e-9);
        let d = complex.graph().unwrap().distances()[[0, 1]];
        assert!(d.is_finite());
        assert!((d - 1e9).abs() < 1.0);
    }

    #[test]
    fn test_non_adjacent_pairs_are_infinite() {
        let deps = vec![dep("a", "b", 10.0), dep("c", "b", 10.0)];
        let complex = NetworkComplex::from_dependencies(&deps, 1e-9);
        let graph = complex.graph().unwrap();
        assert_eq!(graph.labels(), ["a", "b", "c"]);
        assert!(graph.distances()[[0, 2]].is_infinite());
        assert_eq!(graph.n_edges(), 2);
    }
}
