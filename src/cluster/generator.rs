//! Synthetic cluster generation and failure injection
//!
//! Readings are drawn from skewed distributions so that a healthy cluster
//! is mostly lightly loaded:
//!
//! - cpu_load, memory_usage ~ Beta(2, 5)
//! - storage_usage ~ Beta(1, 3)
//! - running_pods ~ Poisson(3)
//!
//! Roughly one node in five hosts `ingress`; every ingress node depends on
//! two other ingress nodes (10 ms inside a zone, 150 ms across zones).
//!
//! The random source is an explicit parameter so generated snapshots are
//! reproducible under a fixed seed.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Poisson};
use tracing::debug;

use super::{ClusterSnapshot, FailureType, Node, NodeMetrics, ServiceDependency};
use crate::error::{Error, Result};

/// Service whose hosts form the dependency mesh
pub const INGRESS_SERVICE: &str = "ingress";

const INGRESS_PROBABILITY: f64 = 0.2;
const DEPENDENCIES_PER_INGRESS: usize = 2;
const INTRA_ZONE_LATENCY_MS: f64 = 10.0;
const CROSS_ZONE_LATENCY_MS: f64 = 150.0;

const STORAGE_FAILURE_PROBABILITY: f64 = 0.25;
const CONGESTION_PROBABILITY: f64 = 0.3;
const CONGESTION_FACTOR: f64 = 10.0;
const DNS_BROKEN_FRACTION: f64 = 0.5;
const DNS_UNHEALTHY_PROBABILITY: f64 = 0.3;
const OVERLOAD_CPU_FACTOR: f64 = 1.8;
const OVERLOAD_MEMORY_FACTOR: f64 = 1.5;
const OVERLOAD_EXTRA_PODS: u32 = 5;

/// Generator of synthetic cluster snapshots
pub struct ClusterGenerator<R: Rng> {
    zones: Vec<String>,
    node_counter: usize,
    rng: R,
    load: Beta<f64>,
    storage: Beta<f64>,
    pods: Poisson<f64>,
}

impl ClusterGenerator<StdRng> {
    /// Generator with a deterministic seed
    pub fn seeded(num_zones: usize, seed: u64) -> Result<Self> {
        Self::new(num_zones, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ClusterGenerator<R> {
    pub fn new(num_zones: usize, rng: R) -> Result<Self> {
        let load = Beta::new(2.0, 5.0).map_err(|e| Error::Sampling(e.to_string()))?;
        let storage = Beta::new(1.0, 3.0).map_err(|e| Error::Sampling(e.to_string()))?;
        let pods = Poisson::new(3.0).map_err(|e| Error::Sampling(e.to_string()))?;

        Ok(Self {
            zones: (0..num_zones).map(|i| format!("zone-{}", i)).collect(),
            node_counter: 0,
            rng,
            load,
            storage,
            pods,
        })
    }

    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    /// Generate 2-4 nodes per zone and the ingress dependency mesh
    pub fn generate(&mut self) -> Result<ClusterSnapshot> {
        let mut nodes = Vec::new();
        for zone in self.zones.clone() {
            let count = self.rng.random_range(2..5);
            for _ in 0..count {
                nodes.push(self.create_node(&zone)?);
            }
        }
        let dependencies = self.create_dependencies(&nodes)?;

        debug!(
            nodes = nodes.len(),
            dependencies = dependencies.len(),
            zones = self.zones.len(),
            "generated cluster"
        );
        Ok(ClusterSnapshot::new(nodes, dependencies))
    }

    fn create_node(&mut self, zone: &str) -> Result<Node> {
        self.node_counter += 1;
        let metrics = NodeMetrics::new(
            self.load.sample(&mut self.rng).clamp(0.0, 1.0),
            self.load.sample(&mut self.rng).clamp(0.0, 1.0),
            self.pods.sample(&mut self.rng) as u32,
            self.storage.sample(&mut self.rng).clamp(0.0, 1.0),
        );
        let services = if self.rng.random_bool(INGRESS_PROBABILITY) {
            vec![INGRESS_SERVICE.to_string()]
        } else {
            Vec::new()
        };

        Node::new(
            format!("{}-node-{}", zone, self.node_counter),
            zone,
            metrics,
            services,
            Utc::now(),
        )
    }

    fn create_dependencies(&mut self, nodes: &[Node]) -> Result<Vec<ServiceDependency>> {
        let hosts: Vec<&Node> = nodes.iter().filter(|n| n.hosts(INGRESS_SERVICE)).collect();
        let mut dependencies = Vec::new();

        for src in &hosts {
            let candidates: Vec<&Node> = hosts
                .iter()
                .copied()
                .filter(|n| n.name() != src.name())
                .collect();
            if candidates.len() < DEPENDENCIES_PER_INGRESS {
                continue;
            }
            for tgt in candidates.choose_multiple(&mut self.rng, DEPENDENCIES_PER_INGRESS) {
                let latency = if src.zone() == tgt.zone() {
                    INTRA_ZONE_LATENCY_MS
                } else {
                    CROSS_ZONE_LATENCY_MS
                };
                dependencies.push(ServiceDependency::new(src.name(), tgt.name(), latency)?);
            }
        }

        Ok(dependencies)
    }

    /// Derive the post-failure snapshot; `snapshot` itself is left untouched
    pub fn inject_failure(
        &mut self,
        snapshot: &ClusterSnapshot,
        failure: FailureType,
    ) -> Result<ClusterSnapshot> {
        let failed = match failure {
            FailureType::ZoneOutage => self.zone_outage(snapshot),
            FailureType::StorageFailure => self.storage_failure(snapshot)?,
            FailureType::NetworkCongestion => self.network_congestion(snapshot)?,
            FailureType::DnsFailure => self.dns_failure(snapshot),
            FailureType::PodOverload => pod_overload(snapshot)?,
        };

        debug!(
            failure = %failure,
            nodes_before = snapshot.nodes.len(),
            nodes_after = failed.nodes.len(),
            active_before = snapshot.active_dependency_count(),
            active_after = failed.active_dependency_count(),
            "injected failure"
        );
        Ok(failed)
    }

    fn zone_outage(&mut self, snapshot: &ClusterSnapshot) -> ClusterSnapshot {
        let Some(dead_zone) = self.zones.choose(&mut self.rng).cloned() else {
            return snapshot.clone();
        };

        let (dead, alive): (Vec<&Node>, Vec<&Node>) =
            snapshot.nodes.iter().partition(|n| n.zone() == dead_zone);
        let dependencies = snapshot
            .dependencies
            .iter()
            .filter(|d| !dead.iter().any(|n| d.touches(n.name())))
            .cloned()
            .collect();

        ClusterSnapshot::new(alive.into_iter().cloned().collect(), dependencies)
    }

    fn storage_failure(&mut self, snapshot: &ClusterSnapshot) -> Result<ClusterSnapshot> {
        let mut nodes = Vec::with_capacity(snapshot.nodes.len());
        for node in &snapshot.nodes {
            if self.rng.random::<f64>() < STORAGE_FAILURE_PROBABILITY {
                nodes.push(node.with_metrics(NodeMetrics {
                    storage_usage: 1.0,
                    ..*node.metrics()
                })?);
            } else {
                nodes.push(node.clone());
            }
        }
        Ok(ClusterSnapshot::new(nodes, snapshot.dependencies.clone()))
    }

    fn network_congestion(&mut self, snapshot: &ClusterSnapshot) -> Result<ClusterSnapshot> {
        let mut dependencies = Vec::with_capacity(snapshot.dependencies.len());
        for dep in &snapshot.dependencies {
            if self.rng.random::<f64>() < CONGESTION_PROBABILITY {
                dependencies.push(dep.with_latency_scaled(CONGESTION_FACTOR)?);
            } else {
                dependencies.push(dep.clone());
            }
        }
        Ok(ClusterSnapshot::new(snapshot.nodes.clone(), dependencies))
    }

    fn dns_failure(&mut self, snapshot: &ClusterSnapshot) -> ClusterSnapshot {
        let total = snapshot.dependencies.len();
        let broken_count = (total as f64 * DNS_BROKEN_FRACTION) as usize;
        let broken = rand::seq::index::sample(&mut self.rng, total, broken_count).into_vec();

        let dependencies = snapshot
            .dependencies
            .iter()
            .enumerate()
            .map(|(i, d)| if broken.contains(&i) { d.with_active(false) } else { d.clone() })
            .collect();

        let nodes = snapshot
            .nodes
            .iter()
            .map(|n| {
                if self.rng.random::<f64>() < DNS_UNHEALTHY_PROBABILITY {
                    n.with_dns_healthy(false)
                } else {
                    n.clone()
                }
            })
            .collect();

        ClusterSnapshot::new(nodes, dependencies)
    }
}

fn pod_overload(snapshot: &ClusterSnapshot) -> Result<ClusterSnapshot> {
    let nodes = snapshot
        .nodes
        .iter()
        .map(|n| {
            n.with_metrics(NodeMetrics {
                cpu_load: (n.cpu_load() * OVERLOAD_CPU_FACTOR).min(1.0),
                memory_usage: (n.memory_usage() * OVERLOAD_MEMORY_FACTOR).min(1.0),
                running_pods: n.running_pods() + OVERLOAD_EXTRA_PODS,
                storage_usage: n.storage_usage(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ClusterSnapshot::new(nodes, snapshot.dependencies.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> ClusterGenerator<StdRng> {
        ClusterGenerator::seeded(3, seed).unwrap()
    }

    #[test]
    fn test_generate_shape() {
        let mut gen = generator(7);
        let snapshot = gen.generate().unwrap();

        assert!(snapshot.nodes.len() >= 6 && snapshot.nodes.len() <= 12);
        assert_eq!(gen.zones(), ["zone-0", "zone-1", "zone-2"]);
        for node in &snapshot.nodes {
            assert!(node.name().starts_with(node.zone()));
            assert!((0.0..=1.0).contains(&node.cpu_load()));
            assert!((0.0..=1.0).contains(&node.storage_usage()));
        }
        for dep in &snapshot.dependencies {
            assert!(dep.latency_ms() == 10.0 || dep.latency_ms() == 150.0);
            assert_ne!(dep.source(), dep.target());
        }
    }

    #[test]
    fn test_same_seed_same_cluster() {
        let a = generator(42).generate().unwrap();
        let b = generator(42).generate().unwrap();

        assert_eq!(a.nodes.len(), b.nodes.len());
        for (x, y) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(x.name(), y.name());
            assert_eq!(x.metrics(), y.metrics());
        }
        assert_eq!(a.dependencies, b.dependencies);
    }

    #[test]
    fn test_zone_outage_removes_one_zone() {
        let mut gen = generator(3);
        let before = gen.generate().unwrap();
        let after = gen.inject_failure(&before, FailureType::ZoneOutage).unwrap();

        assert_eq!(before.zones().len(), 3);
        assert_eq!(after.zones().len(), 2);
        let survivors: Vec<&str> = after.nodes.iter().map(|n| n.name()).collect();
        for dep in &after.dependencies {
            assert!(survivors.contains(&dep.source()));
            assert!(survivors.contains(&dep.target()));
        }
    }

    #[test]
    fn test_pod_overload_caps_and_adds() {
        let mut gen = generator(11);
        let before = gen.generate().unwrap();
        let after = gen.inject_failure(&before, FailureType::PodOverload).unwrap();

        for (b, a) in before.nodes.iter().zip(&after.nodes) {
            assert_eq!(a.running_pods(), b.running_pods() + 5);
            assert!(a.cpu_load() <= 1.0);
            assert!((a.cpu_load() - (b.cpu_load() * 1.8).min(1.0)).abs() < 1e-12);
            assert!((a.memory_usage() - (b.memory_usage() * 1.5).min(1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dns_failure_deactivates_half() {
        let mut gen = generator(5);
        let before = ClusterSnapshot::new(
            gen.generate().unwrap().nodes,
            (0..6)
                .map(|i| ServiceDependency::new(format!("a{}", i), format!("b{}", i), 10.0).unwrap())
                .collect(),
        );
        let after = gen.inject_failure(&before, FailureType::DnsFailure).unwrap();

        assert_eq!(before.active_dependency_count(), 6);
        assert_eq!(after.active_dependency_count(), 3);
        assert_eq!(after.dependencies.len(), 6);
    }

    #[test]
    fn test_injection_does_not_touch_before() {
        let mut gen = generator(9);
        let before = gen.generate().unwrap();
        let copy = before.clone();
        for failure in FailureType::ALL {
            gen.inject_failure(&before, failure).unwrap();
        }
        assert_eq!(before, copy);
    }

    #[test]
    fn test_storage_failure_only_fills_disks() {
        let mut gen = generator(21);
        let before = gen.generate().unwrap();
        let after = gen.inject_failure(&before, FailureType::StorageFailure).unwrap();

        assert_eq!(before.nodes.len(), after.nodes.len());
        for (b, a) in before.nodes.iter().zip(&after.nodes) {
            assert!(a.storage_usage() == b.storage_usage() || a.storage_usage() == 1.0);
            assert_eq!(a.cpu_load(), b.cpu_load());
        }
    }
}
