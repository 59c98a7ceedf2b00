//! Cluster records: nodes and service dependencies
//!
//! Both record types validate on construction and are never mutated in
//! place. Failure injection derives modified copies, so a "before" snapshot
//! stays independently referenceable after the "after" snapshot is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Resource readings for one node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// Fraction of CPU in use, in [0, 1]
    pub cpu_load: f64,
    /// Fraction of memory in use, in [0, 1]
    pub memory_usage: f64,
    pub running_pods: u32,
    /// Fraction of storage in use, in [0, 1]
    pub storage_usage: f64,
}

impl NodeMetrics {
    pub fn new(cpu_load: f64, memory_usage: f64, running_pods: u32, storage_usage: f64) -> Self {
        Self {
            cpu_load,
            memory_usage,
            running_pods,
            storage_usage,
        }
    }

    fn validate(&self, node: &str) -> Result<()> {
        for (field, value) in [
            ("cpu_load", self.cpu_load),
            ("memory_usage", self.memory_usage),
            ("storage_usage", self.storage_usage),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::MetricOutOfRange {
                    node: node.to_string(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// One cluster member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    name: String,
    zone: String,
    metrics: NodeMetrics,
    critical_services: BTreeSet<String>,
    last_heartbeat: DateTime<Utc>,
    dns_healthy: bool,
}

impl Node {
    /// Create a node with a healthy DNS resolver
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        metrics: NodeMetrics,
        critical_services: impl IntoIterator<Item = String>,
        last_heartbeat: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyIdentifier);
        }
        metrics.validate(&name)?;

        Ok(Self {
            name,
            zone: zone.into(),
            metrics,
            critical_services: critical_services.into_iter().collect(),
            last_heartbeat,
            dns_healthy: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }

    pub fn cpu_load(&self) -> f64 {
        self.metrics.cpu_load
    }

    pub fn memory_usage(&self) -> f64 {
        self.metrics.memory_usage
    }

    pub fn running_pods(&self) -> u32 {
        self.metrics.running_pods
    }

    pub fn storage_usage(&self) -> f64 {
        self.metrics.storage_usage
    }

    pub fn critical_services(&self) -> &BTreeSet<String> {
        &self.critical_services
    }

    pub fn hosts(&self, service: &str) -> bool {
        self.critical_services.contains(service)
    }

    pub fn last_heartbeat(&self) -> DateTime<Utc> {
        self.last_heartbeat
    }

    pub fn dns_healthy(&self) -> bool {
        self.dns_healthy
    }

    /// Derive a copy carrying different resource readings
    pub fn with_metrics(&self, metrics: NodeMetrics) -> Result<Self> {
        metrics.validate(&self.name)?;
        Ok(Self {
            metrics,
            ..self.clone()
        })
    }

    /// Derive a copy with a different DNS health flag
    pub fn with_dns_healthy(&self, dns_healthy: bool) -> Self {
        Self {
            dns_healthy,
            ..self.clone()
        }
    }
}

/// Directed service dependency between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDependency {
    source: String,
    target: String,
    latency_ms: f64,
    active: bool,
}

impl ServiceDependency {
    /// Create an active dependency; latency must be finite and non-negative
    pub fn new(source: impl Into<String>, target: impl Into<String>, latency_ms: f64) -> Result<Self> {
        let source = source.into();
        let target = target.into();
        if source.is_empty() || target.is_empty() {
            return Err(Error::EmptyIdentifier);
        }
        check_latency(&source, &target, latency_ms)?;

        Ok(Self {
            source,
            target,
            latency_ms,
            active: true,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }

    /// Derive a copy with a different activity flag
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }

    /// Derive a copy with latency multiplied by `factor`
    pub fn with_latency_scaled(&self, factor: f64) -> Result<Self> {
        let latency_ms = self.latency_ms * factor;
        check_latency(&self.source, &self.target, latency_ms)?;
        Ok(Self {
            latency_ms,
            ..self.clone()
        })
    }
}

fn check_latency(source: &str, target: &str, latency_ms: f64) -> Result<()> {
    if latency_ms.is_finite() && latency_ms >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidLatency {
            from: source.to_string(),
            to: target.to_string(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> Node {
        Node::new(
            name,
            "zone-a",
            NodeMetrics::new(0.5, 0.3, 2, 0.4),
            vec!["ingress".to_string()],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_node_creation() {
        let n = node("node1");
        assert_eq!(n.name(), "node1");
        assert_eq!(n.zone(), "zone-a");
        assert_eq!(n.cpu_load(), 0.5);
        assert!(n.hosts("ingress"));
        assert!(n.dns_healthy());
    }

    #[test]
    fn test_node_rejects_out_of_range_metrics() {
        let err = Node::new("n", "z", NodeMetrics::new(1.2, 0.3, 2, 0.4), Vec::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::MetricOutOfRange { field: "cpu_load", .. }));

        let err = Node::new("n", "z", NodeMetrics::new(0.2, f64::NAN, 2, 0.4), Vec::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::MetricOutOfRange { field: "memory_usage", .. }));
    }

    #[test]
    fn test_node_rejects_empty_name() {
        let err = Node::new("", "z", NodeMetrics::new(0.2, 0.2, 0, 0.2), Vec::new(), Utc::now())
            .unwrap_err();
        assert_eq!(err, Error::EmptyIdentifier);
    }

    #[test]
    fn test_derived_copy_leaves_original_untouched() {
        let original = node("node1");
        let failed = original
            .with_metrics(NodeMetrics {
                storage_usage: 1.0,
                ..*original.metrics()
            })
            .unwrap()
            .with_dns_healthy(false);

        assert_eq!(original.storage_usage(), 0.4);
        assert!(original.dns_healthy());
        assert_eq!(failed.storage_usage(), 1.0);
        assert!(!failed.dns_healthy());
        assert_eq!(failed.name(), original.name());
    }

    #[test]
    fn test_dependency_rejects_negative_latency() {
        assert!(ServiceDependency::new("a", "b", 0.0).is_ok());
        let err = ServiceDependency::new("a", "b", -1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidLatency { .. }));
        assert!(ServiceDependency::new("a", "b", f64::INFINITY).is_err());
    }

    #[test]
    fn test_dependency_derivations() {
        let dep = ServiceDependency::new("a", "b", 15.0).unwrap();
        assert!(dep.is_active());

        let slow = dep.with_latency_scaled(10.0).unwrap();
        assert_eq!(slow.latency_ms(), 150.0);
        assert_eq!(dep.latency_ms(), 15.0);

        let off = dep.with_active(false);
        assert!(!off.is_active());
        assert!(off.touches("a") && off.touches("b") && !off.touches("c"));

        assert!(dep.with_latency_scaled(-2.0).is_err());
    }
}
