//! Failure signature catalog and strict validators
//!
//! Two separate questions are answered here:
//!
//! - `describe` / `lookup`: what topological and statistical changes a
//!   failure mode is expected to produce (a static description table)
//! - `validate_signature`: whether a computed report actually carries the
//!   evidence for a declared failure mode (one predicate per signature)
//!
//! Only zone outages have an evidence rule so far; every other declared
//! type fails strict validation.

use serde::Serialize;

use super::comparator::DimensionDelta;
use super::report::AnalysisReport;
use crate::cluster::FailureType;

/// One expected change within a failure signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub name: &'static str,
    pub description: &'static str,
}

const fn indicator(name: &'static str, description: &'static str) -> Indicator {
    Indicator { name, description }
}

const ZONE_OUTAGE: &[Indicator] = &[
    indicator("Metric H0", "Large component increase (Δ ≥ 2)"),
    indicator("Network H0", "Component fragmentation"),
    indicator("Key Indicator", "Wasserstein H0 > 1.5 + Entropy H0 ↓"),
];

const STORAGE_FAILURE: &[Indicator] = &[
    indicator("Metric H0", "High entropy dispersion"),
    indicator("Network H0", "Stable components"),
    indicator("Key Indicator", "Storage outliers + Entropy H0 ↑"),
];

const NETWORK_CONGESTION: &[Indicator] = &[
    indicator("Network H1", "Persistent cycle formation"),
    indicator("Metric Space", "Stable persistence"),
    indicator("Key Indicator", "H1 cycles > 2 + Wasserstein H1 > 1.0"),
];

const DNS_FAILURE: &[Indicator] = &[
    indicator("Network H0", "Dependency breakdown"),
    indicator("Network H1", "Cycle collapse"),
    indicator("Key Indicator", "Active dependencies ↓ 50% + Entropy H0 ↑"),
];

const POD_OVERLOAD: &[Indicator] = &[
    indicator("Metric H1", "Resource contention patterns"),
    indicator("Network H0", "Stable services"),
    indicator("Key Indicator", "Wasserstein H1 > 0.8 + CPU/Memory correlation"),
];

/// Minimum network H0 growth for a zone outage
pub const ZONE_OUTAGE_MIN_FRAGMENTS: i64 = 2;

/// Metric H0 distance a zone outage must exceed
pub const ZONE_OUTAGE_MIN_DISTANCE: f64 = 1.0;

/// Expected indicators for a failure mode
pub fn describe(failure: FailureType) -> &'static [Indicator] {
    match failure {
        FailureType::ZoneOutage => ZONE_OUTAGE,
        FailureType::StorageFailure => STORAGE_FAILURE,
        FailureType::NetworkCongestion => NETWORK_CONGESTION,
        FailureType::DnsFailure => DNS_FAILURE,
        FailureType::PodOverload => POD_OVERLOAD,
    }
}

/// Expected indicators for a failure token; empty when the token is unknown
pub fn lookup(token: &str) -> &'static [Indicator] {
    token.parse::<FailureType>().map(describe).unwrap_or_default()
}

/// Zone outage evidence: the dependency network fragments into at least
/// two extra components while the metric space moves by more than 1.0
pub fn zone_outage_matches(network_h0: &DimensionDelta, metric_h0: &DimensionDelta) -> bool {
    network_h0.component_count_delta >= ZONE_OUTAGE_MIN_FRAGMENTS
        && metric_h0.distance > ZONE_OUTAGE_MIN_DISTANCE
}

/// Whether `report` carries the evidence for `failure`
pub fn validate_signature(report: &AnalysisReport, failure: FailureType) -> bool {
    match failure {
        FailureType::ZoneOutage => zone_outage_matches(&report.network.h0, &report.metric.h0),
        FailureType::StorageFailure
        | FailureType::NetworkCongestion
        | FailureType::DnsFailure
        | FailureType::PodOverload => false,
    }
}
