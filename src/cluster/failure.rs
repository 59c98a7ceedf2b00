//! Injectable failure modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Failure modes the generator can inject and the catalog can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    /// One availability zone disappears with all its dependencies
    ZoneOutage,
    /// A quarter of the nodes fill their disks
    StorageFailure,
    /// A subset of dependencies slows down tenfold
    NetworkCongestion,
    /// Half the dependencies break and some resolvers fail
    DnsFailure,
    /// Every node takes on extra pods and resource pressure
    PodOverload,
}

impl FailureType {
    pub const ALL: [FailureType; 5] = [
        FailureType::ZoneOutage,
        FailureType::StorageFailure,
        FailureType::NetworkCongestion,
        FailureType::DnsFailure,
        FailureType::PodOverload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureType::ZoneOutage => "zone_outage",
            FailureType::StorageFailure => "storage_failure",
            FailureType::NetworkCongestion => "network_congestion",
            FailureType::DnsFailure => "dns_failure",
            FailureType::PodOverload => "pod_overload",
        }
    }
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailureType::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::UnknownFailureType(s.to_string()))
    }
}
