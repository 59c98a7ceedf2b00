//! Storage outlier detection
//!
//! A population-level test over the storage_usage readings of one snapshot,
//! independent of the topological pipeline.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cluster::Node;
use crate::config::OutlierMethod;

/// Consistency constant relating MAD to σ for normal data
const MAD_SCALE: f64 = 0.6745;

/// Consistency constant relating mean absolute deviation to σ
const MEAN_AD_SCALE: f64 = 1.253314;

/// Spreads below this are treated as zero
const SPREAD_FLOOR: f64 = 1e-12;

/// Storage usage statistics for one population
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageSummary {
    pub mean: f64,
    pub max: f64,
    pub outliers: usize,
}

/// Flags readings whose absolute score exceeds a threshold
#[derive(Debug, Clone, Copy)]
pub struct OutlierDetector {
    pub threshold: f64,
    pub method: OutlierMethod,
}

impl OutlierDetector {
    pub fn new(threshold: f64, method: OutlierMethod) -> Self {
        Self { threshold, method }
    }

    /// Signed score per value; all zeros when the population has no spread
    pub fn scores(&self, values: &[f64]) -> Vec<f64> {
        match self.method {
            OutlierMethod::Robust => robust_scores(values),
            OutlierMethod::Standard => standard_scores(values),
        }
    }

    /// Number of values with |score| > threshold, in [0, values.len()]
    pub fn count(&self, values: &[f64]) -> usize {
        self.scores(values)
            .into_iter()
            .filter(|z| z.abs() > self.threshold)
            .count()
    }

    pub fn storage_outliers(&self, nodes: &[Node]) -> usize {
        self.count(&storage_values(nodes))
    }

    /// Mean, maximum and outlier count; all zero for an empty population
    pub fn summarize(&self, nodes: &[Node]) -> StorageSummary {
        let values = storage_values(nodes);
        if values.is_empty() {
            return StorageSummary::default();
        }

        StorageSummary {
            mean: values.iter().sum::<f64>() / values.len() as f64,
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            outliers: self.count(&values),
        }
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new(2.5, OutlierMethod::default())
    }
}

fn storage_values(nodes: &[Node]) -> Vec<f64> {
    nodes.iter().map(|n| n.storage_usage()).collect()
}

fn standard_scores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

    if std < SPREAD_FLOOR {
        return vec![0.0; values.len()];
    }
    values.iter().map(|x| (x - mean) / std).collect()
}

fn robust_scores(values: &[f64]) -> Vec<f64> {
    let Some(med) = median(values) else {
        return Vec::new();
    };
    let deviations: Vec<f64> = values.iter().map(|x| (x - med).abs()).collect();
    let mad = median(&deviations).unwrap_or(0.0);

    if mad > SPREAD_FLOOR {
        return values.iter().map(|x| MAD_SCALE * (x - med) / mad).collect();
    }

    // More than half the readings sit on the median
    let mean_ad = deviations.iter().sum::<f64>() / deviations.len() as f64;
    if mean_ad > SPREAD_FLOOR {
        values.iter().map(|x| (x - med) / (MEAN_AD_SCALE * mean_ad)).collect()
    } else {
        vec![0.0; values.len()]
    }
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
