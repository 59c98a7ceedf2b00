//! Analysis configuration
//!
//! Numerical tolerances and statistical thresholds used by the pipeline.
//! Every field has a default, so an empty configuration source is valid.

use serde::{Deserialize, Serialize};

/// How storage outliers are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    /// Modified z-score: 0.6745 · (x − median) / MAD
    ///
    /// Falls back to the mean absolute deviation (scaled by 1.2533) when more
    /// than half the population shares the median value.
    #[default]
    Robust,
    /// Classical z-score against the population mean and standard deviation
    ///
    /// Bounded by √(n−1) for n samples, so small populations can never exceed
    /// a 2.5 threshold.
    Standard,
}

/// Pipeline tolerances and thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lifetimes at or below this are dropped before computing entropy; also
    /// regularizes `log(p + ε)`
    #[serde(default = "default_epsilon")]
    pub entropy_epsilon: f64,

    /// Added to latency before inversion: weight = 1 / (latency + ε)
    #[serde(default = "default_epsilon")]
    pub latency_epsilon: f64,

    /// Absolute score above which a storage reading is an outlier
    #[serde(default = "default_outlier_threshold")]
    pub outlier_z_threshold: f64,

    #[serde(default)]
    pub outlier_method: OutlierMethod,

    /// Optional finite cap on the Rips scale; `None` builds the full complex
    #[serde(default)]
    pub max_filtration: Option<f64>,
}

fn default_epsilon() -> f64 {
    1e-9
}

fn default_outlier_threshold() -> f64 {
    2.5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            entropy_epsilon: default_epsilon(),
            latency_epsilon: default_epsilon(),
            outlier_z_threshold: default_outlier_threshold(),
            outlier_method: OutlierMethod::default(),
            max_filtration: None,
        }
    }
}

impl AnalysisConfig {
    /// Rips scale bound handed to the filtration builder
    pub fn filtration_bound(&self) -> f64 {
        match self.max_filtration {
            Some(bound) if bound.is_finite() && bound >= 0.0 => bound,
            _ => f64::INFINITY,
        }
    }
}
