//! Node metric embedding
//!
//! Each node becomes a point in R⁴ with columns
//! (cpu_load, memory_usage, running_pods / 10, storage_usage), then every
//! column is standardized to zero mean and unit variance.
//!
//! The scaler is fitted on the snapshot being embedded and discarded
//! afterwards. Two snapshots are therefore compared by relative shape, not
//! by absolute magnitude: a uniform shift in load across all nodes leaves
//! the embedded point cloud unchanged.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::cluster::Node;

/// Number of embedded features per node
pub const FEATURE_COUNT: usize = 4;

/// Divisor that brings pod counts to the scale of the [0, 1] readings
pub const POD_SCALE: f64 = 10.0;

/// Column-wise standardization fitted on a single matrix
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Fit population mean and standard deviation per column
    ///
    /// Constant columns get a scale of 1 so they map to zero instead of NaN.
    pub fn fit(data: ArrayView2<f64>) -> Self {
        let cols = data.ncols();
        if data.nrows() == 0 {
            return Self {
                mean: Array1::zeros(cols),
                scale: Array1::ones(cols),
            };
        }

        let mean = data.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(cols));
        let scale = data.std_axis(Axis(0), 0.0).mapv(|s| {
            if s < 10.0 * f64::EPSILON {
                1.0
            } else {
                s
            }
        });
        Self { mean, scale }
    }

    pub fn transform(&self, data: ArrayView2<f64>) -> Array2<f64> {
        (&data - &self.mean) / &self.scale
    }

    pub fn fit_transform(data: ArrayView2<f64>) -> Array2<f64> {
        Self::fit(data).transform(data)
    }
}

/// Standardized node feature matrix
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    raw: Array2<f64>,
    standardized: Array2<f64>,
}

impl FeatureMatrix {
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let raw = Array2::from_shape_fn((nodes.len(), FEATURE_COUNT), |(i, j)| {
            let node = &nodes[i];
            match j {
                0 => node.cpu_load(),
                1 => node.memory_usage(),
                2 => node.running_pods() as f64 / POD_SCALE,
                _ => node.storage_usage(),
            }
        });
        let standardized = StandardScaler::fit_transform(raw.view());
        Self { raw, standardized }
    }

    /// Unscaled features
    pub fn raw(&self) -> ArrayView2<'_, f64> {
        self.raw.view()
    }

    /// Zero-mean, unit-variance features
    pub fn standardized(&self) -> ArrayView2<'_, f64> {
        self.standardized.view()
    }

    pub fn n_nodes(&self) -> usize {
        self.raw.nrows()
    }
}
