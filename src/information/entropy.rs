//! Persistence Entropy: Information Content of a Diagram
//!
//! Lifetimes are normalized into a probability distribution and scored
//! with Shannon entropy. Higher entropy means feature lifetimes are spread
//! evenly; lower entropy means a few long-lived features dominate.

use crate::topology::PersistenceDiagram;

/// Entropy measures for one diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologicalEntropy {
    /// Persistent entropy (Shannon, natural log)
    pub persistent_entropy: f64,
    /// Persistent entropy divided by ln(features), in [0, 1]
    pub normalized_entropy: f64,
    /// Sum of the lifetimes that survived the tolerance filter
    pub total_lifetime: f64,
    /// Number of lifetimes that survived the tolerance filter
    pub features: usize,
}

impl TopologicalEntropy {
    /// Compute entropy measures with lifetime tolerance `epsilon`
    pub fn from_diagram(pd: &PersistenceDiagram, epsilon: f64) -> Self {
        let lifetimes = significant_lifetimes(pd, epsilon);
        let total_lifetime: f64 = lifetimes.iter().sum();
        let persistent_entropy = shannon(&lifetimes, total_lifetime, epsilon);

        let normalized_entropy = if lifetimes.len() > 1 {
            (persistent_entropy / (lifetimes.len() as f64).ln()).min(1.0)
        } else {
            0.0
        };

        Self {
            persistent_entropy,
            normalized_entropy,
            total_lifetime,
            features: lifetimes.len(),
        }
    }
}

/// Persistent entropy of a diagram
///
/// H = −Σᵢ pᵢ log(pᵢ + ε), pᵢ = lᵢ / Σⱼ lⱼ
///
/// Lifetimes lᵢ ≤ ε are discarded first. Returns 0.0 when nothing survives.
/// The ε inside the logarithm can push a single-feature result a hair below
/// zero; the result is clamped at 0.
pub fn persistence_entropy(pd: &PersistenceDiagram, epsilon: f64) -> f64 {
    let lifetimes = significant_lifetimes(pd, epsilon);
    let total: f64 = lifetimes.iter().sum();
    shannon(&lifetimes, total, epsilon)
}

fn significant_lifetimes(pd: &PersistenceDiagram, epsilon: f64) -> Vec<f64> {
    pd.lifetimes().into_iter().filter(|&l| l > epsilon).collect()
}

fn shannon(lifetimes: &[f64], total: f64, epsilon: f64) -> f64 {
    if lifetimes.is_empty() || total <= 0.0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for l in lifetimes {
        let p = l / total;
        entropy -= p * (p + epsilon).ln();
    }
    entropy.max(0.0)
}
