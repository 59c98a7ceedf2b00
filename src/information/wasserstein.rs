//! Wasserstein Distance Between Persistence Diagrams
//!
//! Each diagram is augmented with its projections onto the diagonal so
//! that points may be matched either to each other or "destroyed":
//!
//! ```text
//!              T (m)            diag(S) (n)
//!   S (n)   [ L∞(sᵢ, tⱼ)     | δ(sᵢ) on diagonal ]
//!   diag(T) [ δ(tⱼ) on diag. | 0                 ]
//! ```
//!
//! with δ(b, d) = (d − b)/√2, the Euclidean distance to the diagonal.
//! The distance is the cost of the minimum-cost perfect matching (W₁).
//! Off-diagonal entries of the δ blocks are forbidden; they get a cost
//! larger than matching everything to the diagonal, so no optimum uses them.

use ndarray::Array2;
use std::f64::consts::SQRT_2;

use super::matching::min_cost_assignment;
use crate::topology::PersistenceDiagram;

/// Euclidean distance from (birth, death) to the diagonal
fn diagonal_distance(birth: f64, death: f64) -> f64 {
    (death - birth) / SQRT_2
}

/// W₁ distance between two diagrams with L∞ ground metric between points
///
/// Comparing against an empty diagram costs the distance of every point to
/// the diagonal; two empty diagrams are at distance 0.
pub fn wasserstein_distance(a: &PersistenceDiagram, b: &PersistenceDiagram) -> f64 {
    let s: Vec<(f64, f64)> = a.iter().collect();
    let t: Vec<(f64, f64)> = b.iter().collect();
    let n = s.len();
    let m = t.len();

    let to_diagonal_s: Vec<f64> = s.iter().map(|&(b, d)| diagonal_distance(b, d)).collect();
    let to_diagonal_t: Vec<f64> = t.iter().map(|&(b, d)| diagonal_distance(b, d)).collect();

    if n == 0 || m == 0 {
        return to_diagonal_s.iter().chain(&to_diagonal_t).sum();
    }

    let forbidden = 1.0 + to_diagonal_s.iter().chain(&to_diagonal_t).sum::<f64>();
    let size = n + m;
    let mut cost = Array2::<f64>::zeros((size, size));

    for i in 0..n {
        for j in 0..m {
            cost[[i, j]] = (s[i].0 - t[j].0).abs().max((s[i].1 - t[j].1).abs());
        }
        for k in 0..n {
            cost[[i, m + k]] = if i == k { to_diagonal_s[i] } else { forbidden };
        }
    }
    for j in 0..m {
        for k in 0..m {
            cost[[n + j, k]] = if j == k { to_diagonal_t[j] } else { forbidden };
        }
    }

    min_cost_assignment(cost.view())
        .into_iter()
        .enumerate()
        .map(|(row, col)| cost[[row, col]])
        .sum()
}
