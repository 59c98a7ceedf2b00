//! Vietoris-Rips Filtration
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! The filtration value of a simplex is the largest pairwise distance among
//! its vertices. Pairs at infinite distance never become adjacent, which is
//! how a sparse weighted graph is expressed as a distance matrix.

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// A simplex with the scale at which it enters the filtration
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSimplex {
    /// Vertex indices, strictly increasing
    pub vertices: Vec<usize>,
    pub birth: f64,
}

impl FilteredSimplex {
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }
}

/// Vietoris-Rips filtration builder
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Maximum filtration value
    max_epsilon: f64,
}

impl VietorisRips {
    /// Create from a precomputed distance matrix
    ///
    /// The matrix must be square with non-negative entries; `+∞` marks a
    /// pair that is never connected. NaN is rejected.
    pub fn from_distance_matrix(distances: ArrayView2<f64>, max_epsilon: f64) -> Result<Self> {
        let (rows, cols) = distances.dim();
        if rows != cols {
            return Err(Error::NonSquareMatrix { rows, cols });
        }
        for ((row, col), &value) in distances.indexed_iter() {
            if value.is_nan() || value < 0.0 {
                return Err(Error::InvalidDistance { row, col, value });
            }
        }

        Ok(Self {
            distances: distances.to_owned(),
            max_epsilon,
        })
    }

    /// Create from point cloud (computes Euclidean distance matrix)
    pub fn from_points(points: ArrayView2<f64>, max_epsilon: f64) -> Self {
        Self {
            distances: Self::compute_distance_matrix(points),
            max_epsilon,
        }
    }

    /// Compute Euclidean distance matrix
    fn compute_distance_matrix(points: ArrayView2<f64>) -> Array2<f64> {
        let n = points.nrows();
        let dim = points.ncols();

        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let mut dist_sq = 0.0;
                for d in 0..dim {
                    let diff = points[[i, d]] - points[[j, d]];
                    dist_sq += diff * diff;
                }
                let dist = dist_sq.sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }

    /// Symmetric distance between two points (the smaller of the two entries)
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]].min(self.distances[[j, i]])
    }

    fn connected(&self, i: usize, j: usize) -> bool {
        let d = self.distance(i, j);
        d.is_finite() && d <= self.max_epsilon
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    pub fn max_epsilon(&self) -> f64 {
        self.max_epsilon
    }

    /// All simplices up to `max_simplex_dim`, sorted by (birth, dimension,
    /// vertices)
    ///
    /// Cliques are grown one vertex at a time from the edge list, appending
    /// only vertices larger than the current last vertex so each simplex is
    /// produced once.
    pub fn filtration(&self, max_simplex_dim: usize) -> Vec<FilteredSimplex> {
        let n = self.n_points();
        let mut simplices: Vec<FilteredSimplex> = (0..n)
            .map(|i| FilteredSimplex {
                vertices: vec![i],
                birth: 0.0,
            })
            .collect();

        let mut frontier: Vec<FilteredSimplex> = simplices.clone();
        for _ in 0..max_simplex_dim {
            let mut next = Vec::new();
            for simplex in &frontier {
                let last = simplex.vertices[simplex.vertices.len() - 1];
                for v in last + 1..n {
                    if !simplex.vertices.iter().all(|&u| self.connected(u, v)) {
                        continue;
                    }
                    let birth = simplex
                        .vertices
                        .iter()
                        .map(|&u| self.distance(u, v))
                        .fold(simplex.birth, f64::max);
                    let mut vertices = simplex.vertices.clone();
                    vertices.push(v);
                    next.push(FilteredSimplex { vertices, birth });
                }
            }
            if next.is_empty() {
                break;
            }
            simplices.extend(next.iter().cloned());
            frontier = next;
        }

        simplices.sort_by(|a, b| {
            a.birth
                .total_cmp(&b.birth)
                .then(a.dimension().cmp(&b.dimension()))
                .then(a.vertices.cmp(&b.vertices))
        });
        simplices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]];

        let vr = VietorisRips::from_points(points.view(), f64::INFINITY);
        let simplices = vr.filtration(2);

        // 3 vertices + 3 edges + 1 triangle
        assert_eq!(simplices.len(), 7);
        assert_eq!(simplices.iter().filter(|s| s.dimension() == 1).count(), 3);
        let triangle = simplices.last().unwrap();
        assert_eq!(triangle.vertices, vec![0, 1, 2]);
        assert!((triangle.birth - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_infinite_entries_are_not_edges() {
        let inf = f64::INFINITY;
        let dm = array![[0.0, 0.5, inf], [0.5, 0.0, inf], [inf, inf, 0.0]];

        let vr = VietorisRips::from_distance_matrix(dm.view(), inf).unwrap();
        let simplices = vr.filtration(3);

        assert_eq!(simplices.len(), 4);
        assert_eq!(simplices[3].vertices, vec![0, 1]);
        assert_eq!(simplices[3].birth, 0.5);
    }

    #[test]
    fn test_max_epsilon_truncates() {
        let dm = array![[0.0, 1.0, 3.0], [1.0, 0.0, 3.0], [3.0, 3.0, 0.0]];
        let vr = VietorisRips::from_distance_matrix(dm.view(), 2.0).unwrap();
        assert_eq!(vr.filtration(2).len(), 4);
    }

    #[test]
    fn test_rejects_malformed_matrix() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            VietorisRips::from_distance_matrix(rect.view(), 1.0),
            Err(Error::NonSquareMatrix { rows: 2, cols: 3 })
        ));

        let negative = array![[0.0, -1.0], [-1.0, 0.0]];
        assert!(VietorisRips::from_distance_matrix(negative.view(), 1.0).is_err());

        let nan = array![[0.0, f64::NAN], [f64::NAN, 0.0]];
        assert!(VietorisRips::from_distance_matrix(nan.view(), 1.0).is_err());
    }

    #[test]
    fn test_tetrahedron_count() {
        // Four mutually adjacent points: 4 + 6 + 4 + 1 simplices
        let dm = array![
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 0.0]
        ];
        let vr = VietorisRips::from_distance_matrix(dm.view(), f64::INFINITY).unwrap();
        assert_eq!(vr.filtration(3).len(), 15);
    }
}
