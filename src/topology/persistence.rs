//! Exact Persistent Homology via the Standard Algorithm
//!
//! ## Algorithm Overview
//!
//! 1. Build the filtered Vietoris-Rips complex up to 3-simplices
//! 2. Sort simplices by (birth_time, dimension, vertices)
//! 3. Reduce the boundary matrix over Z/2Z with left-to-right column additions
//! 4. Read persistence pairs from the pivots of the reduced matrix
//!
//! Tetrahedra are included so that 2-dimensional voids can die; homology is
//! reported for dimensions 0, 1 and 2. Zero-length pairs are not recorded and
//! essential classes (infinite death) are removed when the canonical diagrams
//! are assembled.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

use ndarray::ArrayView2;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::diagram::{DiagramSet, PersistenceDiagram, HOMOLOGY_DIMENSIONS};
use super::network::NetworkComplex;
use super::vietoris_rips::VietorisRips;
use crate::error::Result;

/// A persistence interval [birth, death)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistenceInterval {
    pub birth: f64,
    pub death: f64,
    pub dimension: usize,
}

impl PersistenceInterval {
    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Sparse column representation for boundary matrix
#[derive(Debug, Clone)]
struct SparseColumn {
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    fn new() -> Self {
        Self {
            rows: BTreeSet::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the lowest (maximum) non-zero index
    fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    /// XOR (symmetric difference) - addition in Z/2Z
    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

/// Compute every persistence interval of the filtration, essential ones
/// included, for homology dimensions up to `max_dim`
pub fn compute_intervals(vr: &VietorisRips, max_dim: usize) -> Vec<PersistenceInterval> {
    let simplices = vr.filtration(max_dim + 1);

    let simplex_index: HashMap<&[usize], usize> = simplices
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.vertices.as_slice(), idx))
        .collect();

    let m = simplices.len();
    let mut columns: Vec<SparseColumn> = Vec::with_capacity(m);
    let mut low_to_col: HashMap<usize, usize> = HashMap::new();

    for (col_idx, simplex) in simplices.iter().enumerate() {
        // Boundary of [v0, ..., vk] = sum of [v0, ..., v̂i, ..., vk]
        let mut boundary = SparseColumn::new();
        if simplex.dimension() > 0 {
            for i in 0..simplex.vertices.len() {
                let mut face = simplex.vertices.clone();
                face.remove(i);
                if let Some(&face_idx) = simplex_index.get(face.as_slice()) {
                    boundary.toggle(face_idx);
                }
            }
        }

        while let Some(low_idx) = boundary.low() {
            match low_to_col.get(&low_idx) {
                Some(&pivot_col) => boundary.add_assign(&columns[pivot_col]),
                None => break,
            }
        }

        if let Some(low_idx) = boundary.low() {
            low_to_col.insert(low_idx, col_idx);
        }
        columns.push(boundary);
    }

    let mut intervals = Vec::new();
    let mut paired = vec![false; m];

    for (col_idx, column) in columns.iter().enumerate() {
        if let Some(low_idx) = column.low() {
            // Column col_idx kills the class created by simplex low_idx
            let birth_simplex = &simplices[low_idx];
            let death_simplex = &simplices[col_idx];
            paired[low_idx] = true;
            paired[col_idx] = true;

            let dimension = birth_simplex.dimension();
            if dimension <= max_dim && death_simplex.birth > birth_simplex.birth {
                intervals.push(PersistenceInterval {
                    birth: birth_simplex.birth,
                    death: death_simplex.birth,
                    dimension,
                });
            }
        }
    }

    for (idx, simplex) in simplices.iter().enumerate() {
        if !paired[idx] && columns[idx].is_zero() && simplex.dimension() <= max_dim {
            intervals.push(PersistenceInterval {
                birth: simplex.birth,
                death: f64::INFINITY,
                dimension: simplex.dimension(),
            });
        }
    }

    intervals
}

/// Assemble canonical diagrams for dimensions 0..=2
fn assemble(intervals: &[PersistenceInterval]) -> Result<DiagramSet> {
    let mut diagrams: [PersistenceDiagram; HOMOLOGY_DIMENSIONS] = Default::default();
    for (dim, diagram) in diagrams.iter_mut().enumerate() {
        *diagram = PersistenceDiagram::from_pairs(
            intervals
                .iter()
                .filter(|i| i.dimension == dim && !i.is_essential())
                .map(|i| (i.birth, i.death)),
        )?;
    }
    Ok(DiagramSet::new(diagrams))
}

/// Persistence diagrams for H0, H1 and H2 from either input representation
#[derive(Debug, Clone, Copy)]
pub struct PersistenceEngine {
    max_epsilon: f64,
}

impl PersistenceEngine {
    pub fn new(max_epsilon: f64) -> Self {
        Self { max_epsilon }
    }

    /// Rips filtration over a point cloud (one row per point)
    pub fn from_points(&self, points: ArrayView2<f64>) -> Result<DiagramSet> {
        if points.nrows() == 0 {
            return Ok(DiagramSet::empty());
        }
        let vr = VietorisRips::from_points(points, self.max_epsilon);
        self.run(&vr)
    }

    /// Rips filtration over a precomputed distance matrix
    pub fn from_distance_matrix(&self, distances: ArrayView2<f64>) -> Result<DiagramSet> {
        let vr = VietorisRips::from_distance_matrix(distances, self.max_epsilon)?;
        if vr.n_points() == 0 {
            return Ok(DiagramSet::empty());
        }
        self.run(&vr)
    }

    /// Diagrams of a dependency network; an empty network yields three
    /// empty diagrams
    pub fn from_network(&self, network: &NetworkComplex) -> Result<DiagramSet> {
        match network {
            NetworkComplex::Empty => Ok(DiagramSet::empty()),
            NetworkComplex::Weighted(graph) => self.from_distance_matrix(graph.distances()),
        }
    }

    fn run(&self, vr: &VietorisRips) -> Result<DiagramSet> {
        let intervals = compute_intervals(vr, HOMOLOGY_DIMENSIONS - 1);
        let set = assemble(&intervals)?;
        debug!(
            points = vr.n_points(),
            intervals = intervals.len(),
            h0 = set.counts()[0],
            h1 = set.counts()[1],
            h2 = set.counts()[2],
            "computed persistence"
        );
        Ok(set)
    }
}

impl Default for PersistenceEngine {
    fn default() -> Self {
        Self::new(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn intervals(dm: ArrayView2<f64>) -> Vec<PersistenceInterval> {
        let vr = VietorisRips::from_distance_matrix(dm, f64::INFINITY).unwrap();
        compute_intervals(&vr, 2)
    }

    #[test]
    fn test_two_points() {
        let dm = array![[0.0, 1.0], [1.0, 0.0]];
        let all = intervals(dm.view());

        let finite_h0: Vec<_> = all
            .iter()
            .filter(|i| i.dimension == 0 && !i.is_essential())
            .collect();
        assert_eq!(finite_h0.len(), 1);
        assert!((finite_h0[0].birth - 0.0).abs() < 1e-10);
        assert!((finite_h0[0].death - 1.0).abs() < 1e-10);
        assert_eq!(all.iter().filter(|i| i.is_essential()).count(), 1);
    }

    #[test]
    fn test_square_cycle() {
        // Square: edges of length 1, diagonals of length sqrt(2)
        let s2 = 2.0_f64.sqrt();
        let dm = array![
            [0.0, 1.0, s2, 1.0],
            [1.0, 0.0, 1.0, s2],
            [s2, 1.0, 0.0, 1.0],
            [1.0, s2, 1.0, 0.0]
        ];

        let set = PersistenceEngine::default().from_distance_matrix(dm.view()).unwrap();
        assert_eq!(set.counts(), [3, 1, 0]);

        let h1 = set.dim(1).unwrap();
        assert!((h1.births()[0] - 1.0).abs() < 1e-10, "Cycle born at 1");
        assert!((h1.deaths()[0] - s2).abs() < 1e-10, "Cycle dies at sqrt(2)");
    }

    #[test]
    fn test_octahedron_void() {
        // Octahedron vertices ±e_i: opposite pairs at distance 2, others sqrt(2)
        let points = array![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0]
        ];

        let set = PersistenceEngine::default().from_points(points.view()).unwrap();
        let h2 = set.dim(2).unwrap();
        assert_eq!(h2.len(), 1);
        assert!((h2.births()[0] - 2.0_f64.sqrt()).abs() < 1e-10);
        assert!((h2.deaths()[0] - 2.0).abs() < 1e-10);
        assert_eq!(set.dim(1).unwrap().len(), 0);
    }

    #[test]
    fn test_empty_inputs_are_well_shaped() {
        let engine = PersistenceEngine::default();
        let none = ndarray::Array2::<f64>::zeros((0, 4));
        let set = engine.from_points(none.view()).unwrap();
        assert_eq!(set.counts(), [0, 0, 0]);

        let set = engine.from_network(&NetworkComplex::Empty).unwrap();
        for diagram in set.iter() {
            assert_eq!(diagram.points().shape(), &[0, 2]);
        }
    }

    #[test]
    fn test_duplicate_points_produce_no_zero_length_pairs() {
        let points = array![[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]];
        let set = PersistenceEngine::default().from_points(points.view()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_disconnected_graph_keeps_components_essential() {
        let inf = f64::INFINITY;
        let dm = array![
            [0.0, 0.1, inf, inf],
            [0.1, 0.0, inf, inf],
            [inf, inf, 0.0, 0.2],
            [inf, inf, 0.2, 0.0]
        ];
        let set = PersistenceEngine::default().from_distance_matrix(dm.view()).unwrap();
        assert_eq!(set.counts(), [2, 0, 0]);
    }
}
