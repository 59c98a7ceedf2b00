//! Canonical Persistence Diagrams
//!
//! A diagram is stored as an n × 2 array of (birth, death) rows. The shape
//! is enforced once, here, so consumers can always index columns 0 and 1:
//!
//! - zero points is a 0 × 2 array, never a missing entry
//! - points with infinite death (essential classes) are dropped
//! - every kept row satisfies 0 ≤ birth ≤ death < ∞

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Number of tracked homology dimensions (H0, H1, H2)
pub const HOMOLOGY_DIMENSIONS: usize = 3;

/// Finite persistence pairs for one homology dimension
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceDiagram {
    points: Array2<f64>,
}

impl PersistenceDiagram {
    /// A 0 × 2 diagram
    pub fn empty() -> Self {
        Self {
            points: Array2::zeros((0, 2)),
        }
    }

    /// Build from (birth, death) pairs, dropping essential classes
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let mut kept: Vec<(f64, f64)> = Vec::new();
        for (birth, death) in pairs {
            if death == f64::INFINITY && birth.is_finite() && birth >= 0.0 {
                continue;
            }
            if !birth.is_finite() || !death.is_finite() || birth < 0.0 || death < birth {
                return Err(Error::MalformedPoint { birth, death });
            }
            kept.push((birth, death));
        }

        let points = Array2::from_shape_fn((kept.len(), 2), |(i, j)| {
            if j == 0 {
                kept[i].0
            } else {
                kept[i].1
            }
        });
        Ok(Self { points })
    }

    /// Build from an array, normalizing empty input of any shape to 0 × 2
    pub fn from_array(array: ArrayView2<f64>) -> Result<Self> {
        if array.is_empty() {
            return Ok(Self::empty());
        }
        if array.ncols() != 2 {
            return Err(Error::DiagramShape(array.ncols()));
        }
        Self::from_pairs(array.rows().into_iter().map(|row| (row[0], row[1])))
    }

    /// Number of finite points
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// The n × 2 point array
    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    pub fn births(&self) -> ArrayView1<'_, f64> {
        self.points.column(0)
    }

    pub fn deaths(&self) -> ArrayView1<'_, f64> {
        self.points.column(1)
    }

    /// death − birth for every point
    pub fn lifetimes(&self) -> Vec<f64> {
        self.points
            .axis_iter(Axis(0))
            .map(|row| row[1] - row[0])
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.axis_iter(Axis(0)).map(|row| (row[0], row[1]))
    }

    /// Sum of lifetimes
    pub fn total_persistence(&self) -> f64 {
        self.lifetimes().iter().sum()
    }
}

impl Default for PersistenceDiagram {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for PersistenceDiagram {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(b, d)| [b, d]))
    }
}

/// Diagrams for dimensions 0, 1 and 2
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DiagramSet {
    diagrams: [PersistenceDiagram; HOMOLOGY_DIMENSIONS],
}

impl DiagramSet {
    /// Three 0 × 2 diagrams
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(diagrams: [PersistenceDiagram; HOMOLOGY_DIMENSIONS]) -> Self {
        Self { diagrams }
    }

    /// Diagram for homology dimension `dim`
    pub fn dim(&self, dim: usize) -> Result<&PersistenceDiagram> {
        self.diagrams
            .get(dim)
            .ok_or(Error::UnsupportedDimension(dim))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistenceDiagram> {
        self.diagrams.iter()
    }

    /// Finite feature count per dimension
    pub fn counts(&self) -> [usize; HOMOLOGY_DIMENSIONS] {
        [
            self.diagrams[0].len(),
            self.diagrams[1].len(),
            self.diagrams[2].len(),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.iter().all(|d| d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_empty_is_two_columns() {
        let pd = PersistenceDiagram::empty();
        assert_eq!(pd.points().shape(), &[0, 2]);
        assert!(pd.is_empty());
        assert!(pd.lifetimes().is_empty());
    }

    #[test]
    fn test_infinite_deaths_are_dropped() {
        let pd = PersistenceDiagram::from_pairs(vec![(0.0, 1.0), (0.0, f64::INFINITY)]).unwrap();
        assert_eq!(pd.points().shape(), &[1, 2]);
        assert_eq!(pd.births()[0], 0.0);
        assert_eq!(pd.deaths()[0], 1.0);
    }

    #[test]
    fn test_single_point_keeps_shape() {
        let pd = PersistenceDiagram::from_pairs(vec![(0.5, 0.75)]).unwrap();
        assert_eq!(pd.points().shape(), &[1, 2]);
        assert!((pd.total_persistence() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_points_rejected() {
        assert!(PersistenceDiagram::from_pairs(vec![(1.0, 0.5)]).is_err());
        assert!(PersistenceDiagram::from_pairs(vec![(f64::NAN, 1.0)]).is_err());
        assert!(PersistenceDiagram::from_pairs(vec![(-0.1, 1.0)]).is_err());
        assert!(PersistenceDiagram::from_pairs(vec![(0.0, f64::NAN)]).is_err());
    }

    #[test]
    fn test_from_array_normalizes_empty_and_checks_columns() {
        let ragged = Array2::<f64>::zeros((0, 5));
        assert_eq!(
            PersistenceDiagram::from_array(ragged.view()).unwrap().points().shape(),
            &[0, 2]
        );

        let wide = array![[0.0, 1.0, 2.0]];
        assert_eq!(
            PersistenceDiagram::from_array(wide.view()).unwrap_err(),
            Error::DiagramShape(3)
        );

        let ok = array![[0.0, 1.0], [0.2, f64::INFINITY]];
        assert_eq!(PersistenceDiagram::from_array(ok.view()).unwrap().len(), 1);
    }

    #[test]
    fn test_diagram_set_dimensions() {
        let set = DiagramSet::empty();
        assert_eq!(set.counts(), [0, 0, 0]);
        assert!(set.dim(2).is_ok());
        assert_eq!(set.dim(3).unwrap_err(), Error::UnsupportedDimension(3));
        assert!(set.iter().all(|d| d.points().ncols() == 2));
    }

    #[test]
    fn test_serializes_as_pairs() {
        let pd = PersistenceDiagram::from_pairs(vec![(0.0, 1.5)]).unwrap();
        assert_eq!(serde_json::to_string(&pd).unwrap(), "[[0.0,1.5]]");
    }
}
