//! Error types for cluster construction and topological analysis

use thiserror::Error;

/// Errors raised when input violates the caller contract.
///
/// Degenerate input (empty populations, empty dependency sets, identical
/// features) is never an error: it yields empty diagrams and zero statistics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("node identifier must not be empty")]
    EmptyIdentifier,

    #[error("node `{node}`: {field} must be a finite value in [0, 1], got {value}")]
    MetricOutOfRange {
        node: String,
        field: &'static str,
        value: f64,
    },

    #[error("dependency {from} -> {to}: latency must be finite and non-negative, got {latency_ms}")]
    InvalidLatency {
        from: String,
        to: String,
        latency_ms: f64,
    },

    #[error("persistence diagram must have exactly 2 columns, got {0}")]
    DiagramShape(usize),

    #[error("malformed persistence point ({birth}, {death})")]
    MalformedPoint { birth: f64, death: f64 },

    #[error("distance matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("distance matrix entry [{row}, {col}] is invalid: {value}")]
    InvalidDistance { row: usize, col: usize, value: f64 },

    #[error("homology dimension {0} is not tracked (dimensions 0..=2)")]
    UnsupportedDimension(usize),

    #[error("unknown failure type `{0}`")]
    UnknownFailureType(String),

    #[error("invalid sampling distribution: {0}")]
    Sampling(String),
}

pub type Result<T> = std::result::Result<T, Error>;
