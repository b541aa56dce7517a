//! Error types.

use thiserror::Error;

/// Errors returned by clusterers and the selection layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch at point {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Expected dimensionality (that of the first point).
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("non-finite coordinate in point {index}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// Invalid parameter value, reported when a clusterer is constructed.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// The selection layer does not know this algorithm identifier.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// A weighted random draw could not be performed.
    #[error("sampling failed: {0}")]
    Sampling(String),
}

impl Error {
    /// True for errors caused by the point set passed to `cluster`.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput | Error::DimensionMismatch { .. } | Error::NonFiniteCoordinate { .. }
        )
    }

    /// True for errors caused by out-of-domain tunables.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
