//! Points and the Euclidean metric shared by every clusterer.

use crate::error::{Error, Result};

/// An immutable position in `d`-dimensional space.
///
/// Identity is positional: two points with equal coordinates are still
/// distinct entries in the slice handed to a clusterer.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coords: Box<[f64]>,
}

impl Point {
    /// Create a point from its coordinates.
    ///
    /// ```
    /// use swarmclust::Point;
    /// let p = Point::new(vec![1.0, 2.0]);
    /// assert_eq!(p.dim(), 2);
    /// ```
    pub fn new(coords: Vec<f64>) -> Self {
        Self {
            coords: coords.into_boxed_slice(),
        }
    }

    /// Number of coordinates.
    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(&self.coords, &other.coords)
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn squared_distance(&self, other: &Point) -> f64 {
        squared_euclidean(&self.coords, &other.coords)
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Self::new(coords.to_vec())
    }
}

impl AsRef<[f64]> for Point {
    fn as_ref(&self) -> &[f64] {
        &self.coords
    }
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[inline]
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Check the preconditions of `cluster` and return the common dimensionality.
pub(crate) fn validate_points(points: &[Point]) -> Result<usize> {
    let first = points.first().ok_or(Error::EmptyInput)?;
    let dim = first.dim();
    if dim == 0 {
        return Err(Error::DimensionMismatch {
            index: 0,
            expected: 1,
            found: 0,
        });
    }
    for (index, p) in points.iter().enumerate() {
        if p.dim() != dim {
            return Err(Error::DimensionMismatch {
                index,
                expected: dim,
                found: p.dim(),
            });
        }
        if p.coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::NonFiniteCoordinate { index });
        }
    }
    Ok(dim)
}

/// Axis-aligned bounding box of a non-empty point set.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoundingBox {
    pub(crate) min: Vec<f64>,
    pub(crate) max: Vec<f64>,
}

impl BoundingBox {
    pub(crate) fn of(points: &[Point], dim: usize) -> Self {
        let mut min = vec![f64::INFINITY; dim];
        let mut max = vec![f64::NEG_INFINITY; dim];
        for p in points {
            for (j, &c) in p.coords().iter().enumerate() {
                min[j] = min[j].min(c);
                max[j] = max[j].max(c);
            }
        }
        Self { min, max }
    }

    #[inline]
    pub(crate) fn span(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    #[inline]
    pub(crate) fn clamp(&self, axis: usize, value: f64) -> f64 {
        value.clamp(self.min[axis], self.max[axis])
    }
}
