use super::assignment::Assignment;
use super::point::Point;
use crate::error::Result;

/// Common interface for every clustering algorithm in this crate.
///
/// Implementations hold only their (validated) parameters. All
/// per-run state lives inside `cluster`, so one instance can run any number
/// of times, and concurrent runs never observe each other.
pub trait Clusterer {
    /// Partition `points` and return one label per input point.
    ///
    /// Fails with an invalid-input error when `points` is empty, has mixed
    /// dimensionality, or contains non-finite coordinates.
    fn cluster(&self, points: &[Point]) -> Result<Assignment>;

    /// The configured number of clusters.
    ///
    /// For algorithms that discover the number of clusters dynamically (e.g. DBSCAN),
    /// this returns 0.
    fn n_clusters(&self) -> usize;

    /// Short algorithm identifier, as accepted by the registry.
    fn name(&self) -> &'static str;
}

impl<C: Clusterer + ?Sized> Clusterer for Box<C> {
    fn cluster(&self, points: &[Point]) -> Result<Assignment> {
        (**self).cluster(points)
    }

    fn n_clusters(&self) -> usize {
        (**self).n_clusters()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
