//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Place k centroids at k distinct random input points
//! 2. **Assign**: each point → nearest centroid (lowest index wins ties)
//! 3. **Update**: each centroid → mean of assigned points (empty clusters keep
//!    their centroid)
//! 4. Repeat until no assignment changes, or the iteration budget runs out
//!
//! Running out of budget is not an error; the last assignment is returned with
//! [`Termination::BudgetExhausted`].

use super::assignment::{Assignment, Diagnostics, Termination};
use super::point::{validate_points, Point};
use super::traits::Clusterer;
use super::util;
use crate::error::Result;
use rand::Rng;
use tracing::{debug, trace};

/// K-means parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct KmeansParams {
    /// Number of clusters.
    pub k: usize,
    /// Maximum assign/update iterations.
    pub max_iterations: usize,
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            k: 3,
            max_iterations: 100,
            seed: None,
        }
    }
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    params: KmeansParams,
}

impl Kmeans {
    /// Validate `params` and build the clusterer.
    pub fn new(params: KmeansParams) -> Result<Self> {
        util::require_positive_count("k", params.k)?;
        util::require_positive_count("max_iterations", params.max_iterations)?;
        Ok(Self { params })
    }

    /// Parameters this clusterer was built with.
    pub fn params(&self) -> &KmeansParams {
        &self.params
    }

    /// Run k-means drawing initial centroids from `rng`.
    pub fn cluster_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> Result<Assignment> {
        let dim = validate_points(points)?;
        let n = points.len();
        let k = self.params.k.min(n);
        debug!(n, dim, k, max_iterations = self.params.max_iterations, "kmeans: start");

        let init = util::sample_distinct(rng, n, k);
        let mut centroids = util::gather(points, &init, dim);
        let mut labels = vec![usize::MAX; n];
        let mut termination = Termination::BudgetExhausted {
            iterations: self.params.max_iterations,
        };

        for iteration in 1..=self.params.max_iterations {
            // Assignment step
            let mut changed = 0usize;
            for (label, p) in labels.iter_mut().zip(points) {
                let (c, _) = util::nearest(p.coords(), &centroids, dim);
                if *label != c {
                    *label = c;
                    changed += 1;
                }
            }
            trace!(iteration, changed, "kmeans: assigned");

            // `changed == n` on the first pass, so this never fires before an update.
            if changed == 0 {
                termination = Termination::Converged {
                    iterations: iteration,
                };
                break;
            }

            // Update step
            let mut sums = vec![0.0f64; k * dim];
            let mut counts = vec![0usize; k];
            for (&l, p) in labels.iter().zip(points) {
                counts[l] += 1;
                for (s, &x) in sums[l * dim..(l + 1) * dim].iter_mut().zip(p.coords()) {
                    *s += x;
                }
            }
            for c in 0..k {
                if counts[c] == 0 {
                    continue;
                }
                let inv = 1.0 / counts[c] as f64;
                for j in 0..dim {
                    centroids[c * dim + j] = sums[c * dim + j] * inv;
                }
            }
        }

        if let Termination::BudgetExhausted { .. } = termination {
            // Report labels that agree with the last centroid update.
            labels = util::assign_nearest(points, &centroids, dim);
        }

        debug!(?termination, "kmeans: done");
        let (labels, centroids) = util::compact(&labels, &centroids, dim);
        let n_clusters = centroids.len();
        Ok(Assignment::new(
            labels,
            n_clusters,
            termination,
            Diagnostics::Centroids { centroids },
        ))
    }
}

impl Clusterer for Kmeans {
    fn cluster(&self, points: &[Point]) -> Result<Assignment> {
        let mut rng = util::rng_from_seed(self.params.seed);
        self.cluster_with_rng(points, &mut *rng)
    }

    fn n_clusters(&self) -> usize {
        self.params.k
    }

    fn name(&self) -> &'static str {
        "kmeans"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn kmeans(k: usize, seed: u64) -> Kmeans {
        Kmeans::new(KmeansParams {
            k,
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    fn two_blobs() -> Vec<Point> {
        vec![
            Point::from([0.0, 0.0]),
            Point::from([0.1, 0.2]),
            Point::from([0.2, 0.1]),
            Point::from([10.0, 10.0]),
            Point::from([10.1, 9.9]),
            Point::from([9.9, 10.1]),
        ]
    }

    #[test]
    fn test_kmeans_two_blobs() {
        let out = kmeans(2, 1).cluster(&two_blobs()).unwrap();
        let labels = out.labels();
        assert_eq!(out.n_clusters(), 2);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[3]);
        assert!(matches!(out.termination(), Termination::Converged { .. }));
        assert_eq!(out.centroids().unwrap().len(), 2);
    }

    #[test]
    fn test_kmeans_seeded_is_deterministic() {
        let data: Vec<Point> = (0..40)
            .map(|i| Point::from([(i % 7) as f64, (i * 3 % 11) as f64]))
            .collect();
        let a = kmeans(4, 99).cluster(&data).unwrap();
        let b = kmeans(4, 99).cluster(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_kmeans_identical_points() {
        let data = vec![Point::from([3.0, 3.0]); 5];
        let out = kmeans(3, 5).cluster(&data).unwrap();
        assert!(out.labels().iter().all(|&l| l == Some(0)));
        assert_eq!(out.n_clusters(), 1);
    }

    #[test]
    fn test_kmeans_fewer_points_than_clusters() {
        let data = vec![Point::from([0.0]), Point::from([4.0])];
        let out = kmeans(5, 3).cluster(&data).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.n_clusters(), 2);
        assert_ne!(out.label(0), out.label(1));
    }

    #[test]
    fn test_kmeans_budget_exhausted_still_returns() {
        let data: Vec<Point> = (0..30).map(|i| Point::from([i as f64])).collect();
        let model = Kmeans::new(KmeansParams {
            k: 3,
            max_iterations: 1,
            seed: Some(0),
        })
        .unwrap();
        let out = model.cluster(&data).unwrap();
        assert_eq!(
            out.termination(),
            Termination::BudgetExhausted { iterations: 1 }
        );
        assert_eq!(out.len(), 30);
    }

    #[test]
    fn test_kmeans_invalid_params() {
        let zero_k = Kmeans::new(KmeansParams {
            k: 0,
            ..Default::default()
        });
        assert!(matches!(zero_k, Err(Error::InvalidParameter { name: "k", .. })));

        let zero_iter = Kmeans::new(KmeansParams {
            max_iterations: 0,
            ..Default::default()
        });
        assert!(zero_iter.unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn test_kmeans_empty_input() {
        let err = kmeans(2, 0).cluster(&[]).unwrap_err();
        assert_eq!(err, Error::EmptyInput);
    }
}
