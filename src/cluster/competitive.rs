//! Competitive learning: a single layer of winner-take-all neurons.
//!
//! Each of the `k` neurons is a weight vector in input space. Presenting a
//! point moves only the nearest neuron (the winner) toward it:
//!
//! ```text
//! w_win += η (x - w_win)
//! ```
//!
//! Losers are untouched; there is no neighborhood function and no learning
//! rate decay. After training every point is labelled with its nearest neuron.
//!
//! The result depends on initialization and on the order points are
//! presented in, see [`PresentationOrder`]. Both draw from the RNG passed to
//! [`CompetitiveLearning::cluster_with_rng`].

use super::assignment::{Assignment, Diagnostics, Termination};
use super::point::{validate_points, Point};
use super::traits::Clusterer;
use super::util;
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

/// Order in which points are presented within one epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresentationOrder {
    /// Input order, every epoch.
    Sequential,
    /// A fresh shuffle of the input order every epoch.
    #[default]
    Shuffled,
}

/// Competitive learning parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CompetitiveParams {
    /// Number of neurons (clusters).
    pub k: usize,
    /// Step size η in `(0, 1]`.
    pub learning_rate: f64,
    /// Maximum number of passes over the data.
    pub epochs: usize,
    /// Stop once the summed neuron movement of an epoch is below this.
    pub tolerance: f64,
    /// Presentation order policy.
    pub order: PresentationOrder,
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for CompetitiveParams {
    fn default() -> Self {
        Self {
            k: 3,
            learning_rate: 0.1,
            epochs: 100,
            tolerance: 1e-6,
            order: PresentationOrder::Shuffled,
            seed: None,
        }
    }
}

/// Winner-take-all competitive learning network.
#[derive(Debug, Clone)]
pub struct CompetitiveLearning {
    params: CompetitiveParams,
}

impl CompetitiveLearning {
    /// Validate `params` and build the network.
    pub fn new(params: CompetitiveParams) -> Result<Self> {
        util::require_positive_count("k", params.k)?;
        util::require_positive_count("epochs", params.epochs)?;
        if !(params.learning_rate > 0.0 && params.learning_rate <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "learning_rate",
                message: "must be in (0, 1]",
            });
        }
        util::require_finite_non_negative("tolerance", params.tolerance)?;
        Ok(Self { params })
    }

    /// Parameters this network was built with.
    pub fn params(&self) -> &CompetitiveParams {
        &self.params
    }

    /// Train on `points` and label them, drawing all randomness from `rng`.
    pub fn cluster_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> Result<Assignment> {
        let dim = validate_points(points)?;
        let n = points.len();
        let k = self.params.k.min(n);
        let eta = self.params.learning_rate;
        debug!(
            n,
            dim,
            k,
            eta,
            epochs = self.params.epochs,
            order = ?self.params.order,
            "competitive: start"
        );

        let init = util::sample_distinct(rng, n, k);
        let mut weights = util::gather(points, &init, dim);
        let mut order: Vec<usize> = (0..n).collect();
        let mut termination = Termination::BudgetExhausted {
            iterations: self.params.epochs,
        };

        for epoch in 1..=self.params.epochs {
            if self.params.order == PresentationOrder::Shuffled {
                order.shuffle(rng);
            }

            let mut movement = 0.0;
            for &i in &order {
                let x = points[i].coords();
                let (winner, _) = util::nearest(x, &weights, dim);
                let w = &mut weights[winner * dim..(winner + 1) * dim];
                let mut step = 0.0;
                for (wj, &xj) in w.iter_mut().zip(x) {
                    let delta = eta * (xj - *wj);
                    *wj += delta;
                    step += delta * delta;
                }
                movement += step.sqrt();
            }
            trace!(epoch, movement, "competitive: epoch");

            if movement < self.params.tolerance {
                termination = Termination::Converged { iterations: epoch };
                break;
            }
        }

        debug!(?termination, "competitive: done");
        let raw = util::assign_nearest(points, &weights, dim);
        let (labels, centroids) = util::compact(&raw, &weights, dim);
        let n_clusters = centroids.len();
        Ok(Assignment::new(
            labels,
            n_clusters,
            termination,
            Diagnostics::Centroids { centroids },
        ))
    }
}

impl Clusterer for CompetitiveLearning {
    fn cluster(&self, points: &[Point]) -> Result<Assignment> {
        let mut rng = util::rng_from_seed(self.params.seed);
        self.cluster_with_rng(points, &mut *rng)
    }

    fn n_clusters(&self) -> usize {
        self.params.k
    }

    fn name(&self) -> &'static str {
        "competitive"
    }
}
