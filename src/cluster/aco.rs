//! Ant colony optimization over a grid of candidate cluster centers.
//!
//! A `grid_size × grid_size` grid is laid over the bounding box of the first
//! two coordinates (one-dimensional data gets a single row). Each cell is a
//! candidate center with a fixed *desirability*
//!
//! ```text
//! η(c) = ε + Σ_{p : d(p, c) ≤ radius} 1 / (1 + d(p, c))
//! ```
//!
//! measured in the gridded coordinates, and a *pheromone* level τ(c) that the
//! colony learns. Every cycle, each ant picks `k` distinct cells, each pick
//! drawn with probability proportional to `τ^k1 · η^k2` among the cells still
//! available. An ant's fitness is the sum of squared distances from each
//! point to its nearest chosen cell (lower is better).
//!
//! Once every ant of the cycle has finished, pheromone evaporates everywhere
//! and the cycle-best ant reinforces its cells. Ants never observe pheromone
//! written during their own cycle.
//!
//! For data with more than two coordinates a cell's representative uses the
//! cell center for the gridded axes and the inverse-distance weighted mean of
//! the points within `radius` for the rest.
//!
//! A grid too coarse for the data can put two true clusters in one cell.
//! That is a resolution trade-off, not an error.

use super::assignment::{Assignment, Diagnostics, PheromoneGrid, Termination};
use super::point::{euclidean, validate_points, BoundingBox, Point};
use super::traits::Clusterer;
use super::util;
use crate::error::{Error, Result};
use rand::Rng;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const INITIAL_PHEROMONE: f64 = 1.0;
const MIN_PHEROMONE: f64 = 1e-3;
const DESIRABILITY_FLOOR: f64 = 1e-6;
const GRID_AXES: usize = 2;

/// ACO clusterer parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct AcoParams {
    /// Number of cluster centers each ant places.
    pub k: usize,
    /// Ants released per cycle.
    pub num_ants: usize,
    /// Cells per grid axis.
    pub grid_size: usize,
    /// Pheromone exponent.
    pub k1: f64,
    /// Desirability exponent.
    pub k2: f64,
    /// Spatial reach of a point's contribution to desirability.
    pub radius: f64,
    /// Number of construction cycles.
    pub cycles: usize,
    /// Fraction of pheromone lost per cycle, in `[0, 1)`.
    pub evaporation: f64,
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            k: 3,
            num_ants: 200,
            grid_size: 100,
            k1: 3.0,
            k2: 1.0,
            radius: 9500.0,
            cycles: 50,
            evaporation: 0.1,
            seed: None,
        }
    }
}

/// Candidate centers: one representative point and desirability per cell.
struct CandidateGrid {
    cols: usize,
    rows: usize,
    dim: usize,
    representatives: Vec<f64>,
    desirability: Vec<f64>,
}

impl CandidateGrid {
    fn build(points: &[Point], dim: usize, grid_size: usize, radius: f64) -> Self {
        let bounds = BoundingBox::of(points, dim);
        let cols = grid_size;
        let rows = if dim >= GRID_AXES { grid_size } else { 1 };
        let axes = dim.min(GRID_AXES);

        let mut mean = vec![0.0; dim];
        for p in points {
            for (m, &x) in mean.iter_mut().zip(p.coords()) {
                *m += x;
            }
        }
        let inv_n = 1.0 / points.len() as f64;
        mean.iter_mut().for_each(|m| *m *= inv_n);

        let cell = |index: usize| -> (Vec<f64>, f64) {
            let (col, row) = (index % cols, index / cols);
            let mut rep = Vec::with_capacity(dim);
            rep.push(axis_center(&bounds, 0, col, cols));
            if axes > 1 {
                rep.push(axis_center(&bounds, 1, row, rows));
            }

            let mut eta = DESIRABILITY_FLOOR;
            let mut weight_sum = 0.0;
            let mut rest = vec![0.0; dim - axes];
            for p in points {
                let d = euclidean(&p.coords()[..axes], &rep[..axes]);
                if d > radius {
                    continue;
                }
                let w = 1.0 / (1.0 + d);
                eta += w;
                weight_sum += w;
                for (r, &x) in rest.iter_mut().zip(&p.coords()[axes..]) {
                    *r += w * x;
                }
            }
            if weight_sum > 0.0 {
                rep.extend(rest.iter().map(|r| r / weight_sum));
            } else {
                rep.extend_from_slice(&mean[axes..]);
            }
            (rep, eta)
        };

        #[cfg(feature = "parallel")]
        let cells: Vec<(Vec<f64>, f64)> = (0..cols * rows).into_par_iter().map(cell).collect();
        #[cfg(not(feature = "parallel"))]
        let cells: Vec<(Vec<f64>, f64)> = (0..cols * rows).map(cell).collect();

        let mut representatives = Vec::with_capacity(cells.len() * dim);
        let mut desirability = Vec::with_capacity(cells.len());
        for (rep, eta) in cells {
            representatives.extend(rep);
            desirability.push(eta);
        }

        Self {
            cols,
            rows,
            dim,
            representatives,
            desirability,
        }
    }

    fn len(&self) -> usize {
        self.desirability.len()
    }

    fn centers(&self, cells: &[usize]) -> Vec<f64> {
        let mut out = Vec::with_capacity(cells.len() * self.dim);
        for &c in cells {
            out.extend_from_slice(&self.representatives[c * self.dim..(c + 1) * self.dim]);
        }
        out
    }
}

#[inline]
fn axis_center(bounds: &BoundingBox, axis: usize, i: usize, count: usize) -> f64 {
    bounds.min[axis] + (i as f64 + 0.5) * bounds.span(axis) / count as f64
}

struct Ant {
    cells: Vec<usize>,
    fitness: f64,
}

/// Ant colony clusterer.
#[derive(Debug, Clone)]
pub struct AcoClusterer {
    params: AcoParams,
}

impl AcoClusterer {
    /// Validate `params` and build the clusterer.
    pub fn new(params: AcoParams) -> Result<Self> {
        util::require_positive_count("k", params.k)?;
        util::require_positive_count("num_ants", params.num_ants)?;
        util::require_positive_count("grid_size", params.grid_size)?;
        util::require_positive_count("cycles", params.cycles)?;
        util::require_finite_non_negative("k1", params.k1)?;
        util::require_finite_non_negative("k2", params.k2)?;
        util::require_finite_positive("radius", params.radius)?;
        if !(0.0..1.0).contains(&params.evaporation) {
            return Err(Error::InvalidParameter {
                name: "evaporation",
                message: "must be in [0, 1)",
            });
        }
        Ok(Self { params })
    }

    /// Parameters this clusterer was built with.
    pub fn params(&self) -> &AcoParams {
        &self.params
    }

    /// Run the colony, drawing every ant decision from `rng`.
    pub fn cluster_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> Result<Assignment> {
        let dim = validate_points(points)?;
        let n = points.len();
        let grid = CandidateGrid::build(points, dim, self.params.grid_size, self.params.radius);
        let k = self.params.k.min(grid.len());
        let AcoParams { k1, k2, .. } = self.params;
        debug!(
            n,
            dim,
            k,
            cols = grid.cols,
            rows = grid.rows,
            ants = self.params.num_ants,
            cycles = self.params.cycles,
            "aco: start"
        );

        let mut pheromone = PheromoneGrid::filled(grid.cols, grid.rows, INITIAL_PHEROMONE);
        let mut best_cells: Vec<usize> = Vec::new();
        let mut best_fitness = f64::INFINITY;
        let mut history = Vec::with_capacity(self.params.cycles);

        for cycle in 1..=self.params.cycles {
            // Pheromone is read-only for the whole cycle.
            let weights: Vec<f64> = pheromone
                .values()
                .iter()
                .zip(&grid.desirability)
                .map(|(&tau, &eta)| (tau.powf(k1) * eta.powf(k2)).max(f64::MIN_POSITIVE))
                .collect();

            let mut ants = Vec::with_capacity(self.params.num_ants);
            for _ in 0..self.params.num_ants {
                let cells = rand::seq::index::sample_weighted(rng, weights.len(), |i| weights[i], k)
                    .map_err(|e| Error::Sampling(e.to_string()))?
                    .into_vec();
                ants.push(Ant {
                    cells,
                    fitness: f64::INFINITY,
                });
            }
            evaluate_ants(&mut ants, &grid, points);

            // Lowest fitness wins; ties go to the earliest ant.
            let mut cycle_best = 0;
            for (i, ant) in ants.iter().enumerate() {
                if ant.fitness < ants[cycle_best].fitness {
                    cycle_best = i;
                }
            }
            let cycle_fitness = ants[cycle_best].fitness;
            // The first cycle always seeds the best, even when every fitness is infinite.
            if cycle == 1 || cycle_fitness < best_fitness {
                best_fitness = cycle_fitness;
                best_cells.clone_from(&ants[cycle_best].cells);
            }

            let retain = 1.0 - self.params.evaporation;
            for tau in pheromone.values_mut() {
                *tau = (*tau * retain).max(MIN_PHEROMONE);
            }
            // Equal fitness covers 0/0 and inf/inf.
            let deposit = if cycle_fitness == best_fitness {
                1.0
            } else {
                best_fitness / cycle_fitness
            };
            let values = pheromone.values_mut();
            for &c in &ants[cycle_best].cells {
                values[c] += deposit;
            }

            history.push(best_fitness);
            trace!(cycle, cycle_fitness, best = best_fitness, "aco: cycle");
        }

        debug!(best = best_fitness, "aco: done");
        let centers = grid.centers(&best_cells);
        let raw = util::assign_nearest(points, &centers, dim);
        let (labels, kept) = util::compact_labels(&raw, best_cells.len());
        let cells = kept.iter().map(|&c| pheromone.cell_of(best_cells[c])).collect();
        let centers = kept
            .iter()
            .map(|&c| Point::new(centers[c * dim..(c + 1) * dim].to_vec()))
            .collect::<Vec<_>>();
        let n_clusters = centers.len();

        Ok(Assignment::new(
            labels,
            n_clusters,
            Termination::BudgetExhausted {
                iterations: self.params.cycles,
            },
            Diagnostics::Colony {
                centers,
                cells,
                pheromone,
                best_fitness: history,
            },
        ))
    }
}

fn evaluate_ants(ants: &mut [Ant], grid: &CandidateGrid, points: &[Point]) {
    let evaluate = |ant: &mut Ant| {
        ant.fitness = util::sum_squared_error(points, &grid.centers(&ant.cells), grid.dim);
    };

    #[cfg(feature = "parallel")]
    ants.par_iter_mut().for_each(evaluate);

    #[cfg(not(feature = "parallel"))]
    ants.iter_mut().for_each(evaluate);
}

impl Clusterer for AcoClusterer {
    fn cluster(&self, points: &[Point]) -> Result<Assignment> {
        let mut rng = util::rng_from_seed(self.params.seed);
        self.cluster_with_rng(points, &mut *rng)
    }

    fn n_clusters(&self) -> usize {
        self.params.k
    }

    fn name(&self) -> &'static str {
        "aco"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(k: usize, grid_size: usize, seed: u64) -> AcoClusterer {
        AcoClusterer::new(AcoParams {
            k,
            num_ants: 30,
            grid_size,
            cycles: 20,
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    fn two_groups() -> Vec<Point> {
        vec![
            Point::from([0.0, 0.0]),
            Point::from([1.0, 0.0]),
            Point::from([0.0, 1.0]),
            Point::from([10.0, 10.0]),
            Point::from([11.0, 10.0]),
            Point::from([10.0, 11.0]),
        ]
    }

    #[test]
    fn test_best_fitness_never_increases() {
        let out = small(2, 20, 8).cluster(&two_groups()).unwrap();
        let history = out.best_fitness_history().unwrap();
        assert_eq!(history.len(), 20);
        for w in history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_separates_two_groups() {
        let out = small(2, 20, 3).cluster(&two_groups()).unwrap();
        assert_eq!(out.n_clusters(), 2);
        let l = out.labels();
        assert!(l[0] == l[1] && l[1] == l[2]);
        assert!(l[3] == l[4] && l[4] == l[5]);
        assert_ne!(l[0], l[3]);
        match out.diagnostics() {
            Diagnostics::Colony {
                cells, pheromone, ..
            } => {
                assert_eq!(cells.len(), 2);
                assert_eq!((pheromone.cols(), pheromone.rows()), (20, 20));
                assert!(pheromone.values().iter().all(|&t| t >= MIN_PHEROMONE));
            }
            other => panic!("unexpected diagnostics: {other:?}"),
        }
    }

    #[test]
    fn test_pheromone_evaporates_and_best_cells_are_reinforced() {
        let model = small(2, 20, 11);
        let out = model.cluster(&two_groups()).unwrap();
        let (cells, pheromone) = match out.diagnostics() {
            Diagnostics::Colony {
                cells, pheromone, ..
            } => (cells, pheromone),
            other => panic!("unexpected diagnostics: {other:?}"),
        };

        let retain = 1.0 - model.params().evaporation;
        let untouched = retain.powi(model.params().cycles as i32).max(MIN_PHEROMONE);
        let is_untouched = |t: f64| (t - untouched).abs() <= 1e-12 * untouched;

        // At most one ant per cycle deposits, on at most k cells.
        let deposited = model.params().cycles * model.params().k;
        let evaporated_only = pheromone.values().iter().filter(|&&t| is_untouched(t)).count();
        assert!(evaporated_only >= pheromone.values().len() - deposited);

        assert!(!cells.is_empty());
        for &(col, row) in cells {
            let tau = pheromone.get(col, row).unwrap();
            assert!(tau > untouched, "best cell ({col}, {row}) holds {tau}");
        }
    }

    #[test]
    fn test_overflowing_distances_still_assign_every_point() {
        let data = vec![
            Point::from([1e200, -1e200]),
            Point::from([-1e200, 1e200]),
            Point::from([0.0, 0.0]),
        ];
        let out = small(2, 5, 4).cluster(&data).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.labels().iter().all(Option::is_some));
        assert!(out.n_clusters() >= 1);
        assert_eq!(out.centroids().unwrap().len(), out.n_clusters());
        let history = out.best_fitness_history().unwrap();
        assert!(history.iter().all(|f| f.is_infinite()));
    }

    #[test]
    fn test_coarse_grid_collapses_clusters() {
        let out = small(3, 1, 0).cluster(&two_groups()).unwrap();
        assert_eq!(out.n_clusters(), 1);
        assert!(out.labels().iter().all(|&l| l == Some(0)));
    }

    #[test]
    fn test_one_dimensional_uses_single_row() {
        let data: Vec<Point> = [0.0, 0.5, 1.0, 20.0, 20.5, 21.0]
            .iter()
            .map(|&x| Point::from([x]))
            .collect();
        let out = small(2, 42, 2).cluster(&data).unwrap();
        match out.diagnostics() {
            Diagnostics::Colony { pheromone, .. } => assert_eq!(pheromone.rows(), 1),
            other => panic!("unexpected diagnostics: {other:?}"),
        }
        assert_ne!(out.label(0), out.label(5));
        assert_eq!(out.label(0), out.label(2));
        assert_eq!(out.label(3), out.label(5));
    }

    #[test]
    fn test_higher_dimensions_get_weighted_mean() {
        let data = vec![
            Point::from([0.0, 0.0, 4.0]),
            Point::from([1.0, 1.0, 4.0]),
        ];
        let grid = CandidateGrid::build(&data, 3, 2, 100.0);
        // Every point has third coordinate 4, so every weighted mean is 4 as well.
        for c in 0..grid.len() {
            assert!((grid.representatives[c * 3 + 2] - 4.0).abs() < 1e-12);
        }
        assert!(grid.desirability.iter().all(|&e| e > DESIRABILITY_FLOOR));
    }

    #[test]
    fn test_invalid_params() {
        let bad_evap = AcoClusterer::new(AcoParams {
            evaporation: 1.0,
            ..Default::default()
        });
        assert!(matches!(
            bad_evap,
            Err(Error::InvalidParameter {
                name: "evaporation",
                ..
            })
        ));
        assert!(AcoClusterer::new(AcoParams {
            radius: -1.0,
            ..Default::default()
        })
        .is_err());
        assert!(AcoClusterer::new(AcoParams {
            grid_size: 0,
            ..Default::default()
        })
        .is_err());
    }
}
