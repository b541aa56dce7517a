//! The result of a clustering run.

use super::point::Point;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The convergence criterion was met after `iterations` iterations.
    Converged {
        /// Iterations (or epochs) performed.
        iterations: usize,
    },
    /// The iteration budget ran out. The best-known result is still returned.
    BudgetExhausted {
        /// Iterations (or cycles) performed.
        iterations: usize,
    },
    /// A one-shot algorithm (DBSCAN) finished its single pass.
    SinglePass,
}

/// A 2-D pheromone intensity map, indexed by `(col, row)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneGrid {
    cols: usize,
    rows: usize,
    values: Vec<f64>,
}

impl PheromoneGrid {
    pub(crate) fn filled(cols: usize, rows: usize, value: f64) -> Self {
        Self {
            cols,
            rows,
            values: vec![value; cols * rows],
        }
    }

    /// Grid width.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid height.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Intensity at `(col, row)`, or `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.cols && row < self.rows {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// Intensities in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// `(col, row)` of a row-major cell index.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }
}

/// Algorithm-specific observability data attached to an [`Assignment`].
///
/// None of this is needed to interpret the labels.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostics {
    /// Final centroids (KMeans, competitive learning), indexed by label.
    Centroids {
        /// One centroid per label.
        centroids: Vec<Point>,
    },
    /// PSO global best.
    Swarm {
        /// Global-best centroids, indexed by label.
        centroids: Vec<Point>,
        /// Global-best fitness after initialization and after each iteration.
        best_fitness: Vec<f64>,
    },
    /// DBSCAN density information.
    Density {
        /// Indices of noise points, ascending.
        noise: Vec<usize>,
        /// `core[i]` is true when point `i` is a core point.
        core: Vec<bool>,
    },
    /// ACO best trail.
    Colony {
        /// Representatives of the best cells, indexed by label.
        centers: Vec<Point>,
        /// `(col, row)` of the best cells, indexed by label.
        cells: Vec<(usize, usize)>,
        /// Pheromone at the end of the run.
        pheromone: PheromoneGrid,
        /// Global-best fitness after each cycle.
        best_fitness: Vec<f64>,
    },
}

/// Cluster labels for a point set, plus run metadata.
///
/// Labels are contiguous in `[0, n_clusters)`; `None` marks noise (DBSCAN only).
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    labels: Vec<Option<usize>>,
    n_clusters: usize,
    termination: Termination,
    diagnostics: Diagnostics,
}

impl Assignment {
    pub(crate) fn new(
        labels: Vec<Option<usize>>,
        n_clusters: usize,
        termination: Termination,
        diagnostics: Diagnostics,
    ) -> Self {
        debug_assert!(labels.iter().flatten().all(|&l| l < n_clusters));
        Self {
            labels,
            n_clusters,
            termination,
            diagnostics,
        }
    }

    /// One label per input point, `None` for noise.
    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    /// Label of point `index`.
    pub fn label(&self, index: usize) -> Option<usize> {
        self.labels.get(index).copied().flatten()
    }

    /// Number of distinct (non-noise) labels.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of labelled points.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when there are no labels (never the case for a successful run).
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices of points labelled noise.
    pub fn noise(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Member indices per cluster, indexed by label.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new(); self.n_clusters];
        for (i, l) in self.labels.iter().enumerate() {
            if let Some(l) = l {
                out[*l].push(i);
            }
        }
        out
    }

    /// How the run ended.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Algorithm-specific metadata.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Final representatives (centroids, best centroids or best centers), if any.
    pub fn centroids(&self) -> Option<&[Point]> {
        match &self.diagnostics {
            Diagnostics::Centroids { centroids } | Diagnostics::Swarm { centroids, .. } => {
                Some(centroids)
            }
            Diagnostics::Colony { centers, .. } => Some(centers),
            Diagnostics::Density { .. } => None,
        }
    }

    /// Best-fitness history for the swarm / colony algorithms.
    pub fn best_fitness_history(&self) -> Option<&[f64]> {
        match &self.diagnostics {
            Diagnostics::Swarm { best_fitness, .. } | Diagnostics::Colony { best_fitness, .. } => {
                Some(best_fitness)
            }
            _ => None,
        }
    }

    /// Labels with noise mapped to `NOISE` (`usize::MAX`).
    pub fn to_dense(&self) -> Vec<usize> {
        self.labels
            .iter()
            .map(|l| l.unwrap_or(super::NOISE))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clusters_and_noise() {
        let a = Assignment::new(
            vec![Some(0), None, Some(1), Some(0)],
            2,
            Termination::SinglePass,
            Diagnostics::Density {
                noise: vec![1],
                core: vec![true, false, true, true],
            },
        );
        assert_eq!(a.clusters(), vec![vec![0, 3], vec![2]]);
        assert_eq!(a.noise(), vec![1]);
        assert_eq!(a.label(1), None);
        assert_eq!(a.to_dense()[1], usize::MAX);
        assert!(a.centroids().is_none());
    }

    #[test]
    fn test_pheromone_grid_indexing() {
        let g = PheromoneGrid::filled(3, 2, 1.5);
        assert_eq!(g.get(2, 1), Some(1.5));
        assert_eq!(g.get(3, 0), None);
        assert_eq!(g.cell_of(4), (1, 1));
    }
}
