//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN is a density-based clustering algorithm that groups points based on
//! neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors.
//! - **MinPts**: Minimum size of a point's ε-neighborhood (the point itself
//!   included) for it to be "core".
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. Visit points in ascending index order. For each unvisited point P:
//!    - Find neighbors within ε
//!    - If |neighbors| < MinPts, mark as noise (may become a border point later)
//!    - Else P is core: start new cluster, expand from neighbors
//!
//! 2. Expansion is breadth-first. Every dequeued point joins the cluster;
//!    if it is core, its own neighbors are enqueued.
//!
//! Visiting order and FIFO expansion fix the result: the same input always
//! produces the same labels, and a border point reachable from two clusters
//! joins the one discovered first.
//!
//! ## Neighborhood Index
//!
//! Region queries go through a uniform grid with cell side ε over the first
//! `min(dim, 3)` coordinates. A query scans the `3^g` cells around the query
//! point and confirms each candidate with the full distance, so the result is
//! exact in any dimension.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use super::assignment::{Assignment, Diagnostics, Termination};
use super::point::{squared_euclidean, validate_points, Point};
use super::traits::Clusterer;
use super::util;
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Dense-label encoding of noise, as produced by [`Assignment::to_dense`].
pub const NOISE: usize = usize::MAX;

const MAX_GRID_AXES: usize = 3;

/// DBSCAN parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct DbscanParams {
    /// Epsilon: maximum distance for neighborhood.
    pub epsilon: f64,
    /// Minimum neighborhood size (including the point) for a core point.
    pub min_points: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            epsilon: 9.5,
            min_points: 8,
        }
    }
}

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Typical Values
    ///
    /// - `epsilon`: Often determined by k-distance plot (k = min_points - 1).
    /// - `min_points`: 2 * dimension is a common heuristic.
    pub fn new(params: DbscanParams) -> Result<Self> {
        util::require_finite_positive("epsilon", params.epsilon)?;
        util::require_positive_count("min_points", params.min_points)?;
        Ok(Self { params })
    }

    /// Shorthand for `Dbscan::new(DbscanParams { epsilon, min_points })`.
    pub fn with(epsilon: f64, min_points: usize) -> Result<Self> {
        Self::new(DbscanParams {
            epsilon,
            min_points,
        })
    }

    /// Parameters this clusterer was built with.
    pub fn params(&self) -> &DbscanParams {
        &self.params
    }
}

impl Clusterer for Dbscan {
    fn cluster(&self, points: &[Point]) -> Result<Assignment> {
        let dim = validate_points(points)?;
        let n = points.len();
        let min_points = self.params.min_points;
        debug!(n, dim, epsilon = self.params.epsilon, min_points, "dbscan: start");

        let index = GridIndex::build(points, dim, self.params.epsilon);
        let mut labels: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut core = vec![false; n];
        let mut cluster_id = 0usize;
        let mut queue = VecDeque::new();

        for point_idx in 0..n {
            if visited[point_idx] {
                continue;
            }
            visited[point_idx] = true;

            let neighbors = index.region_query(points, point_idx);
            if neighbors.len() < min_points {
                // Provisional noise: may still be absorbed as a border point.
                continue;
            }

            core[point_idx] = true;
            labels[point_idx] = Some(cluster_id);
            queue.clear();
            queue.extend(neighbors);

            while let Some(q) = queue.pop_front() {
                // Assign before the `visited` check so earlier noise can be promoted.
                if labels[q].is_none() {
                    labels[q] = Some(cluster_id);
                }
                if visited[q] {
                    continue;
                }
                visited[q] = true;

                let q_neighbors = index.region_query(points, q);
                if q_neighbors.len() >= min_points {
                    core[q] = true;
                    queue.extend(
                        q_neighbors
                            .into_iter()
                            .filter(|&m| !visited[m] || labels[m].is_none()),
                    );
                }
            }
            cluster_id += 1;
        }

        let noise: Vec<usize> = (0..n).filter(|&i| labels[i].is_none()).collect();
        debug!(clusters = cluster_id, noise = noise.len(), "dbscan: done");
        Ok(Assignment::new(
            labels,
            cluster_id,
            Termination::SinglePass,
            Diagnostics::Density { noise, core },
        ))
    }

    /// DBSCAN discovers clusters dynamically, so this returns 0.
    ///
    /// To get the actual number of clusters, use [`Assignment::n_clusters`].
    fn n_clusters(&self) -> usize {
        0
    }

    fn name(&self) -> &'static str {
        "dbscan"
    }
}

/// Uniform grid over the leading coordinates, cell side ε.
struct GridIndex {
    epsilon: f64,
    axes: usize,
    cells: HashMap<Vec<i64>, Vec<usize>>,
    offsets: Vec<Vec<i64>>,
}

impl GridIndex {
    fn build(points: &[Point], dim: usize, epsilon: f64) -> Self {
        let axes = dim.min(MAX_GRID_AXES);
        let mut cells: HashMap<Vec<i64>, Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            cells.entry(cell_key(p.coords(), axes, epsilon)).or_default().push(i);
        }

        // All offsets in {-1, 0, 1}^axes.
        let mut offsets: Vec<Vec<i64>> = vec![Vec::new()];
        for _ in 0..axes {
            offsets = offsets
                .into_iter()
                .flat_map(|o| {
                    (-1..=1).map(move |d| {
                        let mut next = o.clone();
                        next.push(d);
                        next
                    })
                })
                .collect();
        }

        Self {
            epsilon,
            axes,
            cells,
            offsets,
        }
    }

    /// Indices within ε of `points[idx]`, itself included, ascending.
    fn region_query(&self, points: &[Point], idx: usize) -> Vec<usize> {
        let p = points[idx].coords();
        let eps2 = self.epsilon * self.epsilon;
        let home = cell_key(p, self.axes, self.epsilon);

        let mut out = Vec::new();
        let mut key = vec![0i64; self.axes];
        for offset in &self.offsets {
            for (k, (h, o)) in key.iter_mut().zip(home.iter().zip(offset)) {
                *k = h.saturating_add(*o);
            }
            if let Some(members) = self.cells.get(&key) {
                out.extend(
                    members
                        .iter()
                        .copied()
                        .filter(|&j| squared_euclidean(p, points[j].coords()) <= eps2),
                );
            }
        }
        out.sort_unstable();
        out
    }
}

#[inline]
fn cell_key(coords: &[f64], axes: usize, epsilon: f64) -> Vec<i64> {
    coords[..axes]
        .iter()
        .map(|&c| (c / epsilon).floor() as i64)
        .collect()
}
