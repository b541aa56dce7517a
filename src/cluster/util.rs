//! Numeric helpers shared by the centroid-based clusterers.
//!
//! Centroid sets are stored flat: `k * dim` values, centroid `c` occupying
//! `c * dim..(c + 1) * dim`.

use super::point::{squared_euclidean, Point};
use crate::error::{Error, Result};
use rand::prelude::*;

pub(crate) fn rng_from_seed(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    }
}

/// `min(k, n)` distinct indices out of `0..n`, in sampling order.
pub(crate) fn sample_distinct<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k.min(n)).into_vec()
}

/// Flatten the points at `indices` into a centroid set.
pub(crate) fn gather(points: &[Point], indices: &[usize], dim: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(indices.len() * dim);
    for &i in indices {
        out.extend_from_slice(points[i].coords());
    }
    out
}

/// Index of, and squared distance to, the nearest centroid.
///
/// Ties go to the lowest centroid index.
#[inline]
pub(crate) fn nearest(point: &[f64], centroids: &[f64], dim: usize) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.chunks_exact(dim).enumerate() {
        let d = squared_euclidean(point, centroid);
        if d < best_dist {
            best_dist = d;
            best = c;
        }
    }
    (best, best_dist)
}

/// Sum over points of the squared distance to the nearest centroid.
pub(crate) fn sum_squared_error(points: &[Point], centroids: &[f64], dim: usize) -> f64 {
    points
        .iter()
        .map(|p| nearest(p.coords(), centroids, dim).1)
        .sum()
}

pub(crate) fn assign_nearest(points: &[Point], centroids: &[f64], dim: usize) -> Vec<usize> {
    points
        .iter()
        .map(|p| nearest(p.coords(), centroids, dim).0)
        .collect()
}

/// Renumber raw centroid labels densely, dropping centroids nobody uses.
///
/// Returns the new labels and, per new label, the original centroid index.
/// Surviving centroids keep their relative order, so label 0 always belongs
/// to the lowest-index centroid in use.
pub(crate) fn compact_labels(raw: &[usize], k: usize) -> (Vec<Option<usize>>, Vec<usize>) {
    let mut used = vec![false; k];
    for &l in raw {
        used[l] = true;
    }

    let mut remap = vec![usize::MAX; k];
    let mut kept = Vec::new();
    for c in (0..k).filter(|&c| used[c]) {
        remap[c] = kept.len();
        kept.push(c);
    }

    let labels = raw.iter().map(|&l| Some(remap[l])).collect();
    (labels, kept)
}

/// [`compact_labels`] plus the surviving centroids as points.
pub(crate) fn compact(
    raw: &[usize],
    centroids: &[f64],
    dim: usize,
) -> (Vec<Option<usize>>, Vec<Point>) {
    let (labels, kept) = compact_labels(raw, centroids.len() / dim);
    let kept = kept
        .into_iter()
        .map(|c| Point::new(centroids[c * dim..(c + 1) * dim].to_vec()))
        .collect();
    (labels, kept)
}

pub(crate) fn require_positive_count(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidParameter {
            name,
            message: "must be at least 1",
        });
    }
    Ok(())
}

pub(crate) fn require_finite_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidParameter {
            name,
            message: "must be finite and non-negative",
        });
    }
    Ok(())
}

pub(crate) fn require_finite_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter {
            name,
            message: "must be finite and positive",
        });
    }
    Ok(())
}
