//! Particle swarm optimization over centroid sets.
//!
//! Every particle is a full candidate solution: `k` centroids flattened into
//! one `k * dim` vector. Fitness is the sum of squared distances from each
//! point to its nearest candidate centroid (lower is better).
//!
//! Per iteration and per coordinate, with fresh `r1, r2 ~ U[0, 1)`:
//!
//! ```text
//! v ← ω v + c₁ r₁ (pbest − x) + c₂ r₂ (gbest − x)
//! x ← x + v
//! ```
//!
//! Velocities are clamped to `velocity_limit` times the bounding-box extent
//! of their coordinate, and positions to the bounding box. Without a clamp the
//! default (ω = 1, c₁ = c₂ = 3.5) swarm diverges.
//!
//! The swarm always runs its full iteration budget: fitness can plateau for
//! many iterations and then improve again. The personal and global bests only
//! change on strict improvement, so the recorded best fitness never increases.

use super::assignment::{Assignment, Diagnostics, Termination};
use super::point::{validate_points, BoundingBox, Point};
use super::traits::Clusterer;
use super::util;
use crate::error::Result;
use rand::Rng;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// PSO clusterer parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct PsoParams {
    /// Number of centroids per particle.
    pub k: usize,
    /// Swarm size.
    pub num_particles: usize,
    /// Number of iterations (always run in full).
    pub max_iterations: usize,
    /// Inertia weight ω.
    pub inertia: f64,
    /// Cognitive weight c₁ (pull toward the personal best).
    pub cognitive: f64,
    /// Social weight c₂ (pull toward the global best).
    pub social: f64,
    /// Per-coordinate velocity bound as a fraction of the data extent.
    pub velocity_limit: f64,
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            k: 3,
            num_particles: 80,
            max_iterations: 1000,
            inertia: 1.0,
            cognitive: 3.5,
            social: 3.5,
            velocity_limit: 0.25,
            seed: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_fitness: f64,
}

impl Particle {
    fn new(position: Vec<f64>) -> Self {
        Self {
            velocity: vec![0.0; position.len()],
            best_position: position.clone(),
            best_fitness: f64::INFINITY,
            position,
        }
    }

    fn evaluate(&mut self, points: &[Point], dim: usize) {
        let fitness = util::sum_squared_error(points, &self.position, dim);
        if fitness < self.best_fitness {
            self.best_fitness = fitness;
            self.best_position.copy_from_slice(&self.position);
        }
    }
}

/// Particle swarm clusterer.
#[derive(Debug, Clone)]
pub struct PsoClusterer {
    params: PsoParams,
}

impl PsoClusterer {
    /// Validate `params` and build the clusterer.
    pub fn new(params: PsoParams) -> Result<Self> {
        util::require_positive_count("k", params.k)?;
        util::require_positive_count("num_particles", params.num_particles)?;
        util::require_positive_count("max_iterations", params.max_iterations)?;
        util::require_finite_non_negative("inertia", params.inertia)?;
        util::require_finite_non_negative("cognitive", params.cognitive)?;
        util::require_finite_non_negative("social", params.social)?;
        util::require_finite_positive("velocity_limit", params.velocity_limit)?;
        Ok(Self { params })
    }

    /// Parameters this clusterer was built with.
    pub fn params(&self) -> &PsoParams {
        &self.params
    }

    /// Run the swarm, drawing initial positions and velocity factors from `rng`.
    pub fn cluster_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> Result<Assignment> {
        let dim = validate_points(points)?;
        let n = points.len();
        let k = self.params.k.min(n);
        let width = k * dim;
        let PsoParams {
            inertia,
            cognitive,
            social,
            ..
        } = self.params;
        debug!(
            n,
            dim,
            k,
            particles = self.params.num_particles,
            iterations = self.params.max_iterations,
            "pso: start"
        );

        let bounds = BoundingBox::of(points, dim);
        let vmax: Vec<f64> = (0..width)
            .map(|j| self.params.velocity_limit * bounds.span(j % dim))
            .collect();

        let mut swarm: Vec<Particle> = (0..self.params.num_particles)
            .map(|_| {
                let init = util::sample_distinct(rng, n, k);
                Particle::new(util::gather(points, &init, dim))
            })
            .collect();
        evaluate_swarm(&mut swarm, points, dim);

        // Seed from a real candidate so an all-infinite swarm still reports one.
        let mut global_best = swarm[0].best_position.clone();
        let mut global_fitness = swarm[0].best_fitness;
        update_global_best(&swarm, &mut global_best, &mut global_fitness);
        let mut history = Vec::with_capacity(self.params.max_iterations + 1);
        history.push(global_fitness);

        for iteration in 1..=self.params.max_iterations {
            for particle in &mut swarm {
                for j in 0..width {
                    let x = particle.position[j];
                    let r1: f64 = rng.random();
                    let r2: f64 = rng.random();
                    let v = inertia * particle.velocity[j]
                        + cognitive * r1 * (particle.best_position[j] - x)
                        + social * r2 * (global_best[j] - x);
                    let v = v.clamp(-vmax[j], vmax[j]);
                    particle.velocity[j] = v;
                    particle.position[j] = bounds.clamp(j % dim, x + v);
                }
            }

            // Barrier: every particle has moved before any fitness is read.
            evaluate_swarm(&mut swarm, points, dim);
            update_global_best(&swarm, &mut global_best, &mut global_fitness);
            history.push(global_fitness);
            trace!(iteration, best = global_fitness, "pso: iteration");
        }

        debug!(best = global_fitness, "pso: done");
        let raw = util::assign_nearest(points, &global_best, dim);
        let (labels, centroids) = util::compact(&raw, &global_best, dim);
        let n_clusters = centroids.len();
        Ok(Assignment::new(
            labels,
            n_clusters,
            Termination::BudgetExhausted {
                iterations: self.params.max_iterations,
            },
            Diagnostics::Swarm {
                centroids,
                best_fitness: history,
            },
        ))
    }
}

fn evaluate_swarm(swarm: &mut [Particle], points: &[Point], dim: usize) {
    #[cfg(feature = "parallel")]
    swarm
        .par_iter_mut()
        .for_each(|particle| particle.evaluate(points, dim));

    #[cfg(not(feature = "parallel"))]
    for particle in swarm.iter_mut() {
        particle.evaluate(points, dim);
    }
}

/// Adopt the best personal best if it strictly beats the current global best.
fn update_global_best(swarm: &[Particle], global_best: &mut [f64], global_fitness: &mut f64) {
    let mut best: Option<&Particle> = None;
    for p in swarm {
        if best.map_or(true, |b| p.best_fitness < b.best_fitness) {
            best = Some(p);
        }
    }
    if let Some(p) = best {
        if p.best_fitness < *global_fitness {
            *global_fitness = p.best_fitness;
            global_best.copy_from_slice(&p.best_position);
        }
    }
}

impl Clusterer for PsoClusterer {
    fn cluster(&self, points: &[Point]) -> Result<Assignment> {
        let mut rng = util::rng_from_seed(self.params.seed);
        self.cluster_with_rng(points, &mut *rng)
    }

    fn n_clusters(&self) -> usize {
        self.params.k
    }

    fn name(&self) -> &'static str {
        "pso"
    }
}
