//! Tunables for every algorithm, as one immutable value.
//!
//! The defaults reproduce the reference parameter table. Any subset of keys can
//! be supplied through serde; missing keys keep their default.
//!
//! ```
//! use swarmclust::ClustererConfig;
//!
//! let config = ClustererConfig {
//!     cluster_count: 2,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! assert_eq!(config.aco.grid_size, 100);
//! ```

use crate::cluster::{
    AcoParams, CompetitiveParams, DbscanParams, KmeansParams, PresentationOrder, PsoParams,
};
use serde::{Deserialize, Serialize};

/// All tunables, shared by the selection layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClustererConfig {
    /// Target number of clusters, for every algorithm except DBSCAN.
    pub cluster_count: usize,
    /// RNG seed handed to every randomized algorithm. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Ant colony settings.
    pub aco: AcoConfig,
    /// Particle swarm settings.
    pub pso: PsoConfig,
    /// Competitive learning settings.
    pub competitive: CompetitiveConfig,
    /// DBSCAN settings.
    pub dbscan: DbscanConfig,
    /// K-means settings.
    pub kmeans: KmeansConfig,
}

impl Default for ClustererConfig {
    fn default() -> Self {
        Self {
            cluster_count: 3,
            seed: None,
            aco: AcoConfig::default(),
            pso: PsoConfig::default(),
            competitive: CompetitiveConfig::default(),
            dbscan: DbscanConfig::default(),
            kmeans: KmeansConfig::default(),
        }
    }
}

/// `aco.*` keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcoConfig {
    /// Ants per cycle.
    pub ants: usize,
    /// Cells per grid axis.
    pub grid_size: usize,
    /// Pheromone exponent.
    pub k1: f64,
    /// Desirability exponent.
    pub k2: f64,
    /// Reach of a point's contribution to cell desirability.
    pub radius: f64,
    /// Construction cycles per run.
    pub cycles: usize,
    /// Pheromone fraction lost per cycle.
    pub evaporation: f64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 200,
            grid_size: 100,
            k1: 3.0,
            k2: 1.0,
            radius: 9500.0,
            cycles: 50,
            evaporation: 0.1,
        }
    }
}

/// `pso.*` keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PsoConfig {
    /// Swarm size.
    pub particles: usize,
    /// Iterations per run; PSO always runs all of them.
    pub max_iterations: usize,
    /// Weight on the previous velocity.
    pub inertia: f64,
    /// Pull toward each particle's own best.
    pub cognitive: f64,
    /// Pull toward the swarm's best.
    pub social: f64,
    /// Velocity bound as a fraction of the data extent.
    pub velocity_limit: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particles: 80,
            max_iterations: 1000,
            inertia: 1.0,
            cognitive: 3.5,
            social: 3.5,
            velocity_limit: 0.25,
        }
    }
}

/// `competitive.*` keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitiveConfig {
    /// Winner step size, in `(0, 1]`.
    pub learning_rate: f64,
    /// Maximum passes over the data.
    pub epochs: usize,
    /// Per-epoch neuron movement below which training stops.
    pub tolerance: f64,
    /// Present points in input order instead of a per-epoch shuffle.
    pub sequential: bool,
}

impl Default for CompetitiveConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 100,
            tolerance: 1e-6,
            sequential: false,
        }
    }
}

/// `dbscan.*` keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DbscanConfig {
    /// Neighborhood size, self included, that makes a core point.
    pub min_points: usize,
    /// Neighborhood radius.
    pub epsilon: f64,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self {
            min_points: 8,
            epsilon: 9.5,
        }
    }
}

/// `kmeans.*` keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KmeansConfig {
    /// Assign/update iterations before giving up on convergence.
    pub max_iterations: usize,
}

impl Default for KmeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

impl ClustererConfig {
    /// Parameters for [`crate::cluster::Kmeans`].
    pub fn kmeans_params(&self) -> KmeansParams {
        KmeansParams {
            k: self.cluster_count,
            max_iterations: self.kmeans.max_iterations,
            seed: self.seed,
        }
    }

    /// Parameters for [`crate::cluster::CompetitiveLearning`].
    pub fn competitive_params(&self) -> CompetitiveParams {
        CompetitiveParams {
            k: self.cluster_count,
            learning_rate: self.competitive.learning_rate,
            epochs: self.competitive.epochs,
            tolerance: self.competitive.tolerance,
            order: if self.competitive.sequential {
                PresentationOrder::Sequential
            } else {
                PresentationOrder::Shuffled
            },
            seed: self.seed,
        }
    }

    /// Parameters for [`crate::cluster::Dbscan`].
    pub fn dbscan_params(&self) -> DbscanParams {
        DbscanParams {
            epsilon: self.dbscan.epsilon,
            min_points: self.dbscan.min_points,
        }
    }

    /// Parameters for [`crate::cluster::PsoClusterer`].
    pub fn pso_params(&self) -> PsoParams {
        PsoParams {
            k: self.cluster_count,
            num_particles: self.pso.particles,
            max_iterations: self.pso.max_iterations,
            inertia: self.pso.inertia,
            cognitive: self.pso.cognitive,
            social: self.pso.social,
            velocity_limit: self.pso.velocity_limit,
            seed: self.seed,
        }
    }

    /// Parameters for [`crate::cluster::AcoClusterer`].
    pub fn aco_params(&self) -> AcoParams {
        AcoParams {
            k: self.cluster_count,
            num_ants: self.aco.ants,
            grid_size: self.aco.grid_size,
            k1: self.aco.k1,
            k2: self.aco.k2,
            radius: self.aco.radius,
            cycles: self.aco.cycles,
            evaporation: self.aco.evaporation,
            seed: self.seed,
        }
    }
}
